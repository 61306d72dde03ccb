//! Log level definitions

use super::error::{LoggerError, Result};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Ordered severity of a log record. Lower values are less severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    #[default]
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
    Fatal = 4,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        Level::ALL.get(value as usize).copied()
    }

    /// Whether a record at this level passes a logger whose minimum is `min`.
    ///
    /// Fatal is never suppressed.
    #[inline]
    pub fn is_enabled(self, min: Level) -> bool {
        self >= min || self == Level::Fatal
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    /// Accepts a level name in any case, or its ordinal `0..=4`.
    fn from_str(s: &str) -> Result<Self> {
        let upper = s.to_uppercase();
        if let Some(level) = Level::ALL.iter().find(|l| l.as_str() == upper) {
            return Ok(*level);
        }

        match s.parse::<i64>() {
            Ok(n) if (0..=4).contains(&n) => Ok(Level::ALL[n as usize]),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct LevelVisitor;

        impl Visitor<'_> for LevelVisitor {
            type Value = Level;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a level name or an integer between 0 and 4")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Level, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Level, E> {
                u8::try_from(v)
                    .ok()
                    .and_then(Level::from_u8)
                    .ok_or_else(|| E::custom(LoggerError::invalid_level(v.to_string())))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Level, E> {
                u8::try_from(v)
                    .ok()
                    .and_then(Level::from_u8)
                    .ok_or_else(|| E::custom(LoggerError::invalid_level(v.to_string())))
            }
        }

        deserializer.deserialize_any(LevelVisitor)
    }
}

/// A [`Level`] that can be reconfigured while other threads read it.
#[derive(Debug, Default)]
pub struct AtomicLevel(AtomicU8);

impl AtomicLevel {
    pub const fn new(level: Level) -> Self {
        Self(AtomicU8::new(level as u8))
    }

    #[inline]
    pub fn load(&self) -> Level {
        // Only ever stores valid ordinals.
        Level::from_u8(self.0.load(Ordering::Acquire)).unwrap_or(Level::Fatal)
    }

    #[inline]
    pub fn store(&self, level: Level) {
        self.0.store(level as u8, Ordering::Release);
    }

    /// Parse `text` and store it. The stored value is unchanged on error.
    pub fn store_text(&self, text: &str) -> Result<()> {
        let level = text.parse()?;
        self.store(level);
        Ok(())
    }
}

impl From<Level> for AtomicLevel {
    fn from(level: Level) -> Self {
        Self::new(level)
    }
}
