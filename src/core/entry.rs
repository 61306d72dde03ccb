//! Log records and the fluent entry handle
//!
//! A [`Record`] is the data that gets serialized. An [`Entry`] owns one
//! record while the caller attaches fields, and hands it to its logger when a
//! severity method finalizes it.

use super::field::{FieldValue, Fields};
use super::level::Level;
use super::logger::Logger;
use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Key whose timestamp value overrides the record time.
pub const TIME_KEY: &str = "time";

/// Timestamp of a record together with its output pattern.
#[derive(Debug, Clone)]
pub struct LogTime {
    pub time: DateTime<Local>,
    pub format: Arc<str>,
}

impl LogTime {
    pub fn now(format: Arc<str>) -> Self {
        Self {
            time: Local::now(),
            format,
        }
    }
}

impl fmt::Display for LogTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.time.format(&self.format))
    }
}

impl Serialize for LogTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One structured log record.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub level: Level,
    #[serde(skip_serializing_if = "fields_are_empty")]
    pub fields: Option<Fields>,
    pub time: LogTime,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

fn fields_are_empty(fields: &Option<Fields>) -> bool {
    fields.as_ref().is_none_or(|f| f.is_empty())
}

impl Record {
    /// A fresh record stamped with the current time.
    pub fn new(time_format: Arc<str>) -> Self {
        Self {
            level: Level::Debug,
            fields: None,
            time: LogTime::now(time_format),
            message: String::new(),
        }
    }

    /// Attach one field.
    ///
    /// A timestamp under [`TIME_KEY`] replaces the record time. Any other
    /// value under that key is stored as an ordinary field.
    pub fn set_field(&mut self, key: String, value: FieldValue) {
        if key == TIME_KEY {
            if let Some(time) = value.as_time() {
                self.time.time = time;
                return;
            }
        }
        self.fields.get_or_insert_with(Fields::new).insert(key, value);
    }

    pub fn merge_fields(&mut self, fields: Fields) {
        for (key, value) in fields {
            self.set_field(key, value);
        }
    }

    /// Clear per-use state so the record can be handed out again.
    ///
    /// The field map keeps its allocation.
    pub fn reset(&mut self) {
        self.level = Level::Debug;
        if let Some(fields) = self.fields.as_mut() {
            fields.clear();
        }
        self.message.clear();
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.as_ref().and_then(|f| f.get(key))
    }
}

/// Fluent handle over a record that is still being built.
///
/// Severity methods consume the entry, so a finalized record can not be
/// touched again by the caller. Dropping an entry without finalizing it
/// returns the record to its logger through [`Logger::discard`].
pub struct Entry<'a> {
    record: Option<Box<Record>>,
    logger: &'a dyn Logger,
}

impl<'a> Entry<'a> {
    pub fn new(logger: &'a dyn Logger, record: Box<Record>) -> Self {
        Self {
            record: Some(record),
            logger,
        }
    }

    #[must_use = "an entry is only written by a severity method"]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        if let Some(record) = self.record.as_mut() {
            record.set_field(key.into(), value.into());
        }
        self
    }

    /// Merge `fields` into the entry, applying the same `"time"` rule as
    /// [`Entry::with_field`] to each pair.
    #[must_use = "an entry is only written by a severity method"]
    pub fn with_fields(mut self, fields: Fields) -> Self {
        if let Some(record) = self.record.as_mut() {
            record.merge_fields(fields);
        }
        self
    }

    pub fn record(&self) -> Option<&Record> {
        self.record.as_deref()
    }

    pub fn log(mut self, level: Level, message: impl Into<String>) {
        if let Some(mut record) = self.record.take() {
            record.level = level;
            record.message = message.into();
            self.logger.handle(record);
        }
    }

    #[inline]
    pub fn debug(self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    #[inline]
    pub fn info(self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    #[inline]
    pub fn warning(self, message: impl Into<String>) {
        self.log(Level::Warning, message);
    }

    #[inline]
    pub fn error(self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    /// Finalize at Fatal. On a standard logger this does not return.
    #[inline]
    pub fn fatal(self, message: impl Into<String>) {
        self.log(Level::Fatal, message);
    }
}

impl Drop for Entry<'_> {
    fn drop(&mut self) {
        if let Some(record) = self.record.take() {
            self.logger.discard(record);
        }
    }
}

impl fmt::Debug for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").field("record", &self.record).finish()
    }
}
