//! Standard logger configuration
//!
//! Decoded from a configuration mapping (`std`, `path`, `level`, `format`,
//! `timeformat`) with defaults for every missing key, or built in code with
//! the `with_*` methods.

use super::error::{LoggerError, Result};
use super::level::Level;
use super::output_format::JSON_FORMAT;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default record time pattern, `2006-01-02 15:04:05` style
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration for a [`StdLogger`](crate::StdLogger)
///
/// # Examples
///
/// ```
/// use bootlog::{Level, LoggerConfig};
///
/// let config = LoggerConfig::from_value(serde_json::json!({
///     "level": "warning",
///     "format": "{{.Level}} {{.Message}}\n",
/// }))
/// .unwrap();
///
/// assert_eq!(config.level, Level::Warning);
/// assert_eq!(config.timeformat, "%Y-%m-%d %H:%M:%S");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Also write to stdout when `path` is set
    pub std: bool,
    /// Log file, opened in append/create mode. `None` writes to stdout only.
    #[serde(deserialize_with = "empty_path_is_none")]
    pub path: Option<PathBuf>,
    /// Minimum level, by name or ordinal
    pub level: Level,
    /// `"json"` or a text template
    pub format: String,
    /// strftime pattern for the record time
    pub timeformat: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            std: false,
            path: None,
            level: Level::Debug,
            format: JSON_FORMAT.to_string(),
            timeformat: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

fn empty_path_is_none<'de, D>(deserializer: D) -> std::result::Result<Option<PathBuf>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let path: Option<String> = Option::deserialize(deserializer)?;
    Ok(path.filter(|p| !p.is_empty()).map(PathBuf::from))
}

impl LoggerConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a configuration mapping, filling in defaults.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value)
            .map_err(|e| LoggerError::config("LoggerConfig", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_std(mut self, std: bool) -> Self {
        self.std = std;
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    #[must_use]
    pub fn with_timeformat(mut self, timeformat: impl Into<String>) -> Self {
        self.timeformat = timeformat.into();
        self
    }

    /// Reject time patterns chrono can not render.
    pub fn validate(&self) -> Result<()> {
        if StrftimeItems::new(&self.timeformat).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!("invalid timeformat '{}'", self.timeformat),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert!(!config.std);
        assert!(config.path.is_none());
        assert_eq!(config.level, Level::Debug);
        assert_eq!(config.format, "json");
        assert_eq!(config.timeformat, DEFAULT_TIME_FORMAT);
    }

    #[test]
    fn test_from_value_fills_missing_keys() {
        let config = LoggerConfig::from_value(json!({ "std": true, "path": "app.log" })).unwrap();
        assert!(config.std);
        assert_eq!(config.path, Some(PathBuf::from("app.log")));
        assert_eq!(config.format, "json");
    }

    #[test]
    fn test_from_value_level_text_or_number() {
        let by_name = LoggerConfig::from_value(json!({ "level": "Error" })).unwrap();
        let by_number = LoggerConfig::from_value(json!({ "level": 3 })).unwrap();
        let by_numeric_text = LoggerConfig::from_value(json!({ "level": "3" })).unwrap();
        assert_eq!(by_name.level, Level::Error);
        assert_eq!(by_number.level, Level::Error);
        assert_eq!(by_numeric_text.level, Level::Error);
    }

    #[test]
    fn test_from_value_rejects_bad_level() {
        let err = LoggerConfig::from_value(json!({ "level": "chatty" })).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_empty_path_means_console() {
        let config = LoggerConfig::from_value(json!({ "path": "" })).unwrap();
        assert!(config.path.is_none());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = LoggerConfig::from_value(json!({ "rotate": "daily" })).unwrap();
        assert_eq!(config, LoggerConfig::default());
    }

    #[test]
    fn test_invalid_timeformat() {
        let config = LoggerConfig::new().with_timeformat("%Q");
        assert!(config.validate().is_err());
    }
}
