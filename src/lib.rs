//! # bootlog
//!
//! Leveled, structured logging for applications that start logging before
//! they know where their logs should go.
//!
//! ## Features
//!
//! - **Bootstrap buffering**: [`BootstrapLogger`] keeps every record until a
//!   real logger is configured, then replays them through it
//! - **Structured fields**: `with_field`/`with_fields` chains on every logger
//! - **JSON or templates**: one JSON object per line, or a text template
//! - **Low allocation**: records are pooled and reused across calls
//! - **Batched IO**: buffered writes flushed every 50 ms in the background
//!
//! ```
//! use bootlog::prelude::*;
//!
//! let boot = BootstrapLogger::new();
//! boot.info("starting");
//!
//! let logger = StdLogger::with_writer(LoggerConfig::new(), std::io::sink()).unwrap();
//! boot.handoff(&logger);
//! logger.with_field("user", "bob").info("login");
//! ```

pub mod core;
pub mod loggers;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        Entry, FieldValue, Fields, Level, Logger, LoggerConfig, LoggerError, LoggerMetrics,
        Result,
    };
    pub use crate::loggers::{BootstrapLogger, StdLogger};
}

pub use crate::core::{
    format_fields, format_file_line, format_file_line_array, format_stacks, AtomicLevel, Entry,
    EntryPool, FieldValue, Fields, Level, LogTime, Logger, LoggerConfig, LoggerError,
    LoggerMetrics, OutputFormat, Record, Result, Template, DEFAULT_TIME_FORMAT, TIME_KEY,
};
pub use crate::loggers::{BootstrapLogger, StdLogger, FLUSH_INTERVAL};
