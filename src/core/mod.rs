//! Core types: levels, fields, records, the pool, serializers, and the
//! logging façade

pub mod caller;
pub mod config;
pub mod entry;
pub mod error;
pub mod field;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod pool;
pub mod template;

pub use caller::{format_file_line, format_file_line_array, format_stacks};
pub use config::{LoggerConfig, DEFAULT_TIME_FORMAT};
pub use entry::{Entry, LogTime, Record, TIME_KEY};
pub use error::{LoggerError, Result};
pub use field::{format_fields, FieldValue, Fields};
pub use level::{AtomicLevel, Level};
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use pool::EntryPool;
pub use template::Template;
