//! Output format selection for serialized records
//!
//! - Json: one compact object per line
//! - Template: a compiled text template executed per record

use super::entry::Record;
use super::error::{LoggerError, Result};
use super::template::Template;
use std::io::Write;

/// Format identifier selecting JSON output
pub const JSON_FORMAT: &str = "json";

/// Serializer used by a standard logger
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OutputFormat {
    /// `{"level":"INFO","fields":{..},"time":"..","message":".."}`
    #[default]
    Json,

    /// Free-form text, see [`Template`]
    Template(Template),
}

impl OutputFormat {
    /// `"json"` selects JSON; anything else is compiled as a template.
    pub fn parse(format: &str) -> Result<Self> {
        if format == JSON_FORMAT {
            Ok(OutputFormat::Json)
        } else {
            Ok(OutputFormat::Template(Template::compile(format)?))
        }
    }

    /// Serialize one record into `out`.
    pub fn write(&self, record: &Record, out: &mut dyn Write) -> Result<()> {
        match self {
            OutputFormat::Json => {
                let mut line = serde_json::to_vec(record)?;
                line.push(b'\n');
                out.write_all(&line)?;
            }
            OutputFormat::Template(template) => template
                .execute(record, out)
                .map_err(|e| LoggerError::io_operation("executing template", "record skipped", e))?,
        }
        Ok(())
    }
}
