//! Text templates for non-JSON output
//!
//! A template is literal text with `{{...}}` actions referring to the
//! record being written:
//!
//! | Action             | Output                                   |
//! |--------------------|------------------------------------------|
//! | `{{.Level}}`       | level name, e.g. `WARNING`               |
//! | `{{.Time}}`        | record time in the configured pattern    |
//! | `{{.Message}}`     | message text                             |
//! | `{{.Fields}}`      | all fields as `k=v` pairs, keys sorted   |
//! | `{{.Fields.user}}` | one field, empty when absent             |
//!
//! Nothing is appended after the last segment; put a newline in the template
//! if records should be line separated.

use super::entry::Record;
use super::error::{LoggerError, Result};
use super::field::format_fields;
use std::fmt::Write as _;
use std::io::{self, Write};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Level,
    Time,
    Message,
    Fields,
    Field(String),
}

/// A compiled output template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn compile(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(start) = rest.find(OPEN) {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let action_start = start + OPEN.len();
            let len = rest[action_start..]
                .find(CLOSE)
                .ok_or_else(|| LoggerError::template(offset + start, "unterminated action"))?;

            let action = rest[action_start..action_start + len].trim();
            segments.push(Self::parse_action(action, offset + start)?);

            let consumed = action_start + len + CLOSE.len();
            offset += consumed;
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }

    fn parse_action(action: &str, offset: usize) -> Result<Segment> {
        match action {
            "" => Err(LoggerError::template(offset, "empty action")),
            ".Level" => Ok(Segment::Level),
            ".Time" => Ok(Segment::Time),
            ".Message" => Ok(Segment::Message),
            ".Fields" => Ok(Segment::Fields),
            other => match other.strip_prefix(".Fields.") {
                Some(key) if !key.is_empty() => Ok(Segment::Field(key.to_string())),
                _ => Err(LoggerError::template(
                    offset,
                    format!("unknown field {}", other),
                )),
            },
        }
    }

    /// Render `record` into a string.
    pub fn render(&self, record: &Record) -> std::result::Result<String, std::fmt::Error> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Level => out.push_str(record.level.as_str()),
                Segment::Time => write!(out, "{}", record.time)?,
                Segment::Message => out.push_str(&record.message),
                Segment::Fields => {
                    if let Some(fields) = &record.fields {
                        out.push_str(&format_fields(fields));
                    }
                }
                Segment::Field(key) => {
                    if let Some(value) = record.field(key) {
                        write!(out, "{}", value)?;
                    }
                }
            }
        }
        Ok(out)
    }

    /// Render `record` and write it in one call, so a failed render never
    /// leaves a partial record in the sink.
    pub fn execute(&self, record: &Record, out: &mut dyn Write) -> io::Result<()> {
        let text = self
            .render(record)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "template render failed"))?;
        out.write_all(text.as_bytes())
    }
}
