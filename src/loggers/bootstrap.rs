//! Bootstrap logger: buffer records until a real logger exists

use crate::core::{Entry, Logger, Record, DEFAULT_TIME_FORMAT, TIME_KEY};
use parking_lot::Mutex;
use std::sync::Arc;

/// Logger usable before the application has configured its real one.
///
/// Every record is kept in memory, whatever its level. Nothing is written
/// and fatal records do not panic. [`BootstrapLogger::handoff`] replays the
/// buffer through a real logger, which then applies its own filtering and
/// formatting (and its own fatal behaviour). Records still buffered when the
/// bootstrap logger is dropped are lost without notice.
///
/// # Example
///
/// ```
/// use bootlog::prelude::*;
///
/// let boot = BootstrapLogger::new();
/// boot.with_field("phase", "config").info("loading");
/// boot.debug("details");
///
/// let real = StdLogger::with_writer(
///     LoggerConfig::new().with_level(Level::Info),
///     std::io::sink(),
/// )
/// .unwrap();
/// assert_eq!(boot.handoff(&real), 2);
/// assert!(boot.is_empty());
/// assert_eq!(real.metrics().total_written(), 1);
/// ```
#[derive(Debug)]
pub struct BootstrapLogger {
    records: Mutex<Vec<Record>>,
    time_format: Arc<str>,
}

impl BootstrapLogger {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            time_format: Arc::from(DEFAULT_TIME_FORMAT),
        }
    }

    /// Number of buffered records
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Take every buffered record, leaving the buffer empty.
    pub fn drain(&self) -> Vec<Record> {
        std::mem::take(&mut *self.records.lock())
    }

    /// Replay buffered records, oldest first, through `logger`.
    ///
    /// Each record keeps its level, fields, message, and original time. The
    /// buffer is drained in one step before replay starts, so records are
    /// delivered exactly once even if other threads keep logging. Calling
    /// this again with nothing buffered does nothing. Returns the number of
    /// records replayed.
    ///
    /// A replayed fatal record triggers the target's fatal behaviour; on a
    /// [`StdLogger`](crate::StdLogger) that panics and the rest of the batch
    /// is lost.
    pub fn handoff<L: Logger + ?Sized>(&self, logger: &L) -> usize {
        let records = self.drain();
        let count = records.len();
        for record in records {
            let Record {
                level,
                fields,
                time,
                message,
            } = record;

            let mut entry = logger.entry();
            if let Some(fields) = fields {
                entry = entry.with_fields(fields);
            }
            entry.with_field(TIME_KEY, time.time).log(level, message);
        }
        count
    }
}

impl Default for BootstrapLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for BootstrapLogger {
    fn entry(&self) -> Entry<'_> {
        Entry::new(self, Box::new(Record::new(Arc::clone(&self.time_format))))
    }

    fn handle(&self, record: Box<Record>) {
        self.records.lock().push(*record);
    }

    // Unfinished chains are kept too, as a debug record with no message.
    fn discard(&self, record: Box<Record>) {
        self.handle(record);
    }
}
