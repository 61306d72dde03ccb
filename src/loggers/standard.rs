//! Standard logger: filter, pool, serialize, and write records

use super::sink::{flush_and_count, report_failure, Flusher, Sink, FLUSH_INTERVAL};
use crate::core::{
    AtomicLevel, Entry, EntryPool, Level, Logger, LoggerConfig, LoggerMetrics, OutputFormat,
    Record, Result,
};
use std::io::Write;
use std::sync::Arc;

/// Logger writing records to stdout, a file, or both.
///
/// Writes land in a buffered writer that a background thread flushes every
/// [`FLUSH_INTERVAL`]. Dropping the logger stops that thread and flushes
/// what is left. A process that exits without dropping the logger must call
/// [`StdLogger::flush`] first or lose up to one interval of output.
///
/// # Example
///
/// ```
/// use bootlog::prelude::*;
///
/// let logger = StdLogger::with_writer(
///     LoggerConfig::new().with_level(Level::Info),
///     std::io::sink(),
/// )
/// .unwrap();
///
/// logger.with_field("user", "bob").info("login");
/// logger.debug("suppressed");
/// logger.flush().unwrap();
///
/// assert_eq!(logger.metrics().total_written(), 1);
/// assert_eq!(logger.metrics().filtered_count(), 1);
/// ```
pub struct StdLogger {
    config: LoggerConfig,
    level: AtomicLevel,
    format: OutputFormat,
    pool: EntryPool,
    sink: Arc<Sink>,
    metrics: Arc<LoggerMetrics>,
    flusher: Flusher,
}

impl StdLogger {
    /// Open the sink described by `config` and start the flush thread.
    ///
    /// Fails when the log file can not be opened, the format does not
    /// compile as a template, or the time pattern is invalid.
    pub fn new(config: LoggerConfig) -> Result<Self> {
        config.validate()?;
        let sink = Sink::open(&config)?;
        Self::build(config, sink)
    }

    /// Like [`StdLogger::new`], but write to `writer` and ignore the
    /// configured destination.
    pub fn with_writer<W>(config: LoggerConfig, writer: W) -> Result<Self>
    where
        W: Write + Send + 'static,
    {
        config.validate()?;
        Self::build(config, Sink::from_writer("custom", writer))
    }

    /// Decode a configuration mapping and build the logger from it.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Self::new(LoggerConfig::from_value(value)?)
    }

    fn build(config: LoggerConfig, sink: Sink) -> Result<Self> {
        let format = OutputFormat::parse(&config.format)?;
        let pool = EntryPool::new(config.timeformat.as_str());
        let sink = Arc::new(sink);
        let metrics = Arc::new(LoggerMetrics::new());
        let flusher = Flusher::spawn(Arc::clone(&sink), Arc::clone(&metrics), FLUSH_INTERVAL)?;

        Ok(Self {
            level: AtomicLevel::new(config.level),
            config,
            format,
            pool,
            sink,
            metrics,
            flusher,
        })
    }

    /// Current minimum level
    pub fn level(&self) -> Level {
        self.level.load()
    }

    /// Change the minimum level. Takes effect for entries already in flight.
    pub fn set_level(&self, level: Level) {
        self.level.store(level);
    }

    /// Change the minimum level from its text form.
    pub fn set_level_text(&self, text: &str) -> Result<()> {
        self.level.store_text(text)
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn pool(&self) -> &EntryPool {
        &self.pool
    }

    pub fn sink_name(&self) -> &str {
        self.sink.name()
    }

    fn write_record(&self, record: &Record) {
        match self.sink.write_with(|out| self.format.write(record, out)) {
            Ok(()) => {
                self.metrics.record_written();
            }
            Err(e) => {
                let previous = self.metrics.record_dropped();
                report_failure(previous, &e);
            }
        }
    }
}

impl Logger for StdLogger {
    fn entry(&self) -> Entry<'_> {
        Entry::new(self, self.pool.get())
    }

    fn handle(&self, mut record: Box<Record>) {
        let level = record.level;
        if !level.is_enabled(self.level.load()) {
            self.metrics.record_filtered();
            self.pool.put(record);
            return;
        }

        self.write_record(&record);

        if level == Level::Fatal {
            let message = std::mem::take(&mut record.message);
            self.pool.put(record);
            flush_and_count(&self.sink, &self.metrics);
            panic!("{}", message);
        }
        self.pool.put(record);
    }

    fn discard(&self, record: Box<Record>) {
        self.pool.put(record);
    }

    fn flush(&self) -> Result<()> {
        if let Err(e) = self.sink.flush() {
            self.metrics.record_flush_failure();
            return Err(e);
        }
        self.metrics.record_flush();
        Ok(())
    }
}

impl Drop for StdLogger {
    fn drop(&mut self) {
        self.flusher.stop();
        if let Err(e) = self.sink.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Shared {
        fn lines(&self) -> Vec<serde_json::Value> {
            String::from_utf8(self.0.lock().clone())
                .unwrap()
                .lines()
                .map(|l| serde_json::from_str(l).unwrap())
                .collect()
        }
    }

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logger(level: Level) -> (StdLogger, Shared) {
        let shared = Shared::default();
        let logger =
            StdLogger::with_writer(LoggerConfig::new().with_level(level), shared.clone()).unwrap();
        (logger, shared)
    }

    #[test]
    fn test_level_filtering() {
        let (logger, out) = logger(Level::Warning);
        logger.debug("d");
        logger.info("i");
        logger.warning("w");
        logger.error("e");
        logger.flush().unwrap();

        let messages: Vec<_> = out.lines().iter().map(|v| v["message"].clone()).collect();
        assert_eq!(messages, vec!["w", "e"]);
        assert_eq!(logger.metrics().filtered_count(), 2);
        assert_eq!(logger.pool().created(), 1);
    }

    #[test]
    fn test_fatal_writes_flushes_and_panics() {
        let (logger, out) = logger(Level::Fatal);
        let result = catch_unwind(AssertUnwindSafe(|| logger.fatal("boom")));

        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("boom"));
        // Written without an explicit flush.
        let lines = out.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["level"], "FATAL");
        assert_eq!(logger.pool().idle(), 1);
    }

    #[test]
    fn test_set_level_at_runtime() {
        let (logger, out) = logger(Level::Error);
        logger.info("hidden");
        logger.set_level(Level::Debug);
        logger.info("shown");
        logger.set_level_text("warning").unwrap();
        logger.info("hidden again");
        assert!(logger.set_level_text("shout").is_err());
        logger.flush().unwrap();

        let lines = out.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["message"], "shown");
        assert_eq!(logger.level(), Level::Warning);
    }

    #[test]
    fn test_abandoned_entry_returns_to_pool() {
        let (logger, out) = logger(Level::Debug);
        let entry = logger.with_field("k", 1);
        drop(entry);
        assert_eq!(logger.pool().idle(), 1);

        logger.info("clean");
        logger.flush().unwrap();
        assert!(out.lines()[0].get("fields").is_none());
    }

    #[test]
    fn test_template_format() {
        let shared = Shared::default();
        let logger = StdLogger::with_writer(
            LoggerConfig::new().with_format("{{.Level}}|{{.Message}}|{{.Fields.user}}\n"),
            shared.clone(),
        )
        .unwrap();
        logger.with_field("user", "ann").warning("slow");
        logger.flush().unwrap();

        assert_eq!(&*shared.0.lock(), b"WARNING|slow|ann\n");
    }

    #[test]
    fn test_bad_template_fails_construction() {
        let err = StdLogger::with_writer(LoggerConfig::new().with_format("{{.Oops}}"), io::sink());
        assert!(err.is_err());
    }

    /// Accepts every write, fails every flush.
    struct FailingFlush;

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "flush refused"))
        }
    }

    #[test]
    fn test_failed_flushes_are_not_dropped_records() {
        let logger = StdLogger::with_writer(LoggerConfig::new(), FailingFlush).unwrap();
        std::thread::sleep(FLUSH_INTERVAL * 6);

        let metrics = logger.metrics();
        assert!(metrics.flush_failures() > 0);
        assert_eq!(metrics.dropped_count(), 0);
        assert_eq!(metrics.drop_rate(), 0.0);

        logger.info("kept");
        let before = metrics.flush_failures();
        assert!(logger.flush().is_err());
        assert!(metrics.flush_failures() > before);
        assert_eq!(metrics.total_written(), 1);
        assert_eq!(metrics.dropped_count(), 0);
    }

    #[test]
    fn test_drop_flushes() {
        let (logger, out) = logger(Level::Debug);
        logger.info("last words");
        drop(logger);
        assert_eq!(out.lines().len(), 1);
    }
}
