//! Buffered output sink and its periodic flusher
//!
//! Every serialized record and every flush goes through the one mutex
//! guarding the buffered writer.

use crate::core::{LoggerConfig, LoggerError, LoggerMetrics, Result};
use crossbeam_channel::{bounded, select, tick, Sender};
use parking_lot::Mutex;
use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Stdout, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Interval between background flushes
pub const FLUSH_INTERVAL: Duration = Duration::from_millis(50);

/// Writes every byte to stdout and to the log file.
struct Tee {
    stdout: Stdout,
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdout.write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()?;
        self.file.flush()
    }
}

/// Destination of serialized records
pub struct Sink {
    out: Mutex<BufWriter<Box<dyn Write + Send>>>,
    name: String,
}

impl Sink {
    /// Open the destination described by `config`: stdout, the file at
    /// `path`, or both when `std` is also set.
    pub fn open(config: &LoggerConfig) -> Result<Self> {
        let Some(path) = config.path.as_ref() else {
            return Ok(Self::from_writer("stdout", io::stdout()));
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| LoggerError::file_open(path.display().to_string(), e))?;

        if config.std {
            let tee = Tee {
                stdout: io::stdout(),
                file,
            };
            Ok(Self::from_writer(format!("stdout+{}", path.display()), tee))
        } else {
            Ok(Self::from_writer(path.display().to_string(), file))
        }
    }

    pub fn from_writer<W>(name: impl Into<String>, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            out: Mutex::new(BufWriter::new(Box::new(writer))),
            name: name.into(),
        }
    }

    /// Run `write` against the buffered writer while holding the lock.
    pub fn write_with<F>(&self, write: F) -> Result<()>
    where
        F: FnOnce(&mut dyn Write) -> Result<()>,
    {
        let mut out = self.out.lock();
        write(&mut *out)
    }

    pub fn flush(&self) -> Result<()> {
        self.out
            .lock()
            .flush()
            .map_err(|e| LoggerError::io_operation("flushing sink", self.name.clone(), e))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Background thread flushing a [`Sink`] on a fixed interval.
///
/// Stopping (or dropping) the flusher wakes the thread, joins it, and leaves
/// the final flush to the owner.
pub struct Flusher {
    shutdown: Option<Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Flusher {
    pub fn spawn(sink: Arc<Sink>, metrics: Arc<LoggerMetrics>, interval: Duration) -> Result<Self> {
        let (shutdown, stop) = bounded::<()>(0);
        let ticker = tick(interval);

        let handle = thread::Builder::new()
            .name("bootlog-flush".to_string())
            .spawn(move || loop {
                select! {
                    recv(ticker) -> _ => flush_and_count(&sink, &metrics),
                    // Sender dropped: the logger is going away.
                    recv(stop) -> _ => break,
                }
            })
            .map_err(|e| LoggerError::io_operation("spawning flush thread", "bootlog-flush", e))?;

        Ok(Self {
            shutdown: Some(shutdown),
            handle: Some(handle),
        })
    }

    pub fn stop(&mut self) {
        drop(self.shutdown.take());
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.join() {
                eprintln!("[LOGGER ERROR] Flush thread panicked: {:?}", e);
            }
        }
    }
}

impl Drop for Flusher {
    fn drop(&mut self) {
        self.stop();
    }
}

pub(crate) fn flush_and_count(sink: &Sink, metrics: &LoggerMetrics) {
    match sink.flush() {
        Ok(()) => {
            metrics.record_flush();
        }
        Err(e) => {
            let previous = metrics.record_flush_failure();
            report_failure(previous, &e);
        }
    }
}

/// Report a swallowed failure on stderr, on the first occurrence and every
/// 1000th after that.
pub(crate) fn report_failure(previous: u64, error: &dyn Display) {
    if previous == 0 || (previous + 1).is_multiple_of(1000) {
        eprintln!(
            "[LOGGER ERROR] {} (failures so far: {})",
            error,
            previous + 1
        );
    }
}
