//! Reuse of log records across calls
//!
//! The free list is a bounded crossbeam channel: `get` is a non-blocking
//! receive, `put` a non-blocking send. Records that do not fit are freed.

use super::entry::{LogTime, Record};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Default number of idle records kept for reuse
pub const DEFAULT_POOL_CAPACITY: usize = 1024;

#[derive(Debug)]
pub struct EntryPool {
    sender: Sender<Box<Record>>,
    receiver: Receiver<Box<Record>>,
    time_format: Arc<str>,
    created: AtomicU64,
}

impl EntryPool {
    pub fn new(time_format: impl Into<Arc<str>>) -> Self {
        Self::with_capacity(time_format, DEFAULT_POOL_CAPACITY)
    }

    pub fn with_capacity(time_format: impl Into<Arc<str>>, capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        Self {
            sender,
            receiver,
            time_format: time_format.into(),
            created: AtomicU64::new(0),
        }
    }

    /// Take an idle record, or allocate one, stamped with the current time.
    pub fn get(&self) -> Box<Record> {
        match self.receiver.try_recv() {
            Ok(mut record) => {
                record.time = LogTime::now(Arc::clone(&self.time_format));
                record
            }
            Err(_) => {
                self.created.fetch_add(1, Ordering::Relaxed);
                Box::new(Record::new(Arc::clone(&self.time_format)))
            }
        }
    }

    /// Reset `record` and keep it for the next caller.
    pub fn put(&self, mut record: Box<Record>) {
        record.reset();
        // Full free list: the record is simply dropped.
        let _ = self.sender.try_send(record);
    }

    /// Number of records allocated over the pool's lifetime
    pub fn created(&self) -> u64 {
        self.created.load(Ordering::Relaxed)
    }

    /// Number of records currently waiting for reuse
    pub fn idle(&self) -> usize {
        self.receiver.len()
    }
}
