//! The logging façade shared by every logger implementation

use super::{
    entry::{Entry, Record},
    error::Result,
    field::{FieldValue, Fields},
};

/// Capability set application code logs through.
///
/// Implementors provide record acquisition and finalization; the fluent
/// surface (`with_field(..).info(..)`, `warning(..)`, ...) comes for free.
///
/// # Example
///
/// ```
/// use bootlog::prelude::*;
///
/// fn serve(log: &impl Logger) {
///     log.with_field("port", 8080).info("listening");
/// }
///
/// let boot = BootstrapLogger::new();
/// serve(&boot);
/// assert_eq!(boot.len(), 1);
/// ```
pub trait Logger: Send + Sync {
    /// Start a new entry owned by this logger.
    fn entry(&self) -> Entry<'_>;

    /// Finalize a record whose level and message have been set.
    fn handle(&self, record: Box<Record>);

    /// Take back a record whose entry was dropped without a severity call.
    fn discard(&self, record: Box<Record>) {
        drop(record);
    }

    /// Push buffered output to its destination.
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn with_field(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> Entry<'_>
    where
        Self: Sized,
    {
        self.entry().with_field(key, value)
    }

    fn with_fields(&self, fields: Fields) -> Entry<'_>
    where
        Self: Sized,
    {
        self.entry().with_fields(fields)
    }

    #[inline]
    fn debug(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.entry().debug(message);
    }

    #[inline]
    fn info(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.entry().info(message);
    }

    #[inline]
    fn warning(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.entry().warning(message);
    }

    #[inline]
    fn error(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.entry().error(message);
    }

    /// Log at Fatal. Loggers with a sink write the record and then panic.
    #[inline]
    fn fatal(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.entry().fatal(message);
    }
}

macro_rules! forward_logger {
    ($($ty:ty),+) => {$(
        impl<L: Logger + ?Sized> Logger for $ty {
            fn entry(&self) -> Entry<'_> {
                (**self).entry()
            }

            fn handle(&self, record: Box<Record>) {
                (**self).handle(record)
            }

            fn discard(&self, record: Box<Record>) {
                (**self).discard(record)
            }

            fn flush(&self) -> Result<()> {
                (**self).flush()
            }
        }
    )+};
}

forward_logger!(&L, Box<L>, std::sync::Arc<L>);
