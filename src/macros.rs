//! Logging macros for ergonomic log message formatting.
//!
//! These macros work with any [`Logger`](crate::Logger) and build the
//! message with `format!`.
//!
//! # Examples
//!
//! ```
//! use bootlog::prelude::*;
//! use bootlog::info;
//!
//! let logger = BootstrapLogger::new();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! assert_eq!(logger.len(), 2);
//! ```

/// Log a message at the given level.
///
/// # Examples
///
/// ```
/// # use bootlog::prelude::*;
/// # let logger = BootstrapLogger::new();
/// use bootlog::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::Logger::entry(&$logger).log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use bootlog::prelude::*;
/// # let logger = BootstrapLogger::new();
/// use bootlog::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use bootlog::prelude::*;
/// # let logger = BootstrapLogger::new();
/// use bootlog::warning;
/// warning!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a fatal-level message. On a [`StdLogger`](crate::StdLogger) this
/// panics after the record is written.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Fatal, $($arg)+)
    };
}

/// Concatenate the `Display` form of each argument, with no separator.
///
/// ```
/// use bootlog::sprint;
/// assert_eq!(sprint!("user ", 42, " logged in"), "user 42 logged in");
/// ```
#[macro_export]
macro_rules! sprint {
    ($($arg:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut message = String::new();
        $(
            {
                use ::std::fmt::Write as _;
                let _ = write!(message, "{}", $arg);
            }
        )*
        message
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::{Level, Logger};
    use crate::loggers::BootstrapLogger;

    #[test]
    fn test_level_macros_buffer_formatted_messages() {
        let logger = BootstrapLogger::new();
        debug!(logger, "Count: {}", 5);
        info!(logger, "Items: {}", 100);
        warning!(logger, "Retry {} of {}", 1, 3);
        error!(logger, "Code: {}", 500);
        fatal!(logger, "Critical failure: {}", "system");
        log!(logger, Level::Info, "plain");

        let records = logger.drain();
        let levels: Vec<_> = records.iter().map(|r| r.level).collect();
        assert_eq!(
            levels,
            vec![
                Level::Debug,
                Level::Info,
                Level::Warning,
                Level::Error,
                Level::Fatal,
                Level::Info
            ]
        );
        assert_eq!(records[2].message, "Retry 1 of 3");
    }

    #[test]
    fn test_macros_accept_references() {
        let logger = BootstrapLogger::new();
        let by_ref = &logger;
        info!(by_ref, "through a reference");
        by_ref.info(sprint!("a", 1, 'b'));
        assert_eq!(logger.drain()[1].message, "a1b");
    }

    #[test]
    fn test_sprint_empty() {
        assert_eq!(sprint!(), "");
    }
}
