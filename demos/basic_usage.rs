//! Basic logger usage example
//!
//! Demonstrates a console logger, structured fields, level filtering, and a
//! text template.
//!
//! Run with: cargo run --example basic_usage

use bootlog::prelude::*;
use bootlog::{info, sprint, warning};

fn main() -> Result<()> {
    println!("=== bootlog - Basic Usage Example ===\n");

    // JSON to stdout, everything from Debug up
    let logger = StdLogger::new(LoggerConfig::new().with_std(true))?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.flush()?;

    println!("\n2. Structured fields:");
    logger
        .with_field("user_id", 12345)
        .with_field("action", "login")
        .with_field("success", true)
        .info("User action");
    info!(logger, "Server listening on port {}", 8080);
    logger.info(sprint!("request ", 7, " took ", 1.5, "ms"));
    logger.flush()?;

    println!("\n3. Changing the minimum level:");
    logger.set_level(Level::Warning);
    logger.info("Info message (hidden)");
    warning!(logger, "Warning message (visible)");
    logger.flush()?;

    println!("\n4. Text template:");
    let plain = StdLogger::new(
        LoggerConfig::new()
            .with_format("{{.Time}} [{{.Level}}] {{.Message}} {{.Fields}}\n")
            .with_timeformat("%H:%M:%S"),
    )?;
    plain.with_field("attempt", 3).warning("Retrying connection");
    plain.flush()?;

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
