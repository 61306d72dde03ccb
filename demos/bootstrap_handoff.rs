//! Bootstrap logging example
//!
//! Logs before configuration is loaded, then replays those records through
//! the configured logger.
//!
//! Run with: cargo run --example bootstrap_handoff

use bootlog::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
    println!("=== bootlog - Bootstrap Handoff Example ===\n");

    let boot = BootstrapLogger::new();
    boot.info("process starting");
    boot.with_field("source", "env").debug("reading configuration");

    // Configuration would normally come from a file or the environment
    let config = json!({ "std": true, "level": "info", "format": "json" });
    let logger = match StdLogger::from_value(config) {
        Ok(logger) => logger,
        Err(e) => {
            boot.with_field("error", e.to_string()).error("invalid configuration");
            // Fall back to defaults so the buffered records are not lost
            StdLogger::new(LoggerConfig::new())?
        }
    };
    boot.with_field("level", logger.level().as_str()).info("logger configured");

    println!("Replaying {} buffered records (debug is filtered):", boot.len());
    boot.handoff(&logger);
    logger.info("running");
    logger.flush()?;

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
