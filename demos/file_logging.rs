//! File logging example
//!
//! Demonstrates appending to a log file, optionally mirrored to stdout.
//!
//! Run with: cargo run --example file_logging

use bootlog::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== bootlog - File Logging Example ===\n");

    let path = std::env::temp_dir().join("bootlog_example.log");
    let _ = fs::remove_file(&path);

    {
        let logger = StdLogger::new(LoggerConfig::new().with_path(&path))?;
        for i in 0..5 {
            logger.with_field("iteration", i).info("Writing to file");
        }
        // Dropping the logger flushes whatever is still buffered
    }

    {
        let logger = StdLogger::new(LoggerConfig::new().with_path(&path).with_std(true))?;
        logger.warning("Appended to the same file and printed to stdout");
        logger.flush()?;
        println!("Metrics: {} written", logger.metrics().total_written());
    }

    println!("\nContents of {}:", path.display());
    print!("{}", fs::read_to_string(&path)?);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
