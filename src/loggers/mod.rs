//! Logger implementations

pub mod bootstrap;
pub mod sink;
pub mod standard;

pub use bootstrap::BootstrapLogger;
pub use sink::FLUSH_INTERVAL;
pub use standard::StdLogger;
