//! Configuration
//!
//! Runtime configuration merged from defaults, a TOML file and `F3_`
//! environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, ChannelsConfig, LoggingConfig, MonitorConfig, RuntimeConfig};
