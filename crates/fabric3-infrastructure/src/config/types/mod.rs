//! Configuration types module

pub mod app;
pub mod channels;
pub mod logging;
pub mod monitor;
pub mod runtime;

// Re-export main types
pub use app::AppConfig;
pub use channels::ChannelsConfig;
pub use logging::LoggingConfig;
pub use monitor::MonitorConfig;
pub use runtime::RuntimeConfig;
