//! Main runtime configuration

use serde::{Deserialize, Serialize};

use super::{ChannelsConfig, LoggingConfig, MonitorConfig, RuntimeConfig};

/// Root of `fabric3.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Runtime node settings
    #[serde(default)]
    pub runtime: RuntimeConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Monitor router settings
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// Channel settings
    #[serde(default)]
    pub channels: ChannelsConfig,
}
