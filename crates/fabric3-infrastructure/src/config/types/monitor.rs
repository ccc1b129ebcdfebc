//! Monitor router configuration types

use crate::constants::{
    DEFAULT_MONITOR_DESTINATION, MONITOR_ENTRY_CAPACITY, MONITOR_RING_SIZE,
    MONITOR_TIMESTAMP_PATTERN,
};
use serde::{Deserialize, Serialize};

/// Monitor router configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Route entries through the ring buffer; when false every send writes synchronously
    pub enabled: bool,

    /// Bytes reserved per entry; longer entries are truncated
    pub capacity: usize,

    /// Number of entries in the ring
    pub ring_size: usize,

    /// Timestamp pattern (chrono format syntax)
    pub pattern: String,

    /// Destination names; index 0 is the default destination
    pub destinations: Vec<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: MONITOR_ENTRY_CAPACITY,
            ring_size: MONITOR_RING_SIZE,
            pattern: MONITOR_TIMESTAMP_PATTERN.to_string(),
            destinations: vec![DEFAULT_MONITOR_DESTINATION.to_string()],
        }
    }
}
