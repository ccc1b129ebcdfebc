//! Channel configuration types

use crate::constants::CHANNEL_QUEUE_CAPACITY;
use serde::{Deserialize, Serialize};

/// Channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelsConfig {
    /// Deliver events on local channels from a background task
    ///
    /// Requires a tokio runtime when channels are built. Bound channels are
    /// always synchronous; the binding provides asynchrony.
    pub async_fan_out: bool,

    /// Queue capacity of asynchronous fan-outs
    pub queue_capacity: usize,
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self {
            async_fan_out: false,
            queue_capacity: CHANNEL_QUEUE_CAPACITY,
        }
    }
}
