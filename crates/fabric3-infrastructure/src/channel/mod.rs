//! Channels
//!
//! Producers publish events into channels; channels fan events out to
//! connected consumers in ascending sequence order. Bound channels are split
//! into a producer side and a consumer side joined by a channel binding.

pub mod builder;
pub mod connection;
pub mod event_channel;
pub mod fan_out;
pub mod local;
pub mod manager;

pub use builder::ChannelBuilder;
pub use connection::{ChannelConnector, ChannelPublisher};
pub use event_channel::Channel;
pub use fan_out::{AsyncFanOut, FanOutHandler, Subscribers, Subscription, SyncFanOut};
pub use local::LocalChannelBindingBuilder;
pub use manager::ChannelManager;
