//! Channel Binding Builder Registry
//!
//! Bound channels are split into a producer side and a consumer side joined
//! by a transport. Channel binding builders provide that transport.

use std::sync::Arc;

use fabric3_domain::physical::PhysicalChannel;
use fabric3_domain::ports::EventHandler;
use fabric3_domain::{Error, Result};

/// Connects one side of a bound channel to its transport
pub trait ChannelBindingBuilder: Send + Sync {
    /// Connect a channel side
    ///
    /// `inbound` delivers events arriving from the transport to the local
    /// consumers of a consumer side. The returned handler, if any, is where a
    /// producer side forwards published events.
    fn build(
        &self,
        channel: &PhysicalChannel,
        inbound: Arc<dyn EventHandler>,
    ) -> Result<Option<Arc<dyn EventHandler>>>;

    /// Disconnect a channel side
    fn dispose(&self, channel: &PhysicalChannel) -> Result<()>;
}

/// Registry entry for channel binding builders
pub struct ChannelBindingBuilderEntry {
    /// Binding type handled (e.g., "local")
    pub binding_type: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function creating the builder
    pub factory: fn() -> Arc<dyn ChannelBindingBuilder>,
}

#[linkme::distributed_slice]
pub static CHANNEL_BINDING_BUILDERS: [ChannelBindingBuilderEntry] = [..];

/// Resolve a channel binding builder by type
///
/// An unknown binding type is a builder error.
pub fn resolve_channel_binding_builder(binding_type: &str) -> Result<Arc<dyn ChannelBindingBuilder>> {
    CHANNEL_BINDING_BUILDERS
        .iter()
        .find(|entry| entry.binding_type == binding_type)
        .map(|entry| (entry.factory)())
        .ok_or_else(|| {
            Error::builder(format!(
                "Channel binding builder not found for type: {binding_type}"
            ))
        })
}

/// List all registered channel binding builders as (type, description)
pub fn list_channel_binding_builders() -> Vec<(&'static str, &'static str)> {
    CHANNEL_BINDING_BUILDERS
        .iter()
        .map(|e| (e.binding_type, e.description))
        .collect()
}
