//! Physical channel generation

use fabric3_domain::logical::{LogicalChannel, LogicalModel};
use fabric3_domain::{Error, Result};
use fabric3_domain::physical::{
    ChannelSide, ConnectionDirection, PhysicalChannel, PhysicalChannelBinding,
};

/// Generates physical channels for build and dispose commands
#[derive(Debug, Default, Clone, Copy)]
pub struct ChannelGenerator;

impl ChannelGenerator {
    /// Create a generator
    pub fn new() -> Self {
        Self
    }

    /// Side of a channel hosted for a connection direction
    ///
    /// Unbound channels are always collocated.
    pub fn side(channel: &LogicalChannel, direction: Option<ConnectionDirection>) -> ChannelSide {
        match (channel.is_bound(), direction) {
            (true, Some(ConnectionDirection::Producer)) => ChannelSide::Producer,
            (true, Some(ConnectionDirection::Consumer)) => ChannelSide::Consumer,
            _ => ChannelSide::Collocated,
        }
    }

    /// Physical channel to build for a connection direction
    pub fn generate_build(
        &self,
        channel: &LogicalChannel,
        direction: Option<ConnectionDirection>,
    ) -> PhysicalChannel {
        PhysicalChannel {
            uri: channel.uri.clone(),
            deployable: channel.deployable.clone(),
            side: Self::side(channel, direction),
            channel_type: channel.definition.channel_type.clone(),
            binding: channel
                .definition
                .binding
                .as_ref()
                .map(|b| PhysicalChannelBinding {
                    binding_type: b.binding_type.clone(),
                    config: b.config.clone(),
                }),
        }
    }

    /// Physical channel to dispose for a connection direction
    pub fn generate_dispose(
        &self,
        channel: &LogicalChannel,
        direction: Option<ConnectionDirection>,
    ) -> PhysicalChannel {
        self.generate_build(channel, direction)
    }
}

/// Look up channels by URI
///
/// A missing channel is fatal for the generation unit.
pub fn lookup_channels<'a>(
    channel_uris: &[String],
    model: &'a LogicalModel,
) -> Result<Vec<&'a LogicalChannel>> {
    channel_uris
        .iter()
        .map(|uri| {
            model
                .channel(uri)
                .ok_or_else(|| Error::channel_not_found(uri))
        })
        .collect()
}
