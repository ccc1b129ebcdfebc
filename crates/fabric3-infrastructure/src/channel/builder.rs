//! Channel builder

use std::sync::Arc;

use fabric3_application::ports::registry::resolve_channel_binding_builder;
use fabric3_domain::constants::DEFAULT_CHANNEL_TYPE;
use fabric3_domain::physical::PhysicalChannel;
use fabric3_domain::ports::EventHandler;
use fabric3_domain::{Error, Result};
use tracing::{debug, warn};

use super::event_channel::Channel;
use super::fan_out::{AsyncFanOut, FanOutHandler, SyncFanOut};
use super::manager::ChannelManager;
use crate::config::ChannelsConfig;

/// Builds and disposes channel sides
///
/// Bound channels fan out synchronously since the binding provides any
/// asynchrony; local channels fan out asynchronously when configured to.
pub struct ChannelBuilder {
    manager: Arc<ChannelManager>,
    config: ChannelsConfig,
}

impl ChannelBuilder {
    /// Create a builder registering into `manager`
    pub fn new(manager: Arc<ChannelManager>, config: ChannelsConfig) -> Self {
        Self { manager, config }
    }

    /// Build a channel side, or add a reference to an existing one
    pub fn build(&self, definition: &PhysicalChannel) -> Result<()> {
        if self.manager.acquire(&definition.uri, definition.side) {
            return Ok(());
        }
        if definition.channel_type != DEFAULT_CHANNEL_TYPE {
            return Err(Error::builder(format!(
                "Channel type not supported: {}",
                definition.channel_type
            )));
        }

        let fan_out: Box<dyn FanOutHandler> =
            if definition.is_bound() || !self.config.async_fan_out {
                Box::new(SyncFanOut::new())
            } else {
                Box::new(AsyncFanOut::new(self.config.queue_capacity)?)
            };
        let channel = Arc::new(Channel::new(
            definition.uri.clone(),
            definition.deployable.clone(),
            definition.side,
            fan_out,
        ));

        if let Some(binding) = &definition.binding {
            let builder = resolve_channel_binding_builder(&binding.binding_type)?;
            let inbound: Arc<dyn EventHandler> = Arc::clone(&channel) as Arc<dyn EventHandler>;
            channel.set_forward(builder.build(definition, inbound)?);
        }

        self.manager
            .register(Arc::clone(&channel), definition.clone())?;
        debug!(channel = %definition.uri, side = ?definition.side, "Channel built");
        Ok(())
    }

    /// Release a channel side, disposing it with its binding on the last reference
    pub fn dispose(&self, definition: &PhysicalChannel) -> Result<()> {
        if self.manager.references(&definition.uri, definition.side) == 0 {
            warn!(channel = %definition.uri, "Dispose requested for unknown channel");
            return Ok(());
        }
        let Some((channel, built)) = self.manager.release(&definition.uri, definition.side) else {
            return Ok(());
        };
        channel.set_forward(None);
        if let Some(binding) = &built.binding {
            resolve_channel_binding_builder(&binding.binding_type)?.dispose(&built)?;
        }
        debug!(channel = %definition.uri, side = ?definition.side, "Channel disposed");
        Ok(())
    }
}
