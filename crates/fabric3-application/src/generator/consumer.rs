//! Consumer command generation

use fabric3_domain::Result;
use fabric3_domain::logical::{LogicalComponent, LogicalModel, LogicalState};
use fabric3_domain::physical::{ChannelConnectionCommand, ConnectionDirection};

use super::channel::{ChannelGenerator, lookup_channels};
use super::connection::ConnectionGenerator;

/// Generates channel build and connection commands for a component's consumers
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsumerCommandGenerator {
    connections: ConnectionGenerator,
    channels: ChannelGenerator,
}

impl ConsumerCommandGenerator {
    /// Create a generator
    pub fn new(connections: ConnectionGenerator, channels: ChannelGenerator) -> Self {
        Self {
            connections,
            channels,
        }
    }

    /// New components get one channel build and one attach per source channel,
    /// marked components the matching detach and dispose. Provisioned components
    /// produce nothing.
    ///
    /// Fails with [`Error::ChannelNotFound`](fabric3_domain::Error::ChannelNotFound)
    /// if a source channel does not exist.
    pub fn generate(
        &self,
        component: &LogicalComponent,
        model: &LogicalModel,
    ) -> Result<Option<ChannelConnectionCommand>> {
        if component.state == LogicalState::Provisioned {
            return Ok(None);
        }
        let direction = Some(ConnectionDirection::Consumer);
        let mut command = ChannelConnectionCommand::default();

        for consumer in &component.consumers {
            let channels = lookup_channels(&consumer.sources, model)?;
            let connections = self
                .connections
                .generate_consumer(component, consumer, &channels);
            if component.state == LogicalState::Marked {
                command.detach.extend(connections);
                command.dispose_channels.extend(
                    channels
                        .iter()
                        .map(|c| self.channels.generate_dispose(c, direction)),
                );
            } else {
                command.build_channels.extend(
                    channels
                        .iter()
                        .map(|c| self.channels.generate_build(c, direction)),
                );
                command.attach.extend(connections);
            }
        }
        Ok((!command.is_empty()).then_some(command))
    }
}
