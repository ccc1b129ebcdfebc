//! Producer command generation

use fabric3_domain::Result;
use fabric3_domain::logical::{LogicalComponent, LogicalModel, LogicalState};
use fabric3_domain::physical::{ChannelConnectionCommand, ConnectionDirection};

use super::channel::{ChannelGenerator, lookup_channels};
use super::connection::ConnectionGenerator;

/// Generates channel build and connection commands for a component's producers
#[derive(Debug, Default, Clone, Copy)]
pub struct ProducerCommandGenerator {
    connections: ConnectionGenerator,
    channels: ChannelGenerator,
}

impl ProducerCommandGenerator {
    /// Create a generator
    pub fn new(connections: ConnectionGenerator, channels: ChannelGenerator) -> Self {
        Self {
            connections,
            channels,
        }
    }

    /// Same shape as consumer generation, for target channels
    pub fn generate(
        &self,
        component: &LogicalComponent,
        model: &LogicalModel,
    ) -> Result<Option<ChannelConnectionCommand>> {
        if component.state == LogicalState::Provisioned {
            return Ok(None);
        }
        let direction = Some(ConnectionDirection::Producer);
        let mut command = ChannelConnectionCommand::default();

        for producer in &component.producers {
            let channels = lookup_channels(&producer.targets, model)?;
            let connections = self
                .connections
                .generate_producer(component, producer, &channels);
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
