//! Channel connection generation

use fabric3_domain::logical::{LogicalChannel, LogicalComponent, LogicalConsumer, LogicalProducer};
use fabric3_domain::physical::{
    ConnectionDirection, ConnectionEnd, Injectable, PhysicalChannelConnection,
};

/// Generates producer and consumer connections
#[derive(Debug, Default, Clone, Copy)]
pub struct ConnectionGenerator;

impl ConnectionGenerator {
    /// Create a generator
    pub fn new() -> Self {
        Self
    }

    /// One connection per source channel, delivering into the consumer
    pub fn generate_consumer(
        &self,
        component: &LogicalComponent,
        consumer: &LogicalConsumer,
        channels: &[&LogicalChannel],
    ) -> Vec<PhysicalChannelConnection> {
        channels
            .iter()
            .map(|channel| PhysicalChannelConnection {
                uri: consumer.uri.clone(),
                channel_uri: channel.uri.clone(),
                source: ConnectionEnd::Channel {
                    uri: channel.uri.clone(),
                },
                target: ConnectionEnd::Component {
                    uri: component.uri.clone(),
                    injectable: Injectable::consumer(&consumer.name),
                },
                event_types: consumer.definition.event_types.clone(),
                sequence: consumer.sequence,
                direction: ConnectionDirection::Consumer,
                deployable: component.deployable.clone(),
            })
            .collect()
    }

    /// One connection per target channel, publishing from the producer
    pub fn generate_producer(
        &self,
        component: &LogicalComponent,
        producer: &LogicalProducer,
        channels: &[&LogicalChannel],
    ) -> Vec<PhysicalChannelConnection> {
        channels
            .iter()
            .map(|channel| PhysicalChannelConnection {
                uri: producer.uri.clone(),
                channel_uri: channel.uri.clone(),
                source: ConnectionEnd::Component {
                    uri: component.uri.clone(),
                    injectable: Injectable::producer(&producer.name),
                },
                target: ConnectionEnd::Channel {
                    uri: channel.uri.clone(),
                },
                event_types: producer.definition.event_types.clone(),
                sequence: fabric3_domain::constants::NO_SEQUENCE,
                direction: ConnectionDirection::Producer,
                deployable: component.deployable.clone(),
            })
            .collect()
    }
}
