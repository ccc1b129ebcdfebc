//! Channel connections
//!
//! Producer connections inject a [`ChannelPublisher`] into the producer
//! site of a component; consumer connections subscribe a handler that
//! delivers events to the consumer of a component instance.

use std::sync::{Arc, PoisonError, RwLock};

use dashmap::DashMap;
use fabric3_domain::physical::{ConnectionDirection, ConnectionEnd, Injectable, PhysicalChannelConnection};
use fabric3_domain::ports::{EventHandler, EventPublisher, Injected};
use fabric3_domain::{Error, Event, Result};
use tracing::debug;

use super::event_channel::Channel;
use super::fan_out::Subscription;
use super::manager::ChannelManager;
use crate::container::{ComponentManager, ManagedComponent};
use crate::injection::InjectionSite;

/// Publishes a producer's events into every channel it is connected to
#[derive(Default)]
pub struct ChannelPublisher {
    channels: RwLock<Vec<Arc<Channel>>>,
}

impl ChannelPublisher {
    /// Create a publisher connected to no channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect a channel
    pub fn add(&self, channel: Arc<Channel>) {
        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        channels.retain(|c| !(c.uri() == channel.uri() && c.side() == channel.side()));
        channels.push(channel);
    }

    /// Disconnect a channel; returns the number still connected
    pub fn remove(&self, uri: &str) -> usize {
        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        channels.retain(|c| c.uri() != uri);
        channels.len()
    }

    /// URIs of connected channels
    pub fn channels(&self) -> Vec<String> {
        self.channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|c| c.uri().to_string())
            .collect()
    }
}

impl EventPublisher for ChannelPublisher {
    fn publish(&self, event: Event) -> Result<()> {
        let channels = self
            .channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let mut first_error = None;
        for channel in channels {
            if let Err(e) = channel.publish(event.clone()) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Delivers channel events to a consumer of a component
struct ConsumerHandler {
    component: ManagedComponent,
    consumer: String,
}

impl EventHandler for ConsumerHandler {
    fn handle(&self, event: &Event) -> Result<()> {
        self.component.deliver(&self.consumer, event)
    }
}

/// Attaches and detaches producer and consumer connections
pub struct ChannelConnector {
    channels: Arc<ChannelManager>,
    components: Arc<ComponentManager>,
    publishers: DashMap<(String, Injectable), Arc<ChannelPublisher>>,
}

impl ChannelConnector {
    /// Create a connector
    pub fn new(channels: Arc<ChannelManager>, components: Arc<ComponentManager>) -> Self {
        Self {
            channels,
            components,
            publishers: DashMap::new(),
        }
    }

    /// Attach a connection
    ///
    /// The channel side must already be built.
    pub fn attach(&self, connection: &PhysicalChannelConnection) -> Result<()> {
        let channel = self
            .channels
            .find(&connection.channel_uri, connection.direction)
            .ok_or_else(|| Error::channel_not_found(&connection.channel_uri))?;

        match connection.direction {
            ConnectionDirection::Producer => {
                let (uri, injectable) = component_end(&connection.source, connection)?;
                let managed = self.components.require(uri)?;
                let publisher = self
                    .publishers
                    .entry((uri.to_string(), injectable.clone()))
                    .or_default()
                    .clone();
                publisher.add(channel);
                managed.component.set_site(
                    injectable.clone(),
                    InjectionSite::value(Injected::Publisher(publisher)),
                );
            }
            ConnectionDirection::Consumer => {
                let (uri, injectable) = component_end(&connection.target, connection)?;
                let managed = self.components.require(uri)?;
                channel.subscribe(Subscription {
                    uri: connection.uri.clone(),
                    sequence: connection.sequence,
                    handler: Arc::new(ConsumerHandler {
                        component: managed,
                        consumer: injectable.name.clone(),
                    }),
                });
            }
        }
        debug!(
            connection = %connection.uri,
            channel = %connection.channel_uri,
            direction = ?connection.direction,
            "Channel connection attached"
        );
        Ok(())
    }

    /// Detach a connection
    ///
    /// Channels or components that are already gone are skipped.
    pub fn detach(&self, connection: &PhysicalChannelConnection) -> Result<()> {
        match connection.direction {
            ConnectionDirection::Producer => {
                let (uri, injectable) = component_end(&connection.source, connection)?;
                let key = (uri.to_string(), injectable.clone());
                let remaining = self
                    .publishers
                    .get(&key)
                    .map(|publisher| publisher.remove(&connection.channel_uri));
                if remaining == Some(0) {
                    self.publishers.remove(&key);
                    if let Some(managed) = self.components.get(uri) {
                        managed.component.remove_site(injectable);
                    }
                }
            }
            ConnectionDirection::Consumer => {
                if let Some(channel) = self
                    .channels
                    .find(&connection.channel_uri, connection.direction)
                {
                    channel.unsubscribe(&connection.uri);
                }
            }
        }
        debug!(connection = %connection.uri, "Channel connection detached");
        Ok(())
    }
}

fn component_end<'a>(
    end: &'a ConnectionEnd,
    connection: &PhysicalChannelConnection,
) -> Result<(&'a str, &'a Injectable)> {
    match end {
        ConnectionEnd::Component { uri, injectable } => Ok((uri, injectable)),
        ConnectionEnd::Channel { .. } => Err(Error::builder(format!(
            "Connection {} has no component end",
            connection.uri
        ))),
    }
}
