//! Channel instances

use std::sync::{Arc, PoisonError, RwLock};

use fabric3_domain::physical::ChannelSide;
use fabric3_domain::ports::EventHandler;
use fabric3_domain::{Event, QName, Result};

use super::fan_out::{FanOutHandler, Subscription};

/// One side of a channel hosted on this runtime
///
/// Events published by local producers go to the binding when the channel
/// side forwards to one, otherwise straight to the local consumers. Events
/// arriving from the binding reach the channel through its
/// [`EventHandler`] implementation and are always delivered locally.
pub struct Channel {
    uri: String,
    deployable: QName,
    side: ChannelSide,
    fan_out: Box<dyn FanOutHandler>,
    forward: RwLock<Option<Arc<dyn EventHandler>>>,
}

impl Channel {
    /// Create a channel side
    pub fn new(
        uri: impl Into<String>,
        deployable: QName,
        side: ChannelSide,
        fan_out: Box<dyn FanOutHandler>,
    ) -> Self {
        Self {
            uri: uri.into(),
            deployable,
            side,
            fan_out,
            forward: RwLock::new(None),
        }
    }

    /// Channel URI
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Deployable owning the channel
    pub fn deployable(&self) -> &QName {
        &self.deployable
    }

    /// Hosted side
    pub fn side(&self) -> ChannelSide {
        self.side
    }

    /// Route published events to a binding instead of local consumers
    pub fn set_forward(&self, forward: Option<Arc<dyn EventHandler>>) {
        *self.forward.write().unwrap_or_else(PoisonError::into_inner) = forward;
    }

    /// Connect a consumer
    pub fn subscribe(&self, subscription: Subscription) {
        self.fan_out.subscribers().add(subscription);
    }

    /// Disconnect a consumer; returns true if it was connected
    pub fn unsubscribe(&self, uri: &str) -> bool {
        self.fan_out.subscribers().remove(uri)
    }

    /// URIs of connected consumers in delivery order
    pub fn consumers(&self) -> Vec<String> {
        self.fan_out
            .subscribers()
            .snapshot()
            .iter()
            .map(|s| s.uri.clone())
            .collect()
    }

    /// Publish an event from a local producer
    pub fn publish(&self, event: Event) -> Result<()> {
        let forward = self
            .forward
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match forward {
            Some(forward) => forward.handle(&event),
            None => self.fan_out.dispatch(event),
        }
    }
}

impl EventHandler for Channel {
    fn handle(&self, event: &Event) -> Result<()> {
        self.fan_out.dispatch(event.clone())
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("uri", &self.uri)
            .field("side", &self.side)
            .finish_non_exhaustive()
    }
}
