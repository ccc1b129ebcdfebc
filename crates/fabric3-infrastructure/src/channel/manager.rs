//! Channel manager

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use fabric3_domain::physical::{ChannelSide, ConnectionDirection, PhysicalChannel};
use fabric3_domain::{Error, Result};

use super::event_channel::Channel;

struct Registered {
    channel: Arc<Channel>,
    definition: PhysicalChannel,
    refs: usize,
}

/// Channels hosted on this runtime, keyed by URI and side
///
/// A channel side is built once and shared by every deployment that
/// connects to it; each build adds a reference and the side is removed when
/// the last one is released.
#[derive(Default)]
pub struct ChannelManager {
    channels: DashMap<(String, ChannelSide), Registered>,
}

impl ChannelManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new channel side holding one reference
    pub fn register(&self, channel: Arc<Channel>, definition: PhysicalChannel) -> Result<()> {
        match self
            .channels
            .entry((channel.uri().to_string(), channel.side()))
        {
            Entry::Occupied(existing) => Err(Error::duplicate_channel(existing.key().0.clone())),
            Entry::Vacant(slot) => {
                slot.insert(Registered {
                    channel,
                    definition,
                    refs: 1,
                });
                Ok(())
            }
        }
    }

    /// Add a reference to a registered channel side; false if it is not registered
    pub fn acquire(&self, uri: &str, side: ChannelSide) -> bool {
        match self.channels.get_mut(&(uri.to_string(), side)) {
            Some(mut registered) => {
                registered.refs += 1;
                true
            }
            None => false,
        }
    }

    /// Release a reference
    ///
    /// Returns the channel and its definition when the last reference is
    /// released and the side is removed.
    pub fn release(&self, uri: &str, side: ChannelSide) -> Option<(Arc<Channel>, PhysicalChannel)> {
        let key = (uri.to_string(), side);
        let last = {
            let mut registered = self.channels.get_mut(&key)?;
            registered.refs = registered.refs.saturating_sub(1);
            registered.refs == 0
        };
        if last {
            self.channels
                .remove(&key)
                .map(|(_, registered)| (registered.channel, registered.definition))
        } else {
            None
        }
    }

    /// Remove a channel side regardless of its references
    pub fn unregister(&self, uri: &str, side: ChannelSide) -> Option<Arc<Channel>> {
        self.channels
            .remove(&(uri.to_string(), side))
            .map(|(_, registered)| registered.channel)
    }

    /// Look up a channel side
    pub fn get(&self, uri: &str, side: ChannelSide) -> Option<Arc<Channel>> {
        self.channels
            .get(&(uri.to_string(), side))
            .map(|registered| Arc::clone(&registered.channel))
    }

    /// Channel side a connection of the given direction attaches to
    ///
    /// The dedicated side of a bound channel wins over a collocated channel.
    pub fn find(&self, uri: &str, direction: ConnectionDirection) -> Option<Arc<Channel>> {
        let side = match direction {
            ConnectionDirection::Producer => ChannelSide::Producer,
            ConnectionDirection::Consumer => ChannelSide::Consumer,
        };
        self.get(uri, side)
            .or_else(|| self.get(uri, ChannelSide::Collocated))
    }

    /// References held on a channel side
    pub fn references(&self, uri: &str, side: ChannelSide) -> usize {
        self.channels
            .get(&(uri.to_string(), side))
            .map_or(0, |registered| registered.refs)
    }

    /// Number of hosted channel sides
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// True if no channel is hosted
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
