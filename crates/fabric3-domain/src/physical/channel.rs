//! Physical channel definitions

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::injectable::Injectable;
use crate::value_objects::{DataType, QName};

/// Which side of a channel a runtime hosts
///
/// A bound channel is split into a producer side and a consumer side joined
/// by the transport; an unbound channel is collocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelSide {
    /// Receives events from local producers and hands them to the transport
    Producer,
    /// Receives events from the transport and delivers them to local consumers
    Consumer,
    /// Producers and consumers share one in-memory channel
    Collocated,
}

/// Transport binding of a channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalChannelBinding {
    /// Binding type, resolved by the runtime binding builder table
    pub binding_type: String,
    /// Binding configuration
    pub config: BTreeMap<String, Value>,
}

/// A channel ready to be built on a runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalChannel {
    /// Channel URI
    pub uri: String,
    /// Deployable owning the channel
    pub deployable: QName,
    /// Hosted side
    pub side: ChannelSide,
    /// Channel type
    pub channel_type: String,
    /// Transport binding
    pub binding: Option<PhysicalChannelBinding>,
}

impl PhysicalChannel {
    /// True if the channel is connected to a transport
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }
}

/// Direction of a channel connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionDirection {
    /// Producer publishing into a channel
    Producer,
    /// Channel delivering to a consumer
    Consumer,
}

/// One end of a channel connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConnectionEnd {
    /// A producer or consumer of a component
    Component {
        /// Component URI
        uri: String,
        /// Producer or consumer injection site
        injectable: Injectable,
    },
    /// A channel
    Channel {
        /// Channel URI
        uri: String,
    },
}

impl ConnectionEnd {
    /// URI of the component or channel
    pub fn uri(&self) -> &str {
        match self {
            Self::Component { uri, .. } | Self::Channel { uri } => uri,
        }
    }
}

/// A producer-to-channel or channel-to-consumer connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalChannelConnection {
    /// URI of the producer or consumer
    pub uri: String,
    /// URI of the connected channel
    pub channel_uri: String,
    /// Source end
    pub source: ConnectionEnd,
    /// Target end
    pub target: ConnectionEnd,
    /// Event types carried
    pub event_types: Vec<DataType>,
    /// Delivery order for consumer connections
    pub sequence: i32,
    /// Direction
    pub direction: ConnectionDirection,
    /// Deployable owning the connection
    pub deployable: QName,
}
