//! Deployment commands
//!
//! Generators turn logical changes into a list of commands; a runtime
//! executes them in order.

use serde::{Deserialize, Serialize};

use super::channel::{PhysicalChannel, PhysicalChannelConnection};
use super::component::PhysicalComponent;
use super::wire::PhysicalWire;
use crate::value_objects::QName;

/// A single deployment step executed on a runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Build and register a component
    BuildComponent(PhysicalComponent),
    /// Unregister and discard a component
    DisposeComponent(PhysicalComponent),
    /// Build a channel, or add a reference to an existing one
    BuildChannel(PhysicalChannel),
    /// Release a channel reference, disposing the channel on the last one
    DisposeChannel(PhysicalChannel),
    /// Attach a wire to its source and target
    AttachWire(PhysicalWire),
    /// Detach a wire
    DetachWire(PhysicalWire),
    /// Attach a producer or consumer connection
    AttachChannelConnection(PhysicalChannelConnection),
    /// Detach a producer or consumer connection
    DetachChannelConnection(PhysicalChannelConnection),
    /// Start the scope contexts of a deployable
    StartContext(QName),
    /// Stop the scope contexts of a deployable
    StopContext(QName),
    /// Reinject live instances of the named components
    Reinject(Vec<String>),
}

impl Command {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BuildComponent(_) => "build-component",
            Self::DisposeComponent(_) => "dispose-component",
            Self::BuildChannel(_) => "build-channel",
            Self::DisposeChannel(_) => "dispose-channel",
            Self::AttachWire(_) => "attach-wire",
            Self::DetachWire(_) => "detach-wire",
            Self::AttachChannelConnection(_) => "attach-channel-connection",
            Self::DetachChannelConnection(_) => "detach-channel-connection",
            Self::StartContext(_) => "start-context",
            Self::StopContext(_) => "stop-context",
            Self::Reinject(_) => "reinject",
        }
    }
}

/// Wire attach/detach commands generated for one component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionCommand {
    /// Component the wires belong to
    pub component: String,
    /// Wires to attach
    pub attach: Vec<PhysicalWire>,
    /// Wires to detach
    pub detach: Vec<PhysicalWire>,
}

impl ConnectionCommand {
    /// Create an empty command for a component
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            ..Default::default()
        }
    }

    /// True if nothing needs to change
    pub fn is_empty(&self) -> bool {
        self.attach.is_empty() && self.detach.is_empty()
    }
}

/// Channel build and connection commands generated for producers or consumers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelConnectionCommand {
    /// Channels to build before attaching
    pub build_channels: Vec<PhysicalChannel>,
    /// Connections to attach
    pub attach: Vec<PhysicalChannelConnection>,
    /// Connections to detach
    pub detach: Vec<PhysicalChannelConnection>,
    /// Channels to release after detaching
    pub dispose_channels: Vec<PhysicalChannel>,
}

impl ChannelConnectionCommand {
    /// True if nothing needs to change
    pub fn is_empty(&self) -> bool {
        self.build_channels.is_empty()
            && self.attach.is_empty()
            && self.detach.is_empty()
            && self.dispose_channels.is_empty()
    }

    /// Merge another command into this one
    pub fn merge(&mut self, other: ChannelConnectionCommand) {
        self.build_channels.extend(other.build_channels);
        self.attach.extend(other.attach);
        self.detach.extend(other.detach);
        self.dispose_channels.extend(other.dispose_channels);
    }
}
