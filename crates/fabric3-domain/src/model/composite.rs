//! Composite definitions

use serde::{Deserialize, Serialize};

use super::component::ComponentDefinition;
use super::definitions::{Autowire, BindingDefinition};
use crate::value_objects::QName;

/// A channel declared in a composite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelDefinition {
    /// Channel name, unique within the composite
    pub name: String,
    /// Channel type, `default` for the in-memory channel
    pub channel_type: String,
    /// Binding connecting the channel to a transport
    pub binding: Option<BindingDefinition>,
}

impl ChannelDefinition {
    /// Create an unbound default channel
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channel_type: crate::constants::DEFAULT_CHANNEL_TYPE.to_string(),
            binding: None,
        }
    }

    /// Bind the channel
    pub fn with_binding(mut self, binding: BindingDefinition) -> Self {
        self.binding = Some(binding);
        self
    }
}

/// An explicit wire declared in a composite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDefinition {
    /// Source reference, `component/reference`
    pub source: String,
    /// Target service, `component` or `component/service`
    pub target: String,
}

impl WireDefinition {
    /// Create a wire
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A composite: the unit of assembly and, when included into the domain, the deployable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composite {
    /// Qualified name; doubles as the deployable name
    pub name: QName,
    /// Composite-level autowire
    pub autowire: Autowire,
    /// Contribution the composite was loaded from
    pub contribution_uri: Option<String>,
    /// Components in declaration order
    pub components: Vec<ComponentDefinition>,
    /// Channels in declaration order
    pub channels: Vec<ChannelDefinition>,
    /// Explicit wires
    pub wires: Vec<WireDefinition>,
}

impl Composite {
    /// Create an empty composite
    pub fn new(name: QName) -> Self {
        Self {
            name,
            autowire: Autowire::Inherited,
            contribution_uri: None,
            components: Vec::new(),
            channels: Vec::new(),
            wires: Vec::new(),
        }
    }
}
