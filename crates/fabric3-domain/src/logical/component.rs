//! Logical components

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::bindables::{
    LogicalConsumer, LogicalProducer, LogicalReference, LogicalResourceReference, LogicalService,
};
use super::channel::LogicalChannel;
use super::state::LogicalState;
use super::wire::LogicalWire;
use crate::model::{Autowire, ComponentDefinition};
use crate::value_objects::QName;

/// Children, channels and wires of a composite component
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeState {
    /// Child component URIs in instantiation order
    pub children: Vec<String>,
    /// Channels by URI
    pub channels: BTreeMap<String, LogicalChannel>,
    /// Wires by source reference URI
    pub wires: BTreeMap<String, Vec<LogicalWire>>,
}

impl CompositeState {
    /// Wires of one reference
    pub fn wires_of(&self, reference_uri: &str) -> &[LogicalWire] {
        self.wires.get(reference_uri).map_or(&[], Vec::as_slice)
    }

    /// Add a wire to a reference
    pub fn add_wire(&mut self, wire: LogicalWire) {
        self.wires.entry(wire.source.clone()).or_default().push(wire);
    }
}

/// A node of the logical model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalComponent {
    /// Component URI
    pub uri: String,
    /// Parent composite URI; `None` only for the domain root
    pub parent: Option<String>,
    /// Definition the component was instantiated from
    pub definition: ComponentDefinition,
    /// Deployable that owns the component
    pub deployable: QName,
    /// Provisioning state
    pub state: LogicalState,
    /// Effective autowire
    pub autowire: Autowire,
    /// Services in declaration order
    pub services: Vec<LogicalService>,
    /// References in declaration order
    pub references: Vec<LogicalReference>,
    /// Producers in declaration order
    pub producers: Vec<LogicalProducer>,
    /// Consumers in declaration order
    pub consumers: Vec<LogicalConsumer>,
    /// Resource references in declaration order
    pub resource_references: Vec<LogicalResourceReference>,
    /// Effective property values
    pub properties: BTreeMap<String, Value>,
    /// Composite state, present for composite components
    pub composite: Option<CompositeState>,
}

impl LogicalComponent {
    /// Create an empty atomic component node
    pub fn new(
        uri: impl Into<String>,
        parent: Option<String>,
        definition: ComponentDefinition,
        deployable: QName,
    ) -> Self {
        let composite = definition.is_composite().then(CompositeState::default);
        Self {
            uri: uri.into(),
            parent,
            definition,
            deployable,
            state: LogicalState::New,
            autowire: Autowire::Inherited,
            services: Vec::new(),
            references: Vec::new(),
            producers: Vec::new(),
            consumers: Vec::new(),
            resource_references: Vec::new(),
            properties: BTreeMap::new(),
            composite,
        }
    }

    /// True for composite components
    pub fn is_composite(&self) -> bool {
        self.composite.is_some()
    }

    /// Key used for keyed reference injection
    pub fn key(&self) -> Option<&str> {
        self.definition.key.as_deref()
    }

    /// Find a service by name
    pub fn service(&self, name: &str) -> Option<&LogicalService> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Find a reference by name
    pub fn reference(&self, name: &str) -> Option<&LogicalReference> {
        self.references.iter().find(|r| r.name == name)
    }

    /// Find a reference by name for update
    pub fn reference_mut(&mut self, name: &str) -> Option<&mut LogicalReference> {
        self.references.iter_mut().find(|r| r.name == name)
    }
}
