//! Services, references, producers and consumers of logical components

use serde::{Deserialize, Serialize};

use super::state::LogicalState;
use crate::model::{
    BindingDefinition, ComponentReference, ConsumerDefinition, Multiplicity, ProducerDefinition,
    ReferenceDefinition, ResourceReferenceDefinition, ServiceDefinition,
};
use crate::value_objects::ServiceContract;

/// A binding attached to a service or reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalBinding {
    /// Binding definition
    pub definition: BindingDefinition,
    /// Provisioning state
    pub state: LogicalState,
}

impl LogicalBinding {
    /// Create a new binding
    pub fn new(definition: BindingDefinition) -> Self {
        Self {
            definition,
            state: LogicalState::New,
        }
    }
}

fn to_bindings(definitions: &[BindingDefinition]) -> Vec<LogicalBinding> {
    definitions.iter().cloned().map(LogicalBinding::new).collect()
}

/// A service exposed by a logical component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalService {
    /// Service URI, `component#name`
    pub uri: String,
    /// Service name
    pub name: String,
    /// Component type definition
    pub definition: ServiceDefinition,
    /// Effective bindings
    pub bindings: Vec<LogicalBinding>,
    /// Effective callback bindings
    pub callback_bindings: Vec<LogicalBinding>,
}

impl LogicalService {
    /// Create a service from its definition and effective bindings
    pub fn new(
        uri: impl Into<String>,
        definition: ServiceDefinition,
        bindings: &[BindingDefinition],
        callback_bindings: &[BindingDefinition],
    ) -> Self {
        Self {
            uri: uri.into(),
            name: definition.name.clone(),
            definition,
            bindings: to_bindings(bindings),
            callback_bindings: to_bindings(callback_bindings),
        }
    }

    /// Contract of the service
    ///
    /// # Panics
    ///
    /// Atomic services always carry a contract; a missing one is a bug in the
    /// front-end that produced the component type.
    pub fn contract(&self) -> &ServiceContract {
        match &self.definition.contract {
            Some(contract) => contract,
            None => panic!("No service contract specified on service: {}", self.uri),
        }
    }
}

/// A reference of a logical component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalReference {
    /// Reference URI, `component#name`
    pub uri: String,
    /// Reference name
    pub name: String,
    /// Component type definition
    pub definition: ReferenceDefinition,
    /// Configuration from the component definition, if any
    pub component_reference: Option<ComponentReference>,
    /// Effective multiplicity
    pub multiplicity: Multiplicity,
    /// Effective bindings
    pub bindings: Vec<LogicalBinding>,
    /// Effective callback bindings
    pub callback_bindings: Vec<LogicalBinding>,
    /// True once the reference has at least one wire
    pub resolved: bool,
}

impl LogicalReference {
    /// Create a reference; definition-level bindings replace the component type defaults
    pub fn new(
        uri: impl Into<String>,
        definition: ReferenceDefinition,
        component_reference: Option<ComponentReference>,
    ) -> Self {
        let (bindings, callback_bindings, multiplicity) = match &component_reference {
            Some(configured) => (
                if configured.bindings.is_empty() {
                    to_bindings(&definition.bindings)
                } else {
                    to_bindings(&configured.bindings)
                },
                if configured.callback_bindings.is_empty() {
                    to_bindings(&definition.callback_bindings)
                } else {
                    to_bindings(&configured.callback_bindings)
                },
                configured.multiplicity.unwrap_or(definition.multiplicity),
            ),
            None => (
                to_bindings(&definition.bindings),
                to_bindings(&definition.callback_bindings),
                definition.multiplicity,
            ),
        };
        Self {
            uri: uri.into(),
            name: definition.name.clone(),
            definition,
            component_reference,
            multiplicity,
            bindings,
            callback_bindings,
            resolved: false,
        }
    }

    /// True for collection-valued references
    pub fn is_multiplicity(&self) -> bool {
        self.multiplicity.is_multiplicity()
    }

    /// True if at least one target is required
    pub fn is_required(&self) -> bool {
        self.multiplicity.is_required()
    }

    /// True if targets must carry a component key
    pub fn is_keyed(&self) -> bool {
        self.definition.keyed
    }

    /// Explicit targets: component-definition targets, else component type targets
    pub fn targets(&self) -> &[String] {
        match &self.component_reference {
            Some(configured) if !configured.targets.is_empty() => &configured.targets,
            _ => &self.definition.targets,
        }
    }
}

/// An event producer of a logical component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalProducer {
    /// Producer URI, `component#name`
    pub uri: String,
    /// Producer name
    pub name: String,
    /// Component type definition
    pub definition: ProducerDefinition,
    /// Resolved target channel URIs
    pub targets: Vec<String>,
}

/// An event consumer of a logical component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalConsumer {
    /// Consumer URI, `component#name`
    pub uri: String,
    /// Consumer name
    pub name: String,
    /// Component type definition
    pub definition: ConsumerDefinition,
    /// Resolved source channel URIs
    pub sources: Vec<String>,
    /// Delivery order among consumers of the same channel
    pub sequence: i32,
}

/// A resource reference of a logical component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalResourceReference {
    /// Resource reference URI, `component#name`
    pub uri: String,
    /// Resource reference name
    pub name: String,
    /// Component type definition
    pub definition: ResourceReferenceDefinition,
}
