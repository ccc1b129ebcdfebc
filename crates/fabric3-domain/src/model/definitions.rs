//! Component type definitions
//!
//! The component type is what an implementation declares about itself: the
//! services it offers, the references it needs, the channels it talks to and
//! the properties it can be configured with. Introspection front-ends produce
//! these; the runtime never looks at implementation code directly.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::value_objects::{DataType, ServiceContract};

/// Number of targets a reference may be wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Multiplicity {
    /// Optional single target
    ZeroOne,
    /// Exactly one target
    #[default]
    OneOne,
    /// Any number of targets
    ZeroN,
    /// At least one target
    OneN,
}

impl Multiplicity {
    /// True for the collection-valued multiplicities
    pub fn is_multiplicity(self) -> bool {
        matches!(self, Self::ZeroN | Self::OneN)
    }

    /// True if at least one target is required
    pub fn is_required(self) -> bool {
        matches!(self, Self::OneOne | Self::OneN)
    }
}

/// Autowire setting of a composite, component or reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Autowire {
    /// Take the setting of the enclosing composite
    #[default]
    Inherited,
    /// Resolve unwired references by type
    On,
    /// Never autowire
    Off,
}

impl Autowire {
    /// Resolve an inherited setting against the setting of the enclosing composite
    pub fn resolve(self, parent: Autowire) -> Autowire {
        match self {
            Self::Inherited => parent,
            other => other,
        }
    }
}

/// Lifecycle scope of component instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scope {
    /// A fresh instance per invocation
    Stateless,
    /// One instance per component for the lifetime of its deployable
    #[default]
    Composite,
}

/// Collection shape used to inject multiplicity references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollectionKind {
    /// Ordered list
    #[default]
    List,
    /// Ordered set, one entry per target
    Set,
    /// Map keyed by the target component key
    Map,
}

/// A binding configured on a service, reference or channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingDefinition {
    /// Binding name, unique on its bindable
    pub name: String,
    /// Binding type, resolved by the runtime binding registry
    pub binding_type: String,
    /// Transport address, if any
    pub target_uri: Option<String>,
    /// Binding specific configuration
    pub config: BTreeMap<String, Value>,
}

impl BindingDefinition {
    /// Create a binding of the given type
    pub fn new(name: impl Into<String>, binding_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            binding_type: binding_type.into(),
            target_uri: None,
            config: BTreeMap::new(),
        }
    }

    /// Set the transport address
    pub fn with_target_uri(mut self, uri: impl Into<String>) -> Self {
        self.target_uri = Some(uri.into());
        self
    }

    /// Add a configuration entry
    pub fn with_config(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config.insert(key.into(), value);
        self
    }
}

/// A service offered by an implementation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    /// Service name
    pub name: String,
    /// Service contract; every atomic service must declare one
    pub contract: Option<ServiceContract>,
    /// Default bindings
    pub bindings: Vec<BindingDefinition>,
    /// Default callback bindings
    pub callback_bindings: Vec<BindingDefinition>,
}

impl ServiceDefinition {
    /// Create a service with the given contract
    pub fn new(name: impl Into<String>, contract: ServiceContract) -> Self {
        Self {
            name: name.into(),
            contract: Some(contract),
            bindings: Vec::new(),
            callback_bindings: Vec::new(),
        }
    }
}

/// A reference required by an implementation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDefinition {
    /// Reference name
    pub name: String,
    /// Required contract
    pub contract: ServiceContract,
    /// Number of targets
    pub multiplicity: Multiplicity,
    /// Collection shape for multiplicity references
    pub collection: CollectionKind,
    /// True if targets are injected keyed by their component key
    pub keyed: bool,
    /// Default targets declared by the implementation
    pub targets: Vec<String>,
    /// Default bindings
    pub bindings: Vec<BindingDefinition>,
    /// Default callback bindings
    pub callback_bindings: Vec<BindingDefinition>,
}

impl ReferenceDefinition {
    /// Create a single-valued required reference
    pub fn new(name: impl Into<String>, contract: ServiceContract) -> Self {
        Self {
            name: name.into(),
            contract,
            multiplicity: Multiplicity::OneOne,
            collection: CollectionKind::List,
            keyed: false,
            targets: Vec::new(),
            bindings: Vec::new(),
            callback_bindings: Vec::new(),
        }
    }

    /// Set the multiplicity
    pub fn with_multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    /// Set the collection shape
    pub fn with_collection(mut self, collection: CollectionKind) -> Self {
        self.collection = collection;
        self
    }

    /// Mark the reference keyed; keyed multiplicities are injected as maps
    pub fn keyed(mut self) -> Self {
        self.keyed = true;
        self.collection = CollectionKind::Map;
        self
    }

    /// Add a default target
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.targets.push(target.into());
        self
    }

    /// Add a default binding
    pub fn with_binding(mut self, binding: BindingDefinition) -> Self {
        self.bindings.push(binding);
        self
    }
}

/// An event producer declared by an implementation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProducerDefinition {
    /// Producer name
    pub name: String,
    /// Types of events published
    pub event_types: Vec<DataType>,
    /// Default target channels
    pub targets: Vec<String>,
}

impl ProducerDefinition {
    /// Create a producer
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            event_types: Vec::new(),
            targets: Vec::new(),
        }
    }
}

/// An event consumer declared by an implementation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumerDefinition {
    /// Consumer name
    pub name: String,
    /// Types of events accepted
    pub event_types: Vec<DataType>,
    /// Default source channels
    pub sources: Vec<String>,
    /// Delivery order among consumers of the same channel
    pub sequence: i32,
}

impl ConsumerDefinition {
    /// Create a consumer with no ordering preference
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            event_types: Vec::new(),
            sources: Vec::new(),
            sequence: crate::constants::NO_SEQUENCE,
        }
    }
}

/// A configurable property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    /// Property name
    pub name: String,
    /// True if a value must be supplied
    pub required: bool,
    /// True if the property holds several values
    pub many: bool,
    /// Default value
    pub default: Option<Value>,
}

impl PropertyDefinition {
    /// Create an optional property
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            many: false,
            default: None,
        }
    }

    /// Mark the property required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// A reference to a runtime-provided resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceReferenceDefinition {
    /// Resource reference name
    pub name: String,
    /// Contract of the resource
    pub contract: ServiceContract,
    /// True if the resource may be absent
    pub optional: bool,
}

/// Everything an implementation declares about itself
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentType {
    /// Offered services in declaration order
    pub services: Vec<ServiceDefinition>,
    /// Required references in declaration order
    pub references: Vec<ReferenceDefinition>,
    /// Event producers
    pub producers: Vec<ProducerDefinition>,
    /// Event consumers
    pub consumers: Vec<ConsumerDefinition>,
    /// Configurable properties
    pub properties: Vec<PropertyDefinition>,
    /// Resource references
    pub resource_references: Vec<ResourceReferenceDefinition>,
    /// Instance scope
    pub scope: Scope,
    /// Create composite-scoped instances when their context starts
    pub eager_init: bool,
}

impl ComponentType {
    /// Create an empty component type
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a service
    pub fn with_service(mut self, service: ServiceDefinition) -> Self {
        self.services.push(service);
        self
    }

    /// Add a reference
    pub fn with_reference(mut self, reference: ReferenceDefinition) -> Self {
        self.references.push(reference);
        self
    }

    /// Add a producer
    pub fn with_producer(mut self, producer: ProducerDefinition) -> Self {
        self.producers.push(producer);
        self
    }

    /// Add a consumer
    pub fn with_consumer(mut self, consumer: ConsumerDefinition) -> Self {
        self.consumers.push(consumer);
        self
    }

    /// Add a property
    pub fn with_property(mut self, property: PropertyDefinition) -> Self {
        self.properties.push(property);
        self
    }

    /// Add a resource reference
    pub fn with_resource_reference(mut self, resource: ResourceReferenceDefinition) -> Self {
        self.resource_references.push(resource);
        self
    }

    /// Set the instance scope
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Create instances eagerly when their context starts
    pub fn eager(mut self) -> Self {
        self.eager_init = true;
        self
    }
}
