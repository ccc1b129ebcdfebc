//! Component definitions
//!
//! A component definition configures an implementation inside a composite:
//! it names the component, overrides bindings and targets of the
//! implementation's services and references, and supplies property values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::composite::Composite;
use super::definitions::{Autowire, BindingDefinition, ComponentType, Multiplicity};

/// Service configuration on a component definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentService {
    /// Bindings; replace the component type bindings when non-empty
    pub bindings: Vec<BindingDefinition>,
    /// Callback bindings; replace the component type callback bindings when non-empty
    pub callback_bindings: Vec<BindingDefinition>,
}

/// Reference configuration on a component definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentReference {
    /// Explicit targets, `component` or `component/service`
    pub targets: Vec<String>,
    /// Resolve this reference by type
    pub autowire: bool,
    /// Overridden multiplicity
    pub multiplicity: Option<Multiplicity>,
    /// Bindings; replace the component type bindings when non-empty
    pub bindings: Vec<BindingDefinition>,
    /// Callback bindings
    pub callback_bindings: Vec<BindingDefinition>,
}

impl ComponentReference {
    /// Reference configured with explicit targets
    pub fn targeting<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Reference configured for autowire
    pub fn autowired() -> Self {
        Self {
            autowire: true,
            ..Default::default()
        }
    }

    /// Reference configured with a binding
    pub fn bound(binding: BindingDefinition) -> Self {
        Self {
            bindings: vec![binding],
            ..Default::default()
        }
    }
}

/// Producer configuration on a component definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentProducer {
    /// Target channels, relative to the parent composite or `domain://name`
    pub targets: Vec<String>,
}

/// Consumer configuration on a component definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentConsumer {
    /// Source channels, relative to the parent composite or `domain://name`
    pub sources: Vec<String>,
    /// Overridden delivery order
    pub sequence: Option<i32>,
}

/// The implementation a component configures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Implementation {
    /// A leaf implementation resolved by the runtime implementation registry
    Atomic {
        /// Implementation kind, e.g. `system` or `mock`
        kind: String,
        /// Introspected component type
        component_type: ComponentType,
    },
    /// A nested composite
    Composite(Box<Composite>),
}

impl Implementation {
    /// Atomic implementation of the given kind
    pub fn atomic(kind: impl Into<String>, component_type: ComponentType) -> Self {
        Self::Atomic {
            kind: kind.into(),
            component_type,
        }
    }

    /// Implementation kind; nested composites report `composite`
    pub fn kind(&self) -> &str {
        match self {
            Self::Atomic { kind, .. } => kind,
            Self::Composite(_) => crate::constants::COMPOSITE_IMPLEMENTATION,
        }
    }

    /// Component type of an atomic implementation
    pub fn component_type(&self) -> Option<&ComponentType> {
        match self {
            Self::Atomic { component_type, .. } => Some(component_type),
            Self::Composite(_) => None,
        }
    }
}

/// A configured component inside a composite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    /// Name, unique within the parent composite
    pub name: String,
    /// Implementation
    pub implementation: Implementation,
    /// Component-level autowire
    pub autowire: Autowire,
    /// Key used when the component is injected into keyed references
    pub key: Option<String>,
    /// Order used when the component is injected into multiplicity references
    pub order: Option<i32>,
    /// Contribution the definition was loaded from
    pub contribution_uri: Option<String>,
    /// Property values
    pub properties: BTreeMap<String, Value>,
    /// Service configuration by service name
    pub services: BTreeMap<String, ComponentService>,
    /// Reference configuration by reference name
    pub references: BTreeMap<String, ComponentReference>,
    /// Producer configuration by producer name
    pub producers: BTreeMap<String, ComponentProducer>,
    /// Consumer configuration by consumer name
    pub consumers: BTreeMap<String, ComponentConsumer>,
}

impl ComponentDefinition {
    /// Create a definition with no configuration
    pub fn new(name: impl Into<String>, implementation: Implementation) -> Self {
        Self {
            name: name.into(),
            implementation,
            autowire: Autowire::Inherited,
            key: None,
            order: None,
            contribution_uri: None,
            properties: BTreeMap::new(),
            services: BTreeMap::new(),
            references: BTreeMap::new(),
            producers: BTreeMap::new(),
            consumers: BTreeMap::new(),
        }
    }

    /// True if the implementation is a nested composite
    pub fn is_composite(&self) -> bool {
        matches!(self.implementation, Implementation::Composite(_))
    }
}
