//! Builders for programmatic assembly
//!
//! Front-ends that do not read composite files (embedded runtimes, tests)
//! assemble definitions through these builders.

use serde_json::Value;

use super::component::{
    ComponentConsumer, ComponentDefinition, ComponentProducer, ComponentReference,
    ComponentService, Implementation,
};
use super::composite::{ChannelDefinition, Composite, WireDefinition};
use super::definitions::{Autowire, ComponentType};
use crate::value_objects::QName;

/// Builder for component definitions
pub struct ComponentDefinitionBuilder {
    definition: ComponentDefinition,
}

impl ComponentDefinitionBuilder {
    /// Start a component backed by an atomic implementation
    pub fn atomic(
        name: impl Into<String>,
        kind: impl Into<String>,
        component_type: ComponentType,
    ) -> Self {
        Self {
            definition: ComponentDefinition::new(
                name,
                Implementation::atomic(kind, component_type),
            ),
        }
    }

    /// Start a component backed by a nested composite
    pub fn composite(name: impl Into<String>, composite: Composite) -> Self {
        Self {
            definition: ComponentDefinition::new(
                name,
                Implementation::Composite(Box::new(composite)),
            ),
        }
    }

    /// Set the component autowire
    pub fn autowire(mut self, autowire: Autowire) -> Self {
        self.definition.autowire = autowire;
        self
    }

    /// Set the component key
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.definition.key = Some(key.into());
        self
    }

    /// Set the component order
    pub fn order(mut self, order: i32) -> Self {
        self.definition.order = Some(order);
        self
    }

    /// Set the contribution URI
    pub fn contribution(mut self, uri: impl Into<String>) -> Self {
        self.definition.contribution_uri = Some(uri.into());
        self
    }

    /// Set a property value
    pub fn property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.definition.properties.insert(name.into(), value);
        self
    }

    /// Configure a service
    pub fn service(mut self, name: impl Into<String>, service: ComponentService) -> Self {
        self.definition.services.insert(name.into(), service);
        self
    }

    /// Configure a reference
    pub fn reference(mut self, name: impl Into<String>, reference: ComponentReference) -> Self {
        self.definition.references.insert(name.into(), reference);
        self
    }

    /// Wire a reference to explicit targets
    pub fn wire<I, S>(self, name: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reference(name, ComponentReference::targeting(targets))
    }

    /// Point a producer at target channels
    pub fn producer<I, S>(mut self, name: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definition.producers.insert(
            name.into(),
            ComponentProducer {
                targets: targets.into_iter().map(Into::into).collect(),
            },
        );
        self
    }

    /// Subscribe a consumer to source channels
    pub fn consumer<I, S>(mut self, name: impl Into<String>, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definition.consumers.insert(
            name.into(),
            ComponentConsumer {
                sources: sources.into_iter().map(Into::into).collect(),
                sequence: None,
            },
        );
        self
    }

    /// Subscribe a consumer with an explicit delivery order
    pub fn sequenced_consumer<I, S>(
        mut self,
        name: impl Into<String>,
        sources: I,
        sequence: i32,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definition.consumers.insert(
            name.into(),
            ComponentConsumer {
                sources: sources.into_iter().map(Into::into).collect(),
                sequence: Some(sequence),
            },
        );
        self
    }

    /// Build the definition
    pub fn build(self) -> ComponentDefinition {
        self.definition
    }
}

/// Builder for composites
pub struct CompositeBuilder {
    composite: Composite,
}

impl CompositeBuilder {
    /// Start a composite with the given qualified name
    pub fn new(name: QName) -> Self {
        Self {
            composite: Composite::new(name),
        }
    }

    /// Set the composite autowire
    pub fn autowire(mut self, autowire: Autowire) -> Self {
        self.composite.autowire = autowire;
        self
    }

    /// Set the contribution URI
    pub fn contribution(mut self, uri: impl Into<String>) -> Self {
        self.composite.contribution_uri = Some(uri.into());
        self
    }

    /// Add a component
    pub fn component(mut self, component: ComponentDefinition) -> Self {
        self.composite.components.push(component);
        self
    }

    /// Add a channel
    pub fn channel(mut self, channel: ChannelDefinition) -> Self {
        self.composite.channels.push(channel);
        self
    }

    /// Add an explicit wire
    pub fn wire(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.composite.wires.push(WireDefinition::new(source, target));
        self
    }

    /// Build the composite
    pub fn build(self) -> Composite {
        self.composite
    }
}
