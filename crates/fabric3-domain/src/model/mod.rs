//! Assembly definitions
//!
//! The declarative input of instantiation: composites, the components they
//! configure and the component types of their implementations.

pub mod builder;
pub mod component;
pub mod composite;
pub mod definitions;

pub use builder::{ComponentDefinitionBuilder, CompositeBuilder};
pub use component::{
    ComponentConsumer, ComponentDefinition, ComponentProducer, ComponentReference,
    ComponentService, Implementation,
};
pub use composite::{ChannelDefinition, Composite, WireDefinition};
pub use definitions::{
    Autowire, BindingDefinition, CollectionKind, ComponentType, ConsumerDefinition, Multiplicity,
    ProducerDefinition, PropertyDefinition, ReferenceDefinition, ResourceReferenceDefinition,
    Scope, ServiceDefinition,
};
