//! Atomic component instantiation

use serde_json::Value;
use std::collections::BTreeMap;

use fabric3_domain::logical::{
    LogicalComponent, LogicalConsumer, LogicalModel, LogicalProducer, LogicalReference,
    LogicalResourceReference, LogicalService,
};
use fabric3_domain::model::{ComponentDefinition, ComponentType};
use fabric3_domain::value_objects::uri;
use fabric3_domain::{AssemblyFailure, InstantiationContext};

use super::ParentScope;

/// Resolve a producer target or consumer source to a channel URI
///
/// Relative names resolve against the parent composite. Absolute URIs
/// (`domain://orders`) resolve against the domain root using the authority
/// as a top-level channel name.
pub fn resolve_channel_uri(root: &str, parent: &str, name: &str) -> String {
    match uri::authority(name) {
        Some(authority) if uri::is_absolute(name) => uri::child_uri(root, authority),
        _ => uri::child_uri(parent, name),
    }
}

/// Instantiates components backed by atomic implementations
#[derive(Debug, Default, Clone, Copy)]
pub struct AtomicComponentInstantiator;

impl AtomicComponentInstantiator {
    /// Create an instantiator
    pub fn new() -> Self {
        Self
    }

    /// Add a logical component for `definition` under the scope's parent
    ///
    /// Returns the new component URI, or `None` after recording a
    /// [`AssemblyFailure::DuplicateComponent`] if the URI is taken.
    pub fn instantiate(
        &self,
        definition: &ComponentDefinition,
        scope: &ParentScope<'_>,
        model: &mut LogicalModel,
        context: &mut InstantiationContext,
    ) -> Option<String> {
        let component_uri = uri::child_uri(scope.parent, &definition.name);
        if model.contains(&component_uri) {
            context.add_error(AssemblyFailure::DuplicateComponent {
                component_uri,
                contribution_uri: definition.contribution_uri.clone(),
            });
            return None;
        }

        let empty = ComponentType::default();
        let component_type = definition.implementation.component_type().unwrap_or(&empty);
        let mut component = LogicalComponent::new(
            &component_uri,
            Some(scope.parent.to_string()),
            definition.clone(),
            scope.deployable.clone(),
        );
        component.autowire = definition.autowire.resolve(scope.autowire);

        Self::create_services(&mut component, component_type, definition);
        Self::create_references(&mut component, component_type, definition);
        Self::create_producers(&mut component, component_type, definition, model.root_uri(), scope);
        Self::create_consumers(&mut component, component_type, definition, model.root_uri(), scope);
        Self::create_resource_references(&mut component, component_type);
        component.properties =
            Self::initialize_properties(&component_uri, component_type, definition, context);

        if !model.add_component(component) {
            return None;
        }
        tracing::debug!(component = %component_uri, "Instantiated component");
        Some(component_uri)
    }

    fn create_services(
        component: &mut LogicalComponent,
        component_type: &ComponentType,
        definition: &ComponentDefinition,
    ) {
        for service in &component_type.services {
            let configured = definition.services.get(&service.name);
            let bindings = configured
                .map(|c| c.bindings.as_slice())
                .filter(|b| !b.is_empty())
                .unwrap_or(&service.bindings);
            let callback_bindings = configured
                .map(|c| c.callback_bindings.as_slice())
                .filter(|b| !b.is_empty())
                .unwrap_or(&service.callback_bindings);
            component.services.push(LogicalService::new(
                uri::member_uri(&component.uri, &service.name),
                service.clone(),
                bindings,
                callback_bindings,
            ));
        }
    }

    fn create_references(
        component: &mut LogicalComponent,
        component_type: &ComponentType,
        definition: &ComponentDefinition,
    ) {
        for reference in &component_type.references {
            component.references.push(LogicalReference::new(
                uri::member_uri(&component.uri, &reference.name),
                reference.clone(),
                definition.references.get(&reference.name).cloned(),
            ));
        }
    }

    fn create_producers(
        component: &mut LogicalComponent,
        component_type: &ComponentType,
        definition: &ComponentDefinition,
        root: &str,
        scope: &ParentScope<'_>,
    ) {
        for producer in &component_type.producers {
            let targets = definition
                .producers
                .get(&producer.name)
                .map(|p| p.targets.as_slice())
                .filter(|t| !t.is_empty())
                .unwrap_or(&producer.targets);
            component.producers.push(LogicalProducer {
                uri: uri::member_uri(&component.uri, &producer.name),
                name: producer.name.clone(),
                definition: producer.clone(),
                targets: targets
                    .iter()
                    .map(|t| resolve_channel_uri(root, scope.parent, t))
                    .collect(),
            });
        }
    }

    fn create_consumers(
        component: &mut LogicalComponent,
        component_type: &ComponentType,
        definition: &ComponentDefinition,
        root: &str,
        scope: &ParentScope<'_>,
    ) {
        for consumer in &component_type.consumers {
            let configured = definition.consumers.get(&consumer.name);
            let sources = configured
                .map(|c| c.sources.as_slice())
                .filter(|s| !s.is_empty())
                .unwrap_or(&consumer.sources);
            component.consumers.push(LogicalConsumer {
                uri: uri::member_uri(&component.uri, &consumer.name),
                name: consumer.name.clone(),
                definition: consumer.clone(),
                sources: sources
                    .iter()
                    .map(|s| resolve_channel_uri(root, scope.parent, s))
                    .collect(),
                sequence: configured
                    .and_then(|c| c.sequence)
                    .unwrap_or(consumer.sequence),
            });
        }
    }

    fn create_resource_references(component: &mut LogicalComponent, component_type: &ComponentType) {
        for resource in &component_type.resource_references {
            component.resource_references.push(LogicalResourceReference {
                uri: uri::member_uri(&component.uri, &resource.name),
                name: resource.name.clone(),
                definition: resource.clone(),
            });
        }
    }

    fn initialize_properties(
        component_uri: &str,
        component_type: &ComponentType,
        definition: &ComponentDefinition,
        context: &mut InstantiationContext,
    ) -> BTreeMap<String, Value> {
        let mut values = BTreeMap::new();
        for property in &component_type.properties {
            match definition
                .properties
                .get(&property.name)
                .or(property.default.as_ref())
            {
                Some(value) => {
                    values.insert(property.name.clone(), value.clone());
                }
                None if property.required => {
                    context.add_error(AssemblyFailure::PropertyNotFound {
                        property: property.name.clone(),
                        component_uri: component_uri.to_string(),
                    });
                }
                None => {}
            }
        }
        values
    }
}
