//! Composite instantiation

use fabric3_domain::logical::{LogicalComponent, LogicalModel};
use fabric3_domain::model::{ComponentDefinition, Composite, Implementation};
use fabric3_domain::value_objects::uri;
use fabric3_domain::{AssemblyFailure, InstantiationContext};

use super::ParentScope;
use super::atomic::AtomicComponentInstantiator;
use super::channel::ChannelInstantiator;
use super::wire::WireInstantiator;

/// Instantiates component definitions, recursing into nested composites
#[derive(Debug, Default, Clone, Copy)]
pub struct CompositeComponentInstantiator {
    atomic: AtomicComponentInstantiator,
    channels: ChannelInstantiator,
    wires: WireInstantiator,
}

impl CompositeComponentInstantiator {
    /// Create an instantiator
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate one component definition under the scope's parent
    pub fn instantiate(
        &self,
        definition: &ComponentDefinition,
        scope: &ParentScope<'_>,
        model: &mut LogicalModel,
        context: &mut InstantiationContext,
    ) -> Option<String> {
        let Implementation::Composite(composite) = &definition.implementation else {
            return self.atomic.instantiate(definition, scope, model, context);
        };

        let component_uri = uri::child_uri(scope.parent, &definition.name);
        if model.contains(&component_uri) {
            context.add_error(AssemblyFailure::DuplicateComponent {
                component_uri,
                contribution_uri: definition.contribution_uri.clone(),
            });
            return None;
        }
        let mut component = LogicalComponent::new(
            &component_uri,
            Some(scope.parent.to_string()),
            definition.clone(),
            scope.deployable.clone(),
        );
        component.autowire = definition
            .autowire
            .resolve(composite.autowire.resolve(scope.autowire));
        let autowire = component.autowire;
        if !model.add_component(component) {
            return None;
        }

        let nested = ParentScope {
            parent: &component_uri,
            deployable: scope.deployable,
            autowire,
        };
        self.instantiate_contents(composite, &nested, model, context);
        Some(component_uri)
    }

    /// Instantiate the components, channels and wires of a composite into the scope's parent
    ///
    /// Returns the URIs of the components created directly under the parent.
    pub fn instantiate_contents(
        &self,
        composite: &Composite,
        scope: &ParentScope<'_>,
        model: &mut LogicalModel,
        context: &mut InstantiationContext,
    ) -> Vec<String> {
        let created: Vec<String> = composite
            .components
            .iter()
            .filter_map(|definition| self.instantiate(definition, scope, model, context))
            .collect();

        self.channels
            .instantiate(&composite.channels, scope, model, context);

        for component_uri in &created {
            self.wires
                .instantiate_references(component_uri, model, context);
        }
        self.wires.instantiate_composite_wires(
            &composite.wires,
            scope.parent,
            scope.deployable,
            model,
            context,
        );
        created
    }
}
