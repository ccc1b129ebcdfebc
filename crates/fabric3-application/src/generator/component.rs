//! Physical component generation

use fabric3_domain::logical::LogicalComponent;
use fabric3_domain::physical::{PhysicalComponent, PhysicalResource};

/// Generates physical component definitions for atomic components
#[derive(Debug, Default, Clone, Copy)]
pub struct ComponentGenerator;

impl ComponentGenerator {
    /// Create a generator
    pub fn new() -> Self {
        Self
    }

    /// Physical form of an atomic component; composites have none
    pub fn generate(&self, component: &LogicalComponent) -> Option<PhysicalComponent> {
        let component_type = component.definition.implementation.component_type()?;
        Some(PhysicalComponent {
            uri: component.uri.clone(),
            implementation: component.definition.implementation.kind().to_string(),
            scope: component_type.scope,
            eager_init: component_type.eager_init,
            deployable: component.deployable.clone(),
            contribution_uri: component.definition.contribution_uri.clone(),
            key: component.definition.key.clone(),
            order: component.definition.order,
            properties: component.properties.clone(),
            resources: component
                .resource_references
                .iter()
                .map(|r| PhysicalResource {
                    name: r.name.clone(),
                    interface: r.definition.contract.interface.clone(),
                    optional: r.definition.optional,
                })
                .collect(),
        })
    }
}
