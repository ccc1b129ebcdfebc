//! Autowire instantiation
//!
//! Resolves references that have no explicit targets by searching for
//! services with assignable contracts, and creates the resulting wires.

use fabric3_domain::logical::{LogicalModel, LogicalReference, LogicalState, LogicalWire};
use fabric3_domain::model::Autowire;
use fabric3_domain::value_objects::uri;
use fabric3_domain::{AssemblyFailure, InstantiationContext};

use crate::domain_services::AutowireResolver;

/// Resolves unwired references by type
#[derive(Clone)]
pub struct AutowireInstantiator {
    resolver: AutowireResolver,
}

impl AutowireInstantiator {
    /// Create an instantiator backed by the given resolver
    pub fn new(resolver: AutowireResolver) -> Self {
        Self { resolver }
    }

    /// Resolve the references of a component and, recursively, of its children
    pub fn instantiate(
        &self,
        component_uri: &str,
        model: &mut LogicalModel,
        context: &mut InstantiationContext,
    ) {
        self.resolve_references(component_uri, model, context);
        for child in model.children_uris(component_uri) {
            self.instantiate(&child, model, context);
        }
    }

    fn resolve_references(
        &self,
        component_uri: &str,
        model: &mut LogicalModel,
        context: &mut InstantiationContext,
    ) {
        let Some(component) = model.component(component_uri) else {
            return;
        };
        let Some(parent) = component.parent.clone() else {
            return;
        };
        let references: Vec<String> = component.references.iter().map(|r| r.uri.clone()).collect();

        for reference_uri in references {
            let Some(reference) = model.reference_mut(&reference_uri) else {
                continue;
            };
            // multiplicities are re-resolved on every pass since new targets may have been deployed
            if reference.is_multiplicity() || !reference.resolved {
                reference.resolved = false;
                self.resolve(&reference_uri, &parent, model, context);
            }
        }
    }

    fn resolve(
        &self,
        reference_uri: &str,
        composite_uri: &str,
        model: &mut LogicalModel,
        context: &mut InstantiationContext,
    ) {
        let Some(reference) = model.reference(reference_uri).cloned() else {
            return;
        };
        let Some((component_uri, _)) = uri::split_member(reference_uri) else {
            return;
        };
        let Some(component) = model.component(component_uri) else {
            return;
        };
        let component_autowire = component.autowire;
        let contribution_uri = component.definition.contribution_uri.clone();
        let component_uri = component_uri.to_string();

        match &reference.component_reference {
            None => {
                if !reference.targets().is_empty() {
                    return;
                }
                if component_autowire == Autowire::On {
                    self.resolve_by_type(&reference, composite_uri, model);
                }
            }
            Some(configured) => {
                if !configured.targets.is_empty() {
                    return;
                }
                if configured.autowire
                    && !self.resolve_by_type(&reference, composite_uri, model)
                {
                    let grandparent = model.component(composite_uri).and_then(|c| c.parent.clone());
                    if let Some(grandparent) = grandparent {
                        self.resolve_by_type(&reference, &grandparent, model);
                    }
                }
            }
        }

        let targeted = model
            .wires_of(reference_uri)
            .iter()
            .any(|w| w.state != LogicalState::Marked);
        if !targeted && reference.is_required() && reference.bindings.is_empty() {
            context.add_error(AssemblyFailure::ReferenceNotFound {
                message: format!("Unable to resolve reference {reference_uri}"),
                reference_uri: reference_uri.to_string(),
                component_uri,
                contribution_uri,
            });
        } else if targeted && let Some(reference) = model.reference_mut(reference_uri) {
            reference.resolved = true;
        }
    }

    /// Wire the reference to matching services in `composite_uri`; true if any matched
    fn resolve_by_type(
        &self,
        reference: &LogicalReference,
        composite_uri: &str,
        model: &mut LogicalModel,
    ) -> bool {
        let candidates = self.resolver.resolve(reference, composite_uri, model);
        if candidates.is_empty() {
            return false;
        }
        for target in candidates {
            let exists = model
                .wires_of(&reference.uri)
                .iter()
                .any(|w| w.target == target && w.state != LogicalState::Marked);
            if exists {
                continue;
            }
            // autowires belong to the target's deployable so they go away when the target does
            let Some(deployable) = uri::split_member(&target)
                .and_then(|(c, _)| model.component(c))
                .map(|c| c.deployable.clone())
            else {
                continue;
            };
            tracing::debug!(reference = %reference.uri, target = %target, "Autowired reference");
            model.add_wire(LogicalWire::new(&reference.uri, target, deployable, true));
        }
        true
    }
}
