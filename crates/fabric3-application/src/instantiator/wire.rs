//! Explicit wire instantiation
//!
//! Resolves reference targets named on component definitions and wires
//! declared on composites. Targets are `component` or `component/service`,
//! relative to the composite containing the source component.

use fabric3_domain::logical::{LogicalModel, LogicalState, LogicalWire};
use fabric3_domain::model::WireDefinition;
use fabric3_domain::value_objects::uri;
use fabric3_domain::{AssemblyFailure, InstantiationContext, QName};

/// Creates non-autowired wires for explicitly targeted references
#[derive(Debug, Default, Clone, Copy)]
pub struct WireInstantiator;

enum Resolution {
    Service(String),
    Failure(AssemblyFailure),
}

impl WireInstantiator {
    /// Create an instantiator
    pub fn new() -> Self {
        Self
    }

    /// Wire every reference of a component that names explicit targets
    pub fn instantiate_references(
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
        let deployable = component.deployable.clone();
        let targeted: Vec<(String, Vec<String>)> = component
            .references
            .iter()
            .filter(|r| !r.targets().is_empty())
            .map(|r| (r.uri.clone(), r.targets().to_vec()))
            .collect();

        for (reference_uri, targets) in targeted {
            for target in targets {
                self.wire(&reference_uri, &target, &parent, &deployable, model, context);
            }
        }
    }

    /// Wire the `<wire>` declarations of a composite
    pub fn instantiate_composite_wires(
        &self,
        wires: &[WireDefinition],
        composite_uri: &str,
        deployable: &QName,
        model: &mut LogicalModel,
        context: &mut InstantiationContext,
    ) {
        for wire in wires {
            let Some(reference_uri) = Self::resolve_source(&wire.source, composite_uri, model)
            else {
                let component_uri =
                    uri::child_uri(composite_uri, wire.source.split('/').next().unwrap_or_default());
                context.add_error(AssemblyFailure::ReferenceNotFound {
                    message: format!("Wire source not found: {}", wire.source),
                    reference_uri: uri::child_uri(composite_uri, &wire.source),
                    component_uri,
                    contribution_uri: None,
                });
                continue;
            };
            self.wire(&reference_uri, &wire.target, composite_uri, deployable, model, context);
        }
    }

    fn wire(
        &self,
        reference_uri: &str,
        target: &str,
        composite_uri: &str,
        deployable: &QName,
        model: &mut LogicalModel,
        context: &mut InstantiationContext,
    ) {
        match Self::resolve_target(reference_uri, target, composite_uri, model) {
            Resolution::Service(service_uri) => {
                let exists = model
                    .wires_of(reference_uri)
                    .iter()
                    .any(|w| w.target == service_uri && w.state != LogicalState::Marked);
                if !exists {
                    model.add_wire(LogicalWire::new(
                        reference_uri,
                        service_uri,
                        deployable.clone(),
                        false,
                    ));
                }
                if let Some(reference) = model.reference_mut(reference_uri) {
                    reference.resolved = true;
                }
            }
            Resolution::Failure(failure) => context.add_error(failure),
        }
    }

    fn resolve_source(source: &str, composite_uri: &str, model: &LogicalModel) -> Option<String> {
        let (component_name, reference_name) = match source.split_once('/') {
            Some((component, reference)) => (component, Some(reference)),
            None => (source, None),
        };
        let component = model.component(&uri::child_uri(composite_uri, component_name))?;
        match reference_name {
            Some(name) => component.reference(name).map(|r| r.uri.clone()),
            None if component.references.len() == 1 => Some(component.references[0].uri.clone()),
            None => None,
        }
    }

    fn resolve_target(
        reference_uri: &str,
        target: &str,
        composite_uri: &str,
        model: &LogicalModel,
    ) -> Resolution {
        let source_component = uri::split_member(reference_uri)
            .map(|(c, _)| c.to_string())
            .unwrap_or_default();
        let contribution_uri = model
            .component(&source_component)
            .and_then(|c| c.definition.contribution_uri.clone());
        let not_found = |message: String| {
            Resolution::Failure(AssemblyFailure::ReferenceNotFound {
                message,
                reference_uri: reference_uri.to_string(),
                component_uri: source_component.clone(),
                contribution_uri: contribution_uri.clone(),
            })
        };

        let (component_name, service_name) = match target.split_once('/') {
            Some((component, service)) => (component, Some(service)),
            None => (target, None),
        };
        let Some(component) = model.component(&uri::child_uri(composite_uri, component_name))
        else {
            return not_found(format!(
                "Target {target} not found for reference {reference_uri}"
            ));
        };

        match service_name {
            Some(name) => match component.service(name) {
                Some(service) => Resolution::Service(service.uri.clone()),
                None => not_found(format!(
                    "Service {name} not found on {} for reference {reference_uri}",
                    component.uri
                )),
            },
            None => match component.services.as_slice() {
                [service] => Resolution::Service(service.uri.clone()),
                [] => not_found(format!(
                    "Target {target} of reference {reference_uri} has no services"
                )),
                _ => Resolution::Failure(AssemblyFailure::AmbiguousService {
                    reference_uri: reference_uri.to_string(),
                    target: target.to_string(),
                }),
            },
        }
    }
}
