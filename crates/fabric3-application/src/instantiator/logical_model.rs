//! Inclusion of composites into the domain

use std::sync::Arc;

use fabric3_domain::logical::{LogicalBinding, LogicalModel, LogicalState};
use fabric3_domain::model::Composite;
use fabric3_domain::ports::ContractMatcher;
use fabric3_domain::{AssemblyFailure, InstantiationContext, QName};

use super::ParentScope;
use super::autowire::AutowireInstantiator;
use super::composite::CompositeComponentInstantiator;
use crate::domain_services::AutowireResolver;
use crate::ports::registry::{BindingCatalog, RegisteredBindings};

/// Components created by an inclusion and the failures it reported
#[derive(Debug, Default)]
pub struct InstantiationOutcome {
    /// URIs of the components created directly under the domain root
    pub components: Vec<String>,
    /// Assembly failures
    pub context: InstantiationContext,
}

/// Includes composites into the logical model of a domain
#[derive(Clone)]
pub struct LogicalModelInstantiator {
    composite: CompositeComponentInstantiator,
    autowire: AutowireInstantiator,
    bindings: Arc<dyn BindingCatalog>,
}

impl LogicalModelInstantiator {
    /// Create an instantiator using the given contract matcher for autowire
    pub fn new(matcher: Arc<dyn ContractMatcher>) -> Self {
        Self {
            composite: CompositeComponentInstantiator::new(),
            autowire: AutowireInstantiator::new(AutowireResolver::new(matcher)),
            bindings: Arc::new(RegisteredBindings),
        }
    }

    /// Check binding types against `catalog` instead of the registered extensions
    #[must_use]
    pub fn with_bindings(mut self, catalog: Arc<dyn BindingCatalog>) -> Self {
        self.bindings = catalog;
        self
    }

    /// Instantiate a composite's contents into the domain root
    ///
    /// New components are autowired and report failures. Components already
    /// in the domain are autowired again so their multiplicity references pick
    /// up the new targets; failures on those are not attributed to this
    /// inclusion. Callers must [`rollback`](Self::rollback) when the outcome
    /// carries failures.
    pub fn include(&self, composite: &Composite, model: &mut LogicalModel) -> InstantiationOutcome {
        let root = model.root_uri().to_string();
        let existing = model.children_uris(&root);
        let scope = ParentScope {
            parent: &root,
            deployable: &composite.name,
            autowire: composite.autowire.resolve(model.root().autowire),
        };

        let mut context = InstantiationContext::new();
        let components = self
            .composite
            .instantiate_contents(composite, &scope, model, &mut context);
        self.check_bindings(&composite.name, &components, model, &mut context);

        for component_uri in &components {
            self.autowire.instantiate(component_uri, model, &mut context);
        }
        let mut refresh = InstantiationContext::new();
        for component_uri in &existing {
            self.autowire.instantiate(component_uri, model, &mut refresh);
        }
        for failure in refresh.errors() {
            tracing::debug!(failure = %failure, "Unresolved reference in deployed component");
        }

        InstantiationOutcome {
            components,
            context,
        }
    }

    /// Report bindings of the new components and channels no runtime
    /// extension handles
    fn check_bindings(
        &self,
        deployable: &QName,
        components: &[String],
        model: &LogicalModel,
        context: &mut InstantiationContext,
    ) {
        let mut unknown = Vec::new();
        for component_uri in components {
            for uri in model.descendants(component_uri) {
                let Some(component) = model.component(&uri) else {
                    continue;
                };
                for service in &component.services {
                    let bindings = service.bindings.iter().chain(&service.callback_bindings);
                    unknown.extend(self.unknown_wire_bindings(&service.uri, bindings));
                }
                for reference in &component.references {
                    let bindings = reference.bindings.iter().chain(&reference.callback_bindings);
                    unknown.extend(self.unknown_wire_bindings(&reference.uri, bindings));
                }
            }
        }
        for channel in model.channels() {
            if channel.state != LogicalState::New || channel.deployable != *deployable {
                continue;
            }
            if let Some(binding) = &channel.definition.binding
                && !self.bindings.supports_channel_binding(&binding.binding_type)
            {
                unknown.push(AssemblyFailure::BindingNotFound {
                    bindable_uri: channel.uri.clone(),
                    binding_type: binding.binding_type.clone(),
                });
            }
        }
        for failure in unknown {
            context.add_error(failure);
        }
    }

    fn unknown_wire_bindings<'a>(
        &'a self,
        bindable_uri: &'a str,
        bindings: impl Iterator<Item = &'a LogicalBinding> + 'a,
    ) -> impl Iterator<Item = AssemblyFailure> + 'a {
        bindings
            .filter(|b| !self.bindings.supports_wire_binding(&b.definition.binding_type))
            .map(move |b| AssemblyFailure::BindingNotFound {
                bindable_uri: bindable_uri.to_string(),
                binding_type: b.definition.binding_type.clone(),
            })
    }

    /// Remove everything a failed inclusion of `deployable` added
    pub fn rollback(&self, deployable: &QName, components: &[String], model: &mut LogicalModel) {
        for component_uri in components {
            model.remove_component(component_uri);
        }
        let root = model.root_uri().to_string();
        for uri in model.descendants(&root) {
            if let Some(state) = model.composite_mut(&uri) {
                state.channels.retain(|_, c| {
                    !(c.state == LogicalState::New && c.deployable == *deployable)
                });
                for wires in state.wires.values_mut() {
                    wires.retain(|w| !(w.state == LogicalState::New && w.deployable == *deployable));
                }
                state.wires.retain(|_, wires| !wires.is_empty());
            }
        }
        let stale: Vec<String> = model
            .components()
            .flat_map(|c| c.references.iter().map(|r| r.uri.clone()))
            .filter(|r| model.wires_of(r).is_empty())
            .collect();
        for reference_uri in stale {
            if let Some(reference) = model.reference_mut(&reference_uri) {
                reference.resolved = false;
            }
        }
    }
}
