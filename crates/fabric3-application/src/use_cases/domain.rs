//! Domain Use Case
//!
//! Deploys and undeploys composites. Each operation runs one incremental
//! pass over the logical model: instantiate or mark, generate commands,
//! execute them on the runtime, then settle node states.

use std::sync::{Arc, Mutex, MutexGuard};

use fabric3_domain::logical::{LogicalModel, LogicalState};
use fabric3_domain::model::{Autowire, Composite};
use fabric3_domain::ports::ContractMatcher;
use fabric3_domain::value_objects::uri;
use fabric3_domain::{Error, QName, Result};

use crate::generator::{Generator, PhysicalWireGenerator};
use crate::instantiator::LogicalModelInstantiator;
use crate::ports::CommandExecutor;
use crate::ports::registry::BindingCatalog;

/// A deployment domain backed by one runtime executor
pub struct Domain {
    model: Mutex<LogicalModel>,
    instantiator: LogicalModelInstantiator,
    generator: Generator,
    executor: Arc<dyn CommandExecutor>,
}

impl Domain {
    /// Create a domain with the given root autowire setting
    pub fn new(
        autowire: Autowire,
        matcher: Arc<dyn ContractMatcher>,
        wires: PhysicalWireGenerator,
        executor: Arc<dyn CommandExecutor>,
    ) -> Self {
        Self {
            model: Mutex::new(LogicalModel::new(autowire)),
            instantiator: LogicalModelInstantiator::new(matcher),
            generator: Generator::new(wires),
            executor,
        }
    }

    /// Validate binding types against `catalog` on inclusion
    #[must_use]
    pub fn with_bindings(mut self, catalog: Arc<dyn BindingCatalog>) -> Self {
        self.instantiator = self.instantiator.with_bindings(catalog);
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, LogicalModel>> {
        self.model
            .lock()
            .map_err(|_| Error::internal("Logical model lock poisoned"))
    }

    /// Deploy a composite
    ///
    /// Assembly failures, generation errors and execution errors all leave the
    /// logical model as it was before the call. Commands already executed on
    /// the runtime are not compensated.
    pub fn include(&self, composite: &Composite) -> Result<()> {
        let mut model = self.lock()?;
        let outcome = self.instantiator.include(composite, &mut model);
        if outcome.context.has_errors() {
            tracing::warn!(
                deployable = %composite.name,
                failures = outcome.context.errors().len(),
                "Deployment failed with assembly errors"
            );
            self.instantiator
                .rollback(&composite.name, &outcome.components, &mut model);
            return outcome.context.into_result();
        }

        let executed = self
            .generator
            .generate(&model)
            .and_then(|commands| self.executor.execute(&commands));
        if let Err(e) = executed {
            tracing::warn!(deployable = %composite.name, error = %e, "Deployment failed");
            self.instantiator
                .rollback(&composite.name, &outcome.components, &mut model);
            return Err(e);
        }

        provision(&mut model);
        tracing::info!(
            deployable = %composite.name,
            components = outcome.components.len(),
            "Deployed composite"
        );
        Ok(())
    }

    /// Undeploy everything owned by a deployable
    ///
    /// Wires from other deployables into the removed components are detached
    /// and their sources reinjected. A deployable whose channels are still
    /// connected to producers or consumers of other deployables is refused.
    /// Generation and execution errors leave the logical model as it was.
    pub fn undeploy(&self, deployable: &QName) -> Result<()> {
        let mut model = self.lock()?;
        let connected = foreign_channel_users(deployable, &model);
        if !connected.is_empty() {
            return Err(Error::invalid_argument(format!(
                "Channels of {deployable} are still connected to: {}",
                connected.join(", ")
            )));
        }

        let snapshot = model.clone();
        let marked = mark(deployable, &mut model);
        if marked.is_empty() {
            return Err(Error::not_found(format!("Deployable not found: {deployable}")));
        }

        let executed = self
            .generator
            .generate(&model)
            .and_then(|commands| self.executor.execute(&commands));
        if let Err(e) = executed {
            tracing::warn!(deployable = %deployable, error = %e, "Undeployment failed");
            *model = snapshot;
            return Err(e);
        }

        for component_uri in &marked.components {
            model.remove_component(component_uri);
        }
        model.purge_marked();
        unresolve_unwired(&mut model);
        tracing::info!(
            deployable = %deployable,
            components = marked.components.len(),
            channels = marked.channels,
            "Undeployed composite"
        );
        Ok(())
    }

    /// Deployables owning at least one component, channel or wire
    pub fn deployables(&self) -> Result<Vec<QName>> {
        let model = self.lock()?;
        let components = model
            .children(model.root_uri())
            .into_iter()
            .map(|c| c.deployable.clone());
        let channels = model.channels().map(|c| c.deployable.clone());
        let wires = model.wires().map(|w| w.deployable.clone());
        let mut deployables: Vec<QName> = components.chain(channels).chain(wires).collect();
        deployables.sort();
        deployables.dedup();
        Ok(deployables)
    }

    /// Run a closure with shared access to the logical model
    pub fn with_model<R>(&self, f: impl FnOnce(&LogicalModel) -> R) -> Result<R> {
        let model = self.lock()?;
        Ok(f(&model))
    }
}

/// Settle every `New` node after a successful pass
fn provision(model: &mut LogicalModel) {
    for component_uri in model.descendants(model.root_uri()) {
        let Some(component) = model.component_mut(&component_uri) else {
            continue;
        };
        if component.state == LogicalState::New {
            component.state = LogicalState::Provisioned;
        }
        let bindings = component
            .services
            .iter_mut()
            .flat_map(|s| s.bindings.iter_mut().chain(s.callback_bindings.iter_mut()))
            .chain(
                component
                    .references
                    .iter_mut()
                    .flat_map(|r| r.bindings.iter_mut().chain(r.callback_bindings.iter_mut())),
            );
        for binding in bindings {
            if binding.state == LogicalState::New {
                binding.state = LogicalState::Provisioned;
            }
        }
        if let Some(state) = component.composite.as_mut() {
            for channel in state.channels.values_mut() {
                if channel.state == LogicalState::New {
                    channel.state = LogicalState::Provisioned;
                }
            }
            for wire in state.wires.values_mut().flatten() {
                if wire.state == LogicalState::New {
                    wire.state = LogicalState::Provisioned;
                }
            }
        }
    }
}

/// What an undeployment marked
#[derive(Debug, Default)]
struct Marked {
    /// Top-level components of the deployable
    components: Vec<String>,
    channels: usize,
    wires: usize,
}

impl Marked {
    fn is_empty(&self) -> bool {
        self.components.is_empty() && self.channels == 0 && self.wires == 0
    }
}

/// Components outside `deployable` producing to or consuming from its channels
fn foreign_channel_users(deployable: &QName, model: &LogicalModel) -> Vec<String> {
    let owned: Vec<&str> = model
        .channels()
        .filter(|c| c.deployable == *deployable)
        .map(|c| c.uri.as_str())
        .collect();
    if owned.is_empty() {
        return Vec::new();
    }
    let uses_owned = |uris: &[String]| uris.iter().any(|u| owned.contains(&u.as_str()));
    let mut users: Vec<String> = model
        .components()
        .filter(|c| c.deployable != *deployable)
        .filter(|c| {
            c.producers.iter().any(|p| uses_owned(&p.targets))
                || c.consumers.iter().any(|k| uses_owned(&k.sources))
        })
        .map(|c| c.uri.clone())
        .collect();
    users.sort();
    users
}

/// Mark the deployable's components, channels and wires, plus wires
/// touching a marked component
fn mark(deployable: &QName, model: &mut LogicalModel) -> Marked {
    let root = model.root_uri().to_string();
    let mut marked = Marked {
        components: model
            .children(&root)
            .into_iter()
            .filter(|c| c.deployable == *deployable)
            .map(|c| c.uri.clone())
            .collect(),
        ..Marked::default()
    };
    let removed: Vec<String> = marked
        .components
        .iter()
        .flat_map(|uri| model.descendants(uri))
        .collect();

    for component_uri in &removed {
        if let Some(component) = model.component_mut(component_uri) {
            component.state = LogicalState::Marked;
            for service in &mut component.services {
                for binding in &mut service.bindings {
                    binding.state = LogicalState::Marked;
                }
            }
            for reference in &mut component.references {
                for binding in &mut reference.bindings {
                    binding.state = LogicalState::Marked;
                }
            }
        }
    }

    let owner_removed = |member: &str| {
        uri::split_member(member).is_some_and(|(c, _)| removed.iter().any(|r| r == c))
    };
    for composite_uri in model.descendants(&root) {
        let Some(state) = model.composite_mut(&composite_uri) else {
            continue;
        };
        for channel in state.channels.values_mut() {
            if channel.deployable == *deployable {
                channel.state = LogicalState::Marked;
                marked.channels += 1;
            }
        }
        for wire in state.wires.values_mut().flatten() {
            if wire.deployable == *deployable
                || owner_removed(&wire.source)
                || owner_removed(&wire.target)
            {
                wire.state = LogicalState::Marked;
                marked.wires += 1;
            }
        }
    }
    marked
}

/// References left without wires must resolve again on the next pass
fn unresolve_unwired(model: &mut LogicalModel) {
    let unwired: Vec<String> = model
        .components()
        .flat_map(|c| c.references.iter())
        .filter(|r| r.resolved && model.wires_of(&r.uri).is_empty())
        .map(|r| r.uri.clone())
        .collect();
    for reference_uri in unwired {
        if let Some(reference) = model.reference_mut(&reference_uri) {
            reference.resolved = false;
        }
    }
}
