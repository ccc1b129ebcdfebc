//! Composite scope: one instance per component for the lifetime of its deployable

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use fabric3_domain::model::Scope;
use fabric3_domain::ports::ComponentImplementation;
use fabric3_domain::{Error, QName, Result};
use tracing::{debug, warn};

use super::{ScopeContainer, reinjection_result};
use crate::container::component::{InstanceWrapper, ScopedComponent};

/// Caches one instance per component
///
/// Instances are created lazily on first use, or when the deployable's
/// context starts for eager components, and destroyed in reverse creation
/// order when it stops.
#[derive(Default)]
pub struct CompositeScopeContainer {
    registered: AtomicU64,
    components: DashMap<String, (u64, Arc<ScopedComponent>)>,
    instances: DashMap<String, Arc<InstanceWrapper>>,
    contexts: DashMap<QName, Vec<String>>,
}

impl CompositeScopeContainer {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the context of a deployable is running
    pub fn is_started(&self, deployable: &QName) -> bool {
        self.contexts.contains_key(deployable)
    }

    fn create(&self, component: &ScopedComponent) -> Result<Arc<dyn ComponentImplementation>> {
        if !self.is_started(component.deployable()) {
            return Err(Error::container(format!(
                "Context not started for deployable {} of {}",
                component.deployable(),
                component.uri()
            )));
        }
        // no lock is held while the instance initialises, so init may call other components
        let wrapper = Arc::new(component.create_instance()?);
        wrapper.start()?;

        match self.instances.entry(component.uri().to_string()) {
            Entry::Occupied(existing) => {
                let winner = Arc::clone(existing.get());
                drop(existing);
                if let Err(e) = wrapper.stop() {
                    warn!(component = %component.uri(), error = %e, "Failed to destroy duplicate instance");
                }
                Ok(winner.instance())
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&wrapper));
                if let Some(mut created) = self.contexts.get_mut(component.deployable()) {
                    created.push(component.uri().to_string());
                }
                debug!(component = %component.uri(), "Composite instance started");
                Ok(wrapper.instance())
            }
        }
    }

    fn destroy(&self, uri: &str) -> Result<()> {
        match self.instances.remove(uri) {
            Some((_, wrapper)) => wrapper.stop(),
            None => Ok(()),
        }
    }
}

impl ScopeContainer for CompositeScopeContainer {
    fn scope(&self) -> Scope {
        Scope::Composite
    }

    fn register(&self, component: Arc<ScopedComponent>) {
        let order = self.registered.fetch_add(1, Ordering::Relaxed);
        self.components
            .insert(component.uri().to_string(), (order, component));
    }

    fn unregister(&self, uri: &str) -> Result<()> {
        let Some((_, (_, component))) = self.components.remove(uri) else {
            return Ok(());
        };
        if let Some(mut created) = self.contexts.get_mut(component.deployable()) {
            created.retain(|u| u != uri);
        }
        self.destroy(uri)
    }

    fn start_context(&self, deployable: &QName) -> Result<()> {
        self.contexts.entry(deployable.clone()).or_default();

        let mut eager: Vec<(u64, Arc<ScopedComponent>)> = self
            .components
            .iter()
            .filter(|entry| entry.1.eager_init() && entry.1.deployable() == deployable)
            .map(|entry| (entry.0, Arc::clone(&entry.1)))
            .collect();
        eager.sort_by_key(|(order, _)| *order);

        for (_, component) in eager {
            self.get_instance(&component)?;
        }
        Ok(())
    }

    fn stop_context(&self, deployable: &QName) -> Result<()> {
        let Some((_, created)) = self.contexts.remove(deployable) else {
            return Ok(());
        };
        let mut failures = Vec::new();
        for uri in created.iter().rev() {
            if let Err(e) = self.destroy(uri) {
                warn!(component = %uri, error = %e, "Failed to destroy instance");
                failures.push(format!("{uri}: {e}"));
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::container(format!(
                "Errors stopping context {deployable}: {}",
                failures.join("; ")
            )))
        }
    }

    fn get_instance(&self, component: &ScopedComponent) -> Result<Arc<dyn ComponentImplementation>> {
        if let Some(wrapper) = self.instances.get(component.uri())
            && wrapper.is_active()
        {
            return Ok(wrapper.instance());
        }
        self.create(component)
    }

    fn release_instance(
        &self,
        _component: &ScopedComponent,
        _instance: Arc<dyn ComponentImplementation>,
    ) -> Result<()> {
        Ok(())
    }

    fn active_instances(&self, component: &ScopedComponent) -> Vec<Arc<dyn ComponentImplementation>> {
        self.instances
            .get(component.uri())
            .filter(|wrapper| wrapper.is_active())
            .map(|wrapper| wrapper.instance())
            .into_iter()
            .collect()
    }

    fn reinject_component(&self, component: &ScopedComponent) -> Result<()> {
        let changed = component.take_changes();
        if changed.is_empty() {
            return Ok(());
        }
        let instances = self.active_instances(component);
        debug!(
            component = %component.uri(),
            sites = changed.len(),
            instances = instances.len(),
            "Reinjecting"
        );
        reinjection_result(component.reinject(&instances, &changed))
    }

    fn reinject(&self) -> Result<()> {
        let components: Vec<Arc<ScopedComponent>> = self
            .components
            .iter()
            .map(|entry| Arc::clone(&entry.1))
            .collect();
        let mut failures = Vec::new();
        for component in components {
            match self.reinject_component(&component) {
                Err(Error::Reinjection { failures: more }) => failures.extend(more),
                Err(other) => failures.push(other.to_string()),
                Ok(()) => {}
            }
        }
        reinjection_result(failures)
    }
}
