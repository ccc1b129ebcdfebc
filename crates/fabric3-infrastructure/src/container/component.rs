//! Scoped components
//!
//! A [`ScopedComponent`] is the runtime form of a built component: its
//! physical definition, the factory creating its instances and the current
//! value of every injection site. Instances are held by scope containers in
//! an [`InstanceWrapper`] tracking the `New -> Active -> Stopped` lifecycle.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;
use fabric3_domain::model::{CollectionKind, Scope};
use fabric3_domain::physical::{Injectable, PhysicalComponent};
use fabric3_domain::ports::{ComponentImplementation, ImplementationFactory, Injected};
use fabric3_domain::{Error, QName, Result};
use tracing::debug;

use crate::injection::{InjectionSite, MultiplicitySupplier};

/// Lifecycle state of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    /// Created and injected, not yet initialised
    New,
    /// Initialised and serving invocations
    Active,
    /// Destroyed
    Stopped,
}

/// An instance together with its lifecycle state
pub struct InstanceWrapper {
    instance: Arc<dyn ComponentImplementation>,
    state: Mutex<InstanceState>,
}

impl InstanceWrapper {
    /// Wrap a freshly injected instance
    pub fn new(instance: Arc<dyn ComponentImplementation>) -> Self {
        Self {
            instance,
            state: Mutex::new(InstanceState::New),
        }
    }

    /// The wrapped instance
    pub fn instance(&self) -> Arc<dyn ComponentImplementation> {
        Arc::clone(&self.instance)
    }

    /// Current state
    pub fn state(&self) -> InstanceState {
        *self.lock()
    }

    /// True once started and until stopped
    pub fn is_active(&self) -> bool {
        self.state() == InstanceState::Active
    }

    /// Initialise the instance; only valid in `New`
    pub fn start(&self) -> Result<()> {
        let mut state = self.lock();
        if *state != InstanceState::New {
            return Err(Error::container(format!(
                "Cannot start an instance in state {:?}",
                *state
            )));
        }
        self.instance.init()?;
        *state = InstanceState::Active;
        Ok(())
    }

    /// Destroy the instance; stopping twice is a no-op
    pub fn stop(&self) -> Result<()> {
        let mut state = self.lock();
        let was = std::mem::replace(&mut *state, InstanceState::Stopped);
        if was == InstanceState::Active {
            self.instance.destroy()?;
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, InstanceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A built component
pub struct ScopedComponent {
    definition: PhysicalComponent,
    factory: Arc<dyn ImplementationFactory>,
    sites: DashMap<Injectable, InjectionSite>,
    changed: Mutex<BTreeSet<Injectable>>,
}

impl ScopedComponent {
    /// Create a component from its physical definition
    ///
    /// Configured property values become injection sites right away.
    pub fn new(definition: PhysicalComponent, factory: Arc<dyn ImplementationFactory>) -> Self {
        let sites = DashMap::new();
        for (name, value) in &definition.properties {
            sites.insert(
                Injectable::property(name),
                InjectionSite::value(Injected::Property(value.clone())),
            );
        }
        Self {
            definition,
            factory,
            sites,
            changed: Mutex::new(BTreeSet::new()),
        }
    }

    /// Component URI
    pub fn uri(&self) -> &str {
        &self.definition.uri
    }

    /// Deployable owning the component
    pub fn deployable(&self) -> &QName {
        &self.definition.deployable
    }

    /// Instance scope
    pub fn scope(&self) -> Scope {
        self.definition.scope
    }

    /// True if the instance is created when its context starts
    pub fn eager_init(&self) -> bool {
        self.definition.eager_init
    }

    /// Physical definition
    pub fn definition(&self) -> &PhysicalComponent {
        &self.definition
    }

    /// Set a site; live instances see the change on the next reinjection
    pub fn set_site(&self, site: Injectable, value: InjectionSite) {
        self.sites.insert(site.clone(), value);
        self.mark_changed(site);
    }

    /// Clear a site
    pub fn remove_site(&self, site: &Injectable) {
        if self.sites.remove(site).is_some() {
            self.mark_changed(site.clone());
        }
    }

    /// Current value of a site
    pub fn site(&self, site: &Injectable) -> Option<Injected> {
        self.sites.get(site).map(|s| s.get())
    }

    /// Multiplicity supplier of a reference site, created on first use
    pub fn multiplicity(&self, site: &Injectable, kind: CollectionKind) -> Arc<MultiplicitySupplier> {
        let supplier = {
            let mut entry = self.sites.entry(site.clone()).or_insert_with(|| {
                InjectionSite::Multiple(Arc::new(MultiplicitySupplier::new(kind)))
            });
            match entry.value() {
                InjectionSite::Multiple(supplier) => Arc::clone(supplier),
                InjectionSite::Single(_) => {
                    let supplier = Arc::new(MultiplicitySupplier::new(kind));
                    *entry.value_mut() = InjectionSite::Multiple(Arc::clone(&supplier));
                    supplier
                }
            }
        };
        self.mark_changed(site.clone());
        supplier
    }

    /// All multiplicity suppliers of the component
    pub fn multiplicities(&self) -> Vec<Arc<MultiplicitySupplier>> {
        self.sites
            .iter()
            .filter_map(|entry| match entry.value() {
                InjectionSite::Multiple(supplier) => Some(Arc::clone(supplier)),
                InjectionSite::Single(_) => None,
            })
            .collect()
    }

    /// True if sites changed since the last reinjection
    pub fn has_changes(&self) -> bool {
        !self.lock_changed().is_empty()
    }

    /// Create and inject a new instance
    ///
    /// The instance is returned in state `New`; callers start it.
    pub fn create_instance(&self) -> Result<InstanceWrapper> {
        let instance = self.factory.create(&self.definition)?;
        // snapshot first so no map guard is held while implementation code runs
        let sites: Vec<(Injectable, Injected)> = self
            .sites
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().get()))
            .collect();
        for (site, value) in sites {
            instance
                .inject(&site, Some(value))
                .map_err(|e| Error::Injection {
                    message: format!("Failed to inject {site} into {}", self.uri()),
                    source: Some(Box::new(e)),
                })?;
        }
        debug!(component = %self.uri(), "Instance created");
        Ok(InstanceWrapper::new(instance))
    }

    /// Take the set of sites changed since the last call
    pub fn take_changes(&self) -> BTreeSet<Injectable> {
        std::mem::take(&mut *self.lock_changed())
    }

    /// Apply changed sites to live instances
    ///
    /// Every site is applied to every instance; failures are collected, not
    /// rolled back.
    pub fn reinject(
        &self,
        instances: &[Arc<dyn ComponentImplementation>],
        changed: &BTreeSet<Injectable>,
    ) -> Vec<String> {
        let mut failures = Vec::new();
        for site in changed {
            let value = self.site(site);
            for instance in instances {
                if let Err(e) = instance.inject(site, value.clone()) {
                    failures.push(format!("{} {site}: {e}", self.uri()));
                }
            }
        }
        failures
    }

    fn mark_changed(&self, site: Injectable) {
        self.lock_changed().insert(site);
    }

    fn lock_changed(&self) -> MutexGuard<'_, BTreeSet<Injectable>> {
        self.changed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ScopedComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedComponent")
            .field("uri", &self.definition.uri)
            .field("scope", &self.definition.scope)
            .field("sites", &self.sites.len())
            .finish()
    }
}
