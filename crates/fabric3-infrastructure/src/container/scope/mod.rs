//! Scope containers
//!
//! A scope container owns the instances of the components registered with
//! it and decides when they are created and destroyed.

pub mod composite;
pub mod stateless;

use std::sync::Arc;

use fabric3_domain::model::Scope;
use fabric3_domain::ports::ComponentImplementation;
use fabric3_domain::{Error, QName, Result};

use super::component::ScopedComponent;

pub use composite::CompositeScopeContainer;
pub use stateless::StatelessScopeContainer;

/// Manages the instances of one scope
pub trait ScopeContainer: Send + Sync {
    /// Scope managed
    fn scope(&self) -> Scope;

    /// Register a component
    fn register(&self, component: Arc<ScopedComponent>);

    /// Unregister a component, destroying its live instance
    fn unregister(&self, uri: &str) -> Result<()>;

    /// Start the context of a deployable, creating eager instances
    fn start_context(&self, deployable: &QName) -> Result<()>;

    /// Stop the context of a deployable, destroying its instances in reverse creation order
    fn stop_context(&self, deployable: &QName) -> Result<()>;

    /// Instance to dispatch an invocation to
    fn get_instance(&self, component: &ScopedComponent) -> Result<Arc<dyn ComponentImplementation>>;

    /// Return an instance obtained from `get_instance`
    fn release_instance(
        &self,
        component: &ScopedComponent,
        instance: Arc<dyn ComponentImplementation>,
    ) -> Result<()>;

    /// Live instances of a component
    fn active_instances(&self, component: &ScopedComponent) -> Vec<Arc<dyn ComponentImplementation>>;

    /// Apply changed sites of one component to its live instances
    fn reinject_component(&self, component: &ScopedComponent) -> Result<()>;

    /// Apply changed sites of every registered component
    fn reinject(&self) -> Result<()>;
}

/// Fold per-site failures into a reinjection error
pub(crate) fn reinjection_result(failures: Vec<String>) -> Result<()> {
    if failures.is_empty() {
        Ok(())
    } else {
        Err(Error::Reinjection { failures })
    }
}

/// One container per scope
#[derive(Clone)]
pub struct ScopeRegistry {
    composite: Arc<dyn ScopeContainer>,
    stateless: Arc<dyn ScopeContainer>,
}

impl ScopeRegistry {
    /// Registry with the default containers
    pub fn new() -> Self {
        Self {
            composite: Arc::new(CompositeScopeContainer::new()),
            stateless: Arc::new(StatelessScopeContainer::new()),
        }
    }

    /// Container for a scope
    pub fn get(&self, scope: Scope) -> Arc<dyn ScopeContainer> {
        match scope {
            Scope::Composite => Arc::clone(&self.composite),
            Scope::Stateless => Arc::clone(&self.stateless),
        }
    }

    /// Every container
    pub fn all(&self) -> [Arc<dyn ScopeContainer>; 2] {
        [Arc::clone(&self.composite), Arc::clone(&self.stateless)]
    }
}

impl Default for ScopeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
