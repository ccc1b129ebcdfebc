//! Runtime resources

use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;
use fabric3_domain::physical::PhysicalResource;
use fabric3_domain::ports::Injected;
use fabric3_domain::{Error, Result};

/// Resources provided by the runtime, keyed by interface name
#[derive(Default)]
pub struct ResourceRegistry {
    resources: DashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl ResourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide a resource under an interface name
    pub fn register(&self, interface: impl Into<String>, resource: Arc<dyn Any + Send + Sync>) {
        self.resources.insert(interface.into(), resource);
    }

    /// Resolve a resource reference of a component
    ///
    /// A missing optional resource resolves to `None`; a missing required
    /// one is a builder error.
    pub fn resolve(&self, component: &str, resource: &PhysicalResource) -> Result<Option<Injected>> {
        match self.resources.get(&resource.interface) {
            Some(found) => Ok(Some(Injected::Resource(Arc::clone(found.value())))),
            None if resource.optional => Ok(None),
            None => Err(Error::builder(format!(
                "Resource {} not found for {component}#{}",
                resource.interface, resource.name
            ))),
        }
    }
}
