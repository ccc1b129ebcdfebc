//! Implementation factory registry

use std::sync::Arc;

use dashmap::DashMap;
use fabric3_domain::ports::ImplementationFactory;
use fabric3_domain::{Error, Result};

/// Implementation factories keyed by implementation kind
#[derive(Default)]
pub struct ImplementationRegistry {
    factories: DashMap<String, Arc<dyn ImplementationFactory>>,
}

impl ImplementationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any previous one for the kind
    pub fn register(&self, kind: impl Into<String>, factory: Arc<dyn ImplementationFactory>) {
        self.factories.insert(kind.into(), factory);
    }

    /// Remove the factory of a kind
    pub fn unregister(&self, kind: &str) -> Option<Arc<dyn ImplementationFactory>> {
        self.factories.remove(kind).map(|(_, factory)| factory)
    }

    /// Factory for a kind
    pub fn resolve(&self, kind: &str) -> Result<Arc<dyn ImplementationFactory>> {
        self.factories
            .get(kind)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| {
                Error::builder(format!("Implementation factory not found for type: {kind}"))
            })
    }
}
