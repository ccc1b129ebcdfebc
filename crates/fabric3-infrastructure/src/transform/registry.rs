//! Transformer registry

use std::sync::{Arc, RwLock};

use dashmap::DashMap;
use fabric3_application::ports::registry::{
    list_transformer_factories, resolve_transformer_factories,
};
use fabric3_domain::ports::{SingleTypeTransformer, Transformer, TransformerFactory, TransformerRegistry};
use fabric3_domain::{DataType, Error, Result};
use tracing::debug;

/// Resolves transformers from exact pairs, then from factories
///
/// Registered single-type transformers are found by their exact
/// (source, target) pair. On a miss, factories are consulted in ascending
/// `order()` and the first that can transform the pair creates the
/// transformer.
#[derive(Default)]
pub struct DefaultTransformerRegistry {
    transformers: DashMap<(DataType, DataType), Arc<dyn Transformer>>,
    factories: RwLock<Vec<Arc<dyn TransformerFactory>>>,
}

impl DefaultTransformerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every factory registered in the extension slice
    pub fn with_registered_factories() -> Self {
        let registry = Self::new();
        for (name, description) in list_transformer_factories() {
            debug!(name, description, "Transformer factory registered");
        }
        for factory in resolve_transformer_factories() {
            registry.add_factory(factory);
        }
        registry
    }

    /// Register a single-type transformer under its exact pair
    pub fn register<T>(&self, transformer: Arc<T>)
    where
        T: SingleTypeTransformer + 'static,
    {
        let pair = (
            transformer.source_type().clone(),
            transformer.target_type().clone(),
        );
        debug!(source = %pair.0, target = %pair.1, "Transformer registered");
        self.transformers.insert(pair, transformer);
    }

    /// Remove a single-type transformer
    pub fn unregister(&self, source: &DataType, target: &DataType) {
        self.transformers
            .remove(&(source.clone(), target.clone()));
    }

    /// Add a factory, keeping factories sorted by order
    pub fn add_factory(&self, factory: Arc<dyn TransformerFactory>) {
        let mut factories = self
            .factories
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        factories.push(factory);
        // stable, so equal orders keep registration order
        factories.sort_by_key(|f| f.order());
    }

    /// Number of factories
    pub fn factory_count(&self) -> usize {
        self.factories
            .read()
            .map(|f| f.len())
            .unwrap_or_default()
    }
}

impl TransformerRegistry for DefaultTransformerRegistry {
    fn get_transformer(
        &self,
        source: &DataType,
        target: &DataType,
        in_types: &[DataType],
        out_types: &[DataType],
    ) -> Result<Option<Arc<dyn Transformer>>> {
        if let Some(found) = self.transformers.get(&(source.clone(), target.clone())) {
            return Ok(Some(Arc::clone(found.value())));
        }
        let factories = self
            .factories
            .read()
            .map_err(|_| Error::internal("Transformer factory lock poisoned"))?;
        factories
            .iter()
            .find(|factory| factory.can_transform(source, target))
            .map(|factory| factory.create(source, target, in_types, out_types))
            .transpose()
    }
}
