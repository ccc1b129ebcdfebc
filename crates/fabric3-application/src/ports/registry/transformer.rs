//! Transformer Factory Registry
//!
//! Transformer factories register themselves via `linkme` distributed slices
//! and are collected by the runtime transformer registry at bootstrap.

use std::sync::Arc;

use fabric3_domain::ports::TransformerFactory;

/// Registry entry for transformer factories
pub struct TransformerFactoryEntry {
    /// Unique factory name (e.g., "json-to-string")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function creating the transformer factory
    pub factory: fn() -> Arc<dyn TransformerFactory>,
}

#[linkme::distributed_slice]
pub static TRANSFORMER_FACTORIES: [TransformerFactoryEntry] = [..];

/// Instantiate every registered transformer factory
pub fn resolve_transformer_factories() -> Vec<Arc<dyn TransformerFactory>> {
    TRANSFORMER_FACTORIES
        .iter()
        .map(|entry| (entry.factory)())
        .collect()
}

/// List all registered transformer factories as (name, description)
pub fn list_transformer_factories() -> Vec<(&'static str, &'static str)> {
    TRANSFORMER_FACTORIES
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
