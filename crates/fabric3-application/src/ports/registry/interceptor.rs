//! Interceptor Builder Registry
//!
//! Interceptor builders are keyed by the interceptor type carried in
//! physical operations.

use std::sync::Arc;

use fabric3_domain::physical::PhysicalInterceptor;
use fabric3_domain::ports::Interceptor;
use fabric3_domain::{Error, Result};

/// Builds interceptors of one type
pub trait InterceptorBuilder: Send + Sync {
    /// Build an interceptor from its physical definition
    fn build(&self, definition: &PhysicalInterceptor) -> Result<Arc<dyn Interceptor>>;
}

/// Registry entry for interceptor builders
pub struct InterceptorBuilderEntry {
    /// Interceptor type handled (e.g., "trace")
    pub interceptor_type: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function creating the builder
    pub factory: fn() -> Arc<dyn InterceptorBuilder>,
}

#[linkme::distributed_slice]
pub static INTERCEPTOR_BUILDERS: [InterceptorBuilderEntry] = [..];

/// Resolve an interceptor builder by type
pub fn resolve_interceptor_builder(interceptor_type: &str) -> Result<Arc<dyn InterceptorBuilder>> {
    INTERCEPTOR_BUILDERS
        .iter()
        .find(|entry| entry.interceptor_type == interceptor_type)
        .map(|entry| (entry.factory)())
        .ok_or_else(|| {
            Error::builder(format!(
                "Unknown interceptor type '{interceptor_type}'. Available: {:?}",
                list_interceptor_builders()
                    .iter()
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>()
            ))
        })
}

/// List all registered interceptor builders as (type, description)
pub fn list_interceptor_builders() -> Vec<(&'static str, &'static str)> {
    INTERCEPTOR_BUILDERS
        .iter()
        .map(|e| (e.interceptor_type, e.description))
        .collect()
}
