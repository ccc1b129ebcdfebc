//! Binding attacher lookup

use std::sync::Arc;

use dashmap::DashMap;
use fabric3_application::ports::registry::{
    BindingAttacher, BindingCatalog, RegisteredBindings, find_binding_attacher,
};
use fabric3_domain::{Error, Result};

/// Binding attachers by binding type
///
/// Attachers registered on the table win over the ones contributed through
/// the extension slice, which are tried in declaration order.
#[derive(Default)]
pub struct BindingAttachers {
    explicit: DashMap<String, Arc<dyn BindingAttacher>>,
}

impl BindingAttachers {
    /// Create a table with no explicit attachers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an attacher for a binding type
    pub fn register(&self, binding_type: impl Into<String>, attacher: Arc<dyn BindingAttacher>) {
        self.explicit.insert(binding_type.into(), attacher);
    }

    /// Attacher for a binding type
    pub fn resolve(&self, binding_type: &str) -> Result<Arc<dyn BindingAttacher>> {
        if let Some(attacher) = self.explicit.get(binding_type) {
            return Ok(Arc::clone(attacher.value()));
        }
        find_binding_attacher(binding_type).ok_or_else(|| {
            Error::builder(format!("Binding attacher not found for type: {binding_type}"))
        })
    }
}

impl BindingCatalog for BindingAttachers {
    fn supports_wire_binding(&self, binding_type: &str) -> bool {
        self.explicit.contains_key(binding_type)
            || RegisteredBindings.supports_wire_binding(binding_type)
    }

    fn supports_channel_binding(&self, binding_type: &str) -> bool {
        RegisteredBindings.supports_channel_binding(binding_type)
    }
}
