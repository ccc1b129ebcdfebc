//! Binding types known to the domain
//!
//! Inclusion checks every binding against a catalog so unknown transports are
//! reported as assembly failures instead of surfacing when the runtime
//! attaches the wire.

use super::binding::list_binding_attachers;
use super::channel_binding::list_channel_binding_builders;

/// Binding types the runtime can connect
pub trait BindingCatalog: Send + Sync {
    /// True if services and references may use `binding_type`
    fn supports_wire_binding(&self, binding_type: &str) -> bool;

    /// True if channels may use `binding_type`
    fn supports_channel_binding(&self, binding_type: &str) -> bool;
}

/// Catalog of the extensions registered in the `linkme` slices
#[derive(Debug, Clone, Copy, Default)]
pub struct RegisteredBindings;

impl BindingCatalog for RegisteredBindings {
    fn supports_wire_binding(&self, binding_type: &str) -> bool {
        list_binding_attachers()
            .iter()
            .any(|(registered, _)| *registered == binding_type)
    }

    fn supports_channel_binding(&self, binding_type: &str) -> bool {
        list_channel_binding_builders()
            .iter()
            .any(|(registered, _)| *registered == binding_type)
    }
}
