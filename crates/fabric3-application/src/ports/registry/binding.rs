//! Binding Attacher Registry
//!
//! Attachers connect the binding ends of physical wires to a transport.
//! Services bound to a transport receive requests through the wire's chain;
//! references bound to a transport forward requests out of it.

use std::sync::Arc;

use fabric3_domain::Result;
use fabric3_domain::physical::PhysicalWire;
use fabric3_domain::ports::Invoker;

/// Attaches wire ends of one binding type
pub trait BindingAttacher: Send + Sync {
    /// Expose a bound service: `chain` dispatches into the target component
    fn attach_source(&self, wire: &PhysicalWire, chain: Arc<dyn Invoker>) -> Result<()>;

    /// Detach a bound service
    fn detach_source(&self, wire: &PhysicalWire) -> Result<()>;

    /// Connect a bound reference: returns the invoker forwarding to the transport
    fn attach_target(&self, wire: &PhysicalWire) -> Result<Arc<dyn Invoker>>;

    /// Detach a bound reference
    fn detach_target(&self, wire: &PhysicalWire) -> Result<()>;
}

/// Registry entry for binding attachers
pub struct BindingAttacherEntry {
    /// Binding type handled (e.g., "local")
    pub binding_type: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function creating the attacher
    pub factory: fn() -> Arc<dyn BindingAttacher>,
}

#[linkme::distributed_slice]
pub static BINDING_ATTACHERS: [BindingAttacherEntry] = [..];

/// Find a registered attacher by binding type, in declaration order
pub fn find_binding_attacher(binding_type: &str) -> Option<Arc<dyn BindingAttacher>> {
    BINDING_ATTACHERS
        .iter()
        .find(|entry| entry.binding_type == binding_type)
        .map(|entry| (entry.factory)())
}

/// List all registered binding attachers as (type, description)
pub fn list_binding_attachers() -> Vec<(&'static str, &'static str)> {
    BINDING_ATTACHERS
        .iter()
        .map(|e| (e.binding_type, e.description))
        .collect()
}
