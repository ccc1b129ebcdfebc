//! Instantiators
//!
//! Turn assembly definitions into logical model nodes. Assembly problems are
//! recorded in an [`InstantiationContext`](fabric3_domain::InstantiationContext)
//! instead of aborting, so one pass reports all of them.

pub mod atomic;
pub mod autowire;
pub mod channel;
pub mod composite;
pub mod logical_model;
pub mod wire;

use fabric3_domain::QName;
use fabric3_domain::model::Autowire;

pub use atomic::{AtomicComponentInstantiator, resolve_channel_uri};
pub use autowire::AutowireInstantiator;
pub use channel::ChannelInstantiator;
pub use composite::CompositeComponentInstantiator;
pub use logical_model::{InstantiationOutcome, LogicalModelInstantiator};
pub use wire::WireInstantiator;

/// Where instantiated components are placed
#[derive(Debug, Clone, Copy)]
pub struct ParentScope<'a> {
    /// URI of the parent composite
    pub parent: &'a str,
    /// Deployable owning the new nodes
    pub deployable: &'a QName,
    /// Effective autowire inherited by the new components
    pub autowire: Autowire,
}
