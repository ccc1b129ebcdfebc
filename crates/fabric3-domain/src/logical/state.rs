//! Lifecycle state of logical model nodes

use serde::{Deserialize, Serialize};

/// Provisioning state of a component, wire, binding or channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LogicalState {
    /// Instantiated but not yet deployed to the runtime
    #[default]
    New,
    /// Deployed to the runtime
    Provisioned,
    /// Scheduled for removal on the next generation pass
    Marked,
}
