//! Logical wires

use serde::{Deserialize, Serialize};

use super::state::LogicalState;
use crate::value_objects::QName;

/// Directed edge from a reference to a service
///
/// Stored on the composite containing the source component, keyed by the
/// source reference URI. The deployable decides which undeploy removes it:
/// autowires are owned by the target deployable, explicit wires by the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalWire {
    /// Source reference URI
    pub source: String,
    /// Target service URI
    pub target: String,
    /// Owning deployable
    pub deployable: QName,
    /// True if created by autowire resolution
    pub autowired: bool,
    /// Provisioning state
    pub state: LogicalState,
}

impl LogicalWire {
    /// Create a new wire
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        deployable: QName,
        autowired: bool,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            deployable,
            autowired,
            state: LogicalState::New,
        }
    }
}
