//! Logical channels

use serde::{Deserialize, Serialize};

use super::state::LogicalState;
use crate::model::ChannelDefinition;
use crate::value_objects::QName;

/// A channel instantiated in a composite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalChannel {
    /// Channel URI, `composite/name`
    pub uri: String,
    /// Channel definition
    pub definition: ChannelDefinition,
    /// Owning deployable
    pub deployable: QName,
    /// Provisioning state
    pub state: LogicalState,
}

impl LogicalChannel {
    /// Create a new channel
    pub fn new(uri: impl Into<String>, definition: ChannelDefinition, deployable: QName) -> Self {
        Self {
            uri: uri.into(),
            definition,
            deployable,
            state: LogicalState::New,
        }
    }

    /// True if the channel is connected to a transport binding
    pub fn is_bound(&self) -> bool {
        self.definition.binding.is_some()
    }
}
