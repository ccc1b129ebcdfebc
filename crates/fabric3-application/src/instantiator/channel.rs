//! Channel instantiation

use fabric3_domain::logical::{LogicalChannel, LogicalModel};
use fabric3_domain::model::ChannelDefinition;
use fabric3_domain::value_objects::uri;
use fabric3_domain::{AssemblyFailure, InstantiationContext};

use super::ParentScope;

/// Instantiates the channels declared by a composite
#[derive(Debug, Default, Clone, Copy)]
pub struct ChannelInstantiator;

impl ChannelInstantiator {
    /// Create an instantiator
    pub fn new() -> Self {
        Self
    }

    /// Add a logical channel per definition; duplicates are recorded and skipped
    pub fn instantiate(
        &self,
        definitions: &[ChannelDefinition],
        scope: &ParentScope<'_>,
        model: &mut LogicalModel,
        context: &mut InstantiationContext,
    ) {
        for definition in definitions {
            let channel_uri = uri::child_uri(scope.parent, &definition.name);
            let channel =
                LogicalChannel::new(&channel_uri, definition.clone(), scope.deployable.clone());
            if model.add_channel(scope.parent, channel) {
                tracing::debug!(channel = %channel_uri, "Instantiated channel");
            } else {
                context.add_error(AssemblyFailure::DuplicateChannel { channel_uri });
            }
        }
    }
}
