//! In-process `local` channel binding
//!
//! Channel sides bound with `local` meet on a topic, the `topic` setting or
//! else the channel URI. Consumer sides subscribe to the topic; producer
//! sides forward published events to every subscriber.

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use fabric3_application::ports::registry::{
    CHANNEL_BINDING_BUILDERS, ChannelBindingBuilder, ChannelBindingBuilderEntry,
};
use fabric3_domain::physical::{ChannelSide, PhysicalChannel};
use fabric3_domain::ports::EventHandler;
use fabric3_domain::{Event, Result};
use serde_json::Value;
use tracing::warn;

use crate::constants::LOCAL_BINDING;

type Subscribers = Vec<(String, Arc<dyn EventHandler>)>;

static TOPICS: LazyLock<DashMap<String, Subscribers>> = LazyLock::new(DashMap::new);

fn topic(channel: &PhysicalChannel) -> String {
    channel
        .binding
        .as_ref()
        .and_then(|b| b.config.get("topic"))
        .and_then(Value::as_str)
        .unwrap_or(&channel.uri)
        .to_string()
}

fn subscriber_key(channel: &PhysicalChannel) -> String {
    format!("{}:{:?}", channel.uri, channel.side)
}

struct TopicForwarder {
    topic: String,
}

impl EventHandler for TopicForwarder {
    fn handle(&self, event: &Event) -> Result<()> {
        let subscribers: Subscribers = TOPICS
            .get(&self.topic)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        for (key, subscriber) in subscribers {
            if let Err(e) = subscriber.handle(event) {
                warn!(topic = %self.topic, subscriber = %key, error = %e, "Topic delivery failed");
            }
        }
        Ok(())
    }
}

/// Connects channel sides through in-process topics
#[derive(Debug, Default)]
pub struct LocalChannelBindingBuilder;

impl ChannelBindingBuilder for LocalChannelBindingBuilder {
    fn build(
        &self,
        channel: &PhysicalChannel,
        inbound: Arc<dyn EventHandler>,
    ) -> Result<Option<Arc<dyn EventHandler>>> {
        let topic = topic(channel);
        if matches!(channel.side, ChannelSide::Consumer | ChannelSide::Collocated) {
            TOPICS
                .entry(topic.clone())
                .or_default()
                .push((subscriber_key(channel), inbound));
        }
        Ok(match channel.side {
            ChannelSide::Producer | ChannelSide::Collocated => {
                Some(Arc::new(TopicForwarder { topic }) as Arc<dyn EventHandler>)
            }
            ChannelSide::Consumer => None,
        })
    }

    fn dispose(&self, channel: &PhysicalChannel) -> Result<()> {
        let key = subscriber_key(channel);
        if let Some(mut subscribers) = TOPICS.get_mut(&topic(channel)) {
            subscribers.retain(|(k, _)| *k != key);
        }
        Ok(())
    }
}

fn local_channel_binding_builder() -> Arc<dyn ChannelBindingBuilder> {
    Arc::new(LocalChannelBindingBuilder)
}

#[linkme::distributed_slice(CHANNEL_BINDING_BUILDERS)]
static LOCAL_CHANNEL_BINDING: ChannelBindingBuilderEntry = ChannelBindingBuilderEntry {
    binding_type: LOCAL_BINDING,
    description: "In-process topics",
    factory: local_channel_binding_builder,
};
