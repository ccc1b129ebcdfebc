//! In-process `local` binding
//!
//! A service bound with `local` is exposed under an endpoint name (the
//! `endpoint` setting, or the service URI). A reference bound with `local`
//! forwards to the endpoint named by its `endpoint` setting or target URI;
//! the endpoint is looked up on every invocation, so services may be
//! exposed after the reference is attached.

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use fabric3_application::ports::registry::{
    BINDING_ATTACHERS, BindingAttacher, BindingAttacherEntry,
};
use fabric3_domain::physical::{PhysicalWire, PhysicalWireSource, PhysicalWireTarget};
use fabric3_domain::ports::Invoker;
use fabric3_domain::{Error, Message, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::constants::LOCAL_BINDING;

static ENDPOINTS: LazyLock<DashMap<String, Arc<dyn Invoker>>> = LazyLock::new(DashMap::new);

/// Invoker of an exposed local endpoint
pub fn local_endpoint(name: &str) -> Option<Arc<dyn Invoker>> {
    ENDPOINTS.get(name).map(|entry| Arc::clone(entry.value()))
}

fn setting<'a>(config: &'a BTreeMap<String, Value>, key: &str) -> Option<&'a str> {
    config.get(key).and_then(Value::as_str)
}

fn source_endpoint(wire: &PhysicalWire) -> String {
    match &wire.source {
        PhysicalWireSource::Binding { config, uri, .. } => setting(config, "endpoint")
            .unwrap_or(uri)
            .to_string(),
        other => other.uri().to_string(),
    }
}

fn target_endpoint(wire: &PhysicalWire) -> Result<String> {
    match &wire.target {
        PhysicalWireTarget::Binding { config, uri, .. } => setting(config, "endpoint")
            .or_else(|| setting(config, "target_uri"))
            .map(str::to_string)
            .ok_or_else(|| {
                Error::builder(format!(
                    "Local reference binding on {uri} needs an endpoint or target URI"
                ))
            }),
        PhysicalWireTarget::Component { uri, .. } => Err(Error::builder(format!(
            "Wire to {uri} has no binding target"
        ))),
    }
}

/// Forwards invocations to a local endpoint
struct LocalForwarder {
    endpoint: String,
}

impl Invoker for LocalForwarder {
    fn invoke(&self, operation: &str, message: Message) -> Result<Message> {
        let target = local_endpoint(&self.endpoint).ok_or_else(|| {
            Error::invocation(
                operation,
                format!("No local endpoint exposed at {}", self.endpoint),
            )
        })?;
        target.invoke(operation, message)
    }
}

/// Attaches `local` binding wire ends
#[derive(Debug, Default)]
pub struct LocalBindingAttacher;

impl BindingAttacher for LocalBindingAttacher {
    fn attach_source(&self, wire: &PhysicalWire, chain: Arc<dyn Invoker>) -> Result<()> {
        let endpoint = source_endpoint(wire);
        match ENDPOINTS.entry(endpoint) {
            Entry::Occupied(existing) => Err(Error::builder(format!(
                "Local endpoint already exposed: {}",
                existing.key()
            ))),
            Entry::Vacant(slot) => {
                debug!(endpoint = %slot.key(), "Local endpoint exposed");
                slot.insert(chain);
                Ok(())
            }
        }
    }

    fn detach_source(&self, wire: &PhysicalWire) -> Result<()> {
        ENDPOINTS.remove(&source_endpoint(wire));
        Ok(())
    }

    fn attach_target(&self, wire: &PhysicalWire) -> Result<Arc<dyn Invoker>> {
        Ok(Arc::new(LocalForwarder {
            endpoint: target_endpoint(wire)?,
        }))
    }

    fn detach_target(&self, _wire: &PhysicalWire) -> Result<()> {
        Ok(())
    }
}

fn local_binding_attacher() -> Arc<dyn BindingAttacher> {
    Arc::new(LocalBindingAttacher)
}

#[linkme::distributed_slice(BINDING_ATTACHERS)]
static LOCAL_BINDING_ATTACHER: BindingAttacherEntry = BindingAttacherEntry {
    binding_type: LOCAL_BINDING,
    description: "In-process endpoints",
    factory: local_binding_attacher,
};
