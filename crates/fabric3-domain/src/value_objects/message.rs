//! Messages and events flowing through wires and channels

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Invocation message passed down an interceptor chain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Payload; parameters on the request path, the result on the response path
    pub body: Value,
    /// Message headers (correlation ids, callback URIs, ...)
    pub headers: BTreeMap<String, String>,
    /// True if `body` carries a fault
    pub fault: bool,
}

impl Message {
    /// Create a message with the given body
    pub fn new(body: Value) -> Self {
        Self {
            body,
            ..Default::default()
        }
    }

    /// Create a fault message
    pub fn fault(body: Value) -> Self {
        Self {
            body,
            fault: true,
            ..Default::default()
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Event published to a channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event payload
    pub payload: Value,
    /// Event headers
    pub headers: BTreeMap<String, String>,
}

impl Event {
    /// Create an event with the given payload
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            headers: BTreeMap::new(),
        }
    }
}
