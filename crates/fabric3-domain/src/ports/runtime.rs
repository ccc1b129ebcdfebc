//! Runtime invocation ports
//!
//! Implementations are never inspected reflectively. They receive wired
//! values through named injection sites and are invoked by operation name.

use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::physical::{Injectable, PhysicalComponent};
use crate::value_objects::{Event, Message};

/// Something that can be invoked by operation name
pub trait Invoker: Send + Sync {
    /// Invoke an operation
    fn invoke(&self, operation: &str, message: Message) -> Result<Message>;
}

/// A link of an invocation chain
///
/// Interceptors see every invocation of one wire operation and pass it on
/// to `next`, which is the remainder of the chain.
pub trait Interceptor: Send + Sync {
    /// Handle an invocation
    fn invoke(&self, operation: &str, message: Message, next: &dyn Invoker) -> Result<Message>;
}

/// Publishes events into the channels a producer is connected to
pub trait EventPublisher: Send + Sync {
    /// Publish an event
    fn publish(&self, event: Event) -> Result<()>;
}

/// Receives events delivered by a channel
pub trait EventHandler: Send + Sync {
    /// Handle an event
    fn handle(&self, event: &Event) -> Result<()>;
}

/// A value injected into an implementation
#[derive(Clone)]
pub enum Injected {
    /// Proxy for a single-valued reference
    Proxy(Arc<dyn Invoker>),
    /// Proxies for a list or set reference, in injection order
    Proxies(Arc<Vec<Arc<dyn Invoker>>>),
    /// Proxies for a keyed reference
    Keyed(Arc<BTreeMap<String, Arc<dyn Invoker>>>),
    /// Property value
    Property(Value),
    /// Event publisher for a producer
    Publisher(Arc<dyn EventPublisher>),
    /// Runtime resource
    Resource(Arc<dyn Any + Send + Sync>),
}

impl Injected {
    /// Number of targets carried; properties, publishers and resources count as one
    pub fn len(&self) -> usize {
        match self {
            Self::Proxies(proxies) => proxies.len(),
            Self::Keyed(proxies) => proxies.len(),
            _ => 1,
        }
    }

    /// True for empty collections
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Injected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proxy(_) => f.write_str("Proxy"),
            Self::Proxies(proxies) => write!(f, "Proxies({})", proxies.len()),
            Self::Keyed(proxies) => f
                .debug_tuple("Keyed")
                .field(&proxies.keys().collect::<Vec<_>>())
                .finish(),
            Self::Property(value) => f.debug_tuple("Property").field(value).finish(),
            Self::Publisher(_) => f.write_str("Publisher"),
            Self::Resource(_) => f.write_str("Resource"),
        }
    }
}

/// A component implementation instance
///
/// Instances are shared between concurrent invocations, so injection goes
/// through `&self` and implementations keep wired values behind their own
/// synchronisation.
pub trait ComponentImplementation: Send + Sync {
    /// Set or clear an injection site; `None` clears it
    fn inject(&self, site: &Injectable, value: Option<Injected>) -> Result<()>;

    /// Invoke an operation of a service
    fn invoke(&self, service: &str, operation: &str, message: Message) -> Result<Message>;

    /// Deliver an event to a consumer
    fn on_event(&self, consumer: &str, event: &Event) -> Result<()> {
        let _ = event;
        Err(Error::invocation(consumer, "component has no consumers"))
    }

    /// Called once after the initial injection
    fn init(&self) -> Result<()> {
        Ok(())
    }

    /// Called once before the instance is discarded
    fn destroy(&self) -> Result<()> {
        Ok(())
    }
}

/// Creates instances of one implementation kind
pub trait ImplementationFactory: Send + Sync {
    /// Create a new, uninjected instance
    fn create(&self, component: &PhysicalComponent) -> Result<Arc<dyn ComponentImplementation>>;
}
