//! Fan-out handlers

use std::sync::Arc;

use arc_swap::ArcSwap;
use fabric3_domain::ports::EventHandler;
use fabric3_domain::{Error, Event, Result};
use tokio::sync::mpsc;
use tracing::warn;

/// A consumer connected to a channel
#[derive(Clone)]
pub struct Subscription {
    /// Consumer URI
    pub uri: String,
    /// Delivery order; lower first
    pub sequence: i32,
    /// Receives the events
    pub handler: Arc<dyn EventHandler>,
}

/// Consumers of a channel, published as an immutable snapshot
#[derive(Default)]
pub struct Subscribers {
    snapshot: ArcSwap<Vec<Subscription>>,
}

impl Subscribers {
    /// Add a consumer, replacing one with the same URI
    pub fn add(&self, subscription: Subscription) {
        self.snapshot.rcu(|current| {
            let mut next: Vec<Subscription> = current
                .iter()
                .filter(|s| s.uri != subscription.uri)
                .cloned()
                .collect();
            next.push(subscription.clone());
            // stable, so equal sequences keep connection order
            next.sort_by_key(|s| s.sequence);
            next
        });
    }

    /// Remove a consumer; returns true if it was connected
    pub fn remove(&self, uri: &str) -> bool {
        let previous = self.snapshot.rcu(|current| {
            current
                .iter()
                .filter(|s| s.uri != uri)
                .cloned()
                .collect::<Vec<_>>()
        });
        previous.iter().any(|s| s.uri == uri)
    }

    /// Current consumers in delivery order
    pub fn snapshot(&self) -> Arc<Vec<Subscription>> {
        self.snapshot.load_full()
    }

    /// Deliver an event to every consumer of the current snapshot
    ///
    /// A failing consumer does not stop delivery to the others.
    pub fn deliver(&self, event: &Event) {
        for subscription in self.snapshot.load().iter() {
            if let Err(e) = subscription.handler.handle(event) {
                warn!(consumer = %subscription.uri, error = %e, "Event delivery failed");
            }
        }
    }
}

/// Dispatches channel events to consumers
pub trait FanOutHandler: Send + Sync {
    /// Connected consumers
    fn subscribers(&self) -> &Subscribers;

    /// Hand an event to the consumers
    fn dispatch(&self, event: Event) -> Result<()>;
}

/// Delivers on the publishing thread
#[derive(Default)]
pub struct SyncFanOut {
    subscribers: Subscribers,
}

impl SyncFanOut {
    /// Create a fan-out with no consumers
    pub fn new() -> Self {
        Self::default()
    }
}

impl FanOutHandler for SyncFanOut {
    fn subscribers(&self) -> &Subscribers {
        &self.subscribers
    }

    fn dispatch(&self, event: Event) -> Result<()> {
        self.subscribers.deliver(&event);
        Ok(())
    }
}

/// Queues events and delivers them from a tokio task
///
/// Delivery order matches publication order. The task ends when the
/// fan-out is dropped.
pub struct AsyncFanOut {
    subscribers: Arc<Subscribers>,
    sender: mpsc::Sender<Event>,
}

impl AsyncFanOut {
    /// Create a fan-out on the current tokio runtime
    pub fn new(queue_capacity: usize) -> Result<Self> {
        let handle = tokio::runtime::Handle::try_current().map_err(|e| {
            Error::infrastructure_with_source("Asynchronous fan-out needs a tokio runtime", e)
        })?;
        let subscribers = Arc::new(Subscribers::default());
        let (sender, mut receiver) = mpsc::channel::<Event>(queue_capacity);
        let delivering = Arc::clone(&subscribers);
        handle.spawn(async move {
            while let Some(event) = receiver.recv().await {
                delivering.deliver(&event);
            }
        });
        Ok(Self {
            subscribers,
            sender,
        })
    }
}

impl FanOutHandler for AsyncFanOut {
    fn subscribers(&self) -> &Subscribers {
        &self.subscribers
    }

    fn dispatch(&self, event: Event) -> Result<()> {
        self.sender.try_send(event).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => Error::infrastructure("Channel queue is full"),
            mpsc::error::TrySendError::Closed(_) => Error::infrastructure("Channel is closed"),
        })
    }
}
