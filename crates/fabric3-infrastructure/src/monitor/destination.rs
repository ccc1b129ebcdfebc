//! Monitor destinations

use std::sync::{Arc, PoisonError, RwLock};

use dashmap::DashMap;
use fabric3_domain::{Error, Result};
use tracing::info;

/// Where rendered monitor entries end up
pub trait MonitorDestination: Send + Sync {
    /// Destination name
    fn name(&self) -> &str;

    /// Write one rendered entry
    fn write(&self, entry: &[u8]) -> Result<()>;
}

/// Writes entries to the `fabric3::monitor` tracing target
#[derive(Debug, Clone)]
pub struct TracingDestination {
    name: String,
}

impl TracingDestination {
    /// Create a destination
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl MonitorDestination for TracingDestination {
    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, entry: &[u8]) -> Result<()> {
        info!(target: "fabric3::monitor", destination = %self.name, "{}", String::from_utf8_lossy(entry));
        Ok(())
    }
}

/// Destinations addressed by a stable index
///
/// Callers resolve a destination's index once and route by index from then on.
#[derive(Default)]
pub struct MonitorDestinationRegistry {
    destinations: RwLock<Vec<Arc<dyn MonitorDestination>>>,
    index: DashMap<String, usize>,
}

impl MonitorDestinationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a destination and return its index
    ///
    /// Registering a name again replaces the destination and keeps its index.
    pub fn register(&self, destination: Arc<dyn MonitorDestination>) -> usize {
        let mut destinations = self
            .destinations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = self.index.get(destination.name()) {
            let index = *existing;
            destinations[index] = destination;
            return index;
        }
        let index = destinations.len();
        self.index.insert(destination.name().to_string(), index);
        destinations.push(destination);
        index
    }

    /// Index of a named destination
    pub fn get_index(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .map(|index| *index)
            .ok_or_else(|| Error::not_found(format!("Monitor destination: {name}")))
    }

    /// Write an entry to the destination at `index`
    pub fn write(&self, index: usize, entry: &[u8]) -> Result<()> {
        let destination = self
            .destinations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(index)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Monitor destination index: {index}")))?;
        destination.write(entry)
    }

    /// Number of destinations
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if no destination is registered
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
