//! Component manager

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use fabric3_domain::{Error, Event, Message, Result};

use super::component::ScopedComponent;
use super::scope::ScopeContainer;

/// A built component and the container owning its instances
#[derive(Clone)]
pub struct ManagedComponent {
    /// The component
    pub component: Arc<ScopedComponent>,
    /// Container of the component's scope
    pub container: Arc<dyn ScopeContainer>,
}

impl ManagedComponent {
    /// Invoke a service operation on an instance obtained from the container
    pub fn invoke(&self, service: &str, operation: &str, message: Message) -> Result<Message> {
        let instance = self.container.get_instance(&self.component)?;
        let result = instance.invoke(service, operation, message);
        self.container
            .release_instance(&self.component, instance)?;
        result
    }

    /// Deliver an event to a consumer of an instance
    pub fn deliver(&self, consumer: &str, event: &Event) -> Result<()> {
        let instance = self.container.get_instance(&self.component)?;
        let result = instance.on_event(consumer, event);
        self.container
            .release_instance(&self.component, instance)?;
        result
    }
}

/// Registry of built components by URI
#[derive(Default)]
pub struct ComponentManager {
    components: DashMap<String, ManagedComponent>,
}

impl ComponentManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component; a URI can only be registered once
    pub fn register(&self, managed: ManagedComponent) -> Result<()> {
        match self.components.entry(managed.component.uri().to_string()) {
            Entry::Occupied(existing) => Err(Error::builder(format!(
                "Component already registered: {}",
                existing.key()
            ))),
            Entry::Vacant(slot) => {
                slot.insert(managed);
                Ok(())
            }
        }
    }

    /// Remove a component
    pub fn unregister(&self, uri: &str) -> Option<ManagedComponent> {
        self.components.remove(uri).map(|(_, managed)| managed)
    }

    /// Look up a component
    pub fn get(&self, uri: &str) -> Option<ManagedComponent> {
        self.components.get(uri).map(|entry| entry.clone())
    }

    /// Look up a component, failing if it is not built
    pub fn require(&self, uri: &str) -> Result<ManagedComponent> {
        self.get(uri)
            .ok_or_else(|| Error::builder(format!("Component not found: {uri}")))
    }

    /// URIs of all built components, sorted
    pub fn uris(&self) -> Vec<String> {
        let mut uris: Vec<String> = self.components.iter().map(|e| e.key().clone()).collect();
        uris.sort();
        uris
    }

    /// Number of built components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True if no component is built
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Open an update cycle on every multiplicity supplier
    pub fn start_updates(&self) {
        for supplier in self.suppliers() {
            supplier.start_update();
        }
    }

    /// Publish buffered multiplicity changes
    pub fn end_updates(&self) {
        for supplier in self.suppliers() {
            supplier.end_update();
        }
    }

    fn suppliers(&self) -> Vec<Arc<crate::injection::MultiplicitySupplier>> {
        self.components
            .iter()
            .flat_map(|entry| entry.component.multiplicities())
            .collect()
    }
}
