//! The domain-wide logical model
//!
//! An arena of logical components keyed by URI with a single root composite
//! (the domain). Parent links are URIs, so the tree can be walked and mutated
//! without shared ownership between nodes.

use std::collections::BTreeMap;

use super::bindables::{LogicalReference, LogicalService};
use super::channel::LogicalChannel;
use super::component::{CompositeState, LogicalComponent};
use super::state::LogicalState;
use super::wire::LogicalWire;
use crate::constants::DOMAIN_NAME;
use crate::model::{Autowire, ComponentDefinition, Composite, Implementation};
use crate::value_objects::{QName, uri};

/// Logical model of a domain
#[derive(Debug, Clone)]
pub struct LogicalModel {
    components: BTreeMap<String, LogicalComponent>,
    root: String,
}

impl LogicalModel {
    /// Create a model holding only the domain root
    ///
    /// An inherited root autowire resolves to `Off`.
    pub fn new(autowire: Autowire) -> Self {
        let name = QName::local(DOMAIN_NAME);
        let mut composite = Composite::new(name.clone());
        composite.autowire = autowire;
        let definition =
            ComponentDefinition::new(DOMAIN_NAME, Implementation::Composite(Box::new(composite)));
        let mut root = LogicalComponent::new(DOMAIN_NAME, None, definition, name);
        root.state = LogicalState::Provisioned;
        root.autowire = autowire.resolve(Autowire::Off);

        let mut components = BTreeMap::new();
        components.insert(DOMAIN_NAME.to_string(), root);
        Self {
            components,
            root: DOMAIN_NAME.to_string(),
        }
    }

    /// URI of the domain root
    pub fn root_uri(&self) -> &str {
        &self.root
    }

    /// The domain root
    pub fn root(&self) -> &LogicalComponent {
        &self.components[&self.root]
    }

    /// Find a component by URI
    pub fn component(&self, uri: &str) -> Option<&LogicalComponent> {
        self.components.get(uri)
    }

    /// Find a component by URI for update
    pub fn component_mut(&mut self, uri: &str) -> Option<&mut LogicalComponent> {
        self.components.get_mut(uri)
    }

    /// True if a component with the URI exists
    pub fn contains(&self, uri: &str) -> bool {
        self.components.contains_key(uri)
    }

    /// All components, ordered by URI
    pub fn components(&self) -> impl Iterator<Item = &LogicalComponent> {
        self.components.values()
    }

    /// Add a component under its parent
    ///
    /// Returns false, leaving the model untouched, if the URI is taken or the
    /// parent is not a composite in this model.
    pub fn add_component(&mut self, component: LogicalComponent) -> bool {
        if self.components.contains_key(&component.uri) {
            return false;
        }
        if let Some(parent) = &component.parent {
            let Some(state) = self
                .components
                .get_mut(parent)
                .and_then(|p| p.composite.as_mut())
            else {
                return false;
            };
            state.children.push(component.uri.clone());
        }
        self.components.insert(component.uri.clone(), component);
        true
    }

    /// Remove a component, its descendants and the wires stored for its references
    pub fn remove_component(&mut self, uri: &str) -> Option<LogicalComponent> {
        for child in self.children_uris(uri) {
            self.remove_component(&child);
        }
        let removed = self.components.remove(uri)?;
        if let Some(parent) = removed
            .parent
            .as_deref()
            .and_then(|p| self.components.get_mut(p))
            .and_then(|p| p.composite.as_mut())
        {
            parent.children.retain(|c| c != uri);
            parent
                .wires
                .retain(|source, _| uri::split_member(source).map(|(c, _)| c) != Some(uri));
        }
        Some(removed)
    }

    /// URIs of the direct children of a composite
    pub fn children_uris(&self, uri: &str) -> Vec<String> {
        self.composite(uri)
            .map(|c| c.children.clone())
            .unwrap_or_default()
    }

    /// Direct children of a composite in instantiation order
    pub fn children(&self, uri: &str) -> Vec<&LogicalComponent> {
        self.composite(uri)
            .map(|c| {
                c.children
                    .iter()
                    .filter_map(|child| self.components.get(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The component and all its descendants, parents before children
    pub fn descendants(&self, uri: &str) -> Vec<String> {
        let mut out = Vec::new();
        if self.contains(uri) {
            self.collect_descendants(uri, &mut out);
        }
        out
    }

    fn collect_descendants(&self, uri: &str, out: &mut Vec<String>) {
        out.push(uri.to_string());
        for child in self.children_uris(uri) {
            self.collect_descendants(&child, out);
        }
    }

    /// Composite state of a composite component
    pub fn composite(&self, uri: &str) -> Option<&CompositeState> {
        self.components.get(uri).and_then(|c| c.composite.as_ref())
    }

    /// Composite state of a composite component for update
    pub fn composite_mut(&mut self, uri: &str) -> Option<&mut CompositeState> {
        self.components
            .get_mut(uri)
            .and_then(|c| c.composite.as_mut())
    }

    // ------------------------------------------------------------------
    // Channels
    // ------------------------------------------------------------------

    /// Find a channel by URI
    pub fn channel(&self, channel_uri: &str) -> Option<&LogicalChannel> {
        let composite = uri::parent_uri(channel_uri)?;
        self.composite(composite)?.channels.get(channel_uri)
    }

    /// Find a channel by URI for update
    pub fn channel_mut(&mut self, channel_uri: &str) -> Option<&mut LogicalChannel> {
        let composite = uri::parent_uri(channel_uri)?.to_string();
        self.composite_mut(&composite)?.channels.get_mut(channel_uri)
    }

    /// Add a channel to a composite; false if the URI is taken or the composite is unknown
    pub fn add_channel(&mut self, composite_uri: &str, channel: LogicalChannel) -> bool {
        let Some(state) = self.composite_mut(composite_uri) else {
            return false;
        };
        if state.channels.contains_key(&channel.uri) {
            return false;
        }
        state.channels.insert(channel.uri.clone(), channel);
        true
    }

    /// Remove a channel
    pub fn remove_channel(&mut self, channel_uri: &str) -> Option<LogicalChannel> {
        let composite = uri::parent_uri(channel_uri)?.to_string();
        self.composite_mut(&composite)?.channels.remove(channel_uri)
    }

    /// All channels in the model
    pub fn channels(&self) -> impl Iterator<Item = &LogicalChannel> {
        self.components
            .values()
            .filter_map(|c| c.composite.as_ref())
            .flat_map(|c| c.channels.values())
    }

    // ------------------------------------------------------------------
    // References, services and wires
    // ------------------------------------------------------------------

    /// Find a reference by its `component#name` URI
    pub fn reference(&self, reference_uri: &str) -> Option<&LogicalReference> {
        let (component, name) = uri::split_member(reference_uri)?;
        self.component(component)?.reference(name)
    }

    /// Find a reference by its `component#name` URI for update
    pub fn reference_mut(&mut self, reference_uri: &str) -> Option<&mut LogicalReference> {
        let (component, name) = uri::split_member(reference_uri)?;
        self.components.get_mut(component)?.reference_mut(name)
    }

    /// Find a service by its `component#name` URI
    pub fn service(&self, service_uri: &str) -> Option<&LogicalService> {
        let (component, name) = uri::split_member(service_uri)?;
        self.component(component)?.service(name)
    }

    /// URI of the composite storing the wires of a reference
    ///
    /// Wires live on the composite containing the source component. References
    /// of the domain root itself store their wires on the root.
    pub fn wire_owner(&self, reference_uri: &str) -> Option<String> {
        let (component, _) = uri::split_member(reference_uri)?;
        let component = self.component(component)?;
        Some(
            component
                .parent
                .clone()
                .unwrap_or_else(|| component.uri.clone()),
        )
    }

    /// Wires of a reference
    pub fn wires_of(&self, reference_uri: &str) -> &[LogicalWire] {
        self.wire_owner(reference_uri)
            .and_then(|owner| self.composite(&owner))
            .map_or(&[], |c| c.wires_of(reference_uri))
    }

    /// Wires of a reference for update
    pub fn wires_of_mut(&mut self, reference_uri: &str) -> Option<&mut Vec<LogicalWire>> {
        let owner = self.wire_owner(reference_uri)?;
        self.composite_mut(&owner)?.wires.get_mut(reference_uri)
    }

    /// Store a wire on the composite owning its source; false if the source is unknown
    pub fn add_wire(&mut self, wire: LogicalWire) -> bool {
        let Some(owner) = self.wire_owner(&wire.source) else {
            return false;
        };
        match self.composite_mut(&owner) {
            Some(state) => {
                state.add_wire(wire);
                true
            }
            None => false,
        }
    }

    /// All wires in the model
    pub fn wires(&self) -> impl Iterator<Item = &LogicalWire> {
        self.components
            .values()
            .filter_map(|c| c.composite.as_ref())
            .flat_map(|c| c.wires.values().flatten())
    }

    /// Drop every wire and channel in `Marked` state
    pub fn purge_marked(&mut self) {
        for component in self.components.values_mut() {
            if let Some(state) = component.composite.as_mut() {
                state
                    .channels
                    .retain(|_, channel| channel.state != LogicalState::Marked);
                for wires in state.wires.values_mut() {
                    wires.retain(|wire| wire.state != LogicalState::Marked);
                }
                state.wires.retain(|_, wires| !wires.is_empty());
            }
        }
    }
}

impl Default for LogicalModel {
    fn default() -> Self {
        Self::new(Autowire::On)
    }
}
