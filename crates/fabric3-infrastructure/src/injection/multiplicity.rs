//! Multiplicity suppliers
//!
//! A reference with multiplicity `0..n` or `1..n` receives one proxy per
//! wire. Wire changes of a deployment arrive one at a time; the supplier
//! stages them between [`start_update`](MultiplicitySupplier::start_update)
//! and [`end_update`](MultiplicitySupplier::end_update) and only then
//! publishes a new snapshot, so readers never observe a half-applied
//! deployment.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use arc_swap::ArcSwap;
use fabric3_domain::model::CollectionKind;
use fabric3_domain::ports::{Injected, Invoker};
use tracing::warn;

use super::attributes::InjectionAttributes;
use super::supplier::Supplier;

#[derive(Clone)]
struct Entry {
    id: String,
    supplier: Supplier<Arc<dyn Invoker>>,
    attributes: InjectionAttributes,
}

#[derive(Default)]
struct State {
    committed: Vec<Entry>,
    staged: Option<Vec<Entry>>,
}

/// Buffers multiplicity wire changes and publishes immutable snapshots
pub struct MultiplicitySupplier {
    kind: CollectionKind,
    state: Mutex<State>,
    snapshot: ArcSwap<Injected>,
}

impl MultiplicitySupplier {
    /// Create an empty supplier for a collection shape
    pub fn new(kind: CollectionKind) -> Self {
        Self {
            kind,
            state: Mutex::new(State::default()),
            snapshot: ArcSwap::from_pointee(Self::empty(kind)),
        }
    }

    /// Collection shape injected
    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Begin buffering changes
    ///
    /// Calling it again while an update is open keeps the buffered changes.
    pub fn start_update(&self) {
        let mut state = self.lock();
        if state.staged.is_none() {
            state.staged = Some(state.committed.clone());
        }
    }

    /// Add or replace the target identified by `id`
    ///
    /// Outside an update the change is published immediately.
    pub fn add(
        &self,
        id: impl Into<String>,
        supplier: Supplier<Arc<dyn Invoker>>,
        attributes: InjectionAttributes,
    ) {
        let entry = Entry {
            id: id.into(),
            supplier,
            attributes,
        };
        self.apply(|entries| match entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        });
    }

    /// Remove the target identified by `id`
    pub fn remove(&self, id: &str) {
        self.apply(|entries| entries.retain(|e| e.id != id));
    }

    /// Publish buffered changes
    ///
    /// Without a preceding `start_update` this is a no-op, and a cycle with
    /// no changes republishes the same targets.
    pub fn end_update(&self) {
        let mut state = self.lock();
        if let Some(staged) = state.staged.take() {
            state.committed = staged;
            self.publish(&state.committed);
        }
    }

    /// True while changes are being buffered
    pub fn is_updating(&self) -> bool {
        self.lock().staged.is_some()
    }

    /// Number of published targets
    pub fn len(&self) -> usize {
        self.snapshot.load().len()
    }

    /// True if no target is published
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The published snapshot
    pub fn get(&self) -> Injected {
        Injected::clone(&self.snapshot.load())
    }

    fn apply(&self, change: impl FnOnce(&mut Vec<Entry>)) {
        let mut state = self.lock();
        if let Some(staged) = state.staged.as_mut() {
            change(staged);
        } else {
            change(&mut state.committed);
            self.publish(&state.committed);
        }
    }

    fn publish(&self, entries: &[Entry]) {
        let mut sorted: Vec<&Entry> = entries.iter().collect();
        sorted.sort_by(|a, b| a.attributes.compare_order(&b.attributes));

        let snapshot = match self.kind {
            CollectionKind::List | CollectionKind::Set => Injected::Proxies(Arc::new(
                sorted.iter().map(|e| (e.supplier)()).collect(),
            )),
            CollectionKind::Map => {
                let mut keyed = BTreeMap::new();
                for entry in sorted {
                    match &entry.attributes.key {
                        Some(key) => {
                            keyed.insert(key.clone(), (entry.supplier)());
                        }
                        None => warn!(target = %entry.id, "Keyed reference target has no key, skipped"),
                    }
                }
                Injected::Keyed(Arc::new(keyed))
            }
        };
        self.snapshot.store(Arc::new(snapshot));
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // State is only ever replaced wholesale, so a poisoned guard is still consistent
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn empty(kind: CollectionKind) -> Injected {
        match kind {
            CollectionKind::List | CollectionKind::Set => Injected::Proxies(Arc::new(Vec::new())),
            CollectionKind::Map => Injected::Keyed(Arc::new(BTreeMap::new())),
        }
    }
}

impl std::fmt::Debug for MultiplicitySupplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiplicitySupplier")
            .field("kind", &self.kind)
            .field("len", &self.len())
            .finish()
    }
}
