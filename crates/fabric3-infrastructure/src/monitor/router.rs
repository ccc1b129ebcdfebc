//! Ring-buffer destination router
//!
//! Producers claim a sequence from an atomic counter, render into the
//! pre-sized entry of that slot and publish it. A single handler thread
//! drains published entries in sequence order and writes them to their
//! destination. A producer that laps the handler waits until its slot has
//! been drained.

use std::fmt::Display;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle, Thread};
use std::time::Duration;

use chrono::{DateTime, Local};
use fabric3_domain::{Error, Result};
use tracing::{debug, warn};

use super::destination::MonitorDestinationRegistry;
use super::entry::{MonitorEventEntry, write_entry};
use super::level::MonitorLevel;
use crate::config::MonitorConfig;
use crate::error_ext::ErrorContext;

const IDLE_PARK: Duration = Duration::from_millis(10);

struct Slot {
    entry: Mutex<MonitorEventEntry>,
    /// Sequence + 1 of the last published entry, 0 if none
    published: AtomicU64,
}

struct Ring {
    slots: Box<[Slot]>,
    next: AtomicU64,
    consumed: AtomicU64,
    running: AtomicBool,
    registry: Arc<MonitorDestinationRegistry>,
}

impl Ring {
    fn size(&self) -> u64 {
        self.slots.len() as u64
    }

    #[allow(clippy::cast_possible_truncation)]
    fn slot(&self, sequence: u64) -> &Slot {
        &self.slots[(sequence % self.size()) as usize]
    }

    fn drain(&self) {
        loop {
            let sequence = self.consumed.load(Ordering::Acquire);
            let slot = self.slot(sequence);
            if slot.published.load(Ordering::Acquire) == sequence + 1 {
                {
                    let entry = slot.entry.lock().unwrap_or_else(PoisonError::into_inner);
                    if let Err(e) = self
                        .registry
                        .write(entry.destination_index(), entry.buffer())
                    {
                        warn!(error = %e, "Failed to write monitor entry");
                    }
                }
                self.consumed.store(sequence + 1, Ordering::Release);
            } else if !self.running.load(Ordering::Acquire) {
                break;
            } else {
                thread::park_timeout(IDLE_PARK);
            }
        }
    }
}

/// A claimed ring entry; publishes itself when dropped
pub struct EntryGuard<'a> {
    entry: MutexGuard<'a, MonitorEventEntry>,
    slot: &'a Slot,
    handler: Option<&'a Thread>,
}

impl Deref for EntryGuard<'_> {
    type Target = MonitorEventEntry;

    fn deref(&self) -> &Self::Target {
        &self.entry
    }
}

impl DerefMut for EntryGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.entry
    }
}

impl Drop for EntryGuard<'_> {
    fn drop(&mut self) {
        self.slot
            .published
            .store(self.entry.sequence() + 1, Ordering::Release);
        if let Some(handler) = self.handler {
            handler.unpark();
        }
    }
}

/// Routes monitor entries to destinations through a ring buffer
pub struct RingBufferDestinationRouter {
    config: MonitorConfig,
    registry: Arc<MonitorDestinationRegistry>,
    ring: Option<Arc<Ring>>,
    handler: Option<Thread>,
    join: Mutex<Option<JoinHandle<()>>>,
    fallback: Mutex<()>,
}

impl RingBufferDestinationRouter {
    /// Create a router, starting the handler thread when the ring is enabled
    pub fn new(config: &MonitorConfig, registry: Arc<MonitorDestinationRegistry>) -> Result<Self> {
        if !config.enabled {
            return Ok(Self {
                config: config.clone(),
                registry,
                ring: None,
                handler: None,
                join: Mutex::new(None),
                fallback: Mutex::new(()),
            });
        }
        if config.ring_size == 0 || config.capacity == 0 {
            return Err(Error::configuration(
                "Monitor ring size and entry capacity must be positive",
            ));
        }
        if !config.ring_size.is_power_of_two() {
            return Err(Error::configuration(format!(
                "Monitor ring size must be a power of two, got {}",
                config.ring_size
            )));
        }

        let slots = (0..config.ring_size)
            .map(|_| Slot {
                entry: Mutex::new(MonitorEventEntry::new(config.capacity)),
                published: AtomicU64::new(0),
            })
            .collect();
        let ring = Arc::new(Ring {
            slots,
            next: AtomicU64::new(0),
            consumed: AtomicU64::new(0),
            running: AtomicBool::new(true),
            registry: Arc::clone(&registry),
        });

        let draining = Arc::clone(&ring);
        let join = thread::Builder::new()
            .name("fabric3-monitor".to_string())
            .spawn(move || draining.drain())
            .io_context("Failed to start the monitor handler thread")?;
        debug!(ring_size = config.ring_size, capacity = config.capacity, "Monitor ring started");

        Ok(Self {
            config: config.clone(),
            registry,
            ring: Some(ring),
            handler: Some(join.thread().clone()),
            join: Mutex::new(Some(join)),
            fallback: Mutex::new(()),
        })
    }

    /// True if entries go through the ring buffer
    pub fn is_enabled(&self) -> bool {
        self.ring.is_some()
    }

    /// Index of a named destination, resolved once by callers
    pub fn get_destination_index(&self, name: &str) -> Result<usize> {
        self.registry.get_index(name)
    }

    /// Claim the next ring entry
    ///
    /// The entry is cleared and stamped with its sequence. Dropping the
    /// guard publishes it.
    pub fn get(&self) -> Result<EntryGuard<'_>> {
        let ring = self
            .ring
            .as_ref()
            .ok_or_else(|| Error::internal("Monitor ring buffer is disabled"))?;
        let sequence = ring.next.fetch_add(1, Ordering::AcqRel);
        while sequence >= ring.consumed.load(Ordering::Acquire) + ring.size() {
            if !ring.running.load(Ordering::Acquire) {
                return Err(Error::internal("Monitor ring buffer is stopped"));
            }
            thread::yield_now();
        }
        let slot = ring.slot(sequence);
        let mut entry = slot.entry.lock().unwrap_or_else(PoisonError::into_inner);
        entry.clear();
        entry.set_sequence(sequence);
        Ok(EntryGuard {
            entry,
            slot,
            handler: self.handler.as_ref(),
        })
    }

    /// Publish a claimed entry
    pub fn publish(&self, entry: EntryGuard<'_>) {
        drop(entry);
    }

    /// Render and route one event
    ///
    /// With the ring disabled the entry is written on the calling thread,
    /// one writer at a time.
    pub fn send(
        &self,
        level: MonitorLevel,
        destination_index: usize,
        timestamp: DateTime<Local>,
        runtime: &str,
        template: &str,
        args: &[&dyn Display],
    ) -> Result<()> {
        if self.is_enabled() {
            let mut entry = self.get()?;
            entry.set_destination_index(destination_index);
            let capacity = entry.capacity();
            write_entry(
                level,
                timestamp,
                &self.config.pattern,
                runtime,
                template,
                args,
                entry.buffer_mut(),
                capacity,
            );
            self.publish(entry);
            Ok(())
        } else {
            let _serialized = self.fallback.lock().unwrap_or_else(PoisonError::into_inner);
            let mut buffer = Vec::with_capacity(self.config.capacity);
            write_entry(
                level,
                timestamp,
                &self.config.pattern,
                runtime,
                template,
                args,
                &mut buffer,
                self.config.capacity,
            );
            self.registry.write(destination_index, &buffer)
        }
    }

    /// Sequences drained by the handler thread so far
    pub fn drained(&self) -> u64 {
        self.ring
            .as_ref()
            .map_or(0, |ring| ring.consumed.load(Ordering::Acquire))
    }

    /// Stop the handler thread after it drains published entries
    pub fn shutdown(&self) {
        let Some(ring) = &self.ring else {
            return;
        };
        ring.running.store(false, Ordering::Release);
        if let Some(handler) = &self.handler {
            handler.unpark();
        }
        let join = self.join.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(join) = join
            && join.join().is_err()
        {
            warn!("Monitor handler thread panicked");
        }
    }
}

impl Drop for RingBufferDestinationRouter {
    fn drop(&mut self) {
        self.shutdown();
    }
}
