//! Monitor event routing
//!
//! Monitor events are rendered into pre-sized entries of a ring buffer and
//! written to their destination by a single handler thread. With the ring
//! buffer disabled, entries are written synchronously under a lock.

pub mod destination;
pub mod entry;
pub mod level;
pub mod proxy;
pub mod router;

pub use destination::{MonitorDestination, MonitorDestinationRegistry, TracingDestination};
pub use entry::{MonitorEventEntry, write_entry};
pub use level::MonitorLevel;
pub use proxy::Monitor;
pub use router::{EntryGuard, RingBufferDestinationRouter};
