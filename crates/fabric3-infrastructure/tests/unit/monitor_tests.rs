//! Monitor router tests

use std::sync::Arc;
use std::thread;

use chrono::Local;
use fabric3_domain::Error;
use fabric3_infrastructure::config::MonitorConfig;
use fabric3_infrastructure::monitor::{
    Monitor, MonitorDestinationRegistry, MonitorLevel, RingBufferDestinationRouter,
};

use crate::support::MemoryDestination;

fn config(enabled: bool, ring_size: usize, capacity: usize) -> MonitorConfig {
    MonitorConfig {
        enabled,
        ring_size,
        capacity,
        ..MonitorConfig::default()
    }
}

fn router(
    config: &MonitorConfig,
) -> (Arc<RingBufferDestinationRouter>, Arc<MemoryDestination>, Arc<MemoryDestination>) {
    let registry = Arc::new(MonitorDestinationRegistry::new());
    let default = Arc::new(MemoryDestination::new("default"));
    let audit = Arc::new(MemoryDestination::new("audit"));
    registry.register(default.clone());
    registry.register(audit.clone());
    let router = Arc::new(RingBufferDestinationRouter::new(config, registry).unwrap());
    (router, default, audit)
}

#[test]
fn test_ring_routes_to_destination_in_order() {
    let (router, default, audit) = router(&config(true, 8, 256));
    let audit_index = router.get_destination_index("audit").unwrap();

    // more entries than slots, so producers wrap the ring
    for n in 0..20 {
        router
            .send(MonitorLevel::Info, audit_index, Local::now(), "vm", "entry {}", &[&n])
            .unwrap();
    }
    router.shutdown();

    let entries = audit.entries();
    assert_eq!(entries.len(), 20);
    for (n, entry) in entries.iter().enumerate() {
        assert!(entry.starts_with("[INFO "), "{entry}");
        assert!(entry.ends_with(&format!("] [vm] entry {n}")), "{entry}");
    }
    assert!(default.entries().is_empty());
    assert_eq!(router.drained(), 20);
}

#[test]
fn test_concurrent_producers_keep_per_thread_order() {
    let (router, default, _) = router(&config(true, 16, 128));

    let producers: Vec<_> = (0..4)
        .map(|t| {
            let router = Arc::clone(&router);
            thread::spawn(move || {
                for n in 0..50 {
                    router
                        .send(MonitorLevel::Debug, 0, Local::now(), "vm", "t{} n{}", &[&t, &n])
                        .unwrap();
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }
    router.shutdown();

    let entries = default.entries();
    assert_eq!(entries.len(), 200);
    for t in 0..4 {
        let sequence: Vec<usize> = entries
            .iter()
            .filter_map(|e| e.split(&format!("t{t} n")).nth(1))
            .map(|n| n.parse().unwrap())
            .collect();
        assert_eq!(sequence, (0..50).collect::<Vec<_>>());
    }
}

#[test]
fn test_entries_truncate_at_capacity() {
    let (router, default, _) = router(&config(true, 8, 24));

    router
        .send(
            MonitorLevel::Severe,
            0,
            Local::now(),
            "vm",
            "a very long message that cannot fit",
            &[],
        )
        .unwrap();
    router.shutdown();

    let entries = default.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].len(), 24);
}

#[test]
fn test_disabled_ring_writes_synchronously() {
    let (router, default, _) = router(&config(false, 8, 256));

    assert!(!router.is_enabled());
    assert!(router.get().is_err());
    router
        .send(MonitorLevel::Warning, 0, Local::now(), "vm", "now", &[])
        .unwrap();

    assert_eq!(default.entries().len(), 1);
    assert!(default.entries()[0].starts_with("[WARNING "));
}

#[test]
fn test_monitor_filters_by_threshold() {
    let (router, default, _) = router(&config(false, 8, 256));
    let monitor = Monitor::new(Arc::clone(&router), "default", "edge", MonitorLevel::Warning).unwrap();

    monitor.debug("dropped", &[]);
    monitor.info("dropped", &[]);
    monitor.warning("kept {}", &[&1]);
    monitor.severe("kept {}", &[&2]);

    let entries = default.entries();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].ends_with("[edge] kept 1"));
    assert!(entries[1].ends_with("[edge] kept 2"));
}

#[test]
fn test_unknown_destination() {
    let (router, _, _) = router(&config(false, 8, 256));

    assert!(matches!(
        Monitor::new(router, "missing", "vm", MonitorLevel::Info),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn test_invalid_ring_rejected() {
    let registry = Arc::new(MonitorDestinationRegistry::new());
    assert!(RingBufferDestinationRouter::new(&config(true, 0, 256), Arc::clone(&registry)).is_err());
    assert!(matches!(
        RingBufferDestinationRouter::new(&config(true, 6, 256), registry),
        Err(Error::Configuration { .. })
    ));
}
