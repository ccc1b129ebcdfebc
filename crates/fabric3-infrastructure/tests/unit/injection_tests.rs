//! Multiplicity supplier tests

use std::sync::Arc;

use fabric3_domain::model::CollectionKind;
use fabric3_domain::ports::{Injected, Invoker};
use fabric3_infrastructure::injection::{InjectionAttributes, MultiplicitySupplier, Supplier, supplier};

use crate::support::{Label, labels};

fn label(name: &'static str) -> Supplier<Arc<dyn Invoker>> {
    let invoker: Arc<dyn Invoker> = Arc::new(Label(name));
    supplier(move || Arc::clone(&invoker))
}

fn ordered(order: i32) -> InjectionAttributes {
    InjectionAttributes::new(None, Some(order))
}

#[test]
fn test_changes_outside_update_publish_immediately() {
    let multiplicity = MultiplicitySupplier::new(CollectionKind::List);
    multiplicity.add("a", label("a"), InjectionAttributes::EMPTY);

    assert_eq!(labels(&multiplicity.get()), ["a"]);
    multiplicity.remove("a");
    assert!(multiplicity.is_empty());
}

#[test]
fn test_update_cycle_hides_changes_until_end() {
    let multiplicity = MultiplicitySupplier::new(CollectionKind::List);
    multiplicity.add("a", label("a"), InjectionAttributes::EMPTY);

    multiplicity.start_update();
    multiplicity.add("b", label("b"), InjectionAttributes::EMPTY);
    multiplicity.remove("a");
    assert!(multiplicity.is_updating());
    assert_eq!(labels(&multiplicity.get()), ["a"]);

    multiplicity.end_update();
    assert!(!multiplicity.is_updating());
    assert_eq!(labels(&multiplicity.get()), ["b"]);
}

#[test]
fn test_empty_update_cycle_keeps_targets() {
    let multiplicity = MultiplicitySupplier::new(CollectionKind::List);
    multiplicity.add("a", label("a"), InjectionAttributes::EMPTY);
    multiplicity.add("b", label("b"), InjectionAttributes::EMPTY);

    multiplicity.start_update();
    multiplicity.end_update();

    assert_eq!(labels(&multiplicity.get()), ["a", "b"]);
}

#[test]
fn test_end_without_start_is_noop() {
    let multiplicity = MultiplicitySupplier::new(CollectionKind::Set);
    multiplicity.end_update();
    assert!(multiplicity.is_empty());
}

#[test]
fn test_targets_sorted_by_order_across_cycles() {
    let multiplicity = MultiplicitySupplier::new(CollectionKind::Set);

    multiplicity.start_update();
    multiplicity.add("two", label("two"), ordered(2));
    multiplicity.end_update();

    multiplicity.start_update();
    multiplicity.add("zero", label("zero"), ordered(0));
    multiplicity.end_update();

    assert_eq!(labels(&multiplicity.get()), ["zero", "two"]);
}

#[test]
fn test_unordered_targets_follow_ordered_ones() {
    let multiplicity = MultiplicitySupplier::new(CollectionKind::List);
    multiplicity.add("loose", label("loose"), InjectionAttributes::EMPTY);
    multiplicity.add("first", label("first"), ordered(1));

    assert_eq!(labels(&multiplicity.get()), ["first", "loose"]);
}

#[test]
fn test_readding_target_replaces_it() {
    let multiplicity = MultiplicitySupplier::new(CollectionKind::List);
    multiplicity.add("a", label("old"), InjectionAttributes::EMPTY);
    multiplicity.add("a", label("new"), InjectionAttributes::EMPTY);

    assert_eq!(labels(&multiplicity.get()), ["new"]);
}

#[test]
fn test_map_injects_keyed_targets_only() {
    let multiplicity = MultiplicitySupplier::new(CollectionKind::Map);
    multiplicity.add("a", label("a"), InjectionAttributes::new(Some("alpha".into()), None));
    multiplicity.add("b", label("b"), InjectionAttributes::EMPTY);

    match multiplicity.get() {
        Injected::Keyed(map) => {
            assert_eq!(map.keys().collect::<Vec<_>>(), ["alpha"]);
        }
        other => panic!("expected keyed proxies, got {other:?}"),
    }
}
