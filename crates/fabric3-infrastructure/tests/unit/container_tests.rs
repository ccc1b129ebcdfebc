//! Scope container and component registry tests

use std::sync::Arc;

use fabric3_domain::model::Scope;
use fabric3_domain::physical::{Injectable, PhysicalResource};
use fabric3_domain::ports::{ImplementationFactory, Injected};
use fabric3_domain::{Error, Message};
use fabric3_infrastructure::container::{
    ComponentManager, CompositeScopeContainer, ImplementationRegistry, ManagedComponent,
    ResourceRegistry, ScopeContainer, ScopedComponent, StatelessScopeContainer,
};
use fabric3_infrastructure::injection::InjectionSite;
use serde_json::json;

use crate::support::{Journal, Label, TestFactory, deployable, physical_component};

fn component(uri: &str, scope: Scope, factory: &Arc<TestFactory>) -> Arc<ScopedComponent> {
    Arc::new(ScopedComponent::new(
        physical_component(uri, scope, "app"),
        Arc::clone(factory) as Arc<dyn ImplementationFactory>,
    ))
}

fn eager(uri: &str, factory: &Arc<TestFactory>) -> Arc<ScopedComponent> {
    let mut definition = physical_component(uri, Scope::Composite, "app");
    definition.eager_init = true;
    Arc::new(ScopedComponent::new(
        definition,
        Arc::clone(factory) as Arc<dyn ImplementationFactory>,
    ))
}

fn call(instance: &Arc<dyn fabric3_domain::ports::ComponentImplementation>) -> serde_json::Value {
    instance
        .invoke("service", "op", Message::new(json!("ping")))
        .unwrap()
        .body
}

#[test]
fn test_composite_requires_started_context() {
    let factory = Arc::new(TestFactory::default());
    let container = CompositeScopeContainer::new();
    let a = component("a", Scope::Composite, &factory);
    container.register(Arc::clone(&a));

    assert!(matches!(container.get_instance(&a), Err(Error::Container { .. })));

    container.start_context(&deployable("app")).unwrap();
    assert!(container.get_instance(&a).is_ok());
}

#[test]
fn test_composite_reuses_one_instance() {
    let factory = Arc::new(TestFactory::default());
    let container = CompositeScopeContainer::new();
    let a = component("a", Scope::Composite, &factory);
    container.register(Arc::clone(&a));
    container.start_context(&deployable("app")).unwrap();

    let first = container.get_instance(&a).unwrap();
    let second = container.get_instance(&a).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(factory.journal.count("init"), 1);
}

#[test]
fn test_eager_instances_start_and_stop_in_reverse_order() {
    let factory = Arc::new(TestFactory::default());
    let container = CompositeScopeContainer::new();
    container.register(eager("a", &factory));
    container.register(eager("b", &factory));
    container.register(component("lazy", Scope::Composite, &factory));

    container.start_context(&deployable("app")).unwrap();
    assert_eq!(factory.journal.lines(), ["init a", "init b"]);

    container.stop_context(&deployable("app")).unwrap();
    assert_eq!(
        factory.journal.lines(),
        ["init a", "init b", "destroy b", "destroy a"]
    );
    assert!(!container.is_started(&deployable("app")));
}

#[test]
fn test_stateless_creates_and_destroys_per_call() {
    let factory = Arc::new(TestFactory::default());
    let container = Arc::new(StatelessScopeContainer::new());
    let a = component("a", Scope::Stateless, &factory);
    container.register(Arc::clone(&a));
    let managed = ManagedComponent {
        component: a,
        container: container as Arc<dyn ScopeContainer>,
    };

    managed.invoke("service", "op", Message::new(json!(1))).unwrap();
    managed.invoke("service", "op", Message::new(json!(2))).unwrap();

    assert_eq!(
        factory.journal.lines(),
        ["init a", "destroy a", "init a", "destroy a"]
    );
}

#[test]
fn test_properties_are_injected() {
    let factory = Arc::new(TestFactory::default());
    let mut definition = physical_component("a", Scope::Composite, "app");
    definition
        .properties
        .insert("greeting".to_string(), json!("hello"));
    let a = Arc::new(ScopedComponent::new(
        definition,
        Arc::clone(&factory) as Arc<dyn ImplementationFactory>,
    ));
    let container = CompositeScopeContainer::new();
    container.register(Arc::clone(&a));
    container.start_context(&deployable("app")).unwrap();

    let body = call(&container.get_instance(&a).unwrap());
    assert_eq!(body["greeting"], json!("hello"));
}

#[test]
fn test_reinjection_updates_live_instance() {
    let factory = Arc::new(TestFactory::default());
    let container = CompositeScopeContainer::new();
    let a = component("a", Scope::Composite, &factory);
    container.register(Arc::clone(&a));
    container.start_context(&deployable("app")).unwrap();
    let instance = container.get_instance(&a).unwrap();

    a.set_site(
        Injectable::reference("target"),
        InjectionSite::value(Injected::Proxy(Arc::new(Label("wired")))),
    );
    assert!(a.has_changes());
    container.reinject_component(&a).unwrap();

    assert!(!a.has_changes());
    assert_eq!(call(&instance), json!("wired"));
}

#[test]
fn test_reinjection_failures_are_aggregated() {
    let factory = Arc::new(TestFactory {
        journal: Journal::default(),
        fail_injection: true,
    });
    let container = CompositeScopeContainer::new();
    let a = component("a", Scope::Composite, &factory);
    let b = component("b", Scope::Composite, &factory);
    container.register(Arc::clone(&a));
    container.register(Arc::clone(&b));
    container.start_context(&deployable("app")).unwrap();
    container.get_instance(&a).unwrap();
    container.get_instance(&b).unwrap();

    for c in [&a, &b] {
        c.set_site(
            Injectable::reference("target"),
            InjectionSite::value(Injected::Proxy(Arc::new(Label("x")))),
        );
    }

    match container.reinject() {
        Err(Error::Reinjection { failures }) => assert_eq!(failures.len(), 2),
        other => panic!("expected reinjection failures, got {other:?}"),
    }
}

#[test]
fn test_unregister_destroys_instance() {
    let factory = Arc::new(TestFactory::default());
    let container = CompositeScopeContainer::new();
    let a = component("a", Scope::Composite, &factory);
    container.register(Arc::clone(&a));
    container.start_context(&deployable("app")).unwrap();
    container.get_instance(&a).unwrap();

    container.unregister("a").unwrap();

    assert_eq!(factory.journal.lines(), ["init a", "destroy a"]);
    assert!(container.active_instances(&a).is_empty());
}

#[test]
fn test_component_manager_rejects_duplicates() {
    let factory = Arc::new(TestFactory::default());
    let manager = ComponentManager::new();
    let container: Arc<dyn ScopeContainer> = Arc::new(CompositeScopeContainer::new());
    let managed = ManagedComponent {
        component: component("a", Scope::Composite, &factory),
        container,
    };

    manager.register(managed.clone()).unwrap();
    assert!(matches!(manager.register(managed), Err(Error::Builder { .. })));
    assert_eq!(manager.uris(), ["a"]);
    assert!(manager.require("missing").is_err());
}

#[test]
fn test_implementation_registry_reports_unknown_kind() {
    let registry = ImplementationRegistry::new();
    registry.register("test", Arc::new(TestFactory::default()));

    assert!(registry.resolve("test").is_ok());
    let err = registry.resolve("wasm").err().unwrap();
    assert!(err.to_string().contains("wasm"));
}

#[test]
fn test_resources_resolve_by_interface() {
    let registry = ResourceRegistry::new();
    registry.register("Clock", Arc::new(42_u64));

    let required = |interface: &str, optional| PhysicalResource {
        name: "clock".to_string(),
        interface: interface.to_string(),
        optional,
    };
    let found = registry.resolve("a", &required("Clock", false)).unwrap();
    match found {
        Some(Injected::Resource(resource)) => assert_eq!(resource.downcast_ref::<u64>(), Some(&42)),
        other => panic!("expected resource, got {other:?}"),
    }
    assert!(registry.resolve("a", &required("Missing", true)).unwrap().is_none());
    assert!(matches!(
        registry.resolve("a", &required("Missing", false)),
        Err(Error::Builder { .. })
    ));
}
