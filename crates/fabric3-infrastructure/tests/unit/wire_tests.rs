//! Wire chain, connector and local binding tests

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use fabric3_application::ports::WireConnector;
use fabric3_application::ports::registry::BindingCatalog;
use fabric3_domain::model::{CollectionKind, Multiplicity, Scope};
use fabric3_domain::physical::{
    Injectable, PhysicalInterceptor, PhysicalOperation, PhysicalWire, PhysicalWireSource,
    PhysicalWireTarget,
};
use fabric3_domain::ports::{ImplementationFactory, Interceptor, Invoker, TransformerRegistry};
use fabric3_domain::{DataType, Error, Message, Result};
use fabric3_infrastructure::container::{
    ComponentManager, CompositeScopeContainer, ManagedComponent, ScopeContainer, ScopedComponent,
};
use fabric3_infrastructure::transform::DefaultTransformerRegistry;
use fabric3_infrastructure::wire::{
    BindingAttachers, InvocationChain, LocalBindingAttacher, RuntimeWireConnector,
    TransformInterceptor, WireProxy, local_endpoint,
};
use serde_json::{Value, json};

use crate::support::{TestFactory, deployable, physical_component};

/// Echoes requests and remembers the last body received
#[derive(Default)]
struct Recorder {
    last: Mutex<Option<Value>>,
}

impl Invoker for Recorder {
    fn invoke(&self, _operation: &str, message: Message) -> Result<Message> {
        *self.last.lock().unwrap() = Some(message.body.clone());
        Ok(message)
    }
}

fn operation(source: DataType, target: DataType) -> PhysicalOperation {
    PhysicalOperation {
        name: "place".to_string(),
        source_types: vec![source.clone()],
        target_types: vec![target.clone()],
        source_output: source,
        target_output: target,
        one_way: false,
        interceptors: Vec::new(),
    }
}

fn json_operation() -> PhysicalOperation {
    operation(DataType::json("Order"), DataType::json("Order"))
}

struct Runtime {
    components: Arc<ComponentManager>,
    connector: RuntimeWireConnector,
}

impl Runtime {
    fn new(uris: &[&str]) -> Self {
        let components = Arc::new(ComponentManager::new());
        let container: Arc<dyn ScopeContainer> = Arc::new(CompositeScopeContainer::new());
        let factory: Arc<dyn ImplementationFactory> = Arc::new(TestFactory::default());
        for uri in uris {
            let component = Arc::new(ScopedComponent::new(
                physical_component(uri, Scope::Composite, "wires"),
                Arc::clone(&factory),
            ));
            container.register(Arc::clone(&component));
            components
                .register(ManagedComponent {
                    component,
                    container: Arc::clone(&container),
                })
                .unwrap();
        }
        container.start_context(&deployable("wires")).unwrap();

        let transformers: Arc<dyn TransformerRegistry> =
            Arc::new(DefaultTransformerRegistry::with_registered_factories());
        let connector = RuntimeWireConnector::new(
            Arc::clone(&components),
            transformers,
            Arc::new(BindingAttachers::new()),
        );
        Self {
            components,
            connector,
        }
    }
}

fn wire(source: PhysicalWireSource, target: PhysicalWireTarget, optimizable: bool) -> PhysicalWire {
    PhysicalWire {
        source,
        target,
        operations: vec![json_operation()],
        deployable: deployable("wires"),
        optimizable,
    }
}

fn to_component(uri: &str) -> PhysicalWireTarget {
    PhysicalWireTarget::Component {
        uri: uri.to_string(),
        service: "service".to_string(),
    }
}

fn local_config(endpoint: &str) -> BTreeMap<String, Value> {
    BTreeMap::from([("endpoint".to_string(), json!(endpoint))])
}

#[test]
fn test_transform_interceptor_converts_both_ways() {
    let registry = DefaultTransformerRegistry::with_registered_factories();
    let op = operation(DataType::json("Order"), DataType::string("Order"));
    let interceptor: Arc<dyn Interceptor> =
        Arc::new(TransformInterceptor::build(&op, &registry).unwrap());
    let target = Arc::new(Recorder::default());
    let chain = InvocationChain::new("place", vec![interceptor], Arc::clone(&target) as Arc<dyn Invoker>);

    let reply = chain
        .invoke("place", Message::new(json!({"qty": 2})))
        .unwrap();

    assert_eq!(*target.last.lock().unwrap(), Some(json!("{\"qty\":2}")));
    assert_eq!(reply.body, json!({"qty": 2}));
}

#[test]
fn test_transform_interceptor_leaves_faults_alone() {
    struct Faulty;
    impl Invoker for Faulty {
        fn invoke(&self, _operation: &str, _message: Message) -> Result<Message> {
            Ok(Message::fault(json!("not a json string {")))
        }
    }

    let registry = DefaultTransformerRegistry::with_registered_factories();
    let op = operation(DataType::json("Order"), DataType::string("Order"));
    let interceptor = TransformInterceptor::build(&op, &registry).unwrap();

    let reply = interceptor
        .invoke("place", Message::new(json!(1)), &Faulty)
        .unwrap();
    assert!(reply.fault);
    assert_eq!(reply.body, json!("not a json string {"));
}

#[test]
fn test_missing_transformer_fails_build() {
    let registry = DefaultTransformerRegistry::with_registered_factories();
    let op = operation(DataType::json("Order"), DataType::new("xml", "Order"));

    assert!(matches!(
        TransformInterceptor::build(&op, &registry),
        Err(Error::Builder { .. })
    ));
}

#[test]
fn test_proxy_rejects_unknown_operation() {
    let proxy = WireProxy::direct(["place".to_string()], Arc::new(Recorder::default()));

    assert!(proxy.invoke("place", Message::new(json!(1))).is_ok());
    assert!(matches!(
        proxy.invoke("cancel", Message::new(json!(1))),
        Err(Error::Invocation { .. })
    ));
}

#[test]
fn test_single_reference_wire_injects_proxy() {
    let runtime = Runtime::new(&["client", "provider"]);
    let reference = wire(
        PhysicalWireSource::Component {
            uri: "client".to_string(),
            injectable: Injectable::reference("target"),
            multiplicity: Multiplicity::OneOne,
            collection: CollectionKind::List,
            key: None,
            order: None,
        },
        to_component("provider"),
        false,
    );

    runtime.connector.attach(&reference).unwrap();
    let client = runtime.components.require("client").unwrap();
    let reply = client
        .invoke("service", "place", Message::new(json!("order-1")))
        .unwrap();
    assert_eq!(reply.body["component"], json!("provider"));
    assert_eq!(reply.body["body"], json!("order-1"));

    runtime.connector.detach(&reference).unwrap();
    assert!(client.component.site(&Injectable::reference("target")).is_none());
}

#[test]
fn test_multiplicity_wires_accumulate() {
    let runtime = Runtime::new(&["client", "p1", "p2"]);
    let multiplicity_wire = |target: &str, order| {
        wire(
            PhysicalWireSource::Component {
                uri: "client".to_string(),
                injectable: Injectable::reference("targets"),
                multiplicity: Multiplicity::ZeroN,
                collection: CollectionKind::List,
                key: None,
                order: Some(order),
            },
            to_component(target),
            true,
        )
    };

    runtime.connector.attach(&multiplicity_wire("p2", 2)).unwrap();
    runtime.connector.attach(&multiplicity_wire("p1", 1)).unwrap();

    let client = runtime.components.require("client").unwrap();
    let reply = client
        .invoke("service", "place", Message::new(json!(0)))
        .unwrap();
    let answered: Vec<&Value> = reply
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| &r["component"])
        .collect();
    assert_eq!(answered, [&json!("p1"), &json!("p2")]);

    runtime.connector.detach(&multiplicity_wire("p1", 1)).unwrap();
    let remaining = client
        .component
        .site(&Injectable::reference("targets"))
        .unwrap();
    assert_eq!(remaining.len(), 1);
}

#[test]
fn test_local_binding_exposes_and_forwards() {
    let runtime = Runtime::new(&["provider"]);
    let service = wire(
        PhysicalWireSource::Binding {
            uri: "provider#service".to_string(),
            binding_type: "local".to_string(),
            config: local_config("wire-tests/quotes"),
        },
        to_component("provider"),
        false,
    );
    runtime.connector.attach(&service).unwrap();
    assert!(local_endpoint("wire-tests/quotes").is_some());

    let reference = wire(
        PhysicalWireSource::Unmanaged {
            uri: "outside#quotes".to_string(),
        },
        PhysicalWireTarget::Binding {
            uri: "outside#quotes".to_string(),
            binding_type: "local".to_string(),
            config: local_config("wire-tests/quotes"),
        },
        false,
    );
    let proxy = runtime.connector.connect(&reference).unwrap();
    let reply = proxy.invoke("place", Message::new(json!("q"))).unwrap();
    assert_eq!(reply.body["component"], json!("provider"));

    // exposing the same endpoint twice is an error
    assert!(runtime.connector.attach(&service).is_err());

    runtime.connector.detach(&service).unwrap();
    assert!(local_endpoint("wire-tests/quotes").is_none());
    assert!(proxy.invoke("place", Message::new(json!("q"))).is_err());
}

#[test]
fn test_configured_interceptors_resolve_from_registry() {
    let runtime = Runtime::new(&["provider"]);
    let mut traced = json_operation();
    traced.interceptors.push(PhysicalInterceptor::new("trace"));
    let mut unmanaged = wire(
        PhysicalWireSource::Unmanaged {
            uri: "outside#orders".to_string(),
        },
        to_component("provider"),
        false,
    );
    unmanaged.operations = vec![traced.clone()];

    let proxy = runtime.connector.connect(&unmanaged).unwrap();
    assert!(proxy.invoke("place", Message::new(json!(1))).is_ok());

    traced.interceptors = vec![PhysicalInterceptor::new("unknown-interceptor")];
    unmanaged.operations = vec![traced];
    assert!(runtime.connector.connect(&unmanaged).is_err());
}

#[test]
fn test_unknown_binding_type() {
    let attachers = BindingAttachers::new();
    let err = attachers.resolve("carrier-pigeon").err().unwrap();
    assert!(err.to_string().contains("carrier-pigeon"));
    assert!(attachers.resolve("local").is_ok());
}

#[test]
fn test_attachers_catalog_binding_types() {
    let attachers = BindingAttachers::new();
    assert!(attachers.supports_wire_binding("local"));
    assert!(attachers.supports_channel_binding("local"));
    assert!(!attachers.supports_wire_binding("carrier-pigeon"));

    attachers.register("carrier-pigeon", Arc::new(LocalBindingAttacher));
    assert!(attachers.supports_wire_binding("carrier-pigeon"));
    assert!(!attachers.supports_channel_binding("carrier-pigeon"));
}
