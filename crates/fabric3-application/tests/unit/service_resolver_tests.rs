//! Service resolver tests

use std::sync::{Arc, Mutex};

use fabric3_application::generator::PhysicalWireGenerator;
use fabric3_application::{ServiceResolver, WireConnector};
use fabric3_domain::model::CompositeBuilder;
use fabric3_domain::physical::{PhysicalWire, PhysicalWireSource, PhysicalWireTarget};
use fabric3_domain::ports::Invoker;
use fabric3_domain::{Error, Message, Result};
use serde_json::json;

use crate::fixtures::{RecordingExecutor, contract, deployable, domain, matcher, provider};

struct Echo;

impl Invoker for Echo {
    fn invoke(&self, _operation: &str, message: Message) -> Result<Message> {
        Ok(message)
    }
}

#[derive(Default)]
struct RecordingConnector {
    wires: Mutex<Vec<PhysicalWire>>,
}

impl WireConnector for RecordingConnector {
    fn connect(&self, wire: &PhysicalWire) -> Result<Arc<dyn Invoker>> {
        self.wires.lock().unwrap().push(wire.clone());
        Ok(Arc::new(Echo))
    }

    fn disconnect(&self, _wire: &PhysicalWire) -> Result<()> {
        Ok(())
    }
}

fn resolver(connector: Arc<RecordingConnector>) -> ServiceResolver {
    let domain = Arc::new(domain(Arc::new(RecordingExecutor::default())));
    domain
        .include(
            &CompositeBuilder::new(deployable("app"))
                .component(provider("p", "Orders").build())
                .build(),
        )
        .unwrap();
    ServiceResolver::new(domain, matcher(), PhysicalWireGenerator::new(), connector)
}

#[test]
fn test_resolve_connects_unmanaged_wire() {
    let connector = Arc::new(RecordingConnector::default());
    let resolver = resolver(connector.clone());

    let proxy = resolver.resolve(&contract("Orders")).unwrap();
    let reply = proxy.invoke("place", Message::new(json!({"id": 7}))).unwrap();
    assert_eq!(reply.body["id"], 7);

    let wires = connector.wires.lock().unwrap();
    assert_eq!(wires.len(), 1);
    assert!(matches!(
        &wires[0].source,
        PhysicalWireSource::Unmanaged { uri } if uri.starts_with("domain#resolved-")
    ));
    assert!(matches!(
        &wires[0].target,
        PhysicalWireTarget::Component { uri, service } if uri == "domain/p" && service == "service"
    ));
}

#[test]
fn test_resolve_unknown_contract() {
    let connector = Arc::new(RecordingConnector::default());
    let resolver = resolver(connector.clone());

    let result = resolver.resolve(&contract("Billing"));
    assert!(matches!(result, Err(Error::NotFound { ref resource }) if resource.contains("Billing")));
    assert!(connector.wires.lock().unwrap().is_empty());
}
