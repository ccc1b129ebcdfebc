//! Physical generation tests

use fabric3_application::generator::{
    ChannelGenerator, ConnectionGenerator, ConsumerCommandGenerator, Generator,
    PhysicalWireGenerator,
};
use fabric3_application::instantiator::LogicalModelInstantiator;
use fabric3_domain::Error;
use fabric3_domain::constants::TRANSFORMER_INTERCEPTOR;
use fabric3_domain::logical::{LogicalChannel, LogicalModel, LogicalState, LogicalWire};
use fabric3_domain::model::{
    ChannelDefinition, CompositeBuilder, Multiplicity, ReferenceDefinition,
};
use fabric3_domain::physical::{ChannelSide, Command, PhysicalWireSource};

use crate::fixtures::{client, contract, deployable, kinds, listener, matcher, provider};

fn consumers() -> ConsumerCommandGenerator {
    ConsumerCommandGenerator::new(ConnectionGenerator::new(), ChannelGenerator::new())
}

#[test]
fn test_missing_channel_then_build_and_attach() {
    let mut model = LogicalModel::default();
    let composite = CompositeBuilder::new(deployable("app"))
        .component(listener("l", &["orders"]))
        .build();
    let outcome = LogicalModelInstantiator::new(matcher()).include(&composite, &mut model);
    assert!(!outcome.context.has_errors());

    let component = model.component("domain/l").unwrap().clone();
    let result = consumers().generate(&component, &model);
    assert!(matches!(result, Err(Error::ChannelNotFound { ref uri }) if uri == "domain/orders"));

    model.add_channel(
        "domain",
        LogicalChannel::new("domain/orders", ChannelDefinition::new("orders"), deployable("app")),
    );
    let command = consumers().generate(&component, &model).unwrap().unwrap();
    assert_eq!(command.build_channels.len(), 1);
    assert_eq!(command.attach.len(), 1);
    assert!(command.detach.is_empty());
    assert_eq!(command.build_channels[0].side, ChannelSide::Collocated);
    assert_eq!(command.attach[0].channel_uri, "domain/orders");
}

#[test]
fn test_provisioned_consumer_generates_nothing() {
    let mut model = LogicalModel::default();
    let composite = CompositeBuilder::new(deployable("app"))
        .channel(ChannelDefinition::new("orders"))
        .component(listener("l", &["orders"]))
        .build();
    LogicalModelInstantiator::new(matcher()).include(&composite, &mut model);
    model.component_mut("domain/l").unwrap().state = LogicalState::Provisioned;

    let component = model.component("domain/l").unwrap();
    assert!(consumers().generate(component, &model).unwrap().is_none());
}

#[test]
fn test_deployment_pass_ordering() {
    let mut model = LogicalModel::default();
    let composite = CompositeBuilder::new(deployable("app"))
        .channel(ChannelDefinition::new("orders"))
        .component(listener("l", &["orders"]))
        .component(client("a", ReferenceDefinition::new("target", contract("Orders"))).build())
        .component(provider("p", "Orders").build())
        .build();
    LogicalModelInstantiator::new(matcher()).include(&composite, &mut model);

    let commands = Generator::new(PhysicalWireGenerator::new())
        .generate(&model)
        .unwrap();
    assert_eq!(
        kinds(&commands),
        [
            "build-component",
            "build-component",
            "build-component",
            "build-channel",
            "build-channel",
            "attach-channel-connection",
            "attach-wire",
            "start-context",
        ]
    );
    assert!(matches!(&commands[7], Command::StartContext(name) if *name == deployable("app")));
}

#[test]
fn test_marked_component_is_torn_down_in_reverse() {
    let mut model = LogicalModel::default();
    let composite = CompositeBuilder::new(deployable("app"))
        .component(client("a", ReferenceDefinition::new("target", contract("Orders"))).build())
        .component(provider("p", "Orders").build())
        .build();
    LogicalModelInstantiator::new(matcher()).include(&composite, &mut model);
    for uri in ["domain/a", "domain/p"] {
        model.component_mut(uri).unwrap().state = LogicalState::Marked;
    }
    for wire in model.wires_of_mut("domain/a#target").unwrap() {
        wire.state = LogicalState::Marked;
    }

    let commands = Generator::new(PhysicalWireGenerator::new())
        .generate(&model)
        .unwrap();
    assert_eq!(
        kinds(&commands),
        ["detach-wire", "stop-context", "dispose-component", "dispose-component"]
    );
    assert!(matches!(&commands[2], Command::DisposeComponent(c) if c.uri == "domain/p"));
}

#[test]
fn test_new_wire_on_provisioned_component_reinjects() {
    let mut model = LogicalModel::default();
    let reference =
        ReferenceDefinition::new("target", contract("Orders")).with_multiplicity(Multiplicity::ZeroN);
    let composite = CompositeBuilder::new(deployable("app"))
        .component(client("a", reference).build())
        .component(provider("p", "Orders").build())
        .build();
    LogicalModelInstantiator::new(matcher()).include(&composite, &mut model);
    for uri in ["domain/a", "domain/p"] {
        model.component_mut(uri).unwrap().state = LogicalState::Provisioned;
    }

    let commands = Generator::new(PhysicalWireGenerator::new())
        .generate(&model)
        .unwrap();
    assert_eq!(kinds(&commands), ["attach-wire", "reinject"]);
    assert!(matches!(&commands[1], Command::Reinject(uris) if uris == &["domain/a".to_string()]));
}

#[test]
fn test_wire_generation_rejects_dangling_target() {
    let mut model = LogicalModel::default();
    let composite = CompositeBuilder::new(deployable("app"))
        .component(client("a", ReferenceDefinition::new("target", contract("Orders"))).build())
        .build();
    LogicalModelInstantiator::new(matcher()).include(&composite, &mut model);
    let wire = LogicalWire::new("domain/a#target", "domain/gone#service", deployable("app"), false);

    let result = PhysicalWireGenerator::new().generate_wire(&wire, &model);
    assert!(matches!(result, Err(Error::Generation { .. })));
}

#[test]
fn test_wire_generation_adds_transformer_for_differing_types() {
    let mut model = LogicalModel::default();
    let mut source = contract("Orders");
    source.operations[0].input_types = vec![fabric3_domain::DataType::string("Orders.request")];
    let composite = CompositeBuilder::new(deployable("app"))
        .component(client("a", ReferenceDefinition::new("target", source)).wire("target", ["p"]).build())
        .component(provider("p", "Orders").build())
        .build();
    LogicalModelInstantiator::new(matcher()).include(&composite, &mut model);

    let wire = model.wires_of("domain/a#target")[0].clone();
    let physical = PhysicalWireGenerator::new()
        .with_interceptor("trace")
        .generate_wire(&wire, &model)
        .unwrap();
    let interceptors: Vec<&str> = physical.operations[0]
        .interceptors
        .iter()
        .map(|i| i.interceptor_type.as_str())
        .collect();
    assert_eq!(interceptors, ["trace", TRANSFORMER_INTERCEPTOR]);
    assert!(!physical.optimizable);
    assert!(matches!(
        physical.source,
        PhysicalWireSource::Component { ref uri, .. } if uri == "domain/a"
    ));
}
