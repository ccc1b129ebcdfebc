//! Instantiation and autowire tests

use std::sync::Arc;

use fabric3_application::BindingCatalog;
use fabric3_application::instantiator::LogicalModelInstantiator;
use fabric3_domain::AssemblyFailure;
use fabric3_domain::logical::{LogicalModel, LogicalState};
use fabric3_domain::model::{
    Autowire, BindingDefinition, ChannelDefinition, ComponentDefinitionBuilder, ComponentReference,
    ComponentService, Composite, CompositeBuilder, Multiplicity, ReferenceDefinition,
};

use crate::fixtures::{client, contract, deployable, listener, matcher, provider};

fn include(model: &mut LogicalModel, composite: &Composite) -> Vec<AssemblyFailure> {
    LogicalModelInstantiator::new(matcher())
        .include(composite, model)
        .context
        .errors()
        .to_vec()
}

fn provisioned(model: &mut LogicalModel) {
    for uri in model.descendants(model.root_uri()) {
        if let Some(component) = model.component_mut(&uri) {
            component.state = LogicalState::Provisioned;
        }
    }
}

#[test]
fn test_unresolved_required_reference_reports_once() {
    let mut model = LogicalModel::default();
    let composite = CompositeBuilder::new(deployable("app"))
        .component(client("a", ReferenceDefinition::new("target", contract("Orders"))).build())
        .build();

    let failures = include(&mut model, &composite);
    assert_eq!(failures.len(), 1);
    match &failures[0] {
        AssemblyFailure::ReferenceNotFound { component_uri, reference_uri, .. } => {
            assert_eq!(component_uri, "domain/a");
            assert_eq!(reference_uri, "domain/a#target");
        }
        other => panic!("unexpected failure: {other}"),
    }
}

#[test]
fn test_optional_reference_may_stay_unwired() {
    let mut model = LogicalModel::default();
    let reference = ReferenceDefinition::new("target", contract("Orders"))
        .with_multiplicity(Multiplicity::ZeroOne);
    let composite = CompositeBuilder::new(deployable("app"))
        .component(client("a", reference).build())
        .build();

    assert!(include(&mut model, &composite).is_empty());
    assert!(!model.reference("domain/a#target").unwrap().resolved);
}

#[test]
fn test_autowire_single_reference_takes_first_match() {
    let mut model = LogicalModel::default();
    let composite = CompositeBuilder::new(deployable("app"))
        .component(client("a", ReferenceDefinition::new("target", contract("Orders"))).build())
        .component(provider("p1", "Orders").build())
        .component(provider("p2", "Orders").build())
        .build();

    assert!(include(&mut model, &composite).is_empty());
    let wires = model.wires_of("domain/a#target");
    assert_eq!(wires.len(), 1);
    assert_eq!(wires[0].target, "domain/p1#service");
    assert!(wires[0].autowired);
    assert!(model.reference("domain/a#target").unwrap().resolved);
}

#[test]
fn test_autowire_off_leaves_reference_unresolved() {
    let mut model = LogicalModel::default();
    let composite = CompositeBuilder::new(deployable("app"))
        .autowire(Autowire::Off)
        .component(client("a", ReferenceDefinition::new("target", contract("Orders"))).build())
        .component(provider("p1", "Orders").build())
        .build();

    let failures = include(&mut model, &composite);
    assert_eq!(failures.len(), 1);
    assert!(model.wires_of("domain/a#target").is_empty());
}

#[test]
fn test_multiplicity_wires_every_candidate_each_pass() {
    let mut model = LogicalModel::default();
    let reference =
        ReferenceDefinition::new("target", contract("Orders")).with_multiplicity(Multiplicity::ZeroN);
    let first = CompositeBuilder::new(deployable("clients"))
        .component(client("a", reference).build())
        .component(provider("p1", "Orders").build())
        .build();
    assert!(include(&mut model, &first).is_empty());
    assert_eq!(model.wires_of("domain/a#target").len(), 1);
    provisioned(&mut model);

    let second = CompositeBuilder::new(deployable("providers"))
        .component(provider("p2", "Orders").build())
        .component(provider("p3", "Orders").build())
        .build();
    assert!(include(&mut model, &second).is_empty());

    let targets: Vec<&str> = model
        .wires_of("domain/a#target")
        .iter()
        .map(|w| w.target.as_str())
        .collect();
    assert_eq!(
        targets,
        ["domain/p1#service", "domain/p2#service", "domain/p3#service"]
    );
    let added = &model.wires_of("domain/a#target")[1];
    assert_eq!(added.deployable, deployable("providers"));
}

#[test]
fn test_keyed_reference_skips_unkeyed_targets() {
    let mut model = LogicalModel::default();
    let reference = ReferenceDefinition::new("target", contract("Orders"))
        .with_multiplicity(Multiplicity::OneN)
        .keyed();
    let composite = CompositeBuilder::new(deployable("app"))
        .component(client("a", reference).build())
        .component(provider("plain", "Orders").build())
        .component(provider("eu", "Orders").key("eu").build())
        .build();

    assert!(include(&mut model, &composite).is_empty());
    let wires = model.wires_of("domain/a#target");
    assert_eq!(wires.len(), 1);
    assert_eq!(wires[0].target, "domain/eu#service");
}

#[test]
fn test_explicit_autowire_searches_enclosing_composite() {
    let mut model = LogicalModel::default();
    let inner = CompositeBuilder::new(deployable("inner"))
        .autowire(Autowire::Off)
        .component(
            client("a", ReferenceDefinition::new("target", contract("Orders")))
                .reference("target", ComponentReference::autowired())
                .build(),
        )
        .build();
    let composite = CompositeBuilder::new(deployable("app"))
        .component(ComponentDefinitionBuilder::composite("nested", inner).build())
        .component(provider("p1", "Orders").build())
        .build();

    assert!(include(&mut model, &composite).is_empty());
    let wires = model.wires_of("domain/nested/a#target");
    assert_eq!(wires.len(), 1);
    assert_eq!(wires[0].target, "domain/p1#service");
}

#[test]
fn test_explicit_target_wires_named_service() {
    let mut model = LogicalModel::default();
    let composite = CompositeBuilder::new(deployable("app"))
        .autowire(Autowire::Off)
        .component(
            client("a", ReferenceDefinition::new("target", contract("Orders")))
                .wire("target", ["p2/service"])
                .build(),
        )
        .component(provider("p1", "Orders").build())
        .component(provider("p2", "Orders").build())
        .build();

    assert!(include(&mut model, &composite).is_empty());
    let wires = model.wires_of("domain/a#target");
    assert_eq!(wires.len(), 1);
    assert_eq!(wires[0].target, "domain/p2#service");
    assert!(!wires[0].autowired);
}

#[test]
fn test_duplicate_component_reported() {
    let mut model = LogicalModel::default();
    let first = CompositeBuilder::new(deployable("one"))
        .component(provider("p1", "Orders").build())
        .build();
    let second = CompositeBuilder::new(deployable("two"))
        .component(provider("p1", "Orders").build())
        .build();
    assert!(include(&mut model, &first).is_empty());

    let failures = include(&mut model, &second);
    assert!(matches!(
        &failures[..],
        [AssemblyFailure::DuplicateComponent { component_uri, .. }] if component_uri == "domain/p1"
    ));
}

#[test]
fn test_duplicate_channel_reported() {
    let mut model = LogicalModel::default();
    let composite = CompositeBuilder::new(deployable("app"))
        .channel(ChannelDefinition::new("orders"))
        .channel(ChannelDefinition::new("orders"))
        .build();

    let failures = include(&mut model, &composite);
    assert!(matches!(&failures[..], [AssemblyFailure::DuplicateChannel { .. }]));
}

#[test]
fn test_rollback_removes_new_nodes() {
    let mut model = LogicalModel::default();
    let instantiator = LogicalModelInstantiator::new(matcher());
    let composite = CompositeBuilder::new(deployable("app"))
        .channel(ChannelDefinition::new("orders"))
        .component(listener("l", &["orders"]))
        .component(client("a", ReferenceDefinition::new("target", contract("Missing"))).build())
        .build();

    let outcome = instantiator.include(&composite, &mut model);
    assert!(outcome.context.has_errors());
    instantiator.rollback(&composite.name, &outcome.components, &mut model);

    assert!(model.children_uris("domain").is_empty());
    assert_eq!(model.channels().count(), 0);
    assert_eq!(model.wires().count(), 0);
}

#[test]
fn test_absolute_consumer_source_resolves_to_root_channel() {
    let mut model = LogicalModel::default();
    let inner = CompositeBuilder::new(deployable("inner"))
        .component(listener("l", &["domain://orders"]))
        .build();
    let composite = CompositeBuilder::new(deployable("app"))
        .component(ComponentDefinitionBuilder::composite("nested", inner).build())
        .build();

    assert!(include(&mut model, &composite).is_empty());
    let consumer = &model.component("domain/nested/l").unwrap().consumers[0];
    assert_eq!(consumer.sources, ["domain/orders".to_string()]);
}

/// Knows the `local` binding for wires and channels
struct LocalOnly;

impl BindingCatalog for LocalOnly {
    fn supports_wire_binding(&self, binding_type: &str) -> bool {
        binding_type == "local"
    }

    fn supports_channel_binding(&self, binding_type: &str) -> bool {
        binding_type == "local"
    }
}

#[test]
fn test_unknown_binding_types_reported_at_inclusion() {
    let mut model = LogicalModel::default();
    let jms = ComponentService {
        bindings: vec![BindingDefinition::new("jms", "jms")],
        ..Default::default()
    };
    let composite = CompositeBuilder::new(deployable("app"))
        .channel(ChannelDefinition::new("orders").with_binding(BindingDefinition::new("amqp", "amqp")))
        .channel(ChannelDefinition::new("audit").with_binding(BindingDefinition::new("local", "local")))
        .component(provider("p", "Orders").service("service", jms).build())
        .component(
            client("a", ReferenceDefinition::new("target", contract("Quotes")))
                .reference("target", ComponentReference::bound(BindingDefinition::new("local", "local")))
                .build(),
        )
        .build();

    let failures = LogicalModelInstantiator::new(matcher())
        .with_bindings(Arc::new(LocalOnly))
        .include(&composite, &mut model)
        .context
        .errors()
        .to_vec();

    assert_eq!(failures.len(), 2);
    assert!(failures.contains(&AssemblyFailure::BindingNotFound {
        bindable_uri: "domain/p#service".to_string(),
        binding_type: "jms".to_string(),
    }));
    assert!(failures.contains(&AssemblyFailure::BindingNotFound {
        bindable_uri: "domain/orders".to_string(),
        binding_type: "amqp".to_string(),
    }));
}
