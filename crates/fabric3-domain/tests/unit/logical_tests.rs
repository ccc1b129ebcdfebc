//! Unit tests for the logical model

use fabric3_domain::logical::{LogicalComponent, LogicalModel, LogicalReference, LogicalWire};
use fabric3_domain::model::{
    Autowire, BindingDefinition, ComponentDefinition, ComponentReference, ComponentType,
    Implementation, Multiplicity, ReferenceDefinition,
};
use fabric3_domain::{QName, ServiceContract};

fn contract() -> ServiceContract {
    ServiceContract::new("OrderService", Vec::new())
}

#[test]
fn test_root_autowire_defaults() {
    assert_eq!(LogicalModel::default().root().autowire, Autowire::On);
    assert_eq!(LogicalModel::new(Autowire::Inherited).root().autowire, Autowire::Off);
    assert_eq!(LogicalModel::new(Autowire::Off).root_uri(), "domain");
}

#[test]
fn test_reference_bindings_prefer_component_definition() {
    let definition = ReferenceDefinition::new("orders", contract())
        .with_binding(BindingDefinition::new("type-level", "ws"));
    let configured = ComponentReference::bound(BindingDefinition::new("definition-level", "jms"));

    let reference = LogicalReference::new("domain/a#orders", definition.clone(), Some(configured));
    assert_eq!(reference.bindings.len(), 1);
    assert_eq!(reference.bindings[0].definition.name, "definition-level");

    let defaulted = LogicalReference::new("domain/a#orders", definition, None);
    assert_eq!(defaulted.bindings[0].definition.name, "type-level");
}

#[test]
fn test_reference_multiplicity_override() {
    let definition = ReferenceDefinition::new("orders", contract());
    let configured = ComponentReference {
        multiplicity: Some(Multiplicity::ZeroN),
        ..Default::default()
    };
    let reference = LogicalReference::new("domain/a#orders", definition, Some(configured));
    assert!(reference.is_multiplicity());
    assert!(!reference.is_required());
}

#[test]
fn test_reference_targets_fall_back_to_component_type() {
    let definition = ReferenceDefinition::new("orders", contract()).with_target("b");
    let reference = LogicalReference::new("domain/a#orders", definition, None);
    assert_eq!(reference.targets(), ["b".to_string()]);
}

#[test]
fn test_wires_are_stored_on_parent_composite() {
    let mut model = LogicalModel::default();
    let definition = ComponentDefinition::new(
        "a",
        Implementation::atomic(
            "mock",
            ComponentType::new().with_reference(ReferenceDefinition::new("orders", contract())),
        ),
    );
    let mut component = LogicalComponent::new(
        "domain/a",
        Some("domain".to_string()),
        definition,
        QName::local("app"),
    );
    component.references.push(LogicalReference::new(
        "domain/a#orders",
        ReferenceDefinition::new("orders", contract()),
        None,
    ));
    assert!(model.add_component(component));

    let wire = LogicalWire::new("domain/a#orders", "domain/b#svc", QName::local("app"), true);
    assert!(model.add_wire(wire));

    assert_eq!(model.wire_owner("domain/a#orders").as_deref(), Some("domain"));
    assert_eq!(model.wires_of("domain/a#orders").len(), 1);
    assert!(model.reference("domain/a#orders").is_some());
    assert_eq!(model.root().composite.as_ref().map(|c| c.wires.len()), Some(1));
}

#[test]
fn test_descendants_are_parent_first() {
    let mut model = LogicalModel::default();
    let nested = ComponentDefinition::new(
        "outer",
        Implementation::Composite(Box::new(fabric3_domain::model::Composite::new(QName::local(
            "outer",
        )))),
    );
    model.add_component(LogicalComponent::new(
        "domain/outer",
        Some("domain".to_string()),
        nested,
        QName::local("app"),
    ));
    let inner = ComponentDefinition::new(
        "inner",
        Implementation::atomic("mock", ComponentType::new()),
    );
    model.add_component(LogicalComponent::new(
        "domain/outer/inner",
        Some("domain/outer".to_string()),
        inner,
        QName::local("app"),
    ));

    assert_eq!(
        model.descendants("domain/outer"),
        vec!["domain/outer".to_string(), "domain/outer/inner".to_string()]
    );
    model.remove_component("domain/outer");
    assert!(!model.contains("domain/outer/inner"));
}
