//! Domain deployment tests

use std::sync::Arc;

use fabric3_domain::{AssemblyFailure, Error};
use fabric3_domain::logical::LogicalState;
use fabric3_domain::model::{
    BindingDefinition, ChannelDefinition, CompositeBuilder, Multiplicity, ReferenceDefinition,
};
use fabric3_domain::physical::Command;

use crate::fixtures::{
    RecordingExecutor, client, contract, deployable, domain, kinds, listener, provider,
};

#[test]
fn test_include_provisions_every_node() {
    let executor = Arc::new(RecordingExecutor::default());
    let domain = domain(executor.clone());
    let composite = CompositeBuilder::new(deployable("app"))
        .channel(ChannelDefinition::new("orders"))
        .component(listener("l", &["orders"]))
        .component(client("a", ReferenceDefinition::new("target", contract("Orders"))).build())
        .component(provider("p", "Orders").build())
        .build();

    domain.include(&composite).unwrap();

    assert_eq!(executor.batches().len(), 1);
    domain
        .with_model(|model| {
            assert!(model.components().all(|c| c.state == LogicalState::Provisioned));
            assert!(model.wires().all(|w| w.state == LogicalState::Provisioned));
            assert!(model.channels().all(|c| c.state == LogicalState::Provisioned));
        })
        .unwrap();
    assert_eq!(domain.deployables().unwrap(), [deployable("app")]);
}

#[test]
fn test_include_with_assembly_errors_executes_nothing() {
    let executor = Arc::new(RecordingExecutor::default());
    let domain = domain(executor.clone());
    let composite = CompositeBuilder::new(deployable("app"))
        .component(provider("p", "Orders").build())
        .component(client("a", ReferenceDefinition::new("target", contract("Missing"))).build())
        .build();

    let result = domain.include(&composite);
    assert!(matches!(result, Err(Error::Assembly { ref failures }) if failures.len() == 1));
    assert!(executor.batches().is_empty());
    domain
        .with_model(|model| assert!(model.children_uris(model.root_uri()).is_empty()))
        .unwrap();
}

#[test]
fn test_execution_failure_rolls_back_model() {
    let executor = Arc::new(RecordingExecutor::failing());
    let domain = domain(executor.clone());
    let composite = CompositeBuilder::new(deployable("app"))
        .component(provider("p", "Orders").build())
        .build();

    assert!(matches!(domain.include(&composite), Err(Error::Builder { .. })));
    assert_eq!(executor.batches().len(), 1);
    assert!(domain.deployables().unwrap().is_empty());
}

#[test]
fn test_undeploy_leaves_no_wires_or_channels() {
    let executor = Arc::new(RecordingExecutor::default());
    let domain = domain(executor.clone());
    let composite = CompositeBuilder::new(deployable("app"))
        .channel(ChannelDefinition::new("orders"))
        .component(listener("l", &["orders"]))
        .component(client("a", ReferenceDefinition::new("target", contract("Orders"))).build())
        .component(provider("p", "Orders").build())
        .build();
    domain.include(&composite).unwrap();

    domain.undeploy(&deployable("app")).unwrap();

    let teardown = executor.last();
    assert_eq!(
        kinds(&teardown),
        [
            "detach-channel-connection",
            "detach-wire",
            "dispose-channel",
            "dispose-channel",
            "stop-context",
            "dispose-component",
            "dispose-component",
            "dispose-component",
        ]
    );
    domain
        .with_model(|model| {
            assert!(model.children_uris(model.root_uri()).is_empty());
            assert_eq!(model.wires().count(), 0);
            assert_eq!(model.channels().count(), 0);
        })
        .unwrap();
}

#[test]
fn test_undeploy_unknown_deployable() {
    let domain = domain(Arc::new(RecordingExecutor::default()));
    assert!(matches!(
        domain.undeploy(&deployable("missing")),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn test_redeploy_reinjects_multiplicity_clients() {
    let executor = Arc::new(RecordingExecutor::default());
    let domain = domain(executor.clone());
    let reference =
        ReferenceDefinition::new("target", contract("Orders")).with_multiplicity(Multiplicity::ZeroN);
    let clients = CompositeBuilder::new(deployable("clients"))
        .component(client("a", reference).build())
        .build();
    domain.include(&clients).unwrap();

    let providers = CompositeBuilder::new(deployable("providers"))
        .component(provider("p", "Orders").build())
        .build();
    domain.include(&providers).unwrap();

    let deploy = executor.last();
    assert_eq!(
        kinds(&deploy),
        ["build-component", "attach-wire", "start-context", "reinject"]
    );
    assert!(matches!(deploy.last(), Some(Command::Reinject(uris)) if uris == &["domain/a".to_string()]));

    domain.undeploy(&deployable("providers")).unwrap();
    let undeploy = executor.last();
    assert_eq!(
        kinds(&undeploy),
        ["detach-wire", "stop-context", "dispose-component", "reinject"]
    );
    domain
        .with_model(|model| {
            assert!(model.wires_of("domain/a#target").is_empty());
            assert!(!model.reference("domain/a#target").unwrap().resolved);
        })
        .unwrap();
}

#[test]
fn test_undeploy_channels_only_deployable() {
    let executor = Arc::new(RecordingExecutor::default());
    let domain = domain(executor.clone());
    let composite = CompositeBuilder::new(deployable("channels"))
        .channel(ChannelDefinition::new("orders"))
        .channel(ChannelDefinition::new("invoices"))
        .build();
    domain.include(&composite).unwrap();
    assert_eq!(domain.deployables().unwrap(), [deployable("channels")]);

    domain.undeploy(&deployable("channels")).unwrap();

    assert_eq!(kinds(&executor.last()), ["dispose-channel", "dispose-channel"]);
    domain
        .with_model(|model| assert_eq!(model.channels().count(), 0))
        .unwrap();
    assert!(domain.deployables().unwrap().is_empty());
}

#[test]
fn test_undeploy_refused_while_channel_has_foreign_consumers() {
    let executor = Arc::new(RecordingExecutor::default());
    let domain = domain(executor.clone());
    let owner = CompositeBuilder::new(deployable("owner"))
        .channel(ChannelDefinition::new("orders"))
        .component(provider("p", "Orders").build())
        .build();
    domain.include(&owner).unwrap();
    let consumers = CompositeBuilder::new(deployable("consumers"))
        .component(listener("l", &["orders"]))
        .build();
    domain.include(&consumers).unwrap();
    let executed = executor.batches().len();

    let refused = domain.undeploy(&deployable("owner"));
    assert!(
        matches!(refused, Err(Error::InvalidArgument { ref message }) if message.contains("domain/l"))
    );
    assert_eq!(executor.batches().len(), executed);
    domain
        .with_model(|model| {
            assert!(model.components().all(|c| c.state == LogicalState::Provisioned));
            assert!(model.channels().all(|c| c.state == LogicalState::Provisioned));
        })
        .unwrap();

    domain.undeploy(&deployable("consumers")).unwrap();
    domain.undeploy(&deployable("owner")).unwrap();
    domain
        .with_model(|model| {
            assert!(model.children_uris(model.root_uri()).is_empty());
            assert_eq!(model.channels().count(), 0);
        })
        .unwrap();
    assert!(domain.deployables().unwrap().is_empty());
}

#[test]
fn test_failed_undeploy_restores_model() {
    let executor = Arc::new(RecordingExecutor::failing_after(1));
    let domain = domain(executor.clone());
    let first = CompositeBuilder::new(deployable("a"))
        .component(provider("p", "Orders").build())
        .build();
    domain.include(&first).unwrap();

    assert!(matches!(
        domain.undeploy(&deployable("a")),
        Err(Error::Builder { .. })
    ));
    domain
        .with_model(|model| {
            assert_eq!(model.component("domain/p").unwrap().state, LogicalState::Provisioned);
        })
        .unwrap();
    assert_eq!(domain.deployables().unwrap(), [deployable("a")]);

    let second = CompositeBuilder::new(deployable("b"))
        .component(provider("q", "Invoices").build())
        .build();
    assert!(domain.include(&second).is_err());
    assert_eq!(kinds(&executor.last()), ["build-component", "start-context"]);
}

#[test]
fn test_include_rejects_unregistered_channel_binding() {
    let executor = Arc::new(RecordingExecutor::default());
    let domain = domain(executor.clone());
    let composite = CompositeBuilder::new(deployable("app"))
        .channel(ChannelDefinition::new("orders").with_binding(BindingDefinition::new("kafka", "kafka")))
        .build();

    let result = domain.include(&composite);
    let Err(Error::Assembly { failures }) = result else {
        panic!("expected assembly failure, got {result:?}");
    };
    assert_eq!(
        failures,
        [AssemblyFailure::BindingNotFound {
            bindable_uri: "domain/orders".to_string(),
            binding_type: "kafka".to_string(),
        }
        .to_string()]
    );
    assert!(executor.batches().is_empty());
    domain
        .with_model(|model| assert_eq!(model.channels().count(), 0))
        .unwrap();
}
