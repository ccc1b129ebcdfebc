//! Unit tests for assembly failures

use fabric3_domain::{AssemblyFailure, Error, InstantiationContext};

fn reference_not_found() -> AssemblyFailure {
    AssemblyFailure::ReferenceNotFound {
        message: "Unable to resolve reference domain/a#ref".to_string(),
        reference_uri: "domain/a#ref".to_string(),
        component_uri: "domain/a".to_string(),
        contribution_uri: None,
    }
}

#[test]
fn test_context_accumulates_errors() {
    let mut context = InstantiationContext::new();
    assert!(!context.has_errors());

    context.add_error(reference_not_found());
    context.add_error(AssemblyFailure::DuplicateChannel {
        channel_uri: "domain/c".to_string(),
    });

    assert!(context.has_errors());
    assert_eq!(context.errors().len(), 2);
    assert_eq!(context.errors()[0].subject_uri(), "domain/a");
}

#[test]
fn test_into_result_converts_to_assembly_error() {
    let mut context = InstantiationContext::new();
    context.add_error(reference_not_found());

    match context.into_result() {
        Err(Error::Assembly { failures }) => {
            assert_eq!(failures, vec!["Unable to resolve reference domain/a#ref"]);
        }
        other => panic!("Expected Assembly error, got {other:?}"),
    }
}

#[test]
fn test_empty_context_is_ok() {
    assert!(InstantiationContext::new().into_result().is_ok());
}

#[test]
fn test_failure_display() {
    let failure = AssemblyFailure::PropertyNotFound {
        property: "rate".to_string(),
        component_uri: "domain/a".to_string(),
    };
    assert_eq!(
        failure.to_string(),
        "Required property rate not set on component domain/a"
    );
}
