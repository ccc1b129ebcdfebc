//! Unit tests for domain error types

use fabric3_domain::Error;

#[test]
fn test_channel_not_found_error() {
    let error = Error::channel_not_found("domain/channel");
    match &error {
        Error::ChannelNotFound { uri } => assert_eq!(uri, "domain/channel"),
        _ => panic!("Expected ChannelNotFound error"),
    }
    assert!(error.to_string().contains("domain/channel"));
}

#[test]
fn test_builder_error() {
    let error = Error::builder("Unknown binding type: zmq");
    match error {
        Error::Builder { message } => assert_eq!(message, "Unknown binding type: zmq"),
        _ => panic!("Expected Builder error"),
    }
}

#[test]
fn test_assembly_error_lists_failures() {
    let error = Error::assembly(vec!["first".to_string(), "second".to_string()]);
    let display = error.to_string();
    assert!(display.contains("2 error(s)"));
    assert!(display.contains("first; second"));
}

#[test]
fn test_reinjection_error_lists_failures() {
    let error = Error::Reinjection {
        failures: vec!["site a".to_string()],
    };
    assert!(error.to_string().contains("1 site(s)"));
}

#[test]
fn test_invocation_error() {
    let error = Error::invocation("place", "boom");
    match error {
        Error::Invocation { operation, message } => {
            assert_eq!(operation, "place");
            assert_eq!(message, "boom");
        }
        _ => panic!("Expected Invocation error"),
    }
}

#[test]
fn test_json_error_conversion() {
    let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
    let error: Error = parse.unwrap_err().into();
    assert!(matches!(error, Error::Json { .. }));
}

#[test]
fn test_configuration_error_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error = Error::configuration_with_source("cannot read fabric3.toml", io);
    assert!(std::error::Error::source(&error).is_some());
}
