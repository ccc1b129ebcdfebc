//! Use Cases
//!
//! Application services orchestrating instantiation, generation and
//! execution against a runtime.

pub mod domain;
pub mod service_resolver;

pub use domain::Domain;
pub use service_resolver::ServiceResolver;
