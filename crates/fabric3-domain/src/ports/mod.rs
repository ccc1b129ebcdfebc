//! Domain Port Interfaces
//!
//! Boundary contracts implemented by the application and infrastructure
//! layers.
//!
//! - **matcher** - contract assignability used by autowire resolution
//! - **transform** - data type conversion resolved at wire-build time
//! - **runtime** - invocation, injection and eventing seams of live components

/// Contract matching
pub mod matcher;
/// Runtime invocation and injection
pub mod runtime;
/// Data transformation
pub mod transform;

pub use matcher::{ContractMatcher, MatchResult};
pub use runtime::{
    ComponentImplementation, EventHandler, EventPublisher, ImplementationFactory, Injected,
    Interceptor, Invoker,
};
pub use transform::{SingleTypeTransformer, Transformer, TransformerFactory, TransformerRegistry};
