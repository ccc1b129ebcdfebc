//! Application Layer - Fabric3
//!
//! Turns composites into running deployments. The layer owns the logical
//! model pipeline and talks to the runtime node only through ports.
//!
//! ## Pipeline
//!
//! 1. `instantiator` - assembly definitions into logical components, channels and wires
//! 2. `domain_services` - contract matching and autowire resolution
//! 3. `generator` - logical model into ordered physical commands
//! 4. `use_cases` - the `Domain` and `ServiceResolver` driving the pipeline
//!
//! ## Ports
//!
//! - `ports::CommandExecutor` executes generated commands on a runtime node
//! - `ports::WireConnector` connects single wires outside a deployment
//! - `ports::registry` holds the `linkme` slices runtime extensions register into
//!
//! ## Dependencies
//!
//! This crate depends only on `fabric3-domain` and pure Rust libraries.

pub mod domain_services;
pub mod generator;
pub mod instantiator;
pub mod ports;
pub mod use_cases;

pub use domain_services::*;
pub use ports::*;
pub use use_cases::*;
