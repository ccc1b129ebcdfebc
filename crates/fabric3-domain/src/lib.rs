//! # Domain Layer
//!
//! Assembly definitions, the logical model and the physical definitions that
//! flow between the deployment pipeline and a runtime node.
//!
//! ## Architecture
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`model`] | Composites, component definitions and component types |
//! | [`logical`] | The domain-wide logical model |
//! | [`physical`] | Serializable physical definitions and commands |
//! | [`ports`] | Contract matching, transformation and runtime seams |
//! | [`value_objects`] | Contracts, data types, messages and names |
//! | [`failure`] | Assembly failures collected during instantiation |
//! | [`error`] | Domain error type |

/// Domain layer constants
pub mod constants;
/// Error handling types
pub mod error;
/// Assembly failures and the instantiation context
pub mod failure;
/// Logical model
pub mod logical;
/// Assembly definitions
pub mod model;
/// Physical definitions and commands
pub mod physical;
/// Port interfaces
pub mod ports;
/// Value objects
pub mod value_objects;

pub use error::{Error, Result};
pub use failure::{AssemblyFailure, InstantiationContext};
pub use value_objects::{DataType, Event, Message, Operation, QName, ServiceContract};
