//! Value Objects
//!
//! Immutable values shared by the definition, logical and physical models.

pub mod contract;
pub mod message;
pub mod qname;
pub mod uri;

pub use contract::{DataType, Operation, ServiceContract};
pub use message::{Event, Message};
pub use qname::QName;
