//! Logical model
//!
//! In-memory graph of domain-wide assembly state. Instantiators build it,
//! the autowire resolver adds wires to it and generators read it to emit
//! physical definitions.

pub mod bindables;
pub mod channel;
pub mod component;
pub mod model;
pub mod state;
pub mod wire;

pub use bindables::{
    LogicalBinding, LogicalConsumer, LogicalProducer, LogicalReference, LogicalResourceReference,
    LogicalService,
};
pub use channel::LogicalChannel;
pub use component::{CompositeState, LogicalComponent};
pub use model::LogicalModel;
pub use state::LogicalState;
pub use wire::LogicalWire;
