//! Physical generation
//!
//! Generators read the logical model and emit physical definitions wrapped
//! in commands. They never mutate the model.

pub mod channel;
pub mod component;
pub mod connection;
pub mod consumer;
pub mod deployment;
pub mod producer;
pub mod reference;
pub mod service;
pub mod wire;

pub use channel::{ChannelGenerator, lookup_channels};
pub use component::ComponentGenerator;
pub use connection::ConnectionGenerator;
pub use consumer::ConsumerCommandGenerator;
pub use deployment::Generator;
pub use producer::ProducerCommandGenerator;
pub use reference::ReferenceCommandGenerator;
pub use service::ServiceCommandGenerator;
pub use wire::PhysicalWireGenerator;
