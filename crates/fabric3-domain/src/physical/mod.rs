//! Physical definitions
//!
//! Serializable snapshots of resolved logical state. Builders on a runtime
//! work from these alone and never assume shared identity with the
//! generating side.

pub mod channel;
pub mod command;
pub mod component;
pub mod injectable;
pub mod wire;

pub use channel::{
    ChannelSide, ConnectionDirection, ConnectionEnd, PhysicalChannel, PhysicalChannelBinding,
    PhysicalChannelConnection,
};
pub use command::{ChannelConnectionCommand, Command, ConnectionCommand};
pub use component::{PhysicalComponent, PhysicalResource};
pub use injectable::{Injectable, InjectableKind};
pub use wire::{
    PhysicalInterceptor, PhysicalOperation, PhysicalWire, PhysicalWireSource, PhysicalWireTarget,
};
