//! Wires
//!
//! Attaching a physical wire builds one [`InvocationChain`] per operation,
//! terminated by an invoker dispatching into the target component or a
//! binding transport, and hands a [`WireProxy`] to the source.

pub mod binding;
pub mod chain;
pub mod connector;
pub mod interceptors;
pub mod local;
pub mod proxy;
pub mod target;

pub use binding::BindingAttachers;
pub use chain::InvocationChain;
pub use connector::RuntimeWireConnector;
pub use interceptors::{TraceInterceptor, TransformInterceptor};
pub use local::{LocalBindingAttacher, local_endpoint};
pub use proxy::WireProxy;
pub use target::ComponentTargetInvoker;
