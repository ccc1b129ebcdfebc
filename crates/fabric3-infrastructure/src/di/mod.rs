//! Composition root
//!
//! Wires the runtime node together from [`AppConfig`](crate::config::AppConfig).

pub mod bootstrap;

pub use bootstrap::{RuntimeContext, init_runtime};
