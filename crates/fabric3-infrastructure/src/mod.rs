// Clippy allows for registry and container code
#![allow(clippy::module_name_repetitions)]

//! # Infrastructure Layer
//!
//! The runtime node: executes the commands the application layer generates
//! and hosts the component instances, wires and channels they describe.
//!
//! ## Module Categories
//!
//! ### Runtime
//! | Module | Description |
//! |--------|-------------|
//! | [`executor`] | Command execution against the local runtime |
//! | [`container`] | Scoped components, scope containers and registries |
//! | [`injection`] | Injection sites and multiplicity suppliers |
//!
//! ### Communication
//! | Module | Description |
//! |--------|-------------|
//! | [`wire`] | Invocation chains, proxies, interceptors and binding attachers |
//! | [`channel`] | Event channels, fan-out and channel connections |
//! | [`transform`] | Transformer registry and JSON transformers |
//!
//! ### Configuration & DI
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML configuration with environment overrides |
//! | [`di`] | Runtime bootstrap |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`monitor`] | Ring-buffer monitor event routing |

pub mod channel;
pub mod config;
pub mod constants;
pub mod container;
pub mod di;
pub mod error_ext;
pub mod executor;
pub mod injection;
pub mod logging;
pub mod monitor;
pub mod transform;
pub mod wire;

// Re-export commonly used types
pub use di::{RuntimeContext, init_runtime};
pub use error_ext::ErrorContext;
