//! Application ports
//!
//! - **executor** - seams towards the runtime node executing generated commands
//! - **registry** - `linkme` registries for runtime extensions

/// Command execution and wire connection ports
pub mod executor;
/// Extension registries
pub mod registry;

pub use executor::{CommandExecutor, WireConnector};
pub use registry::{BindingCatalog, RegisteredBindings};
