//! Data transformation
//!
//! The runtime transformer registry plus the built-in JSON and string
//! transformer factories, registered through the
//! [`TRANSFORMER_FACTORIES`](fabric3_application::ports::registry::TRANSFORMER_FACTORIES)
//! slice.

pub mod json;
pub mod registry;

pub use json::{JsonToStringFactory, StringToJsonFactory};
pub use registry::DefaultTransformerRegistry;
