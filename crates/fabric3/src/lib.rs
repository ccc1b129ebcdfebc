//! # Fabric3
//!
//! A service component assembly runtime. Components declare services,
//! references, properties, producers and consumers; composites group them
//! into deployables; the domain instantiates, wires and provisions them
//! incrementally onto a runtime node.
//!
//! ## Example
//!
//! ```ignore
//! let runtime = fabric3::start(Some(Path::new("fabric3.toml")))?;
//! runtime.implementations().register("test", factory);
//! runtime.domain().include(&composite)?;
//! let orders = runtime.resolver().resolve(&contract)?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - assembly definitions, logical and physical models, errors and ports
//! - `application` - instantiation, autowiring, generation and the `Domain` use case
//! - `infrastructure` - scope containers, wires, channels, monitoring, config and logging

use std::path::Path;

use infrastructure::config::ConfigLoader;
use infrastructure::logging::init_logging;
use tracing::info;

/// Domain layer - definitions, models, errors and port traits
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use fabric3_domain::*;
}

/// Application layer - deployment pipeline and extension registries
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use fabric3_application::*;
}

/// Infrastructure layer - runtime node, config and observability
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use fabric3_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::{DataType, Error, Event, Message, Operation, QName, Result, ServiceContract};

// Re-export the runtime entry point at the crate root
pub use infrastructure::{RuntimeContext, init_runtime};

// Re-export the deployment use cases
pub use application::{Domain, ServiceResolver};

/// Start a runtime node
///
/// Loads configuration from `config_path` (or the default locations),
/// installs the global subscriber and wires the runtime.
pub fn start(config_path: Option<&Path>) -> Result<RuntimeContext> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    let config = loader.load()?;
    init_logging(&config.logging)?;

    info!(
        runtime = %config.runtime.name,
        autowire = config.runtime.autowire,
        async_fan_out = config.channels.async_fan_out,
        "Starting Fabric3 runtime"
    );
    let runtime = init_runtime(config)?;
    info!("Runtime initialized successfully");
    Ok(runtime)
}
