//! Runtime-facing ports of the deployment pipeline

use std::sync::Arc;

use fabric3_domain::Result;
use fabric3_domain::physical::{Command, PhysicalWire};
use fabric3_domain::ports::Invoker;

/// Executes generated commands on a runtime node
pub trait CommandExecutor: Send + Sync {
    /// Execute commands in order
    ///
    /// Execution stops at the first failing command. Commands already
    /// executed are not compensated.
    fn execute(&self, commands: &[Command]) -> Result<()>;
}

/// Connects individual physical wires outside a deployment pass
pub trait WireConnector: Send + Sync {
    /// Build the wire's invocation chains and return the source-side proxy
    fn connect(&self, wire: &PhysicalWire) -> Result<Arc<dyn Invoker>>;

    /// Tear down a connected wire
    fn disconnect(&self, wire: &PhysicalWire) -> Result<()>;
}
