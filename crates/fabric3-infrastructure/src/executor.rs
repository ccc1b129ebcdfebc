//! Runtime command executor
//!
//! Executes generated deployment commands against the containers, channels
//! and wires of this runtime node.

use std::sync::Arc;

use fabric3_application::ports::CommandExecutor;
use fabric3_domain::physical::{Command, Injectable, PhysicalComponent};
use fabric3_domain::{Error, QName, Result};
use tracing::{debug, info};

use crate::channel::{ChannelBuilder, ChannelConnector};
use crate::container::{
    ComponentManager, ImplementationRegistry, ManagedComponent, ResourceRegistry, ScopeRegistry,
    ScopedComponent,
};
use crate::injection::InjectionSite;
use crate::wire::RuntimeWireConnector;

/// Executes commands on this runtime node
///
/// Multiplicity changes made by a batch are buffered and published before
/// the first context starts or reinjection runs, so instances always see a
/// complete set of targets.
pub struct RuntimeExecutor {
    components: Arc<ComponentManager>,
    scopes: ScopeRegistry,
    implementations: Arc<ImplementationRegistry>,
    resources: Arc<ResourceRegistry>,
    channels: ChannelBuilder,
    connections: ChannelConnector,
    wires: Arc<RuntimeWireConnector>,
}

impl RuntimeExecutor {
    /// Create an executor
    pub fn new(
        components: Arc<ComponentManager>,
        scopes: ScopeRegistry,
        implementations: Arc<ImplementationRegistry>,
        resources: Arc<ResourceRegistry>,
        channels: ChannelBuilder,
        connections: ChannelConnector,
        wires: Arc<RuntimeWireConnector>,
    ) -> Self {
        Self {
            components,
            scopes,
            implementations,
            resources,
            channels,
            connections,
            wires,
        }
    }

    fn execute_one(&self, command: &Command) -> Result<()> {
        match command {
            Command::BuildComponent(definition) => self.build_component(definition),
            Command::DisposeComponent(definition) => self.dispose_component(definition),
            Command::BuildChannel(definition) => self.channels.build(definition),
            Command::DisposeChannel(definition) => self.channels.dispose(definition),
            Command::AttachWire(wire) => self.wires.attach(wire),
            Command::DetachWire(wire) => self.wires.detach(wire),
            Command::AttachChannelConnection(connection) => self.connections.attach(connection),
            Command::DetachChannelConnection(connection) => self.connections.detach(connection),
            Command::StartContext(deployable) => self.start_context(deployable),
            Command::StopContext(deployable) => self.stop_context(deployable),
            Command::Reinject(uris) => self.reinject(uris),
        }
    }

    fn build_component(&self, definition: &PhysicalComponent) -> Result<()> {
        let factory = self.implementations.resolve(&definition.implementation)?;
        let component = Arc::new(ScopedComponent::new(definition.clone(), factory));
        for resource in &definition.resources {
            if let Some(value) = self.resources.resolve(&definition.uri, resource)? {
                component.set_site(Injectable::resource(&resource.name), InjectionSite::value(value));
            }
        }
        // sites set while building are part of the first injection, not a reinjection
        component.take_changes();

        let container = self.scopes.get(definition.scope);
        self.components.register(ManagedComponent {
            component: Arc::clone(&component),
            container: Arc::clone(&container),
        })?;
        container.register(component);
        debug!(component = %definition.uri, scope = ?definition.scope, "Component built");
        Ok(())
    }

    fn dispose_component(&self, definition: &PhysicalComponent) -> Result<()> {
        match self.components.unregister(&definition.uri) {
            Some(managed) => {
                managed.container.unregister(&definition.uri)?;
                debug!(component = %definition.uri, "Component disposed");
            }
            None => debug!(component = %definition.uri, "Dispose requested for unknown component"),
        }
        Ok(())
    }

    fn start_context(&self, deployable: &QName) -> Result<()> {
        for container in self.scopes.all() {
            container.start_context(deployable)?;
        }
        info!(deployable = %deployable, "Context started");
        Ok(())
    }

    fn stop_context(&self, deployable: &QName) -> Result<()> {
        for container in self.scopes.all() {
            container.stop_context(deployable)?;
        }
        info!(deployable = %deployable, "Context stopped");
        Ok(())
    }

    fn reinject(&self, uris: &[String]) -> Result<()> {
        let mut failures = Vec::new();
        for uri in uris {
            let Some(managed) = self.components.get(uri) else {
                continue;
            };
            match managed.container.reinject_component(&managed.component) {
                Err(Error::Reinjection { failures: more }) => failures.extend(more),
                Err(other) => failures.push(format!("{uri}: {other}")),
                Ok(()) => {}
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Reinjection { failures })
        }
    }
}

impl CommandExecutor for RuntimeExecutor {
    fn execute(&self, commands: &[Command]) -> Result<()> {
        self.components.start_updates();
        let mut published = false;
        let result = commands.iter().try_for_each(|command| {
            if !published && matches!(command, Command::StartContext(_) | Command::Reinject(_)) {
                self.components.end_updates();
                published = true;
            }
            debug!(command = command.kind(), "Executing");
            self.execute_one(command)
        });
        // publish even after a failure so no supplier is left mid-update
        self.components.end_updates();
        result
    }
}
