//! Deployment generation
//!
//! Walks the whole logical model and orders the commands of one pass:
//! components are built before channels, everything is attached before
//! contexts start, and teardown runs in the reverse order.

use std::collections::BTreeSet;

use fabric3_domain::Result;
use fabric3_domain::logical::{LogicalModel, LogicalState};
use fabric3_domain::physical::{ChannelConnectionCommand, Command, ConnectionCommand};

use super::channel::ChannelGenerator;
use super::component::ComponentGenerator;
use super::connection::ConnectionGenerator;
use super::consumer::ConsumerCommandGenerator;
use super::producer::ProducerCommandGenerator;
use super::reference::ReferenceCommandGenerator;
use super::service::ServiceCommandGenerator;
use super::wire::PhysicalWireGenerator;

#[derive(Default)]
struct Pass {
    build_components: Vec<Command>,
    build_channels: Vec<Command>,
    attach: Vec<Command>,
    start_contexts: Vec<Command>,
    detach: Vec<Command>,
    dispose_channels: Vec<Command>,
    stop_contexts: Vec<Command>,
    dispose_components: Vec<Command>,
    reinject: BTreeSet<String>,
}

impl Pass {
    fn add_connections(&mut self, command: ConnectionCommand) {
        self.attach
            .extend(command.attach.into_iter().map(Command::AttachWire));
        self.detach
            .extend(command.detach.into_iter().map(Command::DetachWire));
    }

    fn add_channel_connections(&mut self, command: ChannelConnectionCommand) {
        self.build_channels
            .extend(command.build_channels.into_iter().map(Command::BuildChannel));
        self.attach.extend(
            command
                .attach
                .into_iter()
                .map(Command::AttachChannelConnection),
        );
        self.detach.extend(
            command
                .detach
                .into_iter()
                .map(Command::DetachChannelConnection),
        );
        self.dispose_channels.extend(
            command
                .dispose_channels
                .into_iter()
                .map(Command::DisposeChannel),
        );
    }

    fn into_commands(self) -> Vec<Command> {
        let mut commands = Vec::new();
        commands.extend(self.build_components);
        commands.extend(self.build_channels);
        commands.extend(self.attach);
        commands.extend(self.start_contexts);
        commands.extend(self.detach);
        commands.extend(self.dispose_channels);
        commands.extend(self.stop_contexts);
        commands.extend(self.dispose_components);
        if !self.reinject.is_empty() {
            commands.push(Command::Reinject(self.reinject.into_iter().collect()));
        }
        commands
    }
}

/// Generates the ordered command list for one deployment pass
#[derive(Debug, Default, Clone)]
pub struct Generator {
    components: ComponentGenerator,
    channels: ChannelGenerator,
    references: ReferenceCommandGenerator,
    services: ServiceCommandGenerator,
    consumers: ConsumerCommandGenerator,
    producers: ProducerCommandGenerator,
}

impl Generator {
    /// Create a generator using the given wire generator
    pub fn new(wires: PhysicalWireGenerator) -> Self {
        let connections = ConnectionGenerator::new();
        let channels = ChannelGenerator::new();
        Self {
            components: ComponentGenerator::new(),
            channels,
            references: ReferenceCommandGenerator::new(wires.clone()),
            services: ServiceCommandGenerator::new(wires),
            consumers: ConsumerCommandGenerator::new(connections, channels),
            producers: ProducerCommandGenerator::new(connections, channels),
        }
    }

    /// Generate commands for every `New` and `Marked` node of the model
    ///
    /// Provisioned components whose reference wires change are named in a
    /// trailing [`Command::Reinject`].
    pub fn generate(&self, model: &LogicalModel) -> Result<Vec<Command>> {
        let mut pass = Pass::default();
        let mut starting = BTreeSet::new();
        let mut stopping = BTreeSet::new();

        for channel in model.channels() {
            if channel.is_bound() {
                continue;
            }
            match channel.state {
                LogicalState::New => pass
                    .build_channels
                    .push(Command::BuildChannel(self.channels.generate_build(channel, None))),
                LogicalState::Marked => pass
                    .dispose_channels
                    .push(Command::DisposeChannel(self.channels.generate_dispose(channel, None))),
                LogicalState::Provisioned => {}
            }
        }

        for uri in model.descendants(model.root_uri()) {
            let Some(component) = model.component(&uri) else {
                continue;
            };
            let Some(physical) = self.components.generate(component) else {
                continue;
            };
            match component.state {
                LogicalState::New => {
                    starting.insert(component.deployable.clone());
                    pass.build_components
                        .push(Command::BuildComponent(physical));
                }
                LogicalState::Marked => {
                    stopping.insert(component.deployable.clone());
                    pass.dispose_components
                        .push(Command::DisposeComponent(physical));
                }
                LogicalState::Provisioned => {}
            }

            if let Some(command) = self.references.generate(component, model)? {
                if component.state == LogicalState::Provisioned {
                    pass.reinject.insert(component.uri.clone());
                }
                pass.add_connections(command);
            }
            if let Some(command) = self.services.generate(component, model)? {
                pass.add_connections(command);
            }
            if let Some(command) = self.producers.generate(component, model)? {
                pass.add_channel_connections(command);
            }
            if let Some(command) = self.consumers.generate(component, model)? {
                pass.add_channel_connections(command);
            }
        }

        pass.start_contexts
            .extend(starting.into_iter().map(Command::StartContext));
        pass.stop_contexts
            .extend(stopping.into_iter().map(Command::StopContext));
        pass.dispose_components.reverse();

        let commands = pass.into_commands();
        tracing::debug!(commands = commands.len(), "Generated deployment commands");
        Ok(commands)
    }
}
