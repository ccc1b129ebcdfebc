//! Reference wire command generation

use fabric3_domain::Result;
use fabric3_domain::logical::{LogicalComponent, LogicalModel, LogicalState};
use fabric3_domain::physical::ConnectionCommand;

use super::wire::PhysicalWireGenerator;

/// Generates attach/detach commands for the wires and bindings of a component's references
#[derive(Debug, Default, Clone)]
pub struct ReferenceCommandGenerator {
    wires: PhysicalWireGenerator,
}

impl ReferenceCommandGenerator {
    /// Create a generator
    pub fn new(wires: PhysicalWireGenerator) -> Self {
        Self { wires }
    }

    /// New wires and bindings are attached, marked ones detached
    ///
    /// Bindings of a marked component are detached regardless of their own
    /// state. Returns `None` when nothing changes.
    pub fn generate(
        &self,
        component: &LogicalComponent,
        model: &LogicalModel,
    ) -> Result<Option<ConnectionCommand>> {
        let mut command = ConnectionCommand::new(&component.uri);
        let removing = component.state == LogicalState::Marked;

        for reference in &component.references {
            for wire in model.wires_of(&reference.uri) {
                match wire.state {
                    LogicalState::New if !removing => {
                        command.attach.push(self.wires.generate_wire(wire, model)?);
                    }
                    LogicalState::Marked => {
                        command.detach.push(self.wires.generate_wire(wire, model)?);
                    }
                    _ => {}
                }
            }
            for binding in &reference.bindings {
                if removing || binding.state == LogicalState::Marked {
                    command.detach.push(
                        self.wires
                            .generate_bound_reference(reference, binding, model)?,
                    );
                } else if binding.state == LogicalState::New {
                    command.attach.push(
                        self.wires
                            .generate_bound_reference(reference, binding, model)?,
                    );
                }
            }
        }
        Ok((!command.is_empty()).then_some(command))
    }
}
