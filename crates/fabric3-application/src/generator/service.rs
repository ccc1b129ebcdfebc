//! Service binding command generation

use fabric3_domain::Result;
use fabric3_domain::logical::{LogicalComponent, LogicalModel, LogicalState};
use fabric3_domain::physical::ConnectionCommand;

use super::wire::PhysicalWireGenerator;

/// Generates attach/detach commands for bound services
#[derive(Debug, Default, Clone)]
pub struct ServiceCommandGenerator {
    wires: PhysicalWireGenerator,
}

impl ServiceCommandGenerator {
    /// Create a generator
    pub fn new(wires: PhysicalWireGenerator) -> Self {
        Self { wires }
    }

    /// Returns `None` when no binding changes
    pub fn generate(
        &self,
        component: &LogicalComponent,
        model: &LogicalModel,
    ) -> Result<Option<ConnectionCommand>> {
        let mut command = ConnectionCommand::new(&component.uri);
        let removing = component.state == LogicalState::Marked;

        for service in &component.services {
            for binding in &service.bindings {
                if removing || binding.state == LogicalState::Marked {
                    command
                        .detach
                        .push(self.wires.generate_bound_service(service, binding, model)?);
                } else if binding.state == LogicalState::New {
                    command
                        .attach
                        .push(self.wires.generate_bound_service(service, binding, model)?);
                }
            }
        }
        Ok((!command.is_empty()).then_some(command))
    }
}
