//! Target invokers

use fabric3_domain::ports::Invoker;
use fabric3_domain::{Message, Result};

use crate::container::ManagedComponent;

/// Terminates a chain by dispatching into a service of a scope-managed component
pub struct ComponentTargetInvoker {
    component: ManagedComponent,
    service: String,
}

impl ComponentTargetInvoker {
    /// Create an invoker for a service of a component
    pub fn new(component: ManagedComponent, service: impl Into<String>) -> Self {
        Self {
            component,
            service: service.into(),
        }
    }
}

impl Invoker for ComponentTargetInvoker {
    fn invoke(&self, operation: &str, message: Message) -> Result<Message> {
        self.component.invoke(&self.service, operation, message)
    }
}
