//! Stateless scope: a fresh instance per invocation

use std::sync::Arc;

use dashmap::DashMap;
use fabric3_domain::model::Scope;
use fabric3_domain::ports::ComponentImplementation;
use fabric3_domain::{QName, Result};

use super::ScopeContainer;
use crate::container::component::ScopedComponent;

/// Creates an instance on every `get_instance` and destroys it on release
#[derive(Default)]
pub struct StatelessScopeContainer {
    components: DashMap<String, Arc<ScopedComponent>>,
}

impl StatelessScopeContainer {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScopeContainer for StatelessScopeContainer {
    fn scope(&self) -> Scope {
        Scope::Stateless
    }

    fn register(&self, component: Arc<ScopedComponent>) {
        self.components
            .insert(component.uri().to_string(), component);
    }

    fn unregister(&self, uri: &str) -> Result<()> {
        self.components.remove(uri);
        Ok(())
    }

    fn start_context(&self, _deployable: &QName) -> Result<()> {
        Ok(())
    }

    fn stop_context(&self, _deployable: &QName) -> Result<()> {
        Ok(())
    }

    fn get_instance(&self, component: &ScopedComponent) -> Result<Arc<dyn ComponentImplementation>> {
        let wrapper = component.create_instance()?;
        wrapper.start()?;
        Ok(wrapper.instance())
    }

    fn release_instance(
        &self,
        _component: &ScopedComponent,
        instance: Arc<dyn ComponentImplementation>,
    ) -> Result<()> {
        instance.destroy()
    }

    fn active_instances(&self, _component: &ScopedComponent) -> Vec<Arc<dyn ComponentImplementation>> {
        Vec::new()
    }

    fn reinject_component(&self, component: &ScopedComponent) -> Result<()> {
        // new instances pick up current values anyway
        component.take_changes();
        Ok(())
    }

    fn reinject(&self) -> Result<()> {
        for component in self.components.iter() {
            component.take_changes();
        }
        Ok(())
    }
}
