//! Wire connector
//!
//! Builds invocation chains for physical wires and connects their ends:
//! component references get a proxy injected, bound services are exposed
//! through their binding attacher and unmanaged sources receive the proxy
//! directly.

use std::sync::Arc;

use fabric3_application::ports::WireConnector;
use fabric3_application::ports::registry::resolve_interceptor_builder;
use fabric3_domain::constants::TRANSFORMER_INTERCEPTOR;
use fabric3_domain::physical::{PhysicalOperation, PhysicalWire, PhysicalWireSource, PhysicalWireTarget};
use fabric3_domain::ports::{Injected, Interceptor, Invoker, TransformerRegistry};
use fabric3_domain::value_objects::uri;
use fabric3_domain::Result;
use tracing::debug;

use super::binding::BindingAttachers;
use super::chain::InvocationChain;
use super::interceptors::TransformInterceptor;
use super::proxy::WireProxy;
use super::target::ComponentTargetInvoker;
use crate::container::ComponentManager;
use crate::injection::{InjectionAttributes, InjectionSite, supplier};

/// Attaches and detaches physical wires on this runtime
pub struct RuntimeWireConnector {
    components: Arc<ComponentManager>,
    transformers: Arc<dyn TransformerRegistry>,
    attachers: Arc<BindingAttachers>,
}

impl RuntimeWireConnector {
    /// Create a connector
    pub fn new(
        components: Arc<ComponentManager>,
        transformers: Arc<dyn TransformerRegistry>,
        attachers: Arc<BindingAttachers>,
    ) -> Self {
        Self {
            components,
            transformers,
            attachers,
        }
    }

    /// Attach a wire
    pub fn attach(&self, wire: &PhysicalWire) -> Result<()> {
        self.connect(wire).map(|_| ())
    }

    /// Detach a wire
    ///
    /// Sources that are already gone are skipped.
    pub fn detach(&self, wire: &PhysicalWire) -> Result<()> {
        match &wire.source {
            PhysicalWireSource::Component {
                uri,
                injectable,
                multiplicity,
                collection,
                ..
            } => {
                if let Some(managed) = self.components.get(uri) {
                    if multiplicity.is_multiplicity() {
                        managed
                            .component
                            .multiplicity(injectable, *collection)
                            .remove(&target_id(wire));
                    } else {
                        managed.component.remove_site(injectable);
                    }
                }
            }
            PhysicalWireSource::Binding { binding_type, .. } => {
                self.attachers.resolve(binding_type)?.detach_source(wire)?;
            }
            PhysicalWireSource::Unmanaged { .. } => {}
        }
        if let PhysicalWireTarget::Binding { binding_type, .. } = &wire.target {
            self.attachers.resolve(binding_type)?.detach_target(wire)?;
        }
        debug!(source = %wire.source.uri(), target = %wire.target.uri(), "Wire detached");
        Ok(())
    }

    fn proxy(&self, wire: &PhysicalWire) -> Result<Arc<dyn Invoker>> {
        let target: Arc<dyn Invoker> = match &wire.target {
            PhysicalWireTarget::Component { uri, service } => Arc::new(
                ComponentTargetInvoker::new(self.components.require(uri)?, service.clone()),
            ),
            PhysicalWireTarget::Binding { binding_type, .. } => {
                self.attachers.resolve(binding_type)?.attach_target(wire)?
            }
        };

        if wire.optimizable {
            let operations = wire.operations.iter().map(|op| op.name.clone());
            return Ok(Arc::new(WireProxy::direct(operations, target)));
        }

        let chains = wire
            .operations
            .iter()
            .map(|operation| {
                let chain: Arc<dyn Invoker> = Arc::new(InvocationChain::new(
                    operation.name.clone(),
                    self.interceptors(operation)?,
                    Arc::clone(&target),
                ));
                Ok((operation.name.clone(), chain))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Arc::new(WireProxy::new(chains)))
    }

    fn interceptors(&self, operation: &PhysicalOperation) -> Result<Vec<Arc<dyn Interceptor>>> {
        operation
            .interceptors
            .iter()
            .map(|definition| -> Result<Arc<dyn Interceptor>> {
                if definition.interceptor_type == TRANSFORMER_INTERCEPTOR {
                    Ok(Arc::new(TransformInterceptor::build(
                        operation,
                        self.transformers.as_ref(),
                    )?))
                } else {
                    resolve_interceptor_builder(&definition.interceptor_type)?.build(definition)
                }
            })
            .collect()
    }

    fn bind_source(&self, wire: &PhysicalWire, proxy: Arc<dyn Invoker>) -> Result<()> {
        match &wire.source {
            PhysicalWireSource::Component {
                uri,
                injectable,
                multiplicity,
                collection,
                key,
                order,
            } => {
                let managed = self.components.require(uri)?;
                if multiplicity.is_multiplicity() {
                    managed
                        .component
                        .multiplicity(injectable, *collection)
                        .add(
                            target_id(wire),
                            supplier(move || Arc::clone(&proxy)),
                            InjectionAttributes::new(key.clone(), *order),
                        );
                } else {
                    managed
                        .component
                        .set_site(injectable.clone(), InjectionSite::value(Injected::Proxy(proxy)));
                }
            }
            PhysicalWireSource::Binding { binding_type, .. } => {
                self.attachers
                    .resolve(binding_type)?
                    .attach_source(wire, proxy)?;
            }
            PhysicalWireSource::Unmanaged { .. } => {}
        }
        Ok(())
    }
}

impl WireConnector for RuntimeWireConnector {
    fn connect(&self, wire: &PhysicalWire) -> Result<Arc<dyn Invoker>> {
        let proxy = self.proxy(wire)?;
        self.bind_source(wire, Arc::clone(&proxy))?;
        debug!(
            source = %wire.source.uri(),
            target = %wire.target.uri(),
            optimized = wire.optimizable,
            "Wire attached"
        );
        Ok(proxy)
    }

    fn disconnect(&self, wire: &PhysicalWire) -> Result<()> {
        self.detach(wire)
    }
}

/// Identity of a wire's target within a multiplicity reference
fn target_id(wire: &PhysicalWire) -> String {
    match &wire.target {
        PhysicalWireTarget::Component { uri, service } => uri::member_uri(uri, service),
        PhysicalWireTarget::Binding { uri, .. } => uri.clone(),
    }
}
