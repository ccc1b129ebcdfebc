//! Runtime Bootstrap - Registries, Executor and Domain
//!
//! Builds a runtime node and the domain deploying into it.
//!
//! ```text
//! AppConfig → registries (linkme + explicit) → RuntimeExecutor → Domain
//!                                            ↘ RuntimeWireConnector → ServiceResolver
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let runtime = init_runtime(AppConfig::default())?;
//! runtime.implementations().register("native", Arc::new(MyFactory));
//!
//! runtime.domain().include(&composite)?;
//! let orders = runtime.resolver().resolve(&contract)?;
//! ```

use std::sync::Arc;

use fabric3_application::generator::PhysicalWireGenerator;
use fabric3_application::{BindingCatalog, DefaultContractMatcher, Domain, ServiceResolver};
use fabric3_domain::model::Autowire;
use fabric3_domain::ports::{ContractMatcher, TransformerRegistry};
use fabric3_domain::Result;
use tracing::info;

use crate::channel::{ChannelBuilder, ChannelConnector, ChannelManager};
use crate::config::AppConfig;
use crate::container::{ComponentManager, ImplementationRegistry, ResourceRegistry, ScopeRegistry};
use crate::executor::RuntimeExecutor;
use crate::monitor::{
    Monitor, MonitorDestinationRegistry, MonitorLevel, RingBufferDestinationRouter,
    TracingDestination,
};
use crate::transform::DefaultTransformerRegistry;
use crate::wire::{BindingAttachers, RuntimeWireConnector};

/// A runtime node with its deployment domain
pub struct RuntimeContext {
    /// Runtime configuration
    pub config: Arc<AppConfig>,

    // ========================================================================
    // Deployment
    // ========================================================================
    domain: Arc<Domain>,
    resolver: Arc<ServiceResolver>,

    // ========================================================================
    // Runtime registries
    // ========================================================================
    components: Arc<ComponentManager>,
    channels: Arc<ChannelManager>,
    implementations: Arc<ImplementationRegistry>,
    resources: Arc<ResourceRegistry>,
    transformers: Arc<DefaultTransformerRegistry>,
    attachers: Arc<BindingAttachers>,

    // ========================================================================
    // Monitoring
    // ========================================================================
    destinations: Arc<MonitorDestinationRegistry>,
    router: Arc<RingBufferDestinationRouter>,
}

impl RuntimeContext {
    /// Deployment domain
    pub fn domain(&self) -> Arc<Domain> {
        Arc::clone(&self.domain)
    }

    /// Resolver for code outside the domain
    pub fn resolver(&self) -> Arc<ServiceResolver> {
        Arc::clone(&self.resolver)
    }

    /// Built components
    pub fn components(&self) -> Arc<ComponentManager> {
        Arc::clone(&self.components)
    }

    /// Hosted channels
    pub fn channels(&self) -> Arc<ChannelManager> {
        Arc::clone(&self.channels)
    }

    /// Implementation factories; register one per implementation kind before deploying
    pub fn implementations(&self) -> Arc<ImplementationRegistry> {
        Arc::clone(&self.implementations)
    }

    /// Runtime resources
    pub fn resources(&self) -> Arc<ResourceRegistry> {
        Arc::clone(&self.resources)
    }

    /// Transformer registry
    pub fn transformers(&self) -> Arc<DefaultTransformerRegistry> {
        Arc::clone(&self.transformers)
    }

    /// Binding attachers registered on top of the extension slice
    pub fn attachers(&self) -> Arc<BindingAttachers> {
        Arc::clone(&self.attachers)
    }

    /// Monitor destinations
    pub fn destinations(&self) -> Arc<MonitorDestinationRegistry> {
        Arc::clone(&self.destinations)
    }

    /// Monitor router
    pub fn router(&self) -> Arc<RingBufferDestinationRouter> {
        Arc::clone(&self.router)
    }

    /// Monitor emitting to a named destination
    pub fn monitor(&self, destination: &str, threshold: MonitorLevel) -> Result<Monitor> {
        Monitor::new(
            Arc::clone(&self.router),
            destination,
            &self.config.runtime.name,
            threshold,
        )
    }

    /// Drain and stop the monitor router
    pub fn shutdown(&self) {
        self.router.shutdown();
        info!(runtime = %self.config.runtime.name, "Runtime stopped");
    }
}

/// Build a runtime node from configuration
///
/// Asynchronous channel fan-out, when enabled, needs a tokio runtime at the
/// time channels are built, not here.
pub fn init_runtime(config: AppConfig) -> Result<RuntimeContext> {
    let config = Arc::new(config);

    let components = Arc::new(ComponentManager::new());
    let channels = Arc::new(ChannelManager::new());
    let implementations = Arc::new(ImplementationRegistry::new());
    let resources = Arc::new(ResourceRegistry::new());
    let transformers = Arc::new(DefaultTransformerRegistry::with_registered_factories());
    let attachers = Arc::new(BindingAttachers::new());

    let wires = Arc::new(RuntimeWireConnector::new(
        Arc::clone(&components),
        Arc::clone(&transformers) as Arc<dyn TransformerRegistry>,
        Arc::clone(&attachers),
    ));
    let executor = Arc::new(RuntimeExecutor::new(
        Arc::clone(&components),
        ScopeRegistry::new(),
        Arc::clone(&implementations),
        Arc::clone(&resources),
        ChannelBuilder::new(Arc::clone(&channels), config.channels.clone()),
        ChannelConnector::new(Arc::clone(&channels), Arc::clone(&components)),
        Arc::clone(&wires),
    ));

    let generator = config
        .runtime
        .interceptors
        .iter()
        .fold(PhysicalWireGenerator::new(), |generator, interceptor| {
            generator.with_interceptor(interceptor)
        });
    let matcher: Arc<dyn ContractMatcher> = Arc::new(DefaultContractMatcher::new());
    let autowire = if config.runtime.autowire {
        Autowire::On
    } else {
        Autowire::Off
    };
    let domain = Arc::new(
        Domain::new(autowire, Arc::clone(&matcher), generator.clone(), executor)
            .with_bindings(Arc::clone(&attachers) as Arc<dyn BindingCatalog>),
    );
    let resolver = Arc::new(ServiceResolver::new(
        Arc::clone(&domain),
        matcher,
        generator,
        wires,
    ));

    let destinations = Arc::new(MonitorDestinationRegistry::new());
    for name in &config.monitor.destinations {
        destinations.register(Arc::new(TracingDestination::new(name)));
    }
    let router = Arc::new(RingBufferDestinationRouter::new(
        &config.monitor,
        Arc::clone(&destinations),
    )?);

    info!(
        runtime = %config.runtime.name,
        autowire = config.runtime.autowire,
        monitor_ring = config.monitor.enabled,
        "Runtime initialized"
    );

    Ok(RuntimeContext {
        config,
        domain,
        resolver,
        components,
        channels,
        implementations,
        resources,
        transformers,
        attachers,
        destinations,
        router,
    })
}
