//! Service Resolver Use Case
//!
//! Gives code outside the domain a proxy to a deployed service, found by
//! contract instead of by name.

use std::sync::Arc;

use fabric3_domain::logical::LogicalReference;
use fabric3_domain::model::ReferenceDefinition;
use fabric3_domain::ports::{ContractMatcher, Invoker};
use fabric3_domain::value_objects::uri;
use fabric3_domain::{Error, Result, ServiceContract};

use super::domain::Domain;
use crate::domain_services::AutowireResolver;
use crate::generator::PhysicalWireGenerator;
use crate::ports::WireConnector;

/// Resolves services by contract against the domain root
pub struct ServiceResolver {
    domain: Arc<Domain>,
    resolver: AutowireResolver,
    wires: PhysicalWireGenerator,
    connector: Arc<dyn WireConnector>,
}

impl ServiceResolver {
    /// Create a resolver for a domain
    pub fn new(
        domain: Arc<Domain>,
        matcher: Arc<dyn ContractMatcher>,
        wires: PhysicalWireGenerator,
        connector: Arc<dyn WireConnector>,
    ) -> Self {
        Self {
            domain,
            resolver: AutowireResolver::new(matcher),
            wires,
            connector,
        }
    }

    /// Connect a synthetic reference to the first service matching `contract`
    ///
    /// The reference lives outside the logical model; the returned invoker
    /// stays valid until the target is undeployed.
    pub fn resolve(&self, contract: &ServiceContract) -> Result<Arc<dyn Invoker>> {
        let wire = self.domain.with_model(|model| {
            let name = format!("resolved-{}", uuid::Uuid::new_v4());
            let root = model.root();
            let reference = LogicalReference::new(
                uri::member_uri(&root.uri, &name),
                ReferenceDefinition::new(name, contract.clone()),
                None,
            );
            let target = self
                .resolver
                .resolve(&reference, &root.uri, model)
                .into_iter()
                .next()
                .ok_or_else(|| {
                    Error::not_found(format!("Service not found for type: {}", contract.interface))
                })?;
            tracing::debug!(reference = %reference.uri, target = %target, "Resolved service");
            self.wires
                .generate_unmanaged(&reference, &target, &root.deployable, model)
        })??;
        self.connector.connect(&wire)
    }
}
