//! Autowire resolver
//!
//! Search-by-type over the children of one composite.

use std::sync::Arc;

use fabric3_domain::logical::{LogicalModel, LogicalReference, LogicalState};
use fabric3_domain::ports::ContractMatcher;

/// Finds services in a composite that can satisfy a reference
#[derive(Clone)]
pub struct AutowireResolver {
    matcher: Arc<dyn ContractMatcher>,
}

impl AutowireResolver {
    /// Create a resolver using the given contract matcher
    pub fn new(matcher: Arc<dyn ContractMatcher>) -> Self {
        Self { matcher }
    }

    /// URIs of matching services among the children of `composite_uri`
    ///
    /// Children are visited in instantiation order and contribute at most one
    /// service each. Single-valued references stop at the first match.
    /// Keyed references skip children without a key.
    ///
    /// # Panics
    ///
    /// If a candidate service has no contract.
    pub fn resolve(
        &self,
        reference: &LogicalReference,
        composite_uri: &str,
        model: &LogicalModel,
    ) -> Vec<String> {
        let multiplicity = reference.is_multiplicity();
        let mut candidates = Vec::new();
        for child in model.children(composite_uri) {
            if child.state == LogicalState::Marked {
                continue;
            }
            if reference.is_keyed() && child.key().is_none() {
                continue;
            }
            if let Some(service) = child.services.iter().find(|service| {
                self.matcher
                    .is_assignable_from(&reference.definition.contract, service.contract(), false, false)
                    .is_assignable()
            }) {
                candidates.push(service.uri.clone());
                if !multiplicity {
                    break;
                }
            }
        }
        candidates
    }
}
