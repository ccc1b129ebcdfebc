//! Domain services
//!
//! Stateless policies consulted by the instantiators and the service resolver.

pub mod autowire_resolver;
pub mod contract_matcher;

pub use autowire_resolver::AutowireResolver;
pub use contract_matcher::DefaultContractMatcher;
