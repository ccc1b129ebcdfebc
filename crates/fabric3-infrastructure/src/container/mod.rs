//! Component container
//!
//! Built components live in the [`ComponentManager`]; their instances are
//! owned by the scope container matching the component's scope.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`component`] | Injection sites and instance lifecycle of one component |
//! | [`scope`] | Composite and stateless scope containers |
//! | [`manager`] | Registry of built components |
//! | [`implementation`] | Implementation factories by kind |
//! | [`resources`] | Runtime resources injected by interface name |

pub mod component;
pub mod implementation;
pub mod manager;
pub mod resources;
pub mod scope;

pub use component::{InstanceState, InstanceWrapper, ScopedComponent};
pub use implementation::ImplementationRegistry;
pub use manager::{ComponentManager, ManagedComponent};
pub use resources::ResourceRegistry;
pub use scope::{CompositeScopeContainer, ScopeContainer, ScopeRegistry, StatelessScopeContainer};
