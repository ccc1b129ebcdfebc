//! Injection
//!
//! Values reach implementations through named injection sites. Single-valued
//! sites hold an [`Injected`](fabric3_domain::ports::Injected) directly;
//! multiplicity references go through a [`MultiplicitySupplier`] that buffers
//! wire changes and publishes immutable snapshots.

pub mod attributes;
pub mod multiplicity;
pub mod supplier;

pub use attributes::InjectionAttributes;
pub use multiplicity::MultiplicitySupplier;
pub use supplier::{InjectionSite, Supplier, supplier};
