//! Supplier closures and injection sites

use std::sync::Arc;

use fabric3_domain::ports::Injected;

use super::multiplicity::MultiplicitySupplier;

/// Produces a value each time a site is (re)injected
pub type Supplier<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// Wrap a closure as a [`Supplier`]
pub fn supplier<T, F>(f: F) -> Supplier<T>
where
    F: Fn() -> T + Send + Sync + 'static,
{
    Arc::new(f)
}

/// What a component injects into one of its sites
#[derive(Clone)]
pub enum InjectionSite {
    /// A single value, resupplied on every injection
    Single(Supplier<Injected>),
    /// A multiplicity reference
    Multiple(Arc<MultiplicitySupplier>),
}

impl InjectionSite {
    /// Site holding a fixed value
    pub fn value(value: Injected) -> Self {
        Self::Single(supplier(move || value.clone()))
    }

    /// Current value of the site
    pub fn get(&self) -> Injected {
        match self {
            Self::Single(supplier) => supplier(),
            Self::Multiple(multiplicity) => multiplicity.get(),
        }
    }
}

impl std::fmt::Debug for InjectionSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(_) => f.write_str("Single"),
            Self::Multiple(m) => write!(f, "Multiple({:?})", m.kind()),
        }
    }
}
