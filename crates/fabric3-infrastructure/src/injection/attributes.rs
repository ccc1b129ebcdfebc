//! Injection attributes

use std::cmp::Ordering;

/// Key and order of a target injected into a multiplicity reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InjectionAttributes {
    /// Map key, for keyed references
    pub key: Option<String>,
    /// Position in ordered collections
    pub order: Option<i32>,
}

impl InjectionAttributes {
    /// No key and no order
    pub const EMPTY: Self = Self {
        key: None,
        order: None,
    };

    /// Create attributes
    pub fn new(key: Option<String>, order: Option<i32>) -> Self {
        Self { key, order }
    }

    /// Ordered targets first, ascending; unordered ones keep insertion order after them
    pub fn compare_order(&self, other: &Self) -> Ordering {
        match (self.order, other.order) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}
