//! Injection sites

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an injection site on a component implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InjectableKind {
    /// A reference proxy
    Reference,
    /// A property value
    Property,
    /// An event publisher
    Producer,
    /// An event consumer
    Consumer,
    /// A runtime resource
    Resource,
    /// A callback proxy
    Callback,
}

/// A named injection site
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Injectable {
    /// Kind of the site
    pub kind: InjectableKind,
    /// Name of the reference, property, producer, consumer or resource
    pub name: String,
}

impl Injectable {
    /// Create an injection site
    pub fn new(kind: InjectableKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Reference site
    pub fn reference(name: impl Into<String>) -> Self {
        Self::new(InjectableKind::Reference, name)
    }

    /// Property site
    pub fn property(name: impl Into<String>) -> Self {
        Self::new(InjectableKind::Property, name)
    }

    /// Producer site
    pub fn producer(name: impl Into<String>) -> Self {
        Self::new(InjectableKind::Producer, name)
    }

    /// Consumer site
    pub fn consumer(name: impl Into<String>) -> Self {
        Self::new(InjectableKind::Consumer, name)
    }

    /// Resource site
    pub fn resource(name: impl Into<String>) -> Self {
        Self::new(InjectableKind::Resource, name)
    }
}

impl fmt::Display for Injectable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.kind, self.name)
    }
}
