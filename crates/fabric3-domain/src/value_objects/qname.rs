//! Qualified names identifying deployables and composites

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value Object: Qualified Name
///
/// Identifies a deployable (the unit of independent deploy/undeploy) and the
/// composite it was loaded from. Rendered as `{namespace}local`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QName {
    /// Namespace URI, empty for the default namespace
    pub namespace: String,
    /// Local part
    pub local: String,
}

impl QName {
    /// Create a qualified name
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
        }
    }

    /// Create a qualified name in the default namespace
    pub fn local(local: impl Into<String>) -> Self {
        Self::new("", local)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.local)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local)
        }
    }
}
