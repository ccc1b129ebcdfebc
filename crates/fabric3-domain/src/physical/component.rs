//! Physical component definitions

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::model::Scope;
use crate::value_objects::QName;

/// A resource reference to satisfy when the component is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalResource {
    /// Resource reference name
    pub name: String,
    /// Interface name of the required resource
    pub interface: String,
    /// True if the resource may be absent
    pub optional: bool,
}

/// Everything a runtime needs to build a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalComponent {
    /// Component URI
    pub uri: String,
    /// Implementation kind, resolved by the runtime implementation registry
    pub implementation: String,
    /// Instance scope
    pub scope: Scope,
    /// Create the instance when its context starts
    pub eager_init: bool,
    /// Deployable owning the component
    pub deployable: QName,
    /// Contribution the component was loaded from
    pub contribution_uri: Option<String>,
    /// Key used for keyed reference injection
    pub key: Option<String>,
    /// Order used for multiplicity injection
    pub order: Option<i32>,
    /// Effective property values
    pub properties: BTreeMap<String, Value>,
    /// Resource references
    pub resources: Vec<PhysicalResource>,
}
