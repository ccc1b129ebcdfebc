//! Physical wire definitions
//!
//! Plain data describing a resolved logical wire: enough to build the
//! interceptor chains on any runtime without consulting the logical model.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::injectable::Injectable;
use crate::model::{CollectionKind, Multiplicity};
use crate::value_objects::{DataType, QName};

/// An interceptor to insert into an operation chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalInterceptor {
    /// Interceptor type, resolved by the runtime interceptor table
    pub interceptor_type: String,
    /// Interceptor configuration
    pub config: BTreeMap<String, Value>,
    /// Policy extension providing the interceptor, if any
    pub policy_classloader_id: Option<String>,
}

impl PhysicalInterceptor {
    /// Create an interceptor of the given type
    pub fn new(interceptor_type: impl Into<String>) -> Self {
        Self {
            interceptor_type: interceptor_type.into(),
            config: BTreeMap::new(),
            policy_classloader_id: None,
        }
    }
}

/// One operation of a wire with source and target signatures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalOperation {
    /// Operation name
    pub name: String,
    /// Parameter types as seen by the source
    pub source_types: Vec<DataType>,
    /// Parameter types as expected by the target
    pub target_types: Vec<DataType>,
    /// Return type as seen by the source
    pub source_output: DataType,
    /// Return type as produced by the target
    pub target_output: DataType,
    /// True if the operation does not return a response
    pub one_way: bool,
    /// Interceptors in chain order
    pub interceptors: Vec<PhysicalInterceptor>,
}

/// Source end of a wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PhysicalWireSource {
    /// A reference of a component
    Component {
        /// Component URI
        uri: String,
        /// Reference injection site
        injectable: Injectable,
        /// Reference multiplicity
        multiplicity: Multiplicity,
        /// Collection shape for multiplicity references
        collection: CollectionKind,
        /// Key of the target component, for keyed references
        key: Option<String>,
        /// Order of the target component, for ordered collections
        order: Option<i32>,
    },
    /// A service binding receiving requests from a transport
    Binding {
        /// Bound service URI
        uri: String,
        /// Binding type
        binding_type: String,
        /// Binding configuration
        config: BTreeMap<String, Value>,
    },
    /// Code outside any component holding a proxy returned by the connector
    Unmanaged {
        /// Synthetic reference URI
        uri: String,
    },
}

impl PhysicalWireSource {
    /// URI of the source component, bound service or synthetic reference
    pub fn uri(&self) -> &str {
        match self {
            Self::Component { uri, .. } | Self::Binding { uri, .. } | Self::Unmanaged { uri } => uri,
        }
    }
}

/// Target end of a wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PhysicalWireTarget {
    /// A service of a component
    Component {
        /// Component URI
        uri: String,
        /// Service name
        service: String,
    },
    /// A reference binding forwarding requests to a transport
    Binding {
        /// Bound reference URI
        uri: String,
        /// Binding type
        binding_type: String,
        /// Binding configuration
        config: BTreeMap<String, Value>,
    },
}

impl PhysicalWireTarget {
    /// URI of the target component or bound reference
    pub fn uri(&self) -> &str {
        match self {
            Self::Component { uri, .. } | Self::Binding { uri, .. } => uri,
        }
    }
}

/// A wire ready to be attached on a runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalWire {
    /// Source end
    pub source: PhysicalWireSource,
    /// Target end
    pub target: PhysicalWireTarget,
    /// Operations in contract order
    pub operations: Vec<PhysicalOperation>,
    /// Deployable owning the wire
    pub deployable: QName,
    /// True if the source may invoke the target directly, without a chain
    pub optimizable: bool,
}
