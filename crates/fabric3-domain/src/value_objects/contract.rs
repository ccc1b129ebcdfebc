//! Service contracts and data types
//!
//! Contracts are the unit of autowire matching: a reference is satisfied by
//! any service whose contract is assignable to the reference contract.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value Object: Data Type
///
/// Pairs the physical representation of a value (e.g. `json`, `string`) with
/// its logical type (e.g. an XML schema type or an interface parameter type).
/// Transformers are selected by (source, target) data type pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataType {
    /// Physical representation
    pub physical: String,
    /// Logical type
    pub logical: String,
}

impl DataType {
    /// Create a data type
    pub fn new(physical: impl Into<String>, logical: impl Into<String>) -> Self {
        Self {
            physical: physical.into(),
            logical: logical.into(),
        }
    }

    /// JSON value carrying the given logical type
    pub fn json(logical: impl Into<String>) -> Self {
        Self::new(crate::constants::JSON_PHYSICAL_TYPE, logical)
    }

    /// String value carrying the given logical type
    pub fn string(logical: impl Into<String>) -> Self {
        Self::new(crate::constants::STRING_PHYSICAL_TYPE, logical)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}>", self.physical, self.logical)
    }
}

/// A single operation on a service contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation name, unique within the contract
    pub name: String,
    /// Parameter types in declaration order
    pub input_types: Vec<DataType>,
    /// Return type
    pub output_type: DataType,
    /// Declared fault types
    pub fault_types: Vec<DataType>,
    /// True if the operation does not return a response
    pub one_way: bool,
}

impl Operation {
    /// Create a request/response operation
    pub fn new(name: impl Into<String>, input_types: Vec<DataType>, output_type: DataType) -> Self {
        Self {
            name: name.into(),
            input_types,
            output_type,
            fault_types: Vec::new(),
            one_way: false,
        }
    }

    /// Mark the operation one-way
    pub fn one_way(mut self) -> Self {
        self.one_way = true;
        self
    }
}

/// Value Object: Service Contract
///
/// Describes the interface exposed by a service or required by a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceContract {
    /// Interface name
    pub interface: String,
    /// Operations
    pub operations: Vec<Operation>,
    /// Interfaces this contract extends; used for non-strict assignability
    pub supertypes: Vec<String>,
    /// Callback contract, if the contract is bidirectional
    pub callback: Option<Box<ServiceContract>>,
}

impl ServiceContract {
    /// Create a contract with the given interface name and operations
    pub fn new(interface: impl Into<String>, operations: Vec<Operation>) -> Self {
        Self {
            interface: interface.into(),
            operations,
            supertypes: Vec::new(),
            callback: None,
        }
    }

    /// Add a supertype
    pub fn with_supertype(mut self, supertype: impl Into<String>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    /// Set the callback contract
    pub fn with_callback(mut self, callback: ServiceContract) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Find an operation by name
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.name == name)
    }
}
