//! Data transformation ports
//!
//! Wires whose source and target disagree on data types get a transformer
//! interceptor. Transformers are resolved by (source, target) data type pair.

use serde_json::Value;
use std::sync::Arc;

use crate::error::Result;
use crate::value_objects::DataType;

/// Converts a value from one data type to another
pub trait Transformer: Send + Sync {
    /// Transform a value
    fn transform(&self, value: Value) -> Result<Value>;
}

/// A transformer for exactly one (source, target) pair
pub trait SingleTypeTransformer: Transformer {
    /// Type accepted
    fn source_type(&self) -> &DataType;

    /// Type produced
    fn target_type(&self) -> &DataType;
}

/// Creates transformers for families of data types
pub trait TransformerFactory: Send + Sync {
    /// Position among factories; lower values are consulted first
    fn order(&self) -> i32;

    /// True if the factory can create a transformer for the pair
    fn can_transform(&self, source: &DataType, target: &DataType) -> bool;

    /// Create a transformer
    fn create(
        &self,
        source: &DataType,
        target: &DataType,
        in_types: &[DataType],
        out_types: &[DataType],
    ) -> Result<Arc<dyn Transformer>>;
}

/// Resolves transformers
pub trait TransformerRegistry: Send + Sync {
    /// Find a transformer for the pair
    ///
    /// `Ok(None)` means no transformation is available; callers decide
    /// whether that is fatal.
    fn get_transformer(
        &self,
        source: &DataType,
        target: &DataType,
        in_types: &[DataType],
        out_types: &[DataType],
    ) -> Result<Option<Arc<dyn Transformer>>>;
}
