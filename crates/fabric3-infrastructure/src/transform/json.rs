//! JSON and string transformers

use std::sync::Arc;

use fabric3_application::ports::registry::{TRANSFORMER_FACTORIES, TransformerFactoryEntry};
use fabric3_domain::constants::{JSON_PHYSICAL_TYPE, STRING_PHYSICAL_TYPE};
use fabric3_domain::ports::{Transformer, TransformerFactory};
use fabric3_domain::{DataType, Error, Result};
use serde_json::Value;

/// Serialises JSON values to their string form
struct JsonToString;

impl Transformer for JsonToString {
    fn transform(&self, value: Value) -> Result<Value> {
        match value {
            Value::String(s) => Ok(Value::String(s)),
            other => Ok(Value::String(serde_json::to_string(&other)?)),
        }
    }
}

/// Parses strings into JSON values
struct StringToJson;

impl Transformer for StringToJson {
    fn transform(&self, value: Value) -> Result<Value> {
        match value {
            Value::String(s) => serde_json::from_str(&s)
                .map_err(|e| Error::transformation(format!("Invalid JSON string: {e}"))),
            other => Err(Error::transformation(format!(
                "Expected a string value, got {other}"
            ))),
        }
    }
}

/// Factory for `json -> string` pairs of any logical type
#[derive(Debug, Default)]
pub struct JsonToStringFactory;

impl TransformerFactory for JsonToStringFactory {
    fn order(&self) -> i32 {
        100
    }

    fn can_transform(&self, source: &DataType, target: &DataType) -> bool {
        source.physical == JSON_PHYSICAL_TYPE && target.physical == STRING_PHYSICAL_TYPE
    }

    fn create(
        &self,
        _source: &DataType,
        _target: &DataType,
        _in_types: &[DataType],
        _out_types: &[DataType],
    ) -> Result<Arc<dyn Transformer>> {
        Ok(Arc::new(JsonToString))
    }
}

/// Factory for `string -> json` pairs of any logical type
#[derive(Debug, Default)]
pub struct StringToJsonFactory;

impl TransformerFactory for StringToJsonFactory {
    fn order(&self) -> i32 {
        100
    }

    fn can_transform(&self, source: &DataType, target: &DataType) -> bool {
        source.physical == STRING_PHYSICAL_TYPE && target.physical == JSON_PHYSICAL_TYPE
    }

    fn create(
        &self,
        _source: &DataType,
        _target: &DataType,
        _in_types: &[DataType],
        _out_types: &[DataType],
    ) -> Result<Arc<dyn Transformer>> {
        Ok(Arc::new(StringToJson))
    }
}

fn json_to_string_factory() -> Arc<dyn TransformerFactory> {
    Arc::new(JsonToStringFactory)
}

fn string_to_json_factory() -> Arc<dyn TransformerFactory> {
    Arc::new(StringToJsonFactory)
}

#[linkme::distributed_slice(TRANSFORMER_FACTORIES)]
static JSON_TO_STRING: TransformerFactoryEntry = TransformerFactoryEntry {
    name: "json-to-string",
    description: "Serialises JSON values into strings",
    factory: json_to_string_factory,
};

#[linkme::distributed_slice(TRANSFORMER_FACTORIES)]
static STRING_TO_JSON: TransformerFactoryEntry = TransformerFactoryEntry {
    name: "string-to-json",
    description: "Parses strings into JSON values",
    factory: string_to_json_factory,
};
