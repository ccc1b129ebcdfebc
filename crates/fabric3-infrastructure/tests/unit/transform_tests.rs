//! Transformer registry tests

use std::sync::Arc;

use fabric3_application::ports::registry::list_transformer_factories;
use fabric3_domain::ports::{SingleTypeTransformer, Transformer, TransformerFactory, TransformerRegistry};
use fabric3_domain::{DataType, Result};
use fabric3_infrastructure::transform::DefaultTransformerRegistry;
use serde_json::{Value, json};

/// Fixed-pair transformer replacing any value with a marker
struct Marker {
    source: DataType,
    target: DataType,
    marker: &'static str,
}

impl Transformer for Marker {
    fn transform(&self, _value: Value) -> Result<Value> {
        Ok(json!(self.marker))
    }
}

impl SingleTypeTransformer for Marker {
    fn source_type(&self) -> &DataType {
        &self.source
    }

    fn target_type(&self) -> &DataType {
        &self.target
    }
}

/// Factory claiming every json to string pair
struct EagerFactory {
    order: i32,
}

impl TransformerFactory for EagerFactory {
    fn order(&self) -> i32 {
        self.order
    }

    fn can_transform(&self, source: &DataType, target: &DataType) -> bool {
        source.physical == "json" && target.physical == "string"
    }

    fn create(
        &self,
        source: &DataType,
        target: &DataType,
        _in_types: &[DataType],
        _out_types: &[DataType],
    ) -> Result<Arc<dyn Transformer>> {
        Ok(Arc::new(Marker {
            source: source.clone(),
            target: target.clone(),
            marker: "eager",
        }))
    }
}

fn transform(registry: &DefaultTransformerRegistry, source: &DataType, target: &DataType) -> Option<Value> {
    registry
        .get_transformer(source, target, &[], &[])
        .unwrap()
        .map(|t| t.transform(json!({"qty": 1})).unwrap())
}

#[test]
fn test_registered_factories_include_json_pairs() {
    let registry = DefaultTransformerRegistry::with_registered_factories();
    assert!(registry.factory_count() >= 2);
    let names: Vec<&str> = list_transformer_factories().iter().map(|(name, _)| *name).collect();
    assert!(names.contains(&"json-to-string"));
    assert!(names.contains(&"string-to-json"));

    let text = transform(&registry, &DataType::json("Order"), &DataType::string("Order"));
    assert_eq!(text, Some(json!("{\"qty\":1}")));
}

#[test]
fn test_exact_pair_wins_over_factories() {
    let registry = DefaultTransformerRegistry::with_registered_factories();
    let source = DataType::json("Order");
    let target = DataType::string("Order");
    registry.register(Arc::new(Marker {
        source: source.clone(),
        target: target.clone(),
        marker: "exact",
    }));

    assert_eq!(transform(&registry, &source, &target), Some(json!("exact")));

    registry.unregister(&source, &target);
    assert_eq!(transform(&registry, &source, &target), Some(json!("{\"qty\":1}")));
}

#[test]
fn test_lower_order_factory_consulted_first() {
    let registry = DefaultTransformerRegistry::with_registered_factories();
    registry.add_factory(Arc::new(EagerFactory { order: 1 }));

    let result = transform(&registry, &DataType::json("Order"), &DataType::string("Order"));
    assert_eq!(result, Some(json!("eager")));
}

#[test]
fn test_unknown_pair_has_no_transformer() {
    let registry = DefaultTransformerRegistry::with_registered_factories();
    let xml = DataType::new("xml", "Order");

    assert_eq!(transform(&registry, &DataType::json("Order"), &xml), None);
}
