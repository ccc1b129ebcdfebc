//! Physical wire generation
//!
//! Translates a logical wire, or a reference/service binding, into a
//! physical wire carrying per-operation signatures and interceptors.

use fabric3_domain::constants::TRANSFORMER_INTERCEPTOR;
use fabric3_domain::logical::{
    LogicalBinding, LogicalComponent, LogicalModel, LogicalReference, LogicalService, LogicalWire,
};
use fabric3_domain::model::Scope;
use fabric3_domain::physical::{
    Injectable, PhysicalInterceptor, PhysicalOperation, PhysicalWire, PhysicalWireSource,
    PhysicalWireTarget,
};
use fabric3_domain::value_objects::uri;
use fabric3_domain::{Error, QName, Result, ServiceContract};

/// Generates physical wires
#[derive(Debug, Default, Clone)]
pub struct PhysicalWireGenerator {
    interceptors: Vec<String>,
}

impl PhysicalWireGenerator {
    /// Create a generator adding no configured interceptors
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interceptor type to every generated operation
    pub fn with_interceptor(mut self, interceptor_type: impl Into<String>) -> Self {
        self.interceptors.push(interceptor_type.into());
        self
    }

    /// Generate the physical form of a component-to-component wire
    ///
    /// A dangling source or target is a generation error.
    pub fn generate_wire(&self, wire: &LogicalWire, model: &LogicalModel) -> Result<PhysicalWire> {
        let reference = model.reference(&wire.source).ok_or_else(|| {
            Error::generation(format!("Wire source not found: {}", wire.source))
        })?;
        let service = model.service(&wire.target).ok_or_else(|| {
            Error::generation(format!("Wire target not found: {}", wire.target))
        })?;
        let source_component = Self::owner(&reference.uri, model)?;
        let target_component = Self::owner(&service.uri, model)?;
        let operations = self.operations(&reference.definition.contract, service.contract())?;
        let optimizable = operations.iter().all(|op| op.interceptors.is_empty())
            && Self::scope(target_component) == Scope::Composite;

        Ok(PhysicalWire {
            source: Self::component_source(reference, source_component, Some(target_component)),
            target: PhysicalWireTarget::Component {
                uri: target_component.uri.clone(),
                service: service.name.clone(),
            },
            operations,
            deployable: wire.deployable.clone(),
            optimizable,
        })
    }

    /// Generate a wire from a reference to one of its bindings
    pub fn generate_bound_reference(
        &self,
        reference: &LogicalReference,
        binding: &LogicalBinding,
        model: &LogicalModel,
    ) -> Result<PhysicalWire> {
        let component = Self::owner(&reference.uri, model)?;
        let contract = &reference.definition.contract;
        Ok(PhysicalWire {
            source: Self::component_source(reference, component, None),
            target: PhysicalWireTarget::Binding {
                uri: reference.uri.clone(),
                binding_type: binding.definition.binding_type.clone(),
                config: Self::binding_config(binding),
            },
            operations: self.operations(contract, contract)?,
            deployable: component.deployable.clone(),
            optimizable: false,
        })
    }

    /// Generate a wire from one of a service's bindings to the service
    pub fn generate_bound_service(
        &self,
        service: &LogicalService,
        binding: &LogicalBinding,
        model: &LogicalModel,
    ) -> Result<PhysicalWire> {
        let component = Self::owner(&service.uri, model)?;
        let contract = service.contract();
        Ok(PhysicalWire {
            source: PhysicalWireSource::Binding {
                uri: service.uri.clone(),
                binding_type: binding.definition.binding_type.clone(),
                config: Self::binding_config(binding),
            },
            target: PhysicalWireTarget::Component {
                uri: component.uri.clone(),
                service: service.name.clone(),
            },
            operations: self.operations(contract, contract)?,
            deployable: component.deployable.clone(),
            optimizable: false,
        })
    }

    /// Generate a wire for a reference that is not part of the logical model
    pub fn generate_unmanaged(
        &self,
        reference: &LogicalReference,
        target_uri: &str,
        deployable: &QName,
        model: &LogicalModel,
    ) -> Result<PhysicalWire> {
        let service = model.service(target_uri).ok_or_else(|| {
            Error::generation(format!("Wire target not found: {target_uri}"))
        })?;
        let target_component = Self::owner(&service.uri, model)?;
        Ok(PhysicalWire {
            source: PhysicalWireSource::Unmanaged {
                uri: reference.uri.clone(),
            },
            target: PhysicalWireTarget::Component {
                uri: target_component.uri.clone(),
                service: service.name.clone(),
            },
            operations: self.operations(&reference.definition.contract, service.contract())?,
            deployable: deployable.clone(),
            optimizable: false,
        })
    }

    fn owner<'a>(member_uri: &str, model: &'a LogicalModel) -> Result<&'a LogicalComponent> {
        uri::split_member(member_uri)
            .and_then(|(component, _)| model.component(component))
            .ok_or_else(|| Error::generation(format!("Component not found for {member_uri}")))
    }

    fn scope(component: &LogicalComponent) -> Scope {
        component
            .definition
            .implementation
            .component_type()
            .map(|t| t.scope)
            .unwrap_or_default()
    }

    fn component_source(
        reference: &LogicalReference,
        component: &LogicalComponent,
        target: Option<&LogicalComponent>,
    ) -> PhysicalWireSource {
        PhysicalWireSource::Component {
            uri: component.uri.clone(),
            injectable: Injectable::reference(&reference.name),
            multiplicity: reference.multiplicity,
            collection: reference.definition.collection,
            key: target.and_then(|t| t.key().map(str::to_string)),
            order: target.and_then(|t| t.definition.order),
        }
    }

    fn binding_config(binding: &LogicalBinding) -> std::collections::BTreeMap<String, serde_json::Value> {
        let mut config = binding.definition.config.clone();
        if let Some(target) = &binding.definition.target_uri {
            config.insert(
                "target_uri".to_string(),
                serde_json::Value::String(target.clone()),
            );
        }
        config
    }

    fn operations(
        &self,
        source: &ServiceContract,
        target: &ServiceContract,
    ) -> Result<Vec<PhysicalOperation>> {
        source
            .operations
            .iter()
            .map(|operation| {
                let target_operation = target.operation(&operation.name).ok_or_else(|| {
                    Error::generation(format!(
                        "Operation {} not found on {}",
                        operation.name, target.interface
                    ))
                })?;
                let mut interceptors: Vec<PhysicalInterceptor> = self
                    .interceptors
                    .iter()
                    .map(PhysicalInterceptor::new)
                    .collect();
                if operation.input_types != target_operation.input_types
                    || operation.output_type != target_operation.output_type
                {
                    interceptors.push(PhysicalInterceptor::new(TRANSFORMER_INTERCEPTOR));
                }
                Ok(PhysicalOperation {
                    name: operation.name.clone(),
                    source_types: operation.input_types.clone(),
                    target_types: target_operation.input_types.clone(),
                    source_output: operation.output_type.clone(),
                    target_output: target_operation.output_type.clone(),
                    one_way: operation.one_way,
                    interceptors,
                })
            })
            .collect()
    }
}
