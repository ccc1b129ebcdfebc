//! Built-in interceptors

use std::sync::Arc;
use std::time::Instant;

use fabric3_application::ports::registry::{
    INTERCEPTOR_BUILDERS, InterceptorBuilder, InterceptorBuilderEntry,
};
use fabric3_domain::constants::TRACE_INTERCEPTOR;
use fabric3_domain::physical::{PhysicalInterceptor, PhysicalOperation};
use fabric3_domain::ports::{Interceptor, Invoker, Transformer, TransformerRegistry};
use fabric3_domain::{DataType, Error, Message, Result};
use serde_json::Value;
use tracing::debug;

/// Logs every invocation and its duration
#[derive(Debug, Default)]
pub struct TraceInterceptor;

impl Interceptor for TraceInterceptor {
    fn invoke(&self, operation: &str, message: Message, next: &dyn Invoker) -> Result<Message> {
        let started = Instant::now();
        let result = next.invoke(operation, message);
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        match &result {
            Ok(reply) => debug!(operation, elapsed_ms, fault = reply.fault, "Invocation completed"),
            Err(e) => debug!(operation, elapsed_ms, error = %e, "Invocation failed"),
        }
        result
    }
}

struct TraceInterceptorBuilder;

impl InterceptorBuilder for TraceInterceptorBuilder {
    fn build(&self, _definition: &PhysicalInterceptor) -> Result<Arc<dyn Interceptor>> {
        Ok(Arc::new(TraceInterceptor))
    }
}

fn trace_interceptor_builder() -> Arc<dyn InterceptorBuilder> {
    Arc::new(TraceInterceptorBuilder)
}

#[linkme::distributed_slice(INTERCEPTOR_BUILDERS)]
static TRACE_INTERCEPTOR_BUILDER: InterceptorBuilderEntry = InterceptorBuilderEntry {
    interceptor_type: TRACE_INTERCEPTOR,
    description: "Logs invocations with their duration",
    factory: trace_interceptor_builder,
};

/// Converts parameters and results between source and target data types
///
/// A single parameter is the whole message body; several parameters travel
/// as a JSON array, one element per parameter. Fault responses pass
/// through unchanged.
pub struct TransformInterceptor {
    inputs: Vec<Option<Arc<dyn Transformer>>>,
    output: Option<Arc<dyn Transformer>>,
}

impl TransformInterceptor {
    /// Resolve the transformers an operation needs
    ///
    /// A differing type pair without a transformer is a builder error.
    pub fn build(operation: &PhysicalOperation, registry: &dyn TransformerRegistry) -> Result<Self> {
        let inputs = operation
            .source_types
            .iter()
            .zip(&operation.target_types)
            .map(|(source, target)| {
                Self::resolve(
                    operation,
                    source,
                    target,
                    &operation.source_types,
                    &operation.target_types,
                    registry,
                )
            })
            .collect::<Result<Vec<_>>>()?;
        let output = Self::resolve(
            operation,
            &operation.target_output,
            &operation.source_output,
            std::slice::from_ref(&operation.target_output),
            std::slice::from_ref(&operation.source_output),
            registry,
        )?;
        Ok(Self { inputs, output })
    }

    fn resolve(
        operation: &PhysicalOperation,
        source: &DataType,
        target: &DataType,
        in_types: &[DataType],
        out_types: &[DataType],
        registry: &dyn TransformerRegistry,
    ) -> Result<Option<Arc<dyn Transformer>>> {
        if source == target {
            return Ok(None);
        }
        registry
            .get_transformer(source, target, in_types, out_types)?
            .map(Some)
            .ok_or_else(|| {
                Error::builder(format!(
                    "No transformer from {source} to {target} for operation {}",
                    operation.name
                ))
            })
    }

    fn transform_request(&self, body: Value) -> Result<Value> {
        match (self.inputs.as_slice(), body) {
            ([single], body) => Self::apply(single.as_ref(), body),
            (inputs, Value::Array(params)) => params
                .into_iter()
                .enumerate()
                .map(|(i, param)| Self::apply(inputs.get(i).and_then(Option::as_ref), param))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            (_, body) => Ok(body),
        }
    }

    fn apply(transformer: Option<&Arc<dyn Transformer>>, value: Value) -> Result<Value> {
        match transformer {
            Some(t) => t.transform(value),
            None => Ok(value),
        }
    }
}

impl Interceptor for TransformInterceptor {
    fn invoke(&self, operation: &str, mut message: Message, next: &dyn Invoker) -> Result<Message> {
        message.body = self.transform_request(std::mem::take(&mut message.body))?;
        let mut reply = next.invoke(operation, message)?;
        if !reply.fault {
            reply.body = Self::apply(self.output.as_ref(), std::mem::take(&mut reply.body))?;
        }
        Ok(reply)
    }
}
