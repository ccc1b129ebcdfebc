//! Wire proxies

use std::collections::HashMap;
use std::sync::Arc;

use fabric3_domain::ports::Invoker;
use fabric3_domain::{Error, Message, Result};

/// Source-side handle of a wire
///
/// Operation names are resolved to chain indexes once, when the wire is
/// attached.
pub struct WireProxy {
    index: HashMap<String, usize>,
    chains: Vec<Arc<dyn Invoker>>,
}

impl WireProxy {
    /// Proxy over one chain per operation
    pub fn new(chains: Vec<(String, Arc<dyn Invoker>)>) -> Self {
        let mut index = HashMap::with_capacity(chains.len());
        let mut invokers = Vec::with_capacity(chains.len());
        for (position, (operation, chain)) in chains.into_iter().enumerate() {
            index.insert(operation, position);
            invokers.push(chain);
        }
        Self {
            index,
            chains: invokers,
        }
    }

    /// Proxy dispatching every operation straight to one invoker
    pub fn direct<I>(operations: I, target: Arc<dyn Invoker>) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            index: operations.into_iter().map(|op| (op, 0)).collect(),
            chains: vec![target],
        }
    }

    /// Chain index of an operation
    pub fn operation_index(&self, operation: &str) -> Option<usize> {
        self.index.get(operation).copied()
    }

    /// Invoke by previously resolved index
    pub fn invoke_index(&self, index: usize, operation: &str, message: Message) -> Result<Message> {
        self.chains
            .get(index)
            .ok_or_else(|| Error::invocation(operation, "operation index out of range"))?
            .invoke(operation, message)
    }
}

impl Invoker for WireProxy {
    fn invoke(&self, operation: &str, message: Message) -> Result<Message> {
        let index = self
            .operation_index(operation)
            .ok_or_else(|| Error::invocation(operation, "operation not found on wire"))?;
        self.invoke_index(index, operation, message)
    }
}
