//! Invocation chains

use std::sync::Arc;

use fabric3_domain::ports::{Interceptor, Invoker};
use fabric3_domain::{Message, Result};

/// The interceptors of one wire operation followed by the target invoker
pub struct InvocationChain {
    operation: String,
    interceptors: Vec<Arc<dyn Interceptor>>,
    target: Arc<dyn Invoker>,
}

impl InvocationChain {
    /// Create a chain
    pub fn new(
        operation: impl Into<String>,
        interceptors: Vec<Arc<dyn Interceptor>>,
        target: Arc<dyn Invoker>,
    ) -> Self {
        Self {
            operation: operation.into(),
            interceptors,
            target,
        }
    }

    /// Operation handled
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Number of interceptors ahead of the target
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// True if invocations go straight to the target
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

impl Invoker for InvocationChain {
    fn invoke(&self, operation: &str, message: Message) -> Result<Message> {
        Next {
            interceptors: &self.interceptors,
            target: self.target.as_ref(),
        }
        .invoke(operation, message)
    }
}

/// Remainder of a chain
struct Next<'a> {
    interceptors: &'a [Arc<dyn Interceptor>],
    target: &'a dyn Invoker,
}

impl Invoker for Next<'_> {
    fn invoke(&self, operation: &str, message: Message) -> Result<Message> {
        match self.interceptors.split_first() {
            Some((head, rest)) => head.invoke(
                operation,
                message,
                &Next {
                    interceptors: rest,
                    target: self.target,
                },
            ),
            None => self.target.invoke(operation, message),
        }
    }
}
