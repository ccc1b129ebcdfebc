//! Runtime node configuration types

use crate::constants::DEFAULT_RUNTIME_NAME;
use serde::{Deserialize, Serialize};

/// Runtime node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Name written into monitor entries
    pub name: String,

    /// Autowire setting of the domain root
    pub autowire: bool,

    /// Interceptor types added to every wire operation
    pub interceptors: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_RUNTIME_NAME.to_string(),
            autowire: true,
            interceptors: Vec::new(),
        }
    }
}
