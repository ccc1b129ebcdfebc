//! Monitor levels

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a monitor event, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorLevel {
    /// Failures needing attention
    Severe,
    /// Recoverable problems
    Warning,
    /// Lifecycle information
    Info,
    /// Diagnostic detail
    Debug,
    /// Fine-grained tracing
    Trace,
}

impl MonitorLevel {
    /// Upper-case label used in rendered entries
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Severe => "SEVERE",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }

    /// True if an event of this level passes a threshold
    pub fn is_enabled(self, threshold: MonitorLevel) -> bool {
        self <= threshold
    }
}

impl fmt::Display for MonitorLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
