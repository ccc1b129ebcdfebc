//! Contract matching port

use crate::value_objects::ServiceContract;

/// Outcome of a contract assignability test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    assignable: bool,
    error: Option<String>,
}

impl MatchResult {
    /// The contracts are assignable
    pub const MATCH: MatchResult = MatchResult {
        assignable: true,
        error: None,
    };

    /// The contracts are not assignable, with no further explanation
    pub const NO_MATCH: MatchResult = MatchResult {
        assignable: false,
        error: None,
    };

    /// The contracts are not assignable for the given reason
    pub fn no_match(error: impl Into<String>) -> Self {
        Self {
            assignable: false,
            error: Some(error.into()),
        }
    }

    /// True if the target can satisfy the source
    pub fn is_assignable(&self) -> bool {
        self.assignable
    }

    /// Reason the match failed, when reported
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Decides whether a service contract can satisfy a reference contract
pub trait ContractMatcher: Send + Sync {
    /// Test whether `target` (a service contract) is assignable to `source`
    /// (a reference contract)
    ///
    /// In strict mode interfaces must be identical; otherwise a target that
    /// lists the source interface as a supertype, or that offers every source
    /// operation with compatible types, also matches. `report_errors` asks
    /// for a reason on failure.
    fn is_assignable_from(
        &self,
        source: &ServiceContract,
        target: &ServiceContract,
        strict: bool,
        report_errors: bool,
    ) -> MatchResult;
}
