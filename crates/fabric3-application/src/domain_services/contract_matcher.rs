//! Default contract matcher
//!
//! Interfaces are compared by name first. Outside strict mode a service also
//! satisfies a reference when it extends the reference interface or offers
//! every reference operation with the same logical signature.

use fabric3_domain::ports::{ContractMatcher, MatchResult};
use fabric3_domain::{DataType, Operation, ServiceContract};

/// Name and signature based contract matcher
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultContractMatcher;

impl DefaultContractMatcher {
    /// Create a matcher
    pub fn new() -> Self {
        Self
    }

    fn compatible(source: &DataType, target: &DataType) -> bool {
        source.logical == target.logical
            || source.logical == fabric3_domain::constants::ANY_LOGICAL_TYPE
            || target.logical == fabric3_domain::constants::ANY_LOGICAL_TYPE
    }

    fn operation_matches(source: &Operation, target: &Operation) -> Result<(), String> {
        if source.input_types.len() != target.input_types.len() {
            return Err(format!(
                "Operation {} has {} parameter(s) on the reference and {} on the service",
                source.name,
                source.input_types.len(),
                target.input_types.len()
            ));
        }
        if let Some((s, t)) = source
            .input_types
            .iter()
            .zip(&target.input_types)
            .find(|(s, t)| !Self::compatible(s, t))
        {
            return Err(format!(
                "Parameter types of operation {} do not match: {s} and {t}",
                source.name
            ));
        }
        if !Self::compatible(&source.output_type, &target.output_type) {
            return Err(format!(
                "Return types of operation {} do not match: {} and {}",
                source.name, source.output_type, target.output_type
            ));
        }
        if source.one_way != target.one_way {
            return Err(format!(
                "Operation {} is one-way on only one side",
                source.name
            ));
        }
        Ok(())
    }

    fn structural(source: &ServiceContract, target: &ServiceContract) -> Result<(), String> {
        for operation in &source.operations {
            let Some(candidate) = target.operation(&operation.name) else {
                return Err(format!(
                    "Operation {} not found on service interface {}",
                    operation.name, target.interface
                ));
            };
            Self::operation_matches(operation, candidate)?;
        }
        Ok(())
    }
}

impl ContractMatcher for DefaultContractMatcher {
    fn is_assignable_from(
        &self,
        source: &ServiceContract,
        target: &ServiceContract,
        strict: bool,
        report_errors: bool,
    ) -> MatchResult {
        let fail = |reason: String| {
            if report_errors {
                MatchResult::no_match(reason)
            } else {
                MatchResult::NO_MATCH
            }
        };

        match (&source.callback, &target.callback) {
            (Some(source_cb), Some(target_cb)) => {
                let result = self.is_assignable_from(source_cb, target_cb, strict, report_errors);
                if !result.is_assignable() {
                    return result;
                }
            }
            (Some(_), None) => {
                return fail(format!(
                    "Reference interface {} requires a callback but {} has none",
                    source.interface, target.interface
                ));
            }
            _ => {}
        }

        if source.interface == target.interface {
            return MatchResult::MATCH;
        }
        if strict {
            return fail(format!(
                "Interfaces {} and {} differ",
                source.interface, target.interface
            ));
        }
        if target.supertypes.iter().any(|s| *s == source.interface) {
            return MatchResult::MATCH;
        }
        if source.operations.is_empty() {
            // nothing to compare structurally; names already differ
            return fail(format!(
                "Interfaces {} and {} differ",
                source.interface, target.interface
            ));
        }
        match Self::structural(source, target) {
            Ok(()) => MatchResult::MATCH,
            Err(reason) => fail(reason),
        }
    }
}
