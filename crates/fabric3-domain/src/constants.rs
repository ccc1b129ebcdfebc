//! Domain layer constants
//!
//! Names and defaults shared by the assembly model, generators and the
//! runtime. Node-specific tunables live in the infrastructure constants.

// ============================================================================
// DOMAIN MODEL CONSTANTS
// ============================================================================

/// Name of the root composite every deployable is included into
pub const DOMAIN_NAME: &str = "domain";

/// URI scheme used for absolute channel and component addresses
pub const DOMAIN_SCHEME: &str = "domain";

/// Sequence assigned to consumers that do not request an ordering
pub const NO_SEQUENCE: i32 = 0;

// ============================================================================
// DATA TYPE CONSTANTS
// ============================================================================

/// Physical type of JSON encoded values
pub const JSON_PHYSICAL_TYPE: &str = "json";

/// Physical type of plain string values
pub const STRING_PHYSICAL_TYPE: &str = "string";

/// Logical type used when any value is accepted
pub const ANY_LOGICAL_TYPE: &str = "any";

// ============================================================================
// IMPLEMENTATION AND BINDING TYPES
// ============================================================================

/// Implementation kind of composite components
pub const COMPOSITE_IMPLEMENTATION: &str = "composite";

/// Channel type of the default in-memory channel
pub const DEFAULT_CHANNEL_TYPE: &str = "default";

/// Interceptor type of the built-in tracing interceptor
pub const TRACE_INTERCEPTOR: &str = "trace";

/// Interceptor type inserted when source and target data types differ
pub const TRANSFORMER_INTERCEPTOR: &str = "transform";
