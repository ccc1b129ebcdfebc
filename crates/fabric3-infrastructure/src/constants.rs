//! Infrastructure layer constants
//!
//! Contains constants that are part of the runtime node implementation.
//! Assembly constants are defined in `fabric3_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "fabric3.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "fabric3";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "F3";

/// Environment variable overriding the log filter
pub const LOG_ENV_VAR: &str = "F3_LOG";

/// Default runtime name
pub const DEFAULT_RUNTIME_NAME: &str = "vm";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file stem when none can be derived from the configured path
pub const DEFAULT_LOG_FILE_STEM: &str = "fabric3";

// ============================================================================
// MONITOR CONSTANTS
// ============================================================================

/// Bytes reserved per monitor entry
pub const MONITOR_ENTRY_CAPACITY: usize = 2000;

/// Number of entries in the monitor ring
pub const MONITOR_RING_SIZE: usize = 65536;

/// Timestamp format of rendered monitor entries (chrono syntax)
pub const MONITOR_TIMESTAMP_PATTERN: &str = "%d:%m:%Y %H:%M:%S%.3f";

/// Name of the destination every runtime has
pub const DEFAULT_MONITOR_DESTINATION: &str = "default";

// ============================================================================
// CHANNEL CONSTANTS
// ============================================================================

/// Capacity of the queue feeding an asynchronous fan-out
pub const CHANNEL_QUEUE_CAPACITY: usize = 1024;

/// Binding type of the in-process channel and wire binding
pub const LOCAL_BINDING: &str = "local";
