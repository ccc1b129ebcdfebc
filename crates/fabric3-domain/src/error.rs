//! Error handling types
//!
//! Recoverable runtime and generation failures. Assembly problems found while
//! instantiating the logical model are not errors; they accumulate as
//! [`AssemblyFailure`](crate::failure::AssemblyFailure) values instead.

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the Fabric3 runtime
#[derive(Error, Debug)]
pub enum Error {
    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Deployment was rejected because instantiation reported assembly failures
    #[error("Assembly failed with {} error(s): {}", failures.len(), failures.join("; "))]
    Assembly {
        /// Rendered assembly failures
        failures: Vec<String>,
    },

    /// Physical generation error; aborts the current generation unit
    #[error("Generation error: {message}")]
    Generation {
        /// Description of the generation error
        message: String,
    },

    /// A consumer or producer referenced a channel that does not exist
    #[error("Channel not found: {uri}")]
    ChannelNotFound {
        /// URI of the missing channel
        uri: String,
    },

    /// A channel with the same URI and side is already registered
    #[error("Channel already exists: {uri}")]
    DuplicateChannel {
        /// URI of the duplicate channel
        uri: String,
    },

    /// Runtime builder or attacher error
    #[error("Builder error: {message}")]
    Builder {
        /// Description of the builder error
        message: String,
    },

    /// Scope container error
    #[error("Container error: {message}")]
    Container {
        /// Description of the container error
        message: String,
    },

    /// Injection failed on one or more sites
    #[error("Injection error: {message}")]
    Injection {
        /// Description of the injection error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Reinjection applied every site but some failed
    #[error("Reinjection failed on {} site(s): {}", failures.len(), failures.join("; "))]
    Reinjection {
        /// One rendered failure per site
        failures: Vec<String>,
    },

    /// Data transformation error
    #[error("Transformation error: {message}")]
    Transformation {
        /// Description of the transformation error
        message: String,
    },

    /// Service invocation error raised by a component or interceptor
    #[error("Invocation error on {operation}: {message}")]
    Invocation {
        /// Operation being invoked
        operation: String,
        /// Description of the failure
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Deployment pipeline error creation methods
impl Error {
    /// Create a generation error
    pub fn generation<S: Into<String>>(message: S) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Create a channel-not-found error
    pub fn channel_not_found<S: Into<String>>(uri: S) -> Self {
        Self::ChannelNotFound { uri: uri.into() }
    }

    /// Create a duplicate channel error
    pub fn duplicate_channel<S: Into<String>>(uri: S) -> Self {
        Self::DuplicateChannel { uri: uri.into() }
    }

    /// Create a builder error
    pub fn builder<S: Into<String>>(message: S) -> Self {
        Self::Builder {
            message: message.into(),
        }
    }

    /// Create a container error
    pub fn container<S: Into<String>>(message: S) -> Self {
        Self::Container {
            message: message.into(),
        }
    }

    /// Create an assembly error from rendered failures
    pub fn assembly(failures: Vec<String>) -> Self {
        Self::Assembly { failures }
    }
}

// Runtime invocation error creation methods
impl Error {
    /// Create an injection error
    pub fn injection<S: Into<String>>(message: S) -> Self {
        Self::Injection {
            message: message.into(),
            source: None,
        }
    }

    /// Create a transformation error
    pub fn transformation<S: Into<String>>(message: S) -> Self {
        Self::Transformation {
            message: message.into(),
        }
    }

    /// Create an invocation error
    pub fn invocation<O: Into<String>, S: Into<String>>(operation: O, message: S) -> Self {
        Self::Invocation {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

// Configuration and infrastructure error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
