//! Assembly failures
//!
//! Problems found while instantiating or autowiring the logical model do not
//! abort the pass. They are collected in an [`InstantiationContext`] so a
//! single deployment attempt reports every problem at once.

use std::fmt;

/// An assembly-time problem reported during instantiation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyFailure {
    /// A component with the same URI already exists in the parent composite
    DuplicateComponent {
        /// URI of the duplicate component
        component_uri: String,
        /// Contribution the component was loaded from
        contribution_uri: Option<String>,
    },
    /// A required reference has no wires and no bindings, or an explicit
    /// target does not exist
    ReferenceNotFound {
        /// Human readable description
        message: String,
        /// URI of the unresolved reference
        reference_uri: String,
        /// URI of the component owning the reference
        component_uri: String,
        /// Contribution the component was loaded from
        contribution_uri: Option<String>,
    },
    /// A binding type is not supported by the domain
    BindingNotFound {
        /// URI of the bindable owning the binding
        bindable_uri: String,
        /// The unknown binding type
        binding_type: String,
    },
    /// A required property has neither a configured nor a default value
    PropertyNotFound {
        /// Property name
        property: String,
        /// URI of the component declaring the property
        component_uri: String,
    },
    /// A channel with the same URI already exists in the composite
    DuplicateChannel {
        /// URI of the duplicate channel
        channel_uri: String,
    },
    /// An explicit target names a component exposing several services
    AmbiguousService {
        /// URI of the reference naming the target
        reference_uri: String,
        /// The ambiguous target
        target: String,
    },
}

impl AssemblyFailure {
    /// URI of the component, reference or channel the failure refers to
    pub fn subject_uri(&self) -> &str {
        match self {
            Self::DuplicateComponent { component_uri, .. }
            | Self::ReferenceNotFound { component_uri, .. }
            | Self::PropertyNotFound { component_uri, .. } => component_uri,
            Self::BindingNotFound { bindable_uri, .. } => bindable_uri,
            Self::DuplicateChannel { channel_uri } => channel_uri,
            Self::AmbiguousService { reference_uri, .. } => reference_uri,
        }
    }
}

impl fmt::Display for AssemblyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateComponent { component_uri, .. } => {
                write!(f, "Duplicate component: {component_uri}")
            }
            Self::ReferenceNotFound { message, .. } => f.write_str(message),
            Self::BindingNotFound {
                bindable_uri,
                binding_type,
            } => write!(f, "Binding type {binding_type} not found for {bindable_uri}"),
            Self::PropertyNotFound {
                property,
                component_uri,
            } => write!(
                f,
                "Required property {property} not set on component {component_uri}"
            ),
            Self::DuplicateChannel { channel_uri } => write!(f, "Duplicate channel: {channel_uri}"),
            Self::AmbiguousService {
                reference_uri,
                target,
            } => write!(
                f,
                "Target {target} of reference {reference_uri} offers several services; a service name is required"
            ),
        }
    }
}

/// Collects assembly failures raised during one instantiation pass
#[derive(Debug, Default)]
pub struct InstantiationContext {
    errors: Vec<AssemblyFailure>,
}

impl InstantiationContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure
    pub fn add_error(&mut self, failure: AssemblyFailure) {
        self.errors.push(failure);
    }

    /// Returns true if any failure was recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Recorded failures in reporting order
    pub fn errors(&self) -> &[AssemblyFailure] {
        &self.errors
    }

    /// Convert the recorded failures into an [`Error::Assembly`](crate::Error::Assembly)
    pub fn into_result(self) -> crate::Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(crate::Error::assembly(
                self.errors.iter().map(ToString::to_string).collect(),
            ))
        }
    }
}
