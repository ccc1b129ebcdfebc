//! Context extension for foreign errors
//!
//! Converts I/O, serialization and configuration errors into the domain
//! [`Error`], keeping the original as the source.

use std::fmt::Display;

use fabric3_domain::{Error, Result};

type Source = Box<dyn std::error::Error + Send + Sync>;

/// Extension trait converting foreign errors with a context message
///
/// ```ignore
/// let handle = thread::Builder::new()
///     .spawn(run)
///     .io_context("Failed to start the monitor handler thread")?;
/// ```
pub trait ErrorContext<T> {
    /// Convert into [`Error::Infrastructure`]
    fn context(self, context: impl Display) -> Result<T>;

    /// Convert into [`Error::Io`]
    fn io_context(self, context: impl Display) -> Result<T>;

    /// Convert into [`Error::Configuration`]
    fn config_context(self, context: impl Display) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Display) -> Result<T> {
        self.map_err(|err| {
            let (message, source) = describe(&context, err);
            Error::Infrastructure { message, source }
        })
    }

    fn io_context(self, context: impl Display) -> Result<T> {
        self.map_err(|err| {
            let (message, source) = describe(&context, err);
            Error::Io { message, source }
        })
    }

    fn config_context(self, context: impl Display) -> Result<T> {
        self.map_err(|err| {
            let (message, source) = describe(&context, err);
            Error::Configuration { message, source }
        })
    }
}

fn describe<E>(context: &impl Display, err: E) -> (String, Option<Source>)
where
    E: std::error::Error + Send + Sync + 'static,
{
    (format!("{context}: {err}"), Some(Box::new(err)))
}
