//! Failure taxonomy for the provisioning pipeline.
//!
//! Each boundary owns one error kind: property access raises [`PropError`],
//! configuration loading raises [`ConfigError`], stack definition raises
//! [`StackError`], and the orchestrator unifies everything into
//! [`TemplateError`] — the only kind visible to callers. Every failure is
//! caught once, wrapped once, and never retried: configuration and resource
//! definition are deterministic, so a retry with unchanged input would fail
//! identically.

use thiserror::Error;

/// Property access failure raised by [`AppProps`](super::props::AppProps)
/// accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropError {
    /// The requested key was never written.
    #[error("missing property: {0}")]
    Missing(String),

    /// The key is present but its value is not `true`/`false`
    /// (case-insensitive). Malformed booleans fail loudly rather than
    /// defaulting to false.
    #[error("property '{key}' is not a boolean: '{value}'")]
    NotABoolean { key: String, value: String },
}

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A mandatory selector or seeded property was absent.
    #[error(transparent)]
    Property(#[from] PropError),

    /// A layer document could not be located, read, or parsed. I/O and
    /// parse failures are not distinguished at this boundary; the attempted
    /// location is always carried.
    #[error("unable to load configuration document {location}: {reason}")]
    Load { location: String, reason: String },
}

/// A stack's resource-definition step failed.
///
/// Carries the stack name and the originating message. A failed stack
/// commits no resources to the application context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("stack '{stack}' failed to define resources: {message}")]
pub struct StackError {
    pub stack: String,
    pub message: String,
}

impl StackError {
    pub fn new(stack: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self {
            stack: stack.into(),
            message: message.to_string(),
        }
    }
}

/// The unified top-level failure.
///
/// Internal distinctions survive only in the message text, mirroring the
/// single failure kind the process reports before exiting non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TemplateError {
    pub message: String,
}

impl TemplateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<PropError> for TemplateError {
    fn from(e: PropError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for TemplateError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<StackError> for TemplateError {
    fn from(e: StackError) -> Self {
        Self::new(e.to_string())
    }
}
