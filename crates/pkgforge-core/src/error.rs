//! Unified error handling for pkgforge Core.
//!
//! This module provides a unified error type that wraps domain, validation and
//! application errors, with user-actionable suggestions.
//!
//! Only two kinds of error are fatal for a generation run: [`ForgeError::Configuration`]
//! and [`ForgeError::Validation`]. Both are raised before anything touches
//! the target project. Everything that fails after the validation gate is
//! recorded in a report and logged instead of being propagated.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, ValidationError};

/// Root error type for pkgforge Core operations.
#[derive(Debug, Error, Clone)]
pub enum ForgeError {
    /// Errors from the domain layer (malformed values).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// The merged configuration failed one or more validation rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Errors from the application layer (I/O, rendering, external tools).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// A configuration source is missing, unparseable or incomplete.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl ForgeError {
    /// Shorthand for a [`ForgeError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Validation(e) => e.errors.iter().map(|m| format!("• {m}")).collect(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Run `pkgforge init` to create a fresh pkgforge.toml".into(),
                "Run `pkgforge setup` to (re)create your identity file".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in pkgforge".into(),
                "Please report this issue at: https://github.com/cosecruz/pkgforge/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether this error must stop the run before any project mutation.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::Validation(_) | Self::Internal { .. }
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Wrap the error as a [`ForgeError::Configuration`] with a message prefix.
    fn config_context(self, msg: impl Into<String>) -> ForgeResult<T>;

    /// Wrap the error as a [`ForgeError::Internal`] with a message prefix.
    fn context(self, msg: impl Into<String>) -> ForgeResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn config_context(self, msg: impl Into<String>) -> ForgeResult<T> {
        self.map_err(|e| ForgeError::Configuration {
            message: format!("{}: {}", msg.into(), e),
        })
    }

    fn context(self, msg: impl Into<String>) -> ForgeResult<T> {
        self.map_err(|e| ForgeError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
