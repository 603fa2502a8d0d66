// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports keep copies)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("'{value}' is not a valid version number")]
    InvalidVersion { value: String },

    #[error("'{value}' is not a logging level (expected one of Debug, Info, Warn, Error)")]
    UnknownLogLevel { value: String },

    #[error("Path '{path}' must be relative and stay inside the project")]
    InvalidRelativePath { path: String },

    #[error("Configuration tree must be a table, got {found}")]
    NotATable { found: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidVersion { value } => vec![
                format!("Could not parse '{}'", value),
                "Versions are dot-separated numbers, e.g. 1.10 or 1.10.2".into(),
            ],
            Self::UnknownLogLevel { .. } => vec![
                "Set [logging] min_level to Debug, Info, Warn or Error".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidVersion { .. } | Self::UnknownLogLevel { .. } => {
                ErrorCategory::Validation
            }
            Self::InvalidRelativePath { .. } | Self::NotATable { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}

/// Every rule violation found in a merged configuration.
///
/// Produced by the validation gate. The list is complete: validation never
/// stops at the first problem.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Configuration is invalid ({} problem(s) found)", .errors.len())]
pub struct ValidationError {
    pub errors: Vec<String>,
}

impl ValidationError {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }
}
