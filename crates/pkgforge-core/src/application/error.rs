//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not in the
//! configuration itself. After the validation gate none of them abort a run:
//! the engine records them in its report and keeps going.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Template rendering failed.
    #[error("Template rendering failed for {template}: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// An existing manifest could not be parsed.
    #[error("Manifest at {path} is unreadable: {reason}")]
    CorruptManifest { path: PathBuf, reason: String },

    /// A feature is enabled but no handler is registered for it.
    #[error("No generator is registered for feature '{name}'")]
    FeatureUnavailable { name: String },

    /// An external command could not be run or exited unsuccessfully.
    #[error("`{command}` failed: {reason}")]
    ExternalTool { command: String, reason: String },

    /// Template source directory could not be read.
    #[error("Template store error: {reason}")]
    TemplateStore { reason: String },

    /// A shared lock was poisoned by a panicking writer.
    #[error("Lock poisoned: {resource}")]
    LockPoisoned { resource: &'static str },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::CorruptManifest { path, .. } => vec![
                format!("Fix or remove {}", path.display()),
                "A fresh UUID is generated when the manifest cannot be read".into(),
            ],
            Self::FeatureUnavailable { name } => vec![
                format!("Remove '{}' from [features] or set it to false", name),
                "Run `pkgforge config show` to list the enabled features".into(),
            ],
            Self::ExternalTool { command, .. } => vec![
                format!("Run `{}` manually inside the project", command),
                "Check that the tool is installed and on PATH".into(),
            ],
            Self::TemplateStore { .. } => vec![
                "Check PKGFORGE_TEMPLATES_DIR or --templates".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FeatureUnavailable { .. } => ErrorCategory::NotFound,
            Self::TemplateStore { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. }
            | Self::RenderingFailed { .. }
            | Self::CorruptManifest { .. }
            | Self::ExternalTool { .. }
            | Self::LockPoisoned { .. } => ErrorCategory::Internal,
        }
    }
}
