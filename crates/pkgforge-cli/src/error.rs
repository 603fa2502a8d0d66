//! CLI error type and its mapping to messages and exit codes.

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use pkgforge_core::error::{ErrorCategory as CoreCategory, ForgeError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (missing or malformed flag values).
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `config get` on a key the merged configuration does not have.
    #[error("Unknown configuration key '{key}'")]
    UnknownKey { key: String },

    /// An error propagated from `pkgforge-core` or the adapters.
    #[error(transparent)]
    Core(#[from] ForgeError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a command's output.
    #[error("Could not serialize output: {message}")]
    Output { message: String },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// What the user can do about it. For validation failures these are
    /// the individual problems.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["Run with --help to see every flag".into()],
            Self::UnknownKey { .. } => vec![
                "`pkgforge config show` prints every key".into(),
                "Keys are dotted paths such as `project.name` or `features.docs`".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::IoError { .. } => vec!["Check that the path exists and is writable".into()],
            Self::Output { .. } => Vec::new(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::UnknownKey { .. } => ErrorCategory::NotFound,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::Input,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } | Self::Output { .. } => ErrorCategory::Internal,
        }
    }

    /// Process exit status: 2 input, 3 not found, 4 configuration, 1 anything else.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Input => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, true)
    }

    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, false)
    }

    /// Message, cause chain (verbose only), then the suggestion block.
    fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, f: fn(&str) -> String| {
            if color { f(text) } else { text.to_owned() }
        };
        let mut out = format!(
            "\n{} {}\n",
            paint("Error:", |t| t.red().bold().to_string()),
            self
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let line = format!("  caused by: {err}");
                out.push_str(&paint(&line, |t| t.dimmed().to_string()));
                out.push('\n');
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let heading = match self {
                Self::Core(ForgeError::Validation(_)) => "Problems:",
                _ => "Suggestions:",
            };
            out.push_str(&format!(
                "\n{}\n",
                paint(heading, |t| t.yellow().bold().to_string())
            ));
            for line in &suggestions {
                out.push_str(&format!("  {line}\n"));
            }
        }

        if !verbose {
            out.push_str(&paint(
                "\nRun again with -v for more detail.\n",
                |t| t.dimmed().to_string(),
            ));
        }
        out
    }

    /// Record the failure in the diagnostic stream.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::NotFound => {
                tracing::warn!(error = %self, "command rejected")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(error = %self, "command failed")
            }
        }
        if let Some(source) = self.source() {
            tracing::debug!(%source, "underlying cause");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad flags or a configuration that failed validation.
    Input,
    NotFound,
    /// A source file is missing or unreadable.
    Configuration,
    Internal,
}

/// Attach a message to I/O errors at the call site.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}
