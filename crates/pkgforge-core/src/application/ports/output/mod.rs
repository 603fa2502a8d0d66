//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `pkgforge-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

use crate::domain::DataBag;
use crate::error::ForgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `pkgforge_adapters::filesystem::LocalFilesystem` (production)
/// - `pkgforge_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Read a whole file as UTF-8.
    fn read_file(&self, path: &Path) -> ForgeResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Resolve symlinks and relative components of an existing path.
    fn canonicalize(&self, path: &Path) -> ForgeResult<PathBuf>;
}

/// Port for template text lookup.
///
/// A template reference is a slash-separated name such as
/// `docs/make.jl`. `None` means no template exists under that name, which
/// callers treat as "nothing to write".
///
/// Implemented by:
/// - `pkgforge_adapters::template_store::BuiltinStore` (embedded templates)
/// - `pkgforge_adapters::template_store::DirectoryStore` (user overrides)
/// - `pkgforge_adapters::template_store::LayeredStore` (override, then builtin)
#[cfg_attr(test, automock)]
pub trait TemplateStore: Send + Sync {
    fn get(&self, template_ref: &str) -> Option<String>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `pkgforge_adapters::renderer::MiniJinjaRenderer`
#[cfg_attr(test, automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render template text against the data bag.
    fn render(&self, template: &str, data: &DataBag) -> ForgeResult<String>;
}

/// The identity-relevant fields of a package manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestInfo {
    pub name: Option<String>,
    pub uuid: Option<String>,
    pub version: Option<String>,
}

/// Port for reading the manifest of an existing project.
///
/// Implemented by:
/// - `pkgforge_adapters::manifest::TomlManifestReader`
#[cfg_attr(test, automock)]
pub trait ManifestReader: Send + Sync {
    /// `Ok(None)` when there is no manifest; an error when one exists but
    /// cannot be parsed.
    fn read(&self, project_path: &Path) -> ForgeResult<Option<ManifestInfo>>;
}

/// Port for locating executables.
///
/// Implemented by:
/// - `pkgforge_adapters::tools::PathToolLocator`
#[cfg_attr(test, automock)]
pub trait ToolLocator: Send + Sync {
    fn locate(&self, tool: &str) -> Option<PathBuf>;
}

/// A program invocation, without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Port for running external programs to completion.
///
/// Implemented by:
/// - `pkgforge_adapters::process::ProcessCommandRunner`
#[cfg_attr(test, automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `command` in `cwd`. A non-zero exit status is an error.
    fn run(&self, command: &CommandSpec, cwd: &Path) -> ForgeResult<()>;
}
