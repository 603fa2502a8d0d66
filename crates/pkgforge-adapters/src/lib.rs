//! Infrastructure adapters for pkgforge.
//!
//! This crate implements the ports defined in `pkgforge-core::application::ports`
//! and the loaders for the three configuration sources. It contains all
//! external dependencies and I/O operations.

pub mod config_loader;
pub mod env_loader;
pub mod filesystem;
pub mod manifest;
pub mod process;
pub mod renderer;
pub mod template_store;
pub mod tools;

// Re-export commonly used adapters
pub use config_loader::{ConfigLoader, DEFAULTS_ENV, DefaultsSource, USER_CONFIG_FILE};
pub use env_loader::{EnvLoader, IDENTITY_FILE_ENV};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use manifest::TomlManifestReader;
pub use process::ProcessCommandRunner;
pub use renderer::MiniJinjaRenderer;
pub use template_store::{BuiltinStore, DirectoryStore, LayeredStore, TEMPLATES_DIR_ENV};
pub use tools::PathToolLocator;
