//! Core domain layer for pkgforge.
//!
//! This module contains pure logic with no I/O: configuration trees, the
//! defaults schema, the merge, the immutable snapshot, validation rules,
//! version numbers and the template data bag. Everything that touches the
//! filesystem, the process environment or external tools goes through the
//! ports defined in the application layer.
//!
//! ## Guarantees
//!
//! - **No I/O**: no filesystem, network or process calls
//! - **Immutable values**: a snapshot is built once and only ever borrowed
//! - **Zero fallback**: every default value comes from the loaded defaults

pub mod common;
pub mod data_bag;
pub mod defaults;
pub mod error;
pub mod merge;
pub mod paths;
pub mod rules;
pub mod snapshot;
pub mod tree;
pub mod version;

pub use common::RelativePath;
pub use data_bag::DataBag;
pub use defaults::{Defaults, DefaultsDocument, FORMATTER_KEYS};
pub use error::{DomainError, ErrorCategory, ValidationError};
pub use merge::{CLAIMED_ENV_KEYS, merge};
pub use snapshot::{
    CiConfig, ConfigSnapshot, DevWorkspace, FormatterPrefs, HostingConfig, LogLevel, Metadata,
    ProjectUuid, ResolvedConfig, TestingConfig,
};
pub use tree::{ConfigTree, EnvMap, ValueKind};
pub use version::LanguageVersion;
