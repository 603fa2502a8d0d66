//! The merged configuration value and its identity-bearing extension.
//!
//! A [`ConfigSnapshot`] is built exactly once per run by [`crate::domain::merge`]
//! and is read-only afterwards: its fields are crate-private and only shared
//! references are handed out. Attaching the project identifier produces a new
//! [`ResolvedConfig`] instead of mutating the snapshot.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{error::DomainError, paths, tree::EnvMap};

/// Identity and packaging metadata of the project to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub name: String,
    pub author: String,
    /// Hosting account handle (GitHub user name).
    pub account: String,
    pub email: String,
    /// Parent directory of the project, possibly starting with `~`.
    pub target_dir: String,
    pub license: String,
    pub julia_version: String,
    pub version: String,
    pub default_branch: String,
}

/// Continuous-integration matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiConfig {
    pub julia_versions: Vec<String>,
    pub os: Vec<String>,
    pub docs_julia_version: String,
    pub coverage: bool,
}

/// Remote repository hosting toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostingConfig {
    pub create_repo: bool,
    pub private: bool,
    pub auto_push: bool,
}

/// Test-suite setup and numeric tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestingConfig {
    /// Include the Aqua.jl quality-assurance checks.
    pub aqua: bool,
    pub rtol: f64,
    pub atol: f64,
    /// Tolerances for statistical / stochastic tests.
    pub stat_rtol: f64,
    pub stat_atol: f64,
}

/// Code formatter preferences, one field per `.JuliaFormatter.toml` option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterPrefs {
    pub indent: i64,
    pub margin: i64,
    pub style: String,
    pub always_for_in: bool,
    pub whitespace_typedefs: bool,
    pub whitespace_ops_in_indices: bool,
    pub remove_extra_newlines: bool,
    pub import_to_using: bool,
    pub pipe_to_function_call: bool,
    pub short_to_long_function_def: bool,
    pub always_use_return: bool,
    pub whitespace_in_kwargs: bool,
    pub annotate_untyped_fields_with_any: bool,
    pub format_docstrings: bool,
    pub align_struct_field: bool,
    pub align_assignment: bool,
    pub align_conditional: bool,
    pub normalize_line_endings: String,
}

/// Local development environment extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevWorkspace {
    pub auto_setup: bool,
    /// Packages installed into the user's global environment, in order.
    pub tools: Vec<String>,
}

/// Merged, immutable configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSnapshot {
    pub(crate) metadata: Metadata,
    /// Oldest supported language version, taken from defaults only.
    pub(crate) language_floor: String,
    pub(crate) ci: CiConfig,
    pub(crate) hosting: HostingConfig,
    pub(crate) testing: TestingConfig,
    pub(crate) formatter: FormatterPrefs,
    pub(crate) dev: DevWorkspace,
    pub(crate) features: BTreeMap<String, bool>,
    pub(crate) logging_min_level: String,
    pub(crate) env_vars: EnvMap,
}

impl ConfigSnapshot {
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
    pub fn language_floor(&self) -> &str {
        &self.language_floor
    }
    pub fn ci(&self) -> &CiConfig {
        &self.ci
    }
    pub fn hosting(&self) -> &HostingConfig {
        &self.hosting
    }
    pub fn testing(&self) -> &TestingConfig {
        &self.testing
    }
    pub fn formatter(&self) -> &FormatterPrefs {
        &self.formatter
    }
    pub fn dev(&self) -> &DevWorkspace {
        &self.dev
    }
    pub fn features(&self) -> &BTreeMap<String, bool> {
        &self.features
    }
    pub fn logging_min_level(&self) -> &str {
        &self.logging_min_level
    }
    pub fn env_vars(&self) -> &EnvMap {
        &self.env_vars
    }

    /// `true` only when the feature map holds an explicit `true`.
    pub fn is_enabled(&self, feature: &str) -> bool {
        self.features.get(feature).copied().unwrap_or(false)
    }

    /// `true` only when the feature map holds an explicit `false`.
    pub fn is_explicitly_disabled(&self, feature: &str) -> bool {
        self.features.get(feature) == Some(&false)
    }

    /// Enabled feature names, in sorted order.
    pub fn enabled_features(&self) -> impl Iterator<Item = &str> {
        self.features
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }

    /// Tilde-expanded parent directory.
    pub fn target_dir(&self) -> PathBuf {
        paths::expand_tilde(&self.metadata.target_dir)
    }

    /// `<target dir>/<name>`, the directory generation writes into.
    pub fn project_path(&self) -> PathBuf {
        self.target_dir().join(&self.metadata.name)
    }

    /// Attach the project identifier, producing the value generation consumes.
    pub fn with_uuid(&self, uuid: ProjectUuid) -> ResolvedConfig {
        ResolvedConfig {
            snapshot: self.clone(),
            uuid,
        }
    }
}

/// Stable unique identifier of a generated package.
///
/// Values read back from an existing manifest are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectUuid(String);

impl ProjectUuid {
    /// Mint a fresh random (version 4) identifier.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Reuse an identifier found in an existing manifest.
    pub fn existing(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated snapshot plus its resolved identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    #[serde(flatten)]
    snapshot: ConfigSnapshot,
    uuid: ProjectUuid,
}

impl ResolvedConfig {
    pub fn snapshot(&self) -> &ConfigSnapshot {
        &self.snapshot
    }

    pub fn uuid(&self) -> &ProjectUuid {
        &self.uuid
    }

    pub fn project_path(&self) -> PathBuf {
        self.snapshot.project_path()
    }
}

/// Minimum level of the generated package's logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [Self::Debug, Self::Info, Self::Warn, Self::Error];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Info => "Info",
            Self::Warn => "Warn",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownLogLevel {
                value: s.to_string(),
            })
    }
}
