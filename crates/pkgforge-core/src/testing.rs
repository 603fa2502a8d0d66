//! Test fixtures: a complete defaults document and a snapshot builder.
//!
//! Production code only ever sees the one canonical [`ConfigSnapshot`]; tests
//! that need a valid or deliberately broken configuration assemble it here
//! instead.

use serde_json::{Value, json};

use crate::domain::{
    ConfigSnapshot, ConfigTree, Defaults, EnvMap, ProjectUuid, ResolvedConfig, merge,
};

/// The defaults document as a JSON-model value. Mirrors the shipped
/// `defaults.toml`.
pub fn defaults_value() -> Value {
    json!({
        "project": {
            "license": "MIT",
            "julia_version": "1.10",
            "min_julia_version": "1.10",
            "version": "0.1.0",
            "default_branch": "main"
        },
        "ci": {
            "julia_versions": ["1.10", "1"],
            "os": ["ubuntu-latest"],
            "docs_julia_version": "1",
            "coverage": true
        },
        "github": {
            "create_repo": false,
            "private": false,
            "auto_push": false
        },
        "testing": {
            "aqua": true,
            "rtol": 1e-8,
            "atol": 1e-12,
            "stat_rtol": 0.05,
            "stat_atol": 0.01
        },
        "formatter": {
            "indent": 4,
            "margin": 92,
            "style": "blue",
            "always_for_in": true,
            "whitespace_typedefs": true,
            "whitespace_ops_in_indices": true,
            "remove_extra_newlines": true,
            "import_to_using": false,
            "pipe_to_function_call": false,
            "short_to_long_function_def": false,
            "always_use_return": false,
            "whitespace_in_kwargs": false,
            "annotate_untyped_fields_with_any": false,
            "format_docstrings": true,
            "align_struct_field": true,
            "align_assignment": false,
            "align_conditional": false,
            "normalize_line_endings": "unix"
        },
        "dev": {
            "auto_setup": false,
            "tools": ["Revise", "OhMyREPL", "BenchmarkTools"]
        },
        "features": {
            "tests": true,
            "formatter": true,
            "docs": false,
            "ci": false,
            "dev": false,
            "benchmark": false,
            "logging": false,
            "scientific": false,
            "notebooks": false,
            "result": false
        },
        "logging": {
            "min_level": "Info"
        }
    })
}

/// Loaded [`Defaults`] built from [`defaults_value`].
pub fn defaults_fixture() -> Defaults {
    let tree = ConfigTree::from_value(defaults_value()).expect("fixture is a table");
    Defaults::from_tree(tree).expect("fixture defaults are complete")
}

/// A fully populated identity environment.
pub fn full_env() -> EnvMap {
    [
        ("AUTHOR_NAME", "Ada Lovelace"),
        ("GITHUB_USER", "ada"),
        ("AUTHOR_EMAIL", "ada@example.com"),
        ("PROJECTS_DIR", "/projects"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Builds valid or intentionally invalid snapshots.
///
/// ```rust,ignore
/// let snapshot = SnapshotBuilder::valid().name("").email("broken").build();
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    snapshot: ConfigSnapshot,
}

impl SnapshotBuilder {
    /// A snapshot that passes every pure rule: package `ValidPackage`,
    /// identity from [`full_env`], everything else from [`defaults_fixture`].
    pub fn valid() -> Self {
        let user = ConfigTree::from_value(json!({ "project": { "name": "ValidPackage" } }))
            .expect("literal table");
        Self {
            snapshot: merge(&defaults_fixture(), &user, &full_env()),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.snapshot.metadata.name = name.to_string();
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.snapshot.metadata.author = author.to_string();
        self
    }

    pub fn account(mut self, account: &str) -> Self {
        self.snapshot.metadata.account = account.to_string();
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.snapshot.metadata.email = email.to_string();
        self
    }

    pub fn target_dir(mut self, dir: &str) -> Self {
        self.snapshot.metadata.target_dir = dir.to_string();
        self
    }

    pub fn julia_version(mut self, version: &str) -> Self {
        self.snapshot.metadata.julia_version = version.to_string();
        self
    }

    pub fn language_floor(mut self, version: &str) -> Self {
        self.snapshot.language_floor = version.to_string();
        self
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.snapshot.logging_min_level = level.to_string();
        self
    }

    pub fn create_repo(mut self, on: bool) -> Self {
        self.snapshot.hosting.create_repo = on;
        self
    }

    pub fn private(mut self, on: bool) -> Self {
        self.snapshot.hosting.private = on;
        self
    }

    pub fn auto_push(mut self, on: bool) -> Self {
        self.snapshot.hosting.auto_push = on;
        self
    }

    pub fn dev_auto_setup(mut self, on: bool) -> Self {
        self.snapshot.dev.auto_setup = on;
        self
    }

    /// Set one feature flag, keeping the others.
    pub fn feature(mut self, name: &str, on: bool) -> Self {
        self.snapshot.features.insert(name.to_string(), on);
        self
    }

    /// Replace the feature map with exactly `names`, all enabled.
    pub fn only_features(mut self, names: &[&str]) -> Self {
        self.snapshot.features = names.iter().map(|n| (n.to_string(), true)).collect();
        self
    }

    pub fn env_var(mut self, key: &str, value: &str) -> Self {
        self.snapshot
            .env_vars
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> ConfigSnapshot {
        self.snapshot
    }

    /// Build and attach a fixed identifier.
    pub fn resolved(self) -> ResolvedConfig {
        self.snapshot
            .with_uuid(ProjectUuid::existing("00000000-0000-4000-8000-000000000000"))
    }
}
