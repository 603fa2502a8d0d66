//! The shipped defaults document, which doubles as the configuration schema.
//!
//! Defaults are loaded once at process start and passed down explicitly.
//! Loading checks completeness up front: every key the merge or the
//! validation rules read must be present, so nothing downstream ever needs
//! an implicit fallback value.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::{
    snapshot::{CiConfig, DevWorkspace, FormatterPrefs, HostingConfig, TestingConfig},
    tree::ConfigTree,
};
use crate::error::{ForgeError, ForgeResult};

/// Formatter option names, in `.JuliaFormatter.toml` order.
pub const FORMATTER_KEYS: [&str; 18] = [
    "indent",
    "margin",
    "style",
    "always_for_in",
    "whitespace_typedefs",
    "whitespace_ops_in_indices",
    "remove_extra_newlines",
    "import_to_using",
    "pipe_to_function_call",
    "short_to_long_function_def",
    "always_use_return",
    "whitespace_in_kwargs",
    "annotate_untyped_fields_with_any",
    "format_docstrings",
    "align_struct_field",
    "align_assignment",
    "align_conditional",
    "normalize_line_endings",
];

/// Scalar keys that must be present outside the formatter block.
pub const REQUIRED_KEYS: [&str; 22] = [
    "project.license",
    "project.julia_version",
    "project.min_julia_version",
    "project.version",
    "project.default_branch",
    "ci.julia_versions",
    "ci.os",
    "ci.docs_julia_version",
    "ci.coverage",
    "github.create_repo",
    "github.private",
    "github.auto_push",
    "testing.aqua",
    "testing.rtol",
    "testing.atol",
    "testing.stat_rtol",
    "testing.stat_atol",
    "dev.auto_setup",
    "dev.tools",
    "features",
    "logging.min_level",
    "formatter",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectDefaults {
    pub license: String,
    pub julia_version: String,
    pub min_julia_version: String,
    pub version: String,
    pub default_branch: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingDefaults {
    pub min_level: String,
}

/// Typed view of the defaults. No field has a serde default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DefaultsDocument {
    pub project: ProjectDefaults,
    pub ci: CiConfig,
    pub github: HostingConfig,
    pub testing: TestingConfig,
    pub formatter: FormatterPrefs,
    pub dev: DevWorkspace,
    pub features: BTreeMap<String, bool>,
    pub logging: LoggingDefaults,
}

/// Complete defaults: the raw tree (for type checks during merge) plus the
/// typed document (for fallbacks).
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    tree: ConfigTree,
    document: DefaultsDocument,
}

impl Defaults {
    /// Check a parsed defaults tree for completeness and wrap it.
    ///
    /// # Errors
    ///
    /// [`ForgeError::Configuration`] naming the first missing key, or the
    /// serde error when a value has the wrong type.
    pub fn from_tree(tree: ConfigTree) -> ForgeResult<Self> {
        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .map(|k| k.to_string())
            .chain(FORMATTER_KEYS.iter().map(|k| format!("formatter.{k}")))
            .filter(|k| tree.get(k).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ForgeError::configuration(format!(
                "defaults are incomplete, missing: {}",
                missing.join(", ")
            )));
        }

        let document: DefaultsDocument =
            serde_json::from_value(serde_json::Value::Object(tree.as_map().clone())).map_err(
                |e| ForgeError::configuration(format!("defaults do not match the schema: {e}")),
            )?;

        Ok(Self { tree, document })
    }

    pub fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    pub fn document(&self) -> &DefaultsDocument {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::defaults_value;

    #[test]
    fn complete_defaults_load() {
        let defaults = Defaults::from_tree(ConfigTree::from_value(defaults_value()).unwrap()).unwrap();
        assert_eq!(defaults.document().project.license, "MIT");
        assert_eq!(defaults.document().formatter.margin, 92);
    }

    #[test]
    fn missing_key_is_named() {
        let mut value = defaults_value();
        value["formatter"].as_object_mut().unwrap().remove("margin");
        value["ci"].as_object_mut().unwrap().remove("os");
        let err = Defaults::from_tree(ConfigTree::from_value(value).unwrap()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("formatter.margin"), "{msg}");
        assert!(msg.contains("ci.os"), "{msg}");
    }

    #[test]
    fn wrong_type_is_a_configuration_error() {
        let mut value = defaults_value();
        value["github"]["private"] = serde_json::json!("yes");
        let err = Defaults::from_tree(ConfigTree::from_value(value).unwrap()).unwrap_err();
        assert!(matches!(err, ForgeError::Configuration { .. }));
    }
}
