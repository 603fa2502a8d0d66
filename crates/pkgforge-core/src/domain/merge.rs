//! Three-source configuration merge.
//!
//! Precedence, highest first:
//!
//! | field                        | sources                                   |
//! |------------------------------|-------------------------------------------|
//! | project name                 | user only                                 |
//! | author, account, email, dir  | env only                                  |
//! | license, versions, branch    | user > defaults                           |
//! | ci, github, testing, dev     | per key, user > defaults                  |
//! | formatter option `k`         | `features.formatter_k` > `formatter.k` > defaults |
//! | features                     | shallow, user > defaults                  |
//! | logging level                | user > defaults                           |
//! | language floor               | defaults only                             |
//!
//! The merge is total. A user value whose type differs from the defaults
//! value for the same key is dropped with a warning.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::{
    defaults::{Defaults, FORMATTER_KEYS},
    snapshot::{ConfigSnapshot, Metadata},
    tree::{ConfigTree, EnvMap, ValueKind, same_shape},
};

/// Environment keys consumed by metadata; everything else passes through.
pub const AUTHOR_NAME: &str = "AUTHOR_NAME";
pub const GITHUB_USER: &str = "GITHUB_USER";
pub const AUTHOR_EMAIL: &str = "AUTHOR_EMAIL";
pub const PROJECTS_DIR: &str = "PROJECTS_DIR";

pub const CLAIMED_ENV_KEYS: [&str; 4] = [AUTHOR_NAME, GITHUB_USER, AUTHOR_EMAIL, PROJECTS_DIR];

/// Prefix marking a formatter override inside the `[features]` table.
pub const FORMATTER_FEATURE_PREFIX: &str = "formatter_";

/// Combine defaults, user overrides and environment identity.
pub fn merge(defaults: &Defaults, user: &ConfigTree, env: &EnvMap) -> ConfigSnapshot {
    let doc = defaults.document();
    let base = defaults.tree();

    let project_string = |key: &str, fallback: &str| -> String {
        user_string(user, &format!("project.{key}")).unwrap_or_else(|| fallback.to_string())
    };

    let env_value = |key: &str| env.get(key).cloned().unwrap_or_default();

    let metadata = Metadata {
        name: project_string("name", ""),
        author: env_value(AUTHOR_NAME),
        account: env_value(GITHUB_USER),
        email: env_value(AUTHOR_EMAIL),
        target_dir: env_value(PROJECTS_DIR),
        license: project_string("license", &doc.project.license),
        julia_version: project_string("julia_version", &doc.project.julia_version),
        version: project_string("version", &doc.project.version),
        default_branch: project_string("default_branch", &doc.project.default_branch),
    };

    let logging_min_level = user_string(user, "logging.min_level")
        .unwrap_or_else(|| doc.logging.min_level.clone());

    ConfigSnapshot {
        metadata,
        language_floor: doc.project.min_julia_version.clone(),
        ci: merge_section(base, user, "ci", &doc.ci),
        hosting: merge_section(base, user, "github", &doc.github),
        testing: merge_section(base, user, "testing", &doc.testing),
        formatter: merge_formatter(base, user, &doc.formatter),
        dev: merge_section(base, user, "dev", &doc.dev),
        features: merge_features(defaults, user),
        logging_min_level,
        env_vars: env
            .iter()
            .filter(|(k, _)| !CLAIMED_ENV_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    }
}

fn user_string(user: &ConfigTree, dotted: &str) -> Option<String> {
    match user.get(dotted)? {
        Value::String(s) => Some(s.clone()),
        other => {
            reject(dotted, ValueKind::String, other);
            None
        }
    }
}

fn reject(key: &str, expected: ValueKind, found: &Value) {
    warn!(
        key,
        expected = %expected,
        found = %ValueKind::of(found),
        "Ignoring user setting with wrong type, keeping default"
    );
}

/// Overlay one user table onto the matching defaults table, key by key.
fn merge_section<T>(base: &ConfigTree, user: &ConfigTree, section: &str, fallback: &T) -> T
where
    T: DeserializeOwned + Clone,
{
    let Some(defaults) = base.section(section) else {
        return fallback.clone();
    };
    let mut merged = defaults.clone();

    match user.as_map().get(section) {
        None => {}
        Some(Value::Object(overrides)) => {
            for (key, value) in overrides {
                let dotted = format!("{section}.{key}");
                match defaults.get(key) {
                    Some(default) if same_shape(default, value) => {
                        merged.insert(key.clone(), value.clone());
                    }
                    Some(default) => reject(&dotted, ValueKind::of(default), value),
                    None => debug!(key = %dotted, "Ignoring unknown setting"),
                }
            }
        }
        Some(other) => reject(section, ValueKind::Table, other),
    }

    deserialize_or(merged, section, fallback)
}

/// Resolve each formatter option through its three possible sources.
fn merge_formatter<T>(base: &ConfigTree, user: &ConfigTree, fallback: &T) -> T
where
    T: DeserializeOwned + Clone,
{
    let Some(defaults) = base.section("formatter") else {
        return fallback.clone();
    };
    let mut merged = Map::new();

    for key in FORMATTER_KEYS {
        let Some(default) = defaults.get(key) else {
            continue;
        };
        let feature_key = format!("features.{FORMATTER_FEATURE_PREFIX}{key}");
        let section_key = format!("formatter.{key}");

        let chosen = [feature_key, section_key]
            .into_iter()
            .filter_map(|dotted| user.get(&dotted).map(|v| (dotted, v)))
            .find(|(dotted, candidate)| {
                let ok = same_shape(default, candidate);
                if !ok {
                    reject(dotted, ValueKind::of(default), candidate);
                }
                ok
            })
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| default.clone());

        merged.insert(key.to_string(), chosen);
    }

    deserialize_or(merged, "formatter", fallback)
}

fn merge_features(defaults: &Defaults, user: &ConfigTree) -> BTreeMap<String, bool> {
    let mut features = defaults.document().features.clone();
    let Some(overrides) = user.section("features") else {
        return features;
    };
    for (key, value) in overrides {
        if key.starts_with(FORMATTER_FEATURE_PREFIX) {
            continue;
        }
        match value {
            Value::Bool(on) => {
                features.insert(key.clone(), *on);
            }
            other => reject(&format!("features.{key}"), ValueKind::Bool, other),
        }
    }
    features
}

fn deserialize_or<T>(map: Map<String, Value>, section: &str, fallback: &T) -> T
where
    T: DeserializeOwned + Clone,
{
    serde_json::from_value(Value::Object(map)).unwrap_or_else(|e| {
        warn!(section, error = %e, "Merged section does not fit the schema, using defaults");
        fallback.clone()
    })
}
