//! The variable map handed to the template renderer.
//!
//! Built once per generation run by a pure function of the resolved
//! configuration. This is the whole contract between the engine and the
//! templates: every file is rendered against the same bag.
//!
//! ## Variables
//!
//! | Variable | Example | Source |
//! |----------|---------|--------|
//! | `PKG` | `"FooBar"` | project name |
//! | `PKG_SNAKE` | `"foo_bar"` | computed |
//! | `PKG_KEBAB` | `"foo-bar"` | computed |
//! | `UUID` | `"8f6c…"` | identity resolution |
//! | `AUTHOR`, `USER`, `EMAIL` | | environment identity |
//! | `AUTHORS` | `["Ada <ada@x.org>"]` | computed |
//! | `LICENSE`, `JULIA_VERSION`, `VERSION`, `BRANCH` | | project settings |
//! | `YEAR` | `2026` | caller (clock) |
//! | `LOG_LEVEL` | `"Info"` | logging settings |
//! | `CI`, `GITHUB`, `TESTING`, `FORMATTER`, `DEV` | tables | sections |
//! | `FEATURES` | `{docs: true}` | feature map |
//! | `ENV` | `{KEY: "value"}` | residual environment |

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::domain::snapshot::{LogLevel, ResolvedConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DataBag(Map<String, Value>);

impl DataBag {
    /// Assemble the bag for `config`. `year` is injected so the function stays
    /// deterministic.
    pub fn from_config(config: &ResolvedConfig, year: i32) -> Self {
        let snapshot = config.snapshot();
        let m = snapshot.metadata();
        let log_level = snapshot
            .logging_min_level()
            .parse::<LogLevel>()
            .map(|l| l.as_str().to_string())
            .unwrap_or_else(|_| snapshot.logging_min_level().to_string());

        let mut bag = Map::new();
        bag.insert("PKG".into(), json!(m.name));
        bag.insert("PKG_SNAKE".into(), json!(to_snake_case(&m.name)));
        bag.insert("PKG_KEBAB".into(), json!(to_kebab_case(&m.name)));
        bag.insert("UUID".into(), json!(config.uuid().as_str()));
        bag.insert("AUTHOR".into(), json!(m.author));
        bag.insert("USER".into(), json!(m.account));
        bag.insert("EMAIL".into(), json!(m.email));
        bag.insert(
            "AUTHORS".into(),
            json!([format!("{} <{}>", m.author, m.email)]),
        );
        bag.insert("LICENSE".into(), json!(m.license));
        bag.insert("JULIA_VERSION".into(), json!(m.julia_version));
        bag.insert("VERSION".into(), json!(m.version));
        bag.insert("BRANCH".into(), json!(m.default_branch));
        bag.insert("YEAR".into(), json!(year));
        bag.insert("LOG_LEVEL".into(), json!(log_level));
        bag.insert("CI".into(), to_value(snapshot.ci()));
        bag.insert("GITHUB".into(), to_value(snapshot.hosting()));
        bag.insert("TESTING".into(), to_value(snapshot.testing()));
        bag.insert("FORMATTER".into(), to_value(snapshot.formatter()));
        bag.insert("DEV".into(), to_value(snapshot.dev()));
        bag.insert("FEATURES".into(), to_value(snapshot.features()));
        bag.insert("ENV".into(), to_value(snapshot.env_vars()));

        Self(bag)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Add or replace a variable, consuming self.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

// Plain data structs and string maps always serialize.
fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// Split an identifier into lowercase words.
///
/// Separators (`_`, `-`, whitespace) always split; so does a lower-to-upper
/// transition (`fooBar`) and the end of an acronym (`HTTPServer` → `http`,
/// `server`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            let ends_camel = c.is_lowercase() && next.is_uppercase();
            let ends_acronym = c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(char::is_lowercase);
            if ends_camel || ends_acronym {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
