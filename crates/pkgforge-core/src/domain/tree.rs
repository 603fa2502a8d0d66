//! Loosely-typed configuration sources.
//!
//! The three raw inputs of the merge are plain data: two nested key-value
//! trees (defaults and user overrides) and one flat string map (environment
//! identity). Adapters parse files into these shapes; the domain never sees
//! file formats.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::domain::error::DomainError;

/// Flat environment map (`KEY` → value), already interpolated.
pub type EnvMap = BTreeMap<String, String>;

/// A nested key-value tree, e.g. a parsed `pkgforge.toml`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTree(Map<String, Value>);

impl ConfigTree {
    /// An empty tree (no user config file).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap a JSON-model value. The root must be a table.
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::NotATable {
                found: ValueKind::of(&other).as_str(),
            }),
        }
    }

    /// Look up a dotted key such as `formatter.margin`.
    pub fn get(&self, dotted: &str) -> Option<&Value> {
        let mut parts = dotted.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// A top-level table such as `[ci]`, if present and actually a table.
    pub fn section(&self, name: &str) -> Option<&Map<String, Value>> {
        self.0.get(name).and_then(Value::as_object)
    }

    /// String value at a dotted key, if present and a string.
    pub fn get_str(&self, dotted: &str) -> Option<&str> {
        self.get(dotted).and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Value> for ConfigTree {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Coarse type of a config value, used to enforce "defaults are the schema".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Array,
    Table,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_f64() => Self::Float,
            Value::Number(_) => Self::Integer,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Table,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `candidate` may replace `default` without changing its type.
///
/// Arrays must hold elements of the same kind as the first default element;
/// an empty default array accepts any array.
pub fn same_shape(default: &Value, candidate: &Value) -> bool {
    if ValueKind::of(default) != ValueKind::of(candidate) {
        return false;
    }
    match (default, candidate) {
        (Value::Array(d), Value::Array(c)) => match d.first() {
            Some(first) => {
                let kind = ValueKind::of(first);
                c.iter().all(|v| ValueKind::of(v) == kind)
            }
            None => true,
        },
        _ => true,
    }
}
