//! Structured language version numbers (`1`, `1.10`, `1.10.2`, `v1.11`).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// A dotted numeric version. Missing trailing components compare as zero,
/// so `1.10` == `1.10.0`.
#[derive(Debug, Clone)]
pub struct LanguageVersion {
    parts: Vec<u64>,
}

impl LanguageVersion {
    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    fn component(&self, i: usize) -> u64 {
        self.parts.get(i).copied().unwrap_or(0)
    }
}

impl FromStr for LanguageVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidVersion {
            value: s.to_string(),
        };
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('v').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(invalid());
        }
        let parts = body
            .split('.')
            .map(|p| p.parse::<u64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { parts })
    }
}

impl PartialEq for LanguageVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LanguageVersion {}

impl PartialOrd for LanguageVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LanguageVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.parts.iter().map(u64::to_string).collect();
        f.write_str(&rendered.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> LanguageVersion {
        s.parse().unwrap()
    }

    #[test]
    fn compares_numerically_not_lexically() {
        assert!(v("1.10") > v("1.9"));
        assert!(v("1.12") > v("1.10"));
        assert!(v("2") > v("1.99.99"));
    }

    #[test]
    fn missing_components_are_zero() {
        assert_eq!(v("1.10"), v("1.10.0"));
        assert!(v("1") < v("1.0.1"));
    }

    #[test]
    fn accepts_v_prefix() {
        assert_eq!(v("v1.11").parts(), &[1, 11]);
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<LanguageVersion>().is_err());
        assert!("1.x".parse::<LanguageVersion>().is_err());
        assert!("1..2".parse::<LanguageVersion>().is_err());
        assert!("latest".parse::<LanguageVersion>().is_err());
    }

    #[test]
    fn displays_dotted() {
        assert_eq!(v("1.10.2").to_string(), "1.10.2");
    }
}
