//! Pure validation rules.
//!
//! Each rule inspects one aspect of a [`ConfigSnapshot`] and appends zero or
//! more human-readable messages. Rules never stop early; the validation
//! service runs all of them and reports the union. Rules that need the
//! filesystem or the `PATH` live in the application layer.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    paths,
    snapshot::{ConfigSnapshot, LogLevel},
    version::LanguageVersion,
};

static PACKAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").expect("Invalid regex pattern"));

/// Longest account handle the hosting service accepts.
pub const MAX_HANDLE_LEN: usize = 39;

/// Rule 1: identity and naming fields must be non-empty.
pub fn required_fields(snapshot: &ConfigSnapshot, errors: &mut Vec<String>) {
    let m = snapshot.metadata();
    let fields = [
        ("Project name", m.name.as_str(), "set [project] name in pkgforge.toml"),
        ("Author name", m.author.as_str(), "set AUTHOR_NAME"),
        ("GitHub user", m.account.as_str(), "set GITHUB_USER"),
        ("Author email", m.email.as_str(), "set AUTHOR_EMAIL"),
        ("Projects directory", m.target_dir.as_str(), "set PROJECTS_DIR"),
    ];
    for (label, value, hint) in fields {
        if value.trim().is_empty() {
            errors.push(format!("{label} is required ({hint})"));
        }
    }
}

/// Rule 2: the package name must not address another directory and must
/// follow the package naming convention.
pub fn package_name(name: &str, errors: &mut Vec<String>) {
    if name.is_empty() {
        return;
    }
    if has_traversal(name) {
        errors.push(format!(
            "Project name '{name}' contains path separators or traversal sequences"
        ));
        return;
    }
    if !PACKAGE_NAME.is_match(name) {
        errors.push(format!(
            "Project name '{name}' must start with an uppercase letter and contain only letters and digits"
        ));
    }
}

fn has_traversal(name: &str) -> bool {
    name.contains('/') || name.contains('\\') || name.contains("..") || name.starts_with('.')
}

/// Rule 3: GitHub-style account handle.
pub fn account_handle(handle: &str, errors: &mut Vec<String>) {
    if handle.is_empty() {
        return;
    }
    let valid_chars = handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    let len = handle.chars().count();
    if len > MAX_HANDLE_LEN
        || !valid_chars
        || handle.starts_with('-')
        || handle.ends_with('-')
    {
        errors.push(format!(
            "GitHub user '{handle}' must be 1-{MAX_HANDLE_LEN} letters, digits or hyphens and cannot start or end with a hyphen"
        ));
    }
}

/// Rule 4: simplified e-mail shape check.
///
/// Besides one `@`, no whitespace and a dotted domain, the local part must
/// be non-empty and the domain cannot start or end with a dot.
pub fn contact_email(email: &str, errors: &mut Vec<String>) {
    if email.is_empty() {
        return;
    }
    if !is_plausible_email(email) {
        errors.push(format!("Author email '{email}' is not a valid address"));
    }
}

fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) || email.matches('@').count() != 1 {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Rule 6: the project directory must sit strictly below the base directory.
///
/// Both paths are expected to be resolved already (canonical when they exist,
/// lexically normalized otherwise).
pub fn project_boundary(base: &Path, project: &Path, errors: &mut Vec<String>) {
    if project == base || !paths::is_within(base, project) {
        errors.push(format!(
            "Project path '{}' escapes the projects directory '{}'",
            project.display(),
            base.display()
        ));
    }
}

/// Rule 8: the configured language version must not be older than the floor.
pub fn language_floor(configured: &str, floor: &str, errors: &mut Vec<String>) {
    let configured_v = configured.parse::<LanguageVersion>();
    let floor_v = floor.parse::<LanguageVersion>();
    match (configured_v, floor_v) {
        (Ok(c), Ok(f)) if c < f => errors.push(format!(
            "Julia version {c} is older than the minimum supported version {f}"
        )),
        (Ok(_), Ok(_)) => {}
        (Err(e), _) => errors.push(format!("Invalid julia_version: {e}")),
        (_, Err(e)) => errors.push(format!("Invalid minimum julia version in defaults: {e}")),
    }
}

/// Rule 9: logging level must be one of the known names.
pub fn log_level(level: &str, errors: &mut Vec<String>) {
    if let Err(e) = level.parse::<LogLevel>() {
        errors.push(e.to_string());
    }
}

/// Every rule that needs nothing but the snapshot.
pub fn check_pure(snapshot: &ConfigSnapshot) -> Vec<String> {
    let mut errors = Vec::new();
    let m = snapshot.metadata();
    required_fields(snapshot, &mut errors);
    package_name(&m.name, &mut errors);
    account_handle(&m.account, &mut errors);
    contact_email(&m.email, &mut errors);
    language_floor(&m.julia_version, snapshot.language_floor(), &mut errors);
    log_level(snapshot.logging_min_level(), &mut errors);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SnapshotBuilder;

    fn name_errors(name: &str) -> Vec<String> {
        let mut errors = Vec::new();
        package_name(name, &mut errors);
        errors
    }

    fn handle_errors(handle: &str) -> Vec<String> {
        let mut errors = Vec::new();
        account_handle(handle, &mut errors);
        errors
    }

    #[test]
    fn traversal_names_are_rejected() {
        for bad in ["../Evil", "..\\Evil", "/tmp/Evil", ".Hidden"] {
            let errors = name_errors(bad);
            assert_eq!(errors.len(), 1, "{bad}");
            assert!(errors[0].contains("traversal"), "{bad}: {errors:?}");
        }
    }

    #[test]
    fn naming_convention_is_enforced() {
        assert!(name_errors("ValidPackage123").is_empty());
        assert_eq!(name_errors("lowercase").len(), 1);
        assert_eq!(name_errors("Has-Hyphen").len(), 1);
        assert_eq!(name_errors("Has_Underscore").len(), 1);
    }

    #[test]
    fn handle_boundaries() {
        assert!(!handle_errors("-bad").is_empty());
        assert!(!handle_errors("bad-").is_empty());
        assert!(!handle_errors(&"a".repeat(40)).is_empty());
        assert!(!handle_errors("under_score").is_empty());
        assert!(handle_errors("a").is_empty());
        assert!(handle_errors("valid-user-123").is_empty());
        assert!(handle_errors(&"a".repeat(39)).is_empty());
    }

    #[test]
    fn email_shape() {
        for good in ["ada@example.com", "a.b+c@sub.example.org"] {
            assert!(is_plausible_email(good), "{good}");
        }
        for bad in [
            "no-at-sign",
            "two@@example.com",
            "a@b@example.com",
            "spaced name@example.com",
            "ada@localhost",
            "@example.com",
            "ada@.com",
            "ada@example.com.",
        ] {
            assert!(!is_plausible_email(bad), "{bad}");
        }
    }

    #[test]
    fn boundary_is_component_wise() {
        let mut errors = Vec::new();
        project_boundary(Path::new("/base"), Path::new("/base/Pkg"), &mut errors);
        assert!(errors.is_empty());

        project_boundary(Path::new("/base"), Path::new("/base2/Pkg"), &mut errors);
        assert_eq!(errors.len(), 1);

        project_boundary(Path::new("/base"), Path::new("/base"), &mut errors);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn version_floor() {
        let mut errors = Vec::new();
        language_floor("1.12", "1.10", &mut errors);
        language_floor("1.10.0", "1.10", &mut errors);
        assert!(errors.is_empty());

        language_floor("1.9", "1.10", &mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("older"));

        language_floor("one.two", "1.10", &mut errors);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn log_level_membership() {
        let mut errors = Vec::new();
        log_level("Info", &mut errors);
        log_level("debug", &mut errors);
        assert!(errors.is_empty());
        log_level("Verbose", &mut errors);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn empty_name_and_bad_email_are_both_reported() {
        let snapshot = SnapshotBuilder::valid()
            .name("")
            .email("not-an-email")
            .build();
        let errors = check_pure(&snapshot);
        assert!(errors.iter().any(|e| e.contains("Project name is required")));
        assert!(errors.iter().any(|e| e.contains("not a valid address")));
    }

    #[test]
    fn valid_snapshot_passes_pure_rules() {
        let snapshot = SnapshotBuilder::valid().build();
        assert!(check_pure(&snapshot).is_empty(), "{:?}", check_pure(&snapshot));
    }
}
