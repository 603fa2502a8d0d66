//! Pure path helpers used by validation and target resolution.

use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` to the current user's home directory.
pub fn expand_tilde(raw: &str) -> PathBuf {
    expand_tilde_with(raw, dirs::home_dir().as_deref())
}

/// [`expand_tilde`] with an explicit home directory.
///
/// Only `~` and `~/...` are expanded; `~other/...` is left untouched, as is
/// everything when no home directory is known.
pub fn expand_tilde_with(raw: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(raw);
    };
    if raw == "~" {
        return home.to_path_buf();
    }
    match raw
        .strip_prefix("~/")
        .or_else(|| raw.strip_prefix("~\\"))
    {
        Some(rest) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root; leading `..` on a relative path is
/// preserved.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

/// Component-wise containment: `child` is `base` itself or below it.
///
/// `/base2` is not within `/base`.
pub fn is_within(base: &Path, child: &Path) -> bool {
    child.starts_with(base)
}
