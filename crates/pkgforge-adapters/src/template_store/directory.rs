//! User template overrides read from a directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use pkgforge_core::{application::ports::TemplateStore, domain::RelativePath};

/// Looks templates up as files below a root directory, e.g.
/// `<root>/docs/make.jl` for the reference `docs/make.jl`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateStore for DirectoryStore {
    fn get(&self, template_ref: &str) -> Option<String> {
        let Ok(relative) = RelativePath::try_new(template_ref) else {
            warn!(template = template_ref, "Ignoring template reference outside the store");
            return None;
        };
        let path = relative.under(&self.root);
        if !path.is_file() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(text) => {
                debug!(path = %path.display(), "Using template override");
                Some(text)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unreadable template override, ignoring");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_files_below_root_only() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/make.jl"), "custom").unwrap();

        let store = DirectoryStore::new(dir.path());
        assert_eq!(store.get("docs/make.jl").as_deref(), Some("custom"));
        assert!(store.get("docs/missing.jl").is_none());
        assert!(store.get("../etc/passwd").is_none());
        assert!(store.get("docs").is_none());
    }
}
