//! Validation gate.
//!
//! Runs every rule against a merged snapshot and either lets the run
//! continue (with warnings) or stops it with one aggregated error. Nothing
//! in the target project is touched before this gate passes.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{Filesystem, ToolLocator},
    domain::{ConfigSnapshot, ValidationError, paths, rules},
    error::ForgeResult,
};

/// Command-line client used to create remote repositories.
pub const HOSTING_TOOL: &str = "gh";

/// Non-fatal findings of a successful validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
}

/// Composes the pure rules with the checks that need the filesystem or
/// the `PATH`.
pub struct ValidationService {
    filesystem: Box<dyn Filesystem>,
    tools: Box<dyn ToolLocator>,
}

impl ValidationService {
    pub fn new(filesystem: Box<dyn Filesystem>, tools: Box<dyn ToolLocator>) -> Self {
        Self { filesystem, tools }
    }

    /// Validate a snapshot.
    ///
    /// # Errors
    ///
    /// [`crate::error::ForgeError::Validation`] carrying every violation,
    /// never just the first one.
    #[instrument(skip_all, fields(project = %snapshot.metadata().name))]
    pub fn validate(&self, snapshot: &ConfigSnapshot) -> ForgeResult<ValidationReport> {
        let m = snapshot.metadata();
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        rules::required_fields(snapshot, &mut errors);
        rules::package_name(&m.name, &mut errors);
        rules::account_handle(&m.account, &mut errors);
        rules::contact_email(&m.email, &mut errors);
        self.check_target(snapshot, &mut errors, &mut warnings);
        rules::language_floor(&m.julia_version, snapshot.language_floor(), &mut errors);
        rules::log_level(snapshot.logging_min_level(), &mut errors);
        self.check_hosting_tool(snapshot, &mut warnings);

        for warning in &warnings {
            warn!("{warning}");
        }

        if errors.is_empty() {
            info!(warnings = warnings.len(), "Configuration is valid");
            Ok(ValidationReport { warnings })
        } else {
            debug!(?errors, "Configuration rejected");
            Err(ValidationError::new(errors).into())
        }
    }

    /// Target directory rules: the base must exist, the project must stay
    /// inside it, and an existing project directory only warrants a notice.
    fn check_target(
        &self,
        snapshot: &ConfigSnapshot,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        let m = snapshot.metadata();
        if m.target_dir.trim().is_empty() {
            return;
        }

        let base = snapshot.target_dir();
        if !self.filesystem.is_dir(&base) {
            errors.push(format!(
                "Projects directory '{}' does not exist or is not a directory",
                base.display()
            ));
            return;
        }
        if m.name.is_empty() {
            return;
        }

        let base_real = self.resolve(&base);
        let project = snapshot.project_path();
        let project_exists = self.filesystem.exists(&project);

        let project_real = if project_exists {
            if !self.filesystem.is_dir(&project) {
                errors.push(format!(
                    "Project path '{}' exists and is not a directory",
                    project.display()
                ));
                return;
            }
            self.resolve(&project)
        } else {
            paths::normalize_lexically(&base_real.join(&m.name))
        };

        rules::project_boundary(&base_real, &project_real, errors);

        if project_exists {
            warnings.push(format!(
                "Project directory '{}' already exists; existing files are kept unless --force is given",
                project.display()
            ));
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.filesystem
            .canonicalize(path)
            .unwrap_or_else(|_| paths::normalize_lexically(path))
    }

    fn check_hosting_tool(&self, snapshot: &ConfigSnapshot, warnings: &mut Vec<String>) {
        if !snapshot.hosting().create_repo {
            return;
        }
        if self.tools.locate(HOSTING_TOOL).is_none() {
            warnings.push(format!(
                "Repository creation is enabled but `{HOSTING_TOOL}` was not found on PATH; the remote repository will not be created"
            ));
        }
    }
}
