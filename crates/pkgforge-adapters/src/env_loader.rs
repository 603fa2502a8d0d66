//! Identity environment loading.
//!
//! Files are scanned in order (global identity file, then `./.env`) and
//! later files win. The four identity keys pkgforge claims are finally
//! overlaid from the process environment, so CI can drive generation
//! without writing any file.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, instrument};

use pkgforge_core::{
    domain::{CLAIMED_ENV_KEYS, EnvMap},
    error::{Context, ForgeError, ForgeResult},
};

use crate::filesystem::local::map_io_error;

/// Environment variable overriding the global identity file location.
pub const IDENTITY_FILE_ENV: &str = "PKGFORGE_IDENTITY_FILE";

const LOCAL_ENV_FILE: &str = ".env";

#[derive(Debug, Clone)]
pub struct EnvLoader {
    identity_file: Option<PathBuf>,
    local_file: PathBuf,
    process_overlay: bool,
}

impl EnvLoader {
    pub fn new(working_dir: &Path) -> Self {
        Self {
            identity_file: Self::default_identity_file(),
            local_file: working_dir.join(LOCAL_ENV_FILE),
            process_overlay: true,
        }
    }

    /// `PKGFORGE_IDENTITY_FILE`, else `<config dir>/pkgforge/identity.env`.
    pub fn default_identity_file() -> Option<PathBuf> {
        std::env::var_os(IDENTITY_FILE_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                ProjectDirs::from("org", "pkgforge", "pkgforge")
                    .map(|dirs| dirs.config_dir().join("identity.env"))
            })
    }

    pub fn with_identity_file(mut self, path: Option<PathBuf>) -> Self {
        self.identity_file = path;
        self
    }

    /// Skip the process-environment overlay. Used by tests.
    pub fn without_process_overlay(mut self) -> Self {
        self.process_overlay = false;
        self
    }

    pub fn identity_file(&self) -> Option<&Path> {
        self.identity_file.as_deref()
    }

    pub fn local_file(&self) -> &Path {
        &self.local_file
    }

    /// Read every source into one map.
    ///
    /// # Errors
    ///
    /// [`ForgeError::Configuration`] when an existing file cannot be parsed.
    #[instrument(skip(self))]
    pub fn load(&self) -> ForgeResult<EnvMap> {
        let mut env = EnvMap::new();

        for path in self.identity_file.iter().chain(Some(&self.local_file)) {
            if !path.is_file() {
                debug!(path = %path.display(), "Env file absent, skipping");
                continue;
            }
            debug!(path = %path.display(), "Reading env file");
            let entries = dotenvy::from_path_iter(path)
                .config_context(format!("cannot read env file '{}'", path.display()))?;
            for entry in entries {
                let (key, value) = entry
                    .config_context(format!("invalid env file '{}'", path.display()))?;
                env.insert(key, value);
            }
        }

        if self.process_overlay {
            for key in CLAIMED_ENV_KEYS {
                if let Some(value) = std::env::var(key).ok().filter(|v| !v.is_empty()) {
                    debug!(key, "Identity key taken from process environment");
                    env.insert(key.to_string(), value);
                }
            }
        }

        Ok(env)
    }

    /// Write `entries` to the global identity file.
    ///
    /// # Errors
    ///
    /// Configuration error when no identity file location is known or the
    /// file exists and `force` is not set; filesystem error on I/O failure.
    pub fn write_identity(&self, entries: &EnvMap, force: bool) -> ForgeResult<PathBuf> {
        let path = self.identity_file.clone().ok_or_else(|| {
            ForgeError::configuration(format!(
                "no configuration directory found, set {IDENTITY_FILE_ENV}"
            ))
        })?;
        if path.exists() && !force {
            return Err(ForgeError::configuration(format!(
                "identity file '{}' already exists (use --force to overwrite)",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| map_io_error(parent, e, "create directory"))?;
        }
        fs::write(&path, render_env_file(entries))
            .map_err(|e| map_io_error(&path, e, "write file"))?;
        Ok(path)
    }
}

/// Format entries as a dotenv file with double-quoted values.
fn render_env_file(entries: &EnvMap) -> String {
    let mut out = String::from("# pkgforge identity, written by `pkgforge setup`.\n");
    for (key, value) in entries {
        out.push_str(&format!("{key}={}\n", quote_env_value(value)));
    }
    out
}

/// Double-quote a dotenv value so `#`, quotes and `$` survive a reload.
pub fn quote_env_value(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$");
    format!("\"{escaped}\"")
}
