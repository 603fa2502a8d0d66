//! Loading the defaults document and the user configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use pkgforge_core::{
    domain::{ConfigTree, Defaults},
    error::{Context, ForgeError, ForgeResult},
};

/// Environment variable naming a replacement defaults document.
pub const DEFAULTS_ENV: &str = "PKGFORGE_DEFAULTS";

/// File name of the per-project configuration, looked up in the working
/// directory.
pub const USER_CONFIG_FILE: &str = "pkgforge.toml";

const BUILTIN_DEFAULTS: &str = include_str!("../assets/defaults.toml");
const CONFIG_TEMPLATE: &str = include_str!("../assets/pkgforge.toml");

/// Where the defaults document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultsSource {
    Builtin,
    File(PathBuf),
}

impl std::fmt::Display for DefaultsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => write!(f, "<builtin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolves and parses the two tree-shaped configuration sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    working_dir: PathBuf,
    defaults_file: Option<PathBuf>,
    user_file: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            defaults_file: None,
            user_file: None,
        }
    }

    /// Use `path` as the defaults document instead of `PKGFORGE_DEFAULTS` or
    /// the builtin one.
    pub fn with_defaults_file(mut self, path: Option<PathBuf>) -> Self {
        self.defaults_file = path;
        self
    }

    /// Use `path` instead of `./pkgforge.toml`. A named file must exist.
    pub fn with_user_file(mut self, path: Option<PathBuf>) -> Self {
        self.user_file = path;
        self
    }

    pub fn defaults_source(&self) -> DefaultsSource {
        let from_env = || {
            std::env::var_os(DEFAULTS_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        match self.defaults_file.clone().or_else(from_env) {
            Some(path) => DefaultsSource::File(path),
            None => DefaultsSource::Builtin,
        }
    }

    /// The user configuration path that [`load_user`](Self::load_user) reads.
    pub fn user_config_path(&self) -> PathBuf {
        self.user_file
            .clone()
            .unwrap_or_else(|| self.working_dir.join(USER_CONFIG_FILE))
    }

    /// Load and check the defaults document.
    ///
    /// # Errors
    ///
    /// [`ForgeError::Configuration`] when the named file is unreadable, is not
    /// valid TOML, or lacks a required key.
    #[instrument(skip(self))]
    pub fn load_defaults(&self) -> ForgeResult<Defaults> {
        let tree = match self.defaults_source() {
            DefaultsSource::Builtin => parse_toml(BUILTIN_DEFAULTS, "builtin defaults")?,
            DefaultsSource::File(path) => {
                info!(path = %path.display(), "Loading defaults");
                let text = fs::read_to_string(&path).config_context(format!(
                    "cannot read defaults file '{}'",
                    path.display()
                ))?;
                parse_toml(&text, &path.display().to_string())?
            }
        };
        Defaults::from_tree(tree)
    }

    /// Load the user tree. A missing default-location file is an empty
    /// tree; a missing file named with `--config` is an error.
    #[instrument(skip(self))]
    pub fn load_user(&self) -> ForgeResult<ConfigTree> {
        let path = self.user_config_path();
        if !path.is_file() {
            if self.user_file.is_some() {
                return Err(ForgeError::configuration(format!(
                    "config file '{}' does not exist",
                    path.display()
                )));
            }
            debug!(path = %path.display(), "No user config, using defaults only");
            return Ok(ConfigTree::empty());
        }

        let text = fs::read_to_string(&path)
            .config_context(format!("cannot read config file '{}'", path.display()))?;
        parse_toml(&text, &path.display().to_string())
    }

    /// Text of the starter `pkgforge.toml` written by `pkgforge init`.
    pub fn config_template() -> &'static str {
        CONFIG_TEMPLATE
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

/// Parse TOML text into a [`ConfigTree`]. `origin` names the source in
/// error messages.
pub fn parse_toml(text: &str, origin: &str) -> ForgeResult<ConfigTree> {
    let table: toml::Table = toml::from_str(text).config_context(format!("invalid TOML in {origin}"))?;
    let value = serde_json::to_value(table).context(format!("cannot convert {origin}"))?;
    ConfigTree::from_value(value).config_context(format!("invalid configuration in {origin}"))
}
