//! Configuration sources selected by the global flags.
//!
//! The CLI owns source selection (working directory, `--config`,
//! `--defaults`); loading and merging happen in the adapters and core.
//!
//! # Precedence (highest first)
//!
//! 1. Process environment, for the four identity keys only
//! 2. `./.env`
//! 3. Global identity file (`pkgforge setup`)
//! 4. `pkgforge.toml` (or `--config FILE`)
//! 5. Defaults document (builtin, `--defaults FILE` or `PKGFORGE_DEFAULTS`)

use std::path::PathBuf;

use serde_json::{Value, json};
use tracing::debug;

use pkgforge_adapters::{ConfigLoader, EnvLoader};
use pkgforge_core::domain::{ConfigSnapshot, merge};

use crate::cli::GlobalArgs;
use crate::error::{CliResult, IntoCli};

pub struct Sources {
    pub loader: ConfigLoader,
    pub env: EnvLoader,
}

impl Sources {
    pub fn from_args(args: &GlobalArgs) -> CliResult<Self> {
        let cwd = std::env::current_dir()
            .with_cli_context(|| "cannot determine the working directory")?;
        Ok(Self::in_dir(cwd, args))
    }

    fn in_dir(cwd: PathBuf, args: &GlobalArgs) -> Self {
        Self {
            loader: ConfigLoader::new(&cwd)
                .with_defaults_file(args.defaults.clone())
                .with_user_file(args.config.clone()),
            env: EnvLoader::new(&cwd),
        }
    }

    /// Load all three sources and merge them. The result is not validated.
    pub fn load(&self) -> CliResult<ConfigSnapshot> {
        let defaults = self.loader.load_defaults()?;
        let user = self.loader.load_user()?;
        let env = self.env.load()?;
        debug!(
            user_keys = user.as_map().len(),
            env_keys = env.len(),
            "Configuration sources loaded"
        );
        Ok(merge(&defaults, &user, &env))
    }
}

/// The merged configuration laid out like `pkgforge.toml`, plus the
/// identity and environment values.
pub fn snapshot_view(snapshot: &ConfigSnapshot) -> Value {
    let m = snapshot.metadata();
    json!({
        "project": {
            "name": m.name,
            "license": m.license,
            "julia_version": m.julia_version,
            "min_julia_version": snapshot.language_floor(),
            "version": m.version,
            "default_branch": m.default_branch,
        },
        "identity": {
            "author": m.author,
            "user": m.account,
            "email": m.email,
            "projects_dir": m.target_dir,
        },
        "ci": snapshot.ci(),
        "github": snapshot.hosting(),
        "testing": snapshot.testing(),
        "formatter": snapshot.formatter(),
        "dev": snapshot.dev(),
        "features": snapshot.features(),
        "logging": { "min_level": snapshot.logging_min_level() },
        "env": snapshot.env_vars(),
    })
}

/// Look up a dotted key such as `formatter.margin` in a view.
pub fn lookup<'a>(view: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted
        .split('.')
        .try_fold(view, |current, part| current.as_object()?.get(part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn args() -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            defaults: None,
            output_format: OutputFormat::Plain,
        }
    }

    #[test]
    fn lookup_walks_nested_tables() {
        let view = json!({ "formatter": { "margin": 92 }, "features": { "docs": true } });
        assert_eq!(lookup(&view, "formatter.margin"), Some(&json!(92)));
        assert_eq!(lookup(&view, "features.docs"), Some(&json!(true)));
        assert_eq!(lookup(&view, "formatter.margin.x"), None);
        assert_eq!(lookup(&view, "nope"), None);
    }

    #[test]
    fn explicit_files_are_forwarded() {
        let mut args = args();
        args.config = Some(PathBuf::from("/tmp/custom.toml"));
        let sources = Sources::in_dir(PathBuf::from("/work"), &args);
        assert_eq!(
            sources.loader.user_config_path(),
            PathBuf::from("/tmp/custom.toml")
        );
        assert_eq!(sources.env.local_file(), PathBuf::from("/work/.env"));
    }
}
