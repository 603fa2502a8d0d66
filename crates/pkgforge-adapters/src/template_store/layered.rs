//! Override-then-builtin template lookup.

use std::path::PathBuf;

use tracing::info;

use pkgforge_core::{
    application::{ApplicationError, ports::TemplateStore},
    error::ForgeResult,
};

use super::{BuiltinStore, DirectoryStore};

/// Environment variable naming a template override directory.
pub const TEMPLATES_DIR_ENV: &str = "PKGFORGE_TEMPLATES_DIR";

/// Asks each layer in turn; the first hit wins.
pub struct LayeredStore {
    layers: Vec<Box<dyn TemplateStore>>,
}

impl LayeredStore {
    pub fn new(layers: Vec<Box<dyn TemplateStore>>) -> Self {
        Self { layers }
    }

    /// Builtin templates, overlaid by `override_dir` when given, else by
    /// `PKGFORGE_TEMPLATES_DIR` when set.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::TemplateStore`] when the override directory does
    /// not exist.
    pub fn discover(override_dir: Option<PathBuf>) -> ForgeResult<Self> {
        let mut layers: Vec<Box<dyn TemplateStore>> = Vec::new();

        if let Some(dir) = override_dir.or_else(Self::override_dir) {
            if !dir.is_dir() {
                return Err(ApplicationError::TemplateStore {
                    reason: format!("template directory '{}' does not exist", dir.display()),
                }
                .into());
            }
            info!(dir = %dir.display(), "Using template overrides");
            layers.push(Box::new(DirectoryStore::new(dir)));
        }
        layers.push(Box::new(BuiltinStore::new()));

        Ok(Self::new(layers))
    }

    /// The directory named by `PKGFORGE_TEMPLATES_DIR`, if set and non-empty.
    pub fn override_dir() -> Option<PathBuf> {
        std::env::var_os(TEMPLATES_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}

impl TemplateStore for LayeredStore {
    fn get(&self, template_ref: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(template_ref))
    }
}
