//! Reading `Project.toml` of an existing package.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use pkgforge_core::{
    application::{
        ApplicationError,
        ports::{ManifestInfo, ManifestReader},
    },
    error::ForgeResult,
};

use crate::filesystem::local::map_io_error;

const MANIFEST_FILE: &str = "Project.toml";

#[derive(Debug, Deserialize)]
struct RawManifest {
    name: Option<String>,
    uuid: Option<String>,
    version: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlManifestReader;

impl TomlManifestReader {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestReader for TomlManifestReader {
    fn read(&self, project_path: &Path) -> ForgeResult<Option<ManifestInfo>> {
        let path = project_path.join(MANIFEST_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        debug!(path = %path.display(), "Reading manifest");

        let text = fs::read_to_string(&path).map_err(|e| map_io_error(&path, e, "read file"))?;
        let raw: RawManifest =
            toml::from_str(&text).map_err(|e| ApplicationError::CorruptManifest {
                path: path.clone(),
                reason: e.message().to_string(),
            })?;

        Ok(Some(ManifestInfo {
            name: raw.name,
            uuid: raw.uuid,
            version: raw.version,
        }))
    }
}
