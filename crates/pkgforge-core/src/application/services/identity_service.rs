//! Stable package identity across regenerations.

use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::{
    application::ports::{ManifestInfo, ManifestReader},
    domain::ProjectUuid,
};

/// Decides the UUID a generated project carries.
///
/// Reads, never writes: the manifest is written later by the base
/// structure step, which uses the value resolved here.
pub struct IdentityService {
    manifests: Box<dyn ManifestReader>,
}

impl IdentityService {
    pub fn new(manifests: Box<dyn ManifestReader>) -> Self {
        Self { manifests }
    }

    /// Reuse the UUID of an existing manifest, or mint a fresh v4 one.
    ///
    /// An unreadable manifest counts as no manifest.
    #[instrument(skip(self), fields(path = %project_path.display()))]
    pub fn resolve_uuid(&self, project_path: &Path) -> ProjectUuid {
        match self.manifests.read(project_path) {
            Ok(Some(ManifestInfo {
                uuid: Some(uuid), ..
            })) if !uuid.trim().is_empty() => {
                debug!(%uuid, "Reusing UUID from existing manifest");
                ProjectUuid::existing(uuid)
            }
            Ok(_) => {
                let uuid = ProjectUuid::new_v4();
                debug!(%uuid, "No usable manifest, minted new UUID");
                uuid
            }
            Err(e) => {
                let uuid = ProjectUuid::new_v4();
                warn!(error = %e, %uuid, "Existing manifest is unreadable, minted new UUID");
                uuid
            }
        }
    }
}
