use crate::statics;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Organization/product identity used to place the settings file.
/// Always passed in explicitly; there is no process-global identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    pub organization: String,
    pub product: String,
}

impl AppIdentity {
    pub fn new(organization: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            product: product.into(),
        }
    }
}

/// Joins `base/<organization>/<product>/settings.ini` without touching the
/// filesystem.
pub fn settings_path_under(base: &Path, identity: &AppIdentity) -> PathBuf {
    base.join(&identity.organization)
        .join(&identity.product)
        .join(statics::SETTINGS_FILE_NAME)
}

/// Resolves the settings file under the platform application-data root.
pub fn settings_path(identity: &AppIdentity) -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir().context("no platform application-data directory")?;
    Ok(settings_path_under(&base, identity))
}
