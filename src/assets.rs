//! Auxiliary asset checks.
//!
//! The geographic boundary file is only checked for at startup. Its contents
//! are never read.

use std::path::Path;

use tracing::warn;

use crate::config::DashboardSettings;
use crate::error::{DashboardError, Result};

/// Fails with `MissingAsset` if `path` does not name an existing file.
pub fn verify_asset(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(DashboardError::missing_asset(format!(
            "GeoJSON file not found at {}. Ensure it is in the correct directory.",
            path.display()
        )))
    }
}

/// Checks every configured asset, logging and returning the missing ones.
pub fn check_assets(settings: &DashboardSettings) -> Vec<DashboardError> {
    settings
        .geojson
        .iter()
        .filter_map(|path| verify_asset(path).err())
        .inspect(|e| warn!("{}", e))
        .collect()
}
