//! Weapon band loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::WeaponBandConfig;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Weapon catalog structure for RON files, keyed by weapon id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponCatalogFile {
    pub weapons: BTreeMap<String, WeaponBandConfig>,
}

/// Loader for weapon band configurations from RON files.
pub struct WeaponLoader;

impl WeaponLoader {
    /// Load and validate every weapon's bands.
    pub fn load(path: &Path) -> LoadResult<BTreeMap<String, WeaponBandConfig>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BTreeMap<String, WeaponBandConfig>> {
        let catalog: WeaponCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weapon catalog RON: {}", e))?;

        for (id, bands) in &catalog.weapons {
            bands
                .validate()
                .map_err(|e| anyhow::anyhow!("Weapon '{}' has invalid bands: {}", id, e))?;
        }

        Ok(catalog.weapons)
    }
}
