//! Enemy template loader.

use std::collections::BTreeSet;
use std::path::Path;

use combat_core::EnemyTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalogFile {
    pub enemies: Vec<EnemyTemplate>,
}

/// Loader for enemy templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load enemy templates, rejecting duplicate ids and zero hit points.
    pub fn load(path: &Path) -> LoadResult<Vec<EnemyTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EnemyTemplate>> {
        let catalog: EnemyCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for enemy in &catalog.enemies {
            if !seen.insert(enemy.id.clone()) {
                anyhow::bail!("Duplicate enemy id '{}'", enemy.id);
            }
            if enemy.hit_points == 0 {
                anyhow::bail!("Enemy '{}' has zero hit points", enemy.id);
            }
        }

        Ok(catalog.enemies)
    }
}
