//! Enemy pool and loot table loaders.

use std::path::Path;

use combat_core::{EnemyId, LootTable, PoolCatalog};

use crate::loaders::{LoadResult, read_file};

/// Loader for enemy pool catalogs from RON files.
pub struct PoolLoader;

impl PoolLoader {
    /// RON format: `PoolCatalog<EnemyId>` (`filters` plus optional `fallback`).
    pub fn load(path: &Path) -> LoadResult<PoolCatalog<EnemyId>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<PoolCatalog<EnemyId>> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy pool RON: {}", e))
    }
}

/// Loader for loot tables from RON files.
pub struct LootLoader;

impl LootLoader {
    /// RON format: `LootTable` (`pool`, `tiers`, `tier_multipliers`).
    pub fn load(path: &Path) -> LoadResult<LootTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<LootTable> {
        let table: LootTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse loot table RON: {}", e))?;

        if let Some((tier, multiplier)) = table
            .tier_multipliers
            .iter()
            .find(|(_, multiplier)| !multiplier.is_finite() || **multiplier < 0.0)
        {
            anyhow::bail!("Tier '{}' has invalid multiplier {}", tier, multiplier);
        }

        Ok(table)
    }
}
