//! Content factory for loading a whole combat data directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use combat_core::{
    CombatConfig, EnemyId, EnemyTemplate, LootTable, PoolCatalog, PoolContext, WeaponBandConfig,
};

use crate::loaders::{
    ConfigLoader, EnemyLoader, LoadResult, LocationLoader, LootLoader, PlayerLoader, PlayerRecord,
    PoolLoader, WeaponLoader,
};

/// Everything loaded from a data directory, cross-checked.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub config: CombatConfig,
    pub enemies: Vec<EnemyTemplate>,
    pub enemy_pools: PoolCatalog<EnemyId>,
    pub loot: LootTable,
    pub weapons: BTreeMap<String, WeaponBandConfig>,
    pub players: Vec<PlayerRecord>,
    pub locations: Vec<PoolContext>,
}

impl ContentBundle {
    /// Verifies references between files: every pooled enemy has a template
    /// and every player's weapon exists.
    pub fn validate(&self) -> LoadResult<()> {
        let known: std::collections::BTreeSet<&EnemyId> =
            self.enemies.iter().map(|enemy| &enemy.id).collect();
        let pooled = self
            .enemy_pools
            .filters
            .iter()
            .flat_map(|filter| filter.entries.iter())
            .chain(self.enemy_pools.fallback.iter());
        for entry in pooled {
            if !known.contains(&entry.id) {
                anyhow::bail!("Enemy pool references unknown enemy '{}'", entry.id);
            }
        }

        for player in &self.players {
            if !self.weapons.contains_key(&player.weapon) {
                anyhow::bail!(
                    "Player '{}' equips unknown weapon '{}'",
                    player.id,
                    player.weapon
                );
            }
        }

        Ok(())
    }
}

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── enemies.ron
/// ├── enemy_pools.ron
/// ├── loot.ron
/// ├── weapons.ron
/// ├── players.ron
/// └── locations.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Loads and cross-checks every file in `data_dir`.
    pub fn load_dir(data_dir: impl Into<PathBuf>) -> LoadResult<ContentBundle> {
        Self::new(data_dir).load_bundle()
    }

    pub fn load_bundle(&self) -> LoadResult<ContentBundle> {
        let bundle = ContentBundle {
            config: self.load_config()?,
            enemies: self.load_enemies()?,
            enemy_pools: self.load_enemy_pools()?,
            loot: self.load_loot()?,
            weapons: self.load_weapons()?,
            players: self.load_players()?,
            locations: self.load_locations()?,
        };
        bundle.validate()?;
        Ok(bundle)
    }

    /// Load combat tuning from `combat.toml`. A missing file yields defaults.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("combat.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load enemy templates from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<Vec<EnemyTemplate>> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    /// Load enemy pool filters from `enemy_pools.ron`.
    pub fn load_enemy_pools(&self) -> LoadResult<PoolCatalog<EnemyId>> {
        PoolLoader::load(&self.data_dir.join("enemy_pools.ron"))
    }

    /// Load the loot table from `loot.ron`.
    pub fn load_loot(&self) -> LoadResult<LootTable> {
        LootLoader::load(&self.data_dir.join("loot.ron"))
    }

    /// Load weapon bands from `weapons.ron`.
    pub fn load_weapons(&self) -> LoadResult<BTreeMap<String, WeaponBandConfig>> {
        WeaponLoader::load(&self.data_dir.join("weapons.ron"))
    }

    /// Load player profiles from `players.ron`.
    pub fn load_players(&self) -> LoadResult<Vec<PlayerRecord>> {
        PlayerLoader::load(&self.data_dir.join("players.ron"))
    }

    /// Load location contexts from `locations.ron`.
    pub fn load_locations(&self) -> LoadResult<Vec<PoolContext>> {
        LocationLoader::load(&self.data_dir.join("locations.ron"))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
