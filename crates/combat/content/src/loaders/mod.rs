//! Content loaders for reading combat data from files.

pub mod config;
pub mod enemies;
pub mod factory;
pub mod locations;
pub mod players;
pub mod pools;
pub mod weapons;

pub use config::ConfigLoader;
pub use enemies::EnemyLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use locations::LocationLoader;
pub use players::{PlayerLoader, PlayerRecord};
pub use pools::{LootLoader, PoolLoader};
pub use weapons::WeaponLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
