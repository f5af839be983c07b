//! Player profile loader.

use std::path::Path;

use combat_core::PlayerStats;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One player's combat snapshot and equipped weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    pub stats: PlayerStats,
    /// Key into the weapon catalog.
    pub weapon: String,
}

/// Loader for player profiles from RON files.
pub struct PlayerLoader;

impl PlayerLoader {
    /// RON format: `Vec<PlayerRecord>`.
    pub fn load(path: &Path) -> LoadResult<Vec<PlayerRecord>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<PlayerRecord>> {
        let players: Vec<PlayerRecord> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse player profiles RON: {}", e))?;

        for player in &players {
            if player.stats.hit_points == 0 {
                anyhow::bail!("Player '{}' has zero hit points", player.id);
            }
            if !player.stats.accuracy.is_finite() {
                anyhow::bail!("Player '{}' has non-finite accuracy", player.id);
            }
        }

        Ok(players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records() {
        let players = PlayerLoader::parse(
            r#"[
                (
                    id: "ayla",
                    stats: (attack: 12, accuracy: 0.5, defense: 3, hit_points: 40),
                    weapon: "dagger",
                ),
            ]"#,
        )
        .unwrap();

        assert_eq!(players[0].stats, PlayerStats::new(12, 0.5, 3, 40));
        assert_eq!(players[0].weapon, "dagger");
    }
}
