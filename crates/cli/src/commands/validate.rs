//! Content validation command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use combat_content::ContentFactory;
use combat_core::adjust;

/// Load a content directory and report what it contains
#[derive(Parser, Debug)]
pub struct Validate {
    /// Content directory
    #[arg(long, default_value = "content")]
    pub content: PathBuf,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let bundle = ContentFactory::load_dir(&self.content)
            .with_context(|| format!("Failed to load content from {}", self.content.display()))?;

        println!("Content: {}", self.content.display());
        println!("  enemies:      {}", bundle.enemies.len());
        println!("  pool filters: {}", bundle.enemy_pools.filters.len());
        println!("  loot filters: {}", bundle.loot.pool.filters.len());
        println!("  weapons:      {}", bundle.weapons.len());
        println!("  locations:    {}", bundle.locations.len());
        println!("  players:      {}", bundle.players.len());

        for player in &bundle.players {
            let Some(weapon) = bundle.weapons.get(&player.weapon) else {
                continue;
            };
            let bands = adjust(weapon, player.stats.accuracy, &bundle.config.bands)
                .with_context(|| format!("Player '{}' cannot wield '{}'", player.id, player.weapon))?;
            println!(
                "  {} ({}): injure {:.1} miss {:.1} graze {:.1} normal {:.1} crit {:.1}",
                player.id,
                player.weapon,
                bands.injure,
                bands.miss,
                bands.graze,
                bands.normal,
                bands.crit
            );
        }

        for location in &bundle.locations {
            let enemies = bundle.enemy_pools.candidates_or_fallback(location);
            match enemies {
                Ok(resolution) => println!(
                    "  {}: {} enemy candidates{}",
                    location.location,
                    resolution.candidates.len(),
                    if resolution.used_fallback { " (default pool)" } else { "" }
                ),
                Err(err) => println!("  {}: {}", location.location, err),
            }
        }

        Ok(())
    }
}
