//! Encounter simulation command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use combat_content::ContentFactory;
use combat_core::{EncounterStatus, HitZone, LocationId, PcgRng};
use engine::{
    CombatEngine, DeclaredResult, EngineConfig, InMemoryLedger, PlayerId, StaticCollaborators,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// How the simulated player picks tap angles.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Strategy {
    /// Always tap the middle of the normal band
    Steady,
    /// Tap a uniformly random angle
    Random,
    /// Give up after the first attack
    Forfeit,
}

/// Play encounters against loaded content
#[derive(Parser, Debug)]
pub struct Simulate {
    /// Content directory
    #[arg(long, default_value = "content")]
    pub content: PathBuf,

    /// Player id from players.ron
    #[arg(long)]
    pub player: String,

    /// Location id from locations.ron
    #[arg(long)]
    pub location: String,

    /// Number of consecutive encounters
    #[arg(short = 'n', long, default_value = "1")]
    pub encounters: u32,

    #[arg(long, value_enum, default_value = "steady")]
    pub strategy: Strategy,

    /// Seed for both the engine and the tap strategy (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Attacks before the player gives up on an encounter
    #[arg(long, default_value = "100")]
    pub max_turns: u32,
}

impl Simulate {
    pub async fn execute(self) -> Result<()> {
        let bundle = ContentFactory::load_dir(&self.content)
            .with_context(|| format!("Failed to load content from {}", self.content.display()))?;
        let config = EngineConfig::new(bundle.config).with_env_overrides();
        let sweep_interval = config.sweep_interval;
        let seed = self.seed.unwrap_or_else(rand::random);
        tracing::info!(seed, "simulation seeded");

        let ledger = Arc::new(InMemoryLedger::new());
        let engine = Arc::new(
            CombatEngine::builder()
                .config(config)
                .collaborators(StaticCollaborators::from_bundle(&bundle).with_ledger(ledger.clone()))
                .enemy_pools(bundle.enemy_pools.clone())
                .loot(bundle.loot.clone())
                .rng(PcgRng::seeded(seed))
                .build()?,
        );
        let reaper = engine.spawn_reaper(sweep_interval);

        let player = PlayerId::from(self.player.as_str());
        let location = LocationId::from(self.location.as_str());
        let mut taps = StdRng::seed_from_u64(seed.wrapping_add(1));

        for _ in 0..self.encounters {
            self.play(&engine, &player, &location, &mut taps).await?;
        }

        reaper.shutdown().await?;

        if let Some(account) = ledger.account(&player) {
            println!(
                "{}",
                serde_json::json!({
                    "player": player,
                    "gold": account.gold,
                    "xp": account.xp,
                    "items": account.inventory.len(),
                    "history": account.history,
                })
            );
        }
        Ok(())
    }

    async fn play(
        &self,
        engine: &CombatEngine,
        player: &PlayerId,
        location: &LocationId,
        taps: &mut StdRng,
    ) -> Result<()> {
        let started = engine.start(player, location).await?;
        println!("{}", serde_json::to_string(&started)?);

        let normal = started
            .bands
            .ranges()
            .into_iter()
            .find(|(zone, _, _)| *zone == HitZone::Normal)
            .map(|(_, low, high)| (low + high) / 2.0)
            .unwrap_or(180.0);

        let mut status = EncounterStatus::Ongoing;
        for turn in 0..self.max_turns {
            if matches!(self.strategy, Strategy::Forfeit) && turn > 0 {
                break;
            }
            let angle = match self.strategy {
                Strategy::Steady | Strategy::Forfeit => normal,
                Strategy::Random => taps.random_range(0.0..360.0),
            };

            let report = engine.attack(&started.session_id, angle).await?;
            println!("{}", serde_json::to_string(&report)?);
            status = report.status;
            if status.is_terminal() {
                break;
            }
        }

        let declared = match status {
            EncounterStatus::Victory => DeclaredResult::Victory,
            _ => DeclaredResult::Defeat,
        };
        let completed = engine.complete(&started.session_id, declared).await?;
        println!("{}", serde_json::to_string(&completed)?);
        Ok(())
    }
}
