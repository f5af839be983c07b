#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use combat_core::{
    EnemyTemplate, LootTable, PlayerStats, PoolCatalog, PoolContext, PoolFilter, ScriptedRng,
    WeaponBandConfig, WeightedEntry,
};
use engine::{
    CombatEngine, EngineConfig, InMemoryLedger, ManualClock, PlayerId, PlayerProfile,
    RetryPolicy, StaticCollaborators, StaticEnemyCatalog, StaticLocationDirectory,
    StaticPlayerDirectory,
};

pub const TTL: Duration = Duration::from_secs(15 * 60);

pub struct Harness {
    pub engine: Arc<CombatEngine>,
    pub clock: Arc<ManualClock>,
    pub ledger: Arc<InMemoryLedger>,
}

pub fn ayla() -> PlayerId {
    PlayerId::from("ayla")
}

fn template(id: &str, attack: u32, defense: u32, hit_points: u32) -> EnemyTemplate {
    EnemyTemplate {
        id: id.into(),
        name: id.to_uppercase(),
        attack,
        defense,
        hit_points,
        style: "default".into(),
        personality: Default::default(),
    }
}

pub fn collaborators() -> StaticCollaborators {
    let players = StaticPlayerDirectory::new()
        .with_player(
            "ayla",
            PlayerProfile::new(
                PlayerStats::new(20, 0.5, 5, 50),
                WeaponBandConfig::new(5.0, 45.0, 60.0, 200.0, 50.0),
            ),
        )
        .with_player(
            "borin",
            PlayerProfile::new(
                PlayerStats::new(26, 0.2, 8, 70),
                WeaponBandConfig::new(20.0, 90.0, 40.0, 150.0, 40.0),
            ),
        )
        .with_player(
            "wisp",
            PlayerProfile::new(
                PlayerStats::new(12, 0.5, 2, 0),
                WeaponBandConfig::new(5.0, 45.0, 60.0, 200.0, 50.0),
            ),
        );

    let enemies = StaticEnemyCatalog::new()
        .with_template(template("goblin", 10, 3, 15))
        .with_template(template("slime", 4, 0, 8));

    let locations = StaticLocationDirectory::new()
        .with_location(PoolContext::new("arena", 1).with_attribute("biome", "arena"))
        .with_location(PoolContext::new("marsh", 1).with_attribute("biome", "swamp"));

    StaticCollaborators::new(players, enemies, locations)
}

pub fn enemy_pools() -> PoolCatalog<combat_core::EnemyId> {
    PoolCatalog::new(vec![PoolFilter::attribute(
        "biome",
        "arena",
        vec![WeightedEntry::new("goblin", 1)],
    )])
    .with_fallback(vec![WeightedEntry::new("slime", 1)])
}

pub fn loot() -> LootTable {
    LootTable::new(PoolCatalog::new(vec![PoolFilter::universal(vec![
        WeightedEntry::new("coin", 1),
    ])]))
}

pub fn config() -> EngineConfig {
    EngineConfig {
        session_ttl: TTL,
        commit_retry: RetryPolicy {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(1),
            multiplier: 2,
        },
        ..EngineConfig::default()
    }
}

pub fn harness_with_pools(pools: PoolCatalog<combat_core::EnemyId>) -> Harness {
    let clock = Arc::new(ManualClock::default());
    let ledger = Arc::new(InMemoryLedger::new());

    let engine = CombatEngine::builder()
        .config(config())
        .collaborators(collaborators().with_ledger(ledger.clone()))
        .enemy_pools(pools)
        .loot(loot())
        .rng(ScriptedRng::new(vec![0.0]))
        .clock(clock.clone())
        .build()
        .expect("engine should build");

    Harness {
        engine: Arc::new(engine),
        clock,
        ledger,
    }
}

pub fn harness() -> Harness {
    harness_with_pools(enemy_pools())
}
