//! Deterministic combat rules shared by the engine and content tooling.
//!
//! `combat-core` defines the canonical model of a single encounter: the
//! accuracy-adjusted hit dial ([`bands`]), attack resolution ([`combat`]),
//! weighted pool selection ([`pool`]) and reward math ([`reward`]). Every
//! function here is pure; randomness arrives through [`RandomSource`] so
//! callers decide between seeded, scripted, or entropy-backed draws.
pub mod bands;
pub mod combat;
pub mod config;
pub mod encounter;
pub mod error;
pub mod pool;
pub mod reward;
pub mod rng;
pub mod stats;

pub use bands::{AdjustedBands, BandAdjustment, FULL_CIRCLE, WeaponBandConfig, adjust};
pub use combat::{AttackResult, HitZone, MultiplierTable, resolve_attack};
pub use config::CombatConfig;
pub use encounter::{Encounter, EncounterStatus};
pub use error::{CombatError, PoolError};
pub use pool::{
    FilterKind, LootRoll, LootTable, PoolCatalog, PoolContext, PoolFilter, Resolution,
    WeightedEntry, draw_weighted,
};
pub use reward::{EncounterResult, LootDrop, RewardBundle, RewardPolicy};
pub use rng::{PcgRng, RandomSource, ScriptedRng};
pub use stats::{
    EnemyId, EnemyStats, EnemyTemplate, ItemId, LocationId, PlayerStats, StyleTag,
};
