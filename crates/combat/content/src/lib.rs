//! Data-driven combat content and loaders.
//!
//! This crate reads the RON/TOML files that describe a combat deployment:
//! - Combat tuning (`combat.toml`)
//! - Enemy templates and enemy pools
//! - Loot tables with tiers
//! - Weapon band configurations
//! - Player profiles and location contexts
//!
//! Content is consumed by the engine's static collaborators and never appears
//! in session state.

pub mod loaders;

pub use loaders::{
    ConfigLoader, ContentBundle, ContentFactory, EnemyLoader, LoadResult, LocationLoader,
    LootLoader, PlayerLoader, PlayerRecord, PoolLoader, WeaponLoader,
};
