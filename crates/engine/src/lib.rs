//! Combat session engine.
//!
//! This crate wires the pure rules of `combat-core` into a service: an
//! expiring per-player [`SessionStore`], narrow async collaborator traits for
//! everything the engine does not own (player stats, weapons, enemies,
//! locations, the economy ledger), a retrying [`RewardDistributor`], and the
//! [`CombatEngine`] facade exposing `start`, `attack` and `complete`.
//!
//! Modules are organized by responsibility:
//! - [`orchestrator`] hosts the engine and its builder
//! - [`api`] exposes the types callers and collaborators interact with
//! - [`repository`] holds the ephemeral session store
//! - [`rewards`] turns finished encounters into ledger commits
//! - [`oracle`] and [`ledger`] provide in-process collaborator implementations
//! - [`workers`] keeps the expiry sweep internal to the crate
pub mod api;
pub mod clock;
pub mod config;
pub mod ledger;
pub mod oracle;
pub mod orchestrator;
pub mod repository;
pub mod rewards;
pub mod session;

mod rng;
mod workers;

pub use api::{
    AttackReport, CollaboratorError, Collaborators, CommitRequest, CompletedCombat,
    DeclaredResult, EconomyLedger, EnemyCatalog, EngineError, LocationDirectory, PlayerHistory,
    PlayerId, PlayerStatsProvider, Result, SessionId, StartedCombat, WeaponProvider,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{EngineConfig, RetryPolicy};
pub use ledger::{InMemoryLedger, PlayerAccount};
pub use oracle::{
    PlayerProfile, StaticCollaborators, StaticEnemyCatalog, StaticLocationDirectory,
    StaticPlayerDirectory,
};
pub use orchestrator::{CombatEngine, CombatEngineBuilder};
pub use repository::{InMemorySessionStore, SessionStore, StoreError};
pub use rewards::{Distribution, RewardDistributor};
pub use rng::SharedRng;
pub use session::CombatSession;
pub use workers::ReaperHandle;
