//! Public engine API surface.
//!
//! This module gathers the types exposed to callers of [`crate::CombatEngine`]
//! and to collaborator implementations, so the orchestrator, store and
//! workers can stay focused on their own concerns.

pub mod collaborators;
pub mod errors;
pub mod types;

pub use collaborators::{
    CollaboratorError, CollaboratorResult, Collaborators, EconomyLedger, EnemyCatalog,
    LocationDirectory, PlayerStatsProvider, WeaponProvider,
};
pub use errors::{EngineError, Result};
pub use types::{
    AttackReport, CommitRequest, CompletedCombat, DeclaredResult, PlayerHistory, PlayerId,
    SessionId, StartedCombat,
};
