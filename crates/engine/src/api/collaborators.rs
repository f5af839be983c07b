//! Traits for the services the engine consults but does not own.
//!
//! Each trait is narrow and async so implementations can sit behind a network
//! hop. In-process implementations live in [`crate::oracle`] and
//! [`crate::ledger`].

use std::sync::Arc;

use async_trait::async_trait;
use combat_core::{EnemyId, EnemyStats, LocationId, PlayerStats, PoolContext, WeaponBandConfig};
use thiserror::Error;

use super::types::{CommitRequest, PlayerHistory, PlayerId};

pub type CollaboratorResult<T> = std::result::Result<T, CollaboratorError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("{service} unavailable: {reason}")]
    Unavailable {
        service: &'static str,
        reason: String,
    },
}

impl CollaboratorError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn unavailable(service: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            service,
            reason: reason.into(),
        }
    }

    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Frozen combat statistics of a player.
#[async_trait]
pub trait PlayerStatsProvider: Send + Sync {
    async fn combat_snapshot(&self, player: &PlayerId) -> CollaboratorResult<PlayerStats>;
}

/// Band configuration of the weapon a player has equipped.
#[async_trait]
pub trait WeaponProvider: Send + Sync {
    async fn equipped_bands(&self, player: &PlayerId) -> CollaboratorResult<WeaponBandConfig>;
}

/// Turns an enemy id into concrete stats for a difficulty level.
#[async_trait]
pub trait EnemyCatalog: Send + Sync {
    async fn realize(&self, enemy: &EnemyId, difficulty: u32) -> CollaboratorResult<EnemyStats>;
}

/// Selection context (attributes and difficulty) of a location.
#[async_trait]
pub trait LocationDirectory: Send + Sync {
    async fn context(&self, location: &LocationId) -> CollaboratorResult<PoolContext>;
}

/// Economy and history ledger.
///
/// `commit_outcome` must be idempotent on `request.session_id`: a replay
/// returns the history recorded by the first application.
#[async_trait]
pub trait EconomyLedger: Send + Sync {
    async fn commit_outcome(&self, request: &CommitRequest) -> CollaboratorResult<PlayerHistory>;
}

/// Bundle of every collaborator the engine needs.
#[derive(Clone)]
pub struct Collaborators {
    pub players: Arc<dyn PlayerStatsProvider>,
    pub weapons: Arc<dyn WeaponProvider>,
    pub enemies: Arc<dyn EnemyCatalog>,
    pub locations: Arc<dyn LocationDirectory>,
    pub ledger: Arc<dyn EconomyLedger>,
}

impl Collaborators {
    pub fn new(
        players: Arc<dyn PlayerStatsProvider>,
        weapons: Arc<dyn WeaponProvider>,
        enemies: Arc<dyn EnemyCatalog>,
        locations: Arc<dyn LocationDirectory>,
        ledger: Arc<dyn EconomyLedger>,
    ) -> Self {
        Self {
            players,
            weapons,
            enemies,
            locations,
            ledger,
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
