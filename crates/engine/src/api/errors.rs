//! Unified error types surfaced by the engine API.
//!
//! Wraps failures from the session store, collaborators and the combat model
//! so callers can map them to responses with consistent context.

use combat_core::{CombatError, EncounterStatus, LocationId, RewardBundle};
use thiserror::Error;

pub use crate::repository::StoreError;

use super::collaborators::CollaboratorError;
use super::types::{DeclaredResult, PlayerId, SessionId};

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("player {player} already has an active session {existing}")]
    ConcurrentSession { player: PlayerId, existing: SessionId },

    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    #[error("session {0} expired")]
    SessionExpired(SessionId),

    #[error("session {id} is no longer accepting attacks ({status})")]
    SessionNotActive {
        id: SessionId,
        status: EncounterStatus,
    },

    #[error("no enemy can be selected for location {location}")]
    EnemyPoolEmpty { location: LocationId },

    #[error("no loot can be selected for location {location}")]
    LootPoolEmpty { location: LocationId },

    #[error("tap angle {angle} is outside [0, 360)")]
    InvalidMove { angle: f64 },

    #[error("weapon equipped by player {player} is invalid")]
    InvalidWeapon {
        player: PlayerId,
        #[source]
        source: CombatError,
    },

    #[error("session {id} was declared {declared} but its status is {actual}")]
    ResultMismatch {
        id: SessionId,
        declared: DeclaredResult,
        actual: EncounterStatus,
    },

    #[error("reward commit for session {session} failed after {attempts} attempts")]
    RewardCommit {
        session: SessionId,
        attempts: u32,
        bundle: Box<RewardBundle>,
        #[source]
        source: CollaboratorError,
    },

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error(transparent)]
    Combat(CombatError),

    #[error(transparent)]
    Store(StoreError),

    #[error("engine requires {0} to be configured before building")]
    MissingComponent(&'static str),

    #[error("reaper worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => EngineError::SessionNotFound(id),
            StoreError::Expired(session) => EngineError::SessionExpired(session.id),
            StoreError::ConcurrentSession { player, existing } => {
                EngineError::ConcurrentSession { player, existing }
            }
            other => EngineError::Store(other),
        }
    }
}

impl From<CombatError> for EngineError {
    fn from(err: CombatError) -> Self {
        match err {
            CombatError::InvalidMove { angle } => EngineError::InvalidMove { angle },
            other => EngineError::Combat(other),
        }
    }
}
