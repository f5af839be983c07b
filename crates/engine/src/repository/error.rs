//! Error types raised by session stores.

use thiserror::Error;

use crate::api::{PlayerId, SessionId};
use crate::session::CombatSession;

/// Errors surfaced by session store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session {0} not found")]
    NotFound(SessionId),

    /// Carries the session as it was when it expired, already marked abandoned.
    #[error("session {} expired", .0.id)]
    Expired(Box<CombatSession>),

    #[error("player {player} already has an active session {existing}")]
    ConcurrentSession { player: PlayerId, existing: SessionId },

    #[error("session store lock was poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;
