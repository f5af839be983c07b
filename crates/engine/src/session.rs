//! Ephemeral per-player combat session.

use chrono::{DateTime, TimeDelta, Utc};
use combat_core::{Encounter, EncounterStatus, PoolContext};
use serde::Serialize;

use crate::api::{PlayerId, SessionId};

/// One live encounter owned by the session store.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CombatSession {
    pub id: SessionId,
    pub player: PlayerId,
    /// Location and difficulty the encounter was drawn for.
    pub context: PoolContext,
    pub encounter: Encounter,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl CombatSession {
    pub fn new(
        id: SessionId,
        player: PlayerId,
        context: PoolContext,
        encounter: Encounter,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            player,
            context,
            encounter,
            created_at: now,
            last_activity: now,
        }
    }

    pub fn status(&self) -> EncounterStatus {
        self.encounter.status
    }

    pub fn difficulty(&self) -> u32 {
        self.context.difficulty
    }

    /// True once `ttl` has elapsed since the last activity.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now.signed_duration_since(self.last_activity) >= ttl
    }

    pub fn expires_at(&self, ttl: TimeDelta) -> DateTime<Utc> {
        self.last_activity
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
    }
}
