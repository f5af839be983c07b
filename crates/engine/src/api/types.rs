//! Identifiers, requests and responses of the engine API.

use std::fmt;

use chrono::{DateTime, Utc};
use combat_core::{
    AdjustedBands, AttackResult, EncounterResult, EncounterStatus, EnemyStats, HitZone, LocationId,
    LootDrop, PlayerStats, RewardBundle, WeaponBandConfig,
};
use serde::{Deserialize, Serialize};
use strum::Display;
use uuid::Uuid;

use crate::session::CombatSession;

/// Player identifier assigned by the account service.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Opaque session identifier (UUID v4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Outcome a client claims when completing a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeclaredResult {
    Victory,
    Defeat,
}

impl From<DeclaredResult> for EncounterResult {
    fn from(value: DeclaredResult) -> Self {
        match value {
            DeclaredResult::Victory => EncounterResult::Victory,
            DeclaredResult::Defeat => EncounterResult::Defeat,
        }
    }
}

/// Response of [`crate::CombatEngine::start`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StartedCombat {
    pub session_id: SessionId,
    pub location: LocationId,
    pub difficulty: u32,
    pub enemy: EnemyStats,
    pub player: PlayerStats,
    pub weapon: WeaponBandConfig,
    pub bands: AdjustedBands,
    pub expires_at: DateTime<Utc>,
}

impl StartedCombat {
    pub(crate) fn new(session: &CombatSession, expires_at: DateTime<Utc>) -> Self {
        let encounter = &session.encounter;
        Self {
            session_id: session.id,
            location: session.context.location.clone(),
            difficulty: session.context.difficulty,
            enemy: encounter.enemy.clone(),
            player: encounter.player,
            weapon: encounter.weapon.clone(),
            bands: encounter.bands,
            expires_at,
        }
    }
}

/// Response of [`crate::CombatEngine::attack`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttackReport {
    pub session_id: SessionId,
    pub turn: u32,
    pub zone: HitZone,
    pub damage_dealt: u32,
    pub self_damage: u32,
    pub counter_damage: u32,
    pub player_multiplier: f64,
    pub enemy_multiplier: f64,
    pub player_hp: u32,
    pub enemy_hp: u32,
    pub status: EncounterStatus,
}

impl AttackReport {
    pub(crate) fn new(session_id: SessionId, result: AttackResult) -> Self {
        Self {
            session_id,
            turn: result.turn,
            zone: result.zone,
            damage_dealt: result.damage_dealt,
            self_damage: result.self_damage,
            counter_damage: result.counter_damage,
            player_multiplier: result.player_multiplier,
            enemy_multiplier: result.enemy_multiplier,
            player_hp: result.player_hp,
            enemy_hp: result.enemy_hp,
            status: result.status,
        }
    }
}

/// Response of [`crate::CombatEngine::complete`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompletedCombat {
    pub session_id: SessionId,
    pub result: EncounterResult,
    pub rewards: RewardBundle,
    pub history: PlayerHistory,
}

/// Single atomic write sent to the economy ledger when a session ends.
///
/// `session_id` is the idempotency key: replays must not apply twice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRequest {
    pub session_id: SessionId,
    pub player_id: PlayerId,
    pub location_id: LocationId,
    pub result: EncounterResult,
    pub gold_delta: i64,
    pub xp_delta: u64,
    pub loot: Vec<LootDrop>,
}

impl CommitRequest {
    pub fn new(session: &CombatSession, bundle: &RewardBundle) -> Self {
        Self {
            session_id: session.id,
            player_id: session.player.clone(),
            location_id: session.context.location.clone(),
            result: bundle.result,
            gold_delta: bundle.gold_delta,
            xp_delta: bundle.xp_delta,
            loot: bundle.loot.clone(),
        }
    }
}

/// Encounter counters kept by the ledger per player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHistory {
    pub attempts: u64,
    pub wins: u64,
    pub losses: u64,
    pub abandons: u64,
    pub current_streak: u64,
    pub best_streak: u64,
}

impl PlayerHistory {
    /// Counts one finished encounter.
    pub fn record(&mut self, result: EncounterResult) {
        self.attempts += 1;
        match result {
            EncounterResult::Victory => {
                self.wins += 1;
                self.current_streak += 1;
                self.best_streak = self.best_streak.max(self.current_streak);
            }
            EncounterResult::Defeat => {
                self.losses += 1;
                self.current_streak = 0;
            }
            EncounterResult::Abandoned => {
                self.abandons += 1;
                self.current_streak = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_tracks_streaks() {
        let mut history = PlayerHistory::default();
        for result in [
            EncounterResult::Victory,
            EncounterResult::Victory,
            EncounterResult::Defeat,
            EncounterResult::Victory,
            EncounterResult::Abandoned,
        ] {
            history.record(result);
        }

        assert_eq!(
            history,
            PlayerHistory {
                attempts: 5,
                wins: 3,
                losses: 1,
                abandons: 1,
                current_streak: 0,
                best_streak: 2,
            }
        );
    }

    #[test]
    fn session_id_round_trips_through_display() {
        let id = SessionId::generate();
        assert_eq!(id.to_string().parse::<SessionId>().unwrap(), id);
    }

    #[test]
    fn declared_result_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&DeclaredResult::Victory).unwrap(),
            "\"victory\""
        );
        assert_eq!(DeclaredResult::Defeat.to_string(), "defeat");
    }
}
