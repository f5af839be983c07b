//! Mutable state of a single player-vs-enemy encounter.

use strum::Display;

use crate::bands::{AdjustedBands, BandAdjustment, WeaponBandConfig, adjust};
use crate::error::CombatError;
use crate::stats::{EnemyStats, PlayerStats};

/// Lifecycle status of an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EncounterStatus {
    Ongoing,
    Victory,
    Defeat,
    /// Expired through inactivity.
    Abandoned,
}

impl EncounterStatus {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, EncounterStatus::Ongoing)
    }
}

/// Combat state advanced one tap at a time by [`crate::resolve_attack`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encounter {
    /// Player stats frozen at encounter start.
    pub player: PlayerStats,
    pub enemy: EnemyStats,
    pub weapon: WeaponBandConfig,
    /// Bands adjusted for `player.accuracy`, computed once at start.
    pub bands: AdjustedBands,
    pub player_hp: u32,
    pub enemy_hp: u32,
    /// Number of resolved attacks.
    pub turn: u32,
    pub status: EncounterStatus,
}

impl Encounter {
    /// Starts an encounter at full HP on both sides.
    ///
    /// Both combatants need at least one hit point.
    pub fn new(
        player: PlayerStats,
        enemy: EnemyStats,
        weapon: WeaponBandConfig,
        adjustment: &BandAdjustment,
    ) -> Result<Self, CombatError> {
        if player.hit_points == 0 {
            return Err(CombatError::InvalidCombatant {
                reason: "player has no hit points".to_string(),
            });
        }
        if enemy.hit_points == 0 {
            return Err(CombatError::InvalidCombatant {
                reason: format!("enemy '{}' has no hit points", enemy.id),
            });
        }
        let bands = adjust(&weapon, player.accuracy, adjustment)?;
        Ok(Self {
            player_hp: player.hit_points,
            enemy_hp: enemy.hit_points,
            player,
            enemy,
            weapon,
            bands,
            turn: 0,
            status: EncounterStatus::Ongoing,
        })
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Marks an ongoing encounter as abandoned. Terminal encounters keep
    /// their status.
    pub fn abandon(&mut self) {
        if self.status == EncounterStatus::Ongoing {
            self.status = EncounterStatus::Abandoned;
        }
    }
}
