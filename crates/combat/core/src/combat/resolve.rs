//! Full resolution of one tap.

use crate::encounter::{Encounter, EncounterStatus};
use crate::error::CombatError;
use crate::rng::RandomSource;

use super::damage::{apply_damage, retaliation_damage, strike_damage};
use super::zone::{HitZone, MultiplierTable};

/// Outcome of a single attack turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    /// Turn number this attack resolved (1-based).
    pub turn: u32,
    pub zone: HitZone,
    /// Multiplier applied to the player's attack.
    pub player_multiplier: f64,
    /// Multiplier applied to the enemy's counterattack (0 when skipped).
    pub enemy_multiplier: f64,
    /// Damage dealt to the enemy.
    pub damage_dealt: u32,
    /// Damage the player inflicted on themselves (injure only).
    pub self_damage: u32,
    /// Damage from the enemy's counterattack.
    pub counter_damage: u32,
    pub player_hp: u32,
    pub enemy_hp: u32,
    pub status: EncounterStatus,
}

impl AttackResult {
    /// Total damage the player took this turn.
    pub fn damage_taken(&self) -> u32 {
        self.self_damage.saturating_add(self.counter_damage)
    }
}

/// Resolves a tap at `angle` degrees against `encounter`.
///
/// # Turn
///
/// 1. Reject angles outside `[0, 360)` and finished encounters.
/// 2. Classify the angle against the adjusted bands.
/// 3. Injure: the player takes retaliation damage, the enemy takes none and
///    does not counter. Miss: no damage to the enemy. Otherwise the enemy
///    takes strike damage.
/// 4. Unless injured, the enemy counterattacks.
/// 5. HP, turn counter and status are written back.
///
/// The encounter is untouched when an error is returned.
pub fn resolve_attack(
    encounter: &mut Encounter,
    angle: f64,
    rng: &mut (impl RandomSource + ?Sized),
    table: &MultiplierTable,
) -> Result<AttackResult, CombatError> {
    let zone = encounter.bands.zone_at(angle)?;
    if encounter.is_over() {
        return Err(CombatError::EncounterOver {
            status: encounter.status,
        });
    }

    let player = encounter.player;
    let enemy_attack = encounter.enemy.attack;
    let enemy_defense = encounter.enemy.defense;

    let player_multiplier = table.multiplier(zone, rng);
    let retaliation = retaliation_damage(enemy_attack, player.defense);

    let (damage_dealt, self_damage, counter_damage, enemy_multiplier) = match zone {
        HitZone::Injure => (0, retaliation, 0, 0.0),
        zone if zone.strikes_enemy() => (
            strike_damage(player.attack, player_multiplier, enemy_defense),
            0,
            retaliation,
            1.0,
        ),
        _ => (0, 0, retaliation, 1.0),
    };

    let enemy_hp = apply_damage(encounter.enemy_hp, damage_dealt);
    let player_hp = apply_damage(
        encounter.player_hp,
        self_damage.saturating_add(counter_damage),
    );
    let status = if enemy_hp == 0 {
        EncounterStatus::Victory
    } else if player_hp == 0 {
        EncounterStatus::Defeat
    } else {
        EncounterStatus::Ongoing
    };

    encounter.enemy_hp = enemy_hp;
    encounter.player_hp = player_hp;
    encounter.turn += 1;
    encounter.status = status;

    Ok(AttackResult {
        turn: encounter.turn,
        zone,
        player_multiplier,
        enemy_multiplier,
        damage_dealt,
        self_damage,
        counter_damage,
        player_hp,
        enemy_hp,
        status,
    })
}
