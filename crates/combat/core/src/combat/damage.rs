//! Damage arithmetic.
//!
//! # Formula
//!
//! ```text
//! strike      = max(1, round(attack × multiplier) − defense)
//! retaliation = max(1, attack − defense)
//! ```
//!
//! Both floor at 1 so a landed blow always counts, even against a defense
//! that matches or exceeds the attack.

/// Damage a player strike deals to the enemy.
pub fn strike_damage(attack: u32, multiplier: f64, defense: u32) -> u32 {
    let raw = (f64::from(attack) * multiplier).round() as i64 - i64::from(defense);
    clamp_damage(raw)
}

/// Damage the enemy deals to the player, as a counterattack or via injury.
pub fn retaliation_damage(attack: u32, defense: u32) -> u32 {
    clamp_damage(i64::from(attack) - i64::from(defense))
}

/// Apply damage to current HP, clamped to 0.
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

fn clamp_damage(raw: i64) -> u32 {
    raw.clamp(1, i64::from(u32::MAX)) as u32
}
