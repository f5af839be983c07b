//! Error types raised by the pure combat model.
//!
//! Both enums describe caller or content mistakes, never transient failures:
//! nothing here is worth retrying without changing the input.

use thiserror::Error;

use crate::encounter::EncounterStatus;

/// Errors raised while validating bands or resolving an attack.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CombatError {
    /// Tap angle outside `[0, 360)` or not a finite number.
    #[error("tap angle {angle} is outside [0, 360)")]
    InvalidMove { angle: f64 },

    /// Weapon band widths are negative, non-finite, or do not fit the dial.
    #[error("invalid weapon bands: {reason}")]
    InvalidBands { reason: String },

    /// A combatant would enter the encounter already dead.
    #[error("invalid combatant: {reason}")]
    InvalidCombatant { reason: String },

    /// The encounter already reached a terminal status.
    #[error("encounter is already over ({status})")]
    EncounterOver { status: EncounterStatus },
}

/// Errors raised by weighted pool selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PoolError {
    /// No candidates, or every candidate carries zero weight.
    #[error("pool has no candidates with positive weight")]
    Empty,
}
