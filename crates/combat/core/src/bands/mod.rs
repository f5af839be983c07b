//! The hit dial: weapon band configuration and accuracy adjustment.
//!
//! A weapon splits the 360° dial into five consecutive bands in the fixed
//! order injure, miss, graze, normal, crit. [`adjust`] rescales those widths
//! from a player's accuracy so that precise fighters see a narrower miss
//! window and a wider payoff, while the dial always stays a full circle.

mod adjust;
mod config;

pub use adjust::{AdjustedBands, BandAdjustment, adjust};
pub use config::WeaponBandConfig;

/// Degrees in a full turn of the dial.
pub const FULL_CIRCLE: f64 = 360.0;
