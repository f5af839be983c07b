//! Attack resolution on the hit dial.
//!
//! Pure functions: a tap angle and an [`crate::Encounter`] go in, exactly one
//! resolved [`AttackResult`] comes out. Nothing is mutated until the whole
//! outcome has been computed.
//!
//! - `zone`: hit zones and their damage multipliers
//! - `damage`: strike, retaliation, and HP arithmetic
//! - `resolve`: the full turn (classification, damage, counterattack, status)

pub mod damage;
pub mod resolve;
pub mod zone;

pub use damage::{apply_damage, retaliation_damage, strike_damage};
pub use resolve::{AttackResult, resolve_attack};
pub use zone::{HitZone, MultiplierTable};
