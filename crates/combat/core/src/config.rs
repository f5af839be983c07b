use crate::bands::BandAdjustment;
use crate::combat::MultiplierTable;
use crate::reward::RewardPolicy;

/// Tunable combat parameters.
///
/// Every section falls back to its defaults when omitted from content files.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    pub bands: BandAdjustment,
    pub multipliers: MultiplierTable,
    pub rewards: RewardPolicy,
}
