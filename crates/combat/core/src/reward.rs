//! Encounter rewards.
//!
//! Victory pays gold, experience and loot scaled by difficulty. Defeat costs a
//! fixed amount of gold. Abandonment neither pays nor costs anything but
//! still counts as an attempt in the player's history.

use strum::Display;

use crate::encounter::EncounterStatus;
use crate::stats::{ItemId, StyleTag};

/// Final result of an encounter as recorded in history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EncounterResult {
    Victory,
    Defeat,
    Abandoned,
}

impl EncounterResult {
    /// Result matching a terminal status; `None` while ongoing.
    pub const fn from_status(status: EncounterStatus) -> Option<Self> {
        match status {
            EncounterStatus::Ongoing => None,
            EncounterStatus::Victory => Some(Self::Victory),
            EncounterStatus::Defeat => Some(Self::Defeat),
            EncounterStatus::Abandoned => Some(Self::Abandoned),
        }
    }
}

/// One dropped item or material.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootDrop {
    pub item: ItemId,
    /// Style inherited from the defeated enemy, if it had a distinctive one.
    pub style: Option<StyleTag>,
}

/// Everything granted (or taken) by one encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardBundle {
    pub result: EncounterResult,
    pub gold_delta: i64,
    pub xp_delta: u64,
    pub loot: Vec<LootDrop>,
}

/// Reward tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardPolicy {
    pub gold_base: u64,
    pub gold_per_difficulty: u64,
    pub xp_base: u64,
    pub xp_per_difficulty: u64,
    /// Gold lost on defeat.
    pub defeat_gold_penalty: u64,
    /// Number of loot draws on victory.
    pub loot_rolls: u32,
}

impl RewardPolicy {
    /// Gold change for `result` at `difficulty`.
    pub fn gold_delta(&self, result: EncounterResult, difficulty: u32) -> i64 {
        match result {
            EncounterResult::Victory => {
                let gold = self
                    .gold_base
                    .saturating_add(self.gold_per_difficulty.saturating_mul(u64::from(difficulty)));
                i64::try_from(gold).unwrap_or(i64::MAX)
            }
            EncounterResult::Defeat => {
                -i64::try_from(self.defeat_gold_penalty).unwrap_or(i64::MAX)
            }
            EncounterResult::Abandoned => 0,
        }
    }

    /// Experience gained for `result` at `difficulty`.
    pub fn xp_delta(&self, result: EncounterResult, difficulty: u32) -> u64 {
        match result {
            EncounterResult::Victory => self
                .xp_base
                .saturating_add(self.xp_per_difficulty.saturating_mul(u64::from(difficulty))),
            EncounterResult::Defeat | EncounterResult::Abandoned => 0,
        }
    }

    /// Assembles a bundle. Loot is discarded unless the result is a victory.
    pub fn bundle(
        &self,
        result: EncounterResult,
        difficulty: u32,
        loot: Vec<LootDrop>,
    ) -> RewardBundle {
        RewardBundle {
            result,
            gold_delta: self.gold_delta(result, difficulty),
            xp_delta: self.xp_delta(result, difficulty),
            loot: if result == EncounterResult::Victory {
                loot
            } else {
                Vec::new()
            },
        }
    }
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            gold_base: 10,
            gold_per_difficulty: 5,
            xp_base: 20,
            xp_per_difficulty: 10,
            defeat_gold_penalty: 5,
            loot_rolls: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop(item: &str) -> LootDrop {
        LootDrop {
            item: ItemId::from(item),
            style: None,
        }
    }

    #[test]
    fn victory_scales_with_difficulty() {
        let policy = RewardPolicy::default();
        let bundle = policy.bundle(EncounterResult::Victory, 3, vec![drop("bone")]);
        assert_eq!(bundle.gold_delta, 25);
        assert_eq!(bundle.xp_delta, 50);
        assert_eq!(bundle.loot, vec![drop("bone")]);
    }

    #[test]
    fn defeat_costs_gold_and_drops_loot() {
        let policy = RewardPolicy::default();
        let bundle = policy.bundle(EncounterResult::Defeat, 3, vec![drop("bone")]);
        assert_eq!(bundle.gold_delta, -5);
        assert_eq!(bundle.xp_delta, 0);
        assert!(bundle.loot.is_empty());
    }

    #[test]
    fn abandonment_is_neutral() {
        let bundle = RewardPolicy::default().bundle(EncounterResult::Abandoned, 9, vec![]);
        assert_eq!((bundle.gold_delta, bundle.xp_delta), (0, 0));
    }

    #[test]
    fn result_follows_terminal_status() {
        assert_eq!(EncounterResult::from_status(EncounterStatus::Ongoing), None);
        assert_eq!(
            EncounterResult::from_status(EncounterStatus::Defeat),
            Some(EncounterResult::Defeat)
        );
    }
}
