//! Loot tables: pool filters plus per-tier weight multipliers.

use std::collections::BTreeMap;

use crate::error::PoolError;
use crate::reward::LootDrop;
use crate::rng::RandomSource;
use crate::stats::{ItemId, StyleTag};

use super::context::PoolContext;
use super::filter::{PoolCatalog, Resolution};
use super::select::draw_weighted;

/// Result of a loot roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LootRoll {
    pub drops: Vec<LootDrop>,
    pub used_fallback: bool,
}

/// Item pool with tier-based weight scaling.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootTable {
    pub pool: PoolCatalog<ItemId>,
    /// Tier of each item; untiered items keep their weight.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tiers: BTreeMap<ItemId, String>,
    /// Weight multiplier per tier; a missing tier scales by 1.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tier_multipliers: BTreeMap<String, f64>,
}

impl LootTable {
    pub fn new(pool: PoolCatalog<ItemId>) -> Self {
        Self {
            pool,
            tiers: BTreeMap::new(),
            tier_multipliers: BTreeMap::new(),
        }
    }

    pub fn with_tier(mut self, item: impl Into<ItemId>, tier: impl Into<String>) -> Self {
        self.tiers.insert(item.into(), tier.into());
        self
    }

    pub fn with_tier_multiplier(mut self, tier: impl Into<String>, multiplier: f64) -> Self {
        self.tier_multipliers.insert(tier.into(), multiplier);
        self
    }

    /// Multiplier applied to `item`'s weight.
    ///
    /// Negative or non-finite multipliers count as 0.
    pub fn multiplier_for(&self, item: &ItemId) -> f64 {
        let multiplier = self
            .tiers
            .get(item)
            .and_then(|tier| self.tier_multipliers.get(tier))
            .copied()
            .unwrap_or(1.0);
        if multiplier.is_finite() && multiplier > 0.0 {
            multiplier
        } else {
            0.0
        }
    }

    /// Candidates for `ctx` after tier scaling, falling back to the default
    /// pool when the scaled candidates carry no weight.
    pub fn weighted_candidates(&self, ctx: &PoolContext) -> Result<Resolution<ItemId>, PoolError> {
        self.pool.resolve_with(ctx, |candidates| {
            candidates
                .into_iter()
                .map(|(item, weight)| {
                    let scaled = (weight as f64 * self.multiplier_for(&item)).round() as u64;
                    (item, scaled)
                })
                .filter(|(_, weight)| *weight > 0)
                .collect()
        })
    }

    /// Draws `count` drops, stamping each with `style` unless it is the
    /// default style.
    pub fn roll(
        &self,
        ctx: &PoolContext,
        count: usize,
        style: &StyleTag,
        rng: &mut (impl RandomSource + ?Sized),
    ) -> Result<LootRoll, PoolError> {
        let resolution = self.weighted_candidates(ctx)?;
        let inherited = (!style.is_default()).then(|| style.clone());

        let drops = draw_weighted(&resolution.candidates, count, rng)?
            .into_iter()
            .map(|item| LootDrop {
                item,
                style: inherited.clone(),
            })
            .collect();

        Ok(LootRoll {
            drops,
            used_fallback: resolution.used_fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{PoolFilter, WeightedEntry};
    use crate::rng::PcgRng;

    fn table() -> LootTable {
        LootTable::new(
            PoolCatalog::new(vec![
                PoolFilter::universal(vec![
                    WeightedEntry::new("bone", 10),
                    WeightedEntry::new("fang", 10),
                ]),
                PoolFilter::attribute("biome", "forest", vec![WeightedEntry::new("moss", 6)]),
            ])
            .with_fallback(vec![WeightedEntry::new("pebble", 1)]),
        )
        .with_tier("fang", "rare")
        .with_tier("moss", "junk")
        .with_tier_multiplier("rare", 0.5)
        .with_tier_multiplier("junk", 0.0)
    }

    #[test]
    fn tier_multipliers_scale_weights() {
        let resolution = table()
            .weighted_candidates(&PoolContext::new("woods", 1).with_attribute("biome", "forest"))
            .unwrap();
        assert_eq!(
            resolution.candidates,
            vec![(ItemId::from("bone"), 10), (ItemId::from("fang"), 5)]
        );
        assert!(!resolution.used_fallback);
    }

    #[test]
    fn drops_inherit_non_default_style() {
        let mut rng = PcgRng::seeded(3);
        let ctx = PoolContext::new("crypt", 2);

        let roll = table().roll(&ctx, 4, &StyleTag::from("frost"), &mut rng).unwrap();
        assert_eq!(roll.drops.len(), 4);
        assert!(
            roll.drops
                .iter()
                .all(|drop| drop.style == Some(StyleTag::from("frost")))
        );

        let roll = table().roll(&ctx, 4, &StyleTag::default(), &mut rng).unwrap();
        assert!(roll.drops.iter().all(|drop| drop.style.is_none()));
    }

    #[test]
    fn fully_suppressed_pool_uses_fallback() {
        let table = LootTable::new(
            PoolCatalog::new(vec![PoolFilter::universal(vec![WeightedEntry::new("moss", 6)])])
                .with_fallback(vec![WeightedEntry::new("pebble", 1)]),
        )
        .with_tier("moss", "junk")
        .with_tier_multiplier("junk", 0.0);

        let mut rng = PcgRng::seeded(3);
        let roll = table
            .roll(&PoolContext::new("crypt", 1), 2, &StyleTag::default(), &mut rng)
            .unwrap();
        assert!(roll.used_fallback);
        assert!(roll.drops.iter().all(|drop| drop.item.as_str() == "pebble"));
    }

    #[test]
    fn empty_table_fails() {
        let mut rng = PcgRng::seeded(3);
        let result = LootTable::default().roll(
            &PoolContext::new("crypt", 1),
            1,
            &StyleTag::default(),
            &mut rng,
        );
        assert_eq!(result, Err(PoolError::Empty));
    }

    #[test]
    fn invalid_multipliers_suppress_items() {
        let table = table().with_tier_multiplier("rare", f64::NAN);
        assert_eq!(table.multiplier_for(&ItemId::from("fang")), 0.0);
        assert_eq!(table.multiplier_for(&ItemId::from("bone")), 1.0);
    }
}
