//! Hit zones and their multipliers.

use strum::{Display, EnumIter};

use crate::rng::RandomSource;

/// Outcome class of a single tap, ordered by damage multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HitZone {
    /// The player fumbles and hurts themselves.
    Injure,
    Miss,
    Graze,
    Normal,
    Crit,
}

impl HitZone {
    /// Order in which bands are laid out on the dial, starting at 0°.
    pub const CANONICAL: [HitZone; 5] = [
        HitZone::Injure,
        HitZone::Miss,
        HitZone::Graze,
        HitZone::Normal,
        HitZone::Crit,
    ];

    /// Returns true when the enemy can take damage from this zone.
    pub const fn strikes_enemy(self) -> bool {
        !matches!(self, HitZone::Injure | HitZone::Miss)
    }
}

/// Damage multipliers per zone.
///
/// Crit draws a fresh uniform bonus in `[0, crit_bonus_max)` on top of
/// `crit_base` for every crit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MultiplierTable {
    pub injure: f64,
    pub miss: f64,
    pub graze: f64,
    pub normal: f64,
    pub crit_base: f64,
    pub crit_bonus_max: f64,
}

impl MultiplierTable {
    /// Multiplier for `zone`, drawing the crit bonus from `rng` when needed.
    pub fn multiplier(&self, zone: HitZone, rng: &mut (impl RandomSource + ?Sized)) -> f64 {
        match zone {
            HitZone::Injure => self.injure,
            HitZone::Miss => self.miss,
            HitZone::Graze => self.graze,
            HitZone::Normal => self.normal,
            HitZone::Crit => self.crit_base + rng.next_unit() * self.crit_bonus_max,
        }
    }
}

impl Default for MultiplierTable {
    fn default() -> Self {
        Self {
            injure: -0.5,
            miss: 0.0,
            graze: 0.6,
            normal: 1.0,
            crit_base: 1.6,
            crit_bonus_max: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::rng::{PcgRng, ScriptedRng};

    #[test]
    fn zones_are_ordered_by_multiplier() {
        let table = MultiplierTable::default();
        let mut rng = PcgRng::seeded(1);
        let multipliers: Vec<f64> = HitZone::iter()
            .map(|zone| table.multiplier(zone, &mut rng))
            .collect();
        assert!(multipliers.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(HitZone::iter().collect::<Vec<_>>(), HitZone::CANONICAL.to_vec());
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn crit_bonus_is_drawn_fresh_each_time() {
        let table = MultiplierTable::default();
        let mut rng = ScriptedRng::new(vec![0.0, 0.5, 0.25]);
        assert!(approx(table.multiplier(HitZone::Crit, &mut rng), 1.6));
        assert!(approx(table.multiplier(HitZone::Crit, &mut rng), 2.1));
        assert!(approx(table.multiplier(HitZone::Crit, &mut rng), 1.85));
    }

    #[test]
    fn non_crit_zones_do_not_consume_randomness() {
        let table = MultiplierTable::default();
        let mut rng = ScriptedRng::new(vec![0.5, 0.0]);
        assert_eq!(table.multiplier(HitZone::Normal, &mut rng), 1.0);
        assert!(approx(table.multiplier(HitZone::Crit, &mut rng), 2.1));
    }

    #[test]
    fn only_graze_and_above_strike_the_enemy() {
        let striking: Vec<HitZone> = HitZone::iter().filter(|zone| zone.strikes_enemy()).collect();
        assert_eq!(striking, vec![HitZone::Graze, HitZone::Normal, HitZone::Crit]);
    }

    #[test]
    fn zone_names_are_snake_case() {
        assert_eq!(HitZone::Crit.to_string(), "crit");
        assert_eq!(HitZone::Injure.to_string(), "injure");
    }
}
