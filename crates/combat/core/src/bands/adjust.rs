//! Accuracy-driven band rescaling and angle classification.

use crate::combat::HitZone;
use crate::error::CombatError;

use super::{FULL_CIRCLE, WeaponBandConfig};

/// Tuning for [`adjust`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BandAdjustment {
    /// Accuracy at which the adjustment saturates.
    pub accuracy_cap: f64,
    /// Fraction of the miss and injure widths moved at full accuracy, in `[0, 1]`.
    pub transfer_rate: f64,
}

impl BandAdjustment {
    pub const DEFAULT_ACCURACY_CAP: f64 = 1.0;
    pub const DEFAULT_TRANSFER_RATE: f64 = 0.5;

    /// Normalized accuracy strength in `[0, 1]`.
    ///
    /// Non-finite accuracy and a non-positive cap both yield 0.
    pub fn strength(&self, accuracy: f64) -> f64 {
        if !accuracy.is_finite() || self.accuracy_cap.is_nan() || self.accuracy_cap <= 0.0 {
            return 0.0;
        }
        accuracy.clamp(0.0, self.accuracy_cap) / self.accuracy_cap
    }
}

impl Default for BandAdjustment {
    fn default() -> Self {
        Self {
            accuracy_cap: Self::DEFAULT_ACCURACY_CAP,
            transfer_rate: Self::DEFAULT_TRANSFER_RATE,
        }
    }
}

/// Band widths after accuracy rescaling. Always a full circle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjustedBands {
    pub injure: f64,
    pub miss: f64,
    pub graze: f64,
    pub normal: f64,
    pub crit: f64,
}

impl AdjustedBands {
    /// Width of `zone` in degrees.
    pub fn width(&self, zone: HitZone) -> f64 {
        match zone {
            HitZone::Injure => self.injure,
            HitZone::Miss => self.miss,
            HitZone::Graze => self.graze,
            HitZone::Normal => self.normal,
            HitZone::Crit => self.crit,
        }
    }

    pub fn total(&self) -> f64 {
        self.injure + self.miss + self.graze + self.normal + self.crit
    }

    /// `[start, end)` ranges of each band in canonical order.
    pub fn ranges(&self) -> [(HitZone, f64, f64); 5] {
        let mut start = 0.0;
        HitZone::CANONICAL.map(|zone| {
            let end = start + self.width(zone);
            let range = (zone, start, end);
            start = end;
            range
        })
    }

    /// Classifies a tap angle.
    ///
    /// Bands are inclusive-low and exclusive-high, so an angle exactly on a
    /// boundary belongs to the following band and zero-width bands are never
    /// hit. Whatever lies past the first four bands is crit.
    pub fn zone_at(&self, angle: f64) -> Result<HitZone, CombatError> {
        if !angle.is_finite() || !(0.0..FULL_CIRCLE).contains(&angle) {
            return Err(CombatError::InvalidMove { angle });
        }

        let mut upper = 0.0;
        for zone in [HitZone::Injure, HitZone::Miss, HitZone::Graze, HitZone::Normal] {
            upper += self.width(zone);
            if angle < upper {
                return Ok(zone);
            }
        }
        Ok(HitZone::Crit)
    }
}

/// Rescales `bands` for a player with the given `accuracy`.
///
/// With strength `s` (see [`BandAdjustment::strength`]), `s × transfer_rate`
/// of both the miss and injure widths moves into normal and crit, split in
/// proportion to their current widths. The result is then stretched to 360°
/// with the floating-point residual absorbed into normal.
pub fn adjust(
    bands: &WeaponBandConfig,
    accuracy: f64,
    params: &BandAdjustment,
) -> Result<AdjustedBands, CombatError> {
    bands.validate()?;

    let rate = params.strength(accuracy) * params.transfer_rate.clamp(0.0, 1.0);
    let moved_injure = bands.injure * rate;
    let moved_miss = bands.miss * rate;
    let pool = moved_injure + moved_miss;

    let payoff = bands.normal + bands.crit;
    let (to_normal, to_crit) = if payoff > 0.0 {
        let to_normal = pool * bands.normal / payoff;
        (to_normal, pool - to_normal)
    } else {
        (pool / 2.0, pool / 2.0)
    };

    let injure = bands.injure - moved_injure;
    let miss = bands.miss - moved_miss;
    let graze = bands.graze;
    let normal = bands.normal + to_normal;
    let crit = bands.crit + to_crit;

    let scale = FULL_CIRCLE / (injure + miss + graze + normal + crit);
    let injure = injure * scale;
    let miss = miss * scale;
    let graze = graze * scale;
    let crit = crit * scale;
    let normal = (FULL_CIRCLE - (injure + miss + graze + crit)).max(0.0);

    Ok(AdjustedBands {
        injure,
        miss,
        graze,
        normal,
        crit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn sample() -> WeaponBandConfig {
        WeaponBandConfig::new(5.0, 45.0, 60.0, 200.0, 50.0)
    }

    #[test]
    fn zero_accuracy_keeps_full_dial_unchanged() {
        let adjusted = adjust(&sample(), 0.0, &BandAdjustment::default()).unwrap();
        assert!((adjusted.injure - 5.0).abs() < EPS);
        assert!((adjusted.miss - 45.0).abs() < EPS);
        assert!((adjusted.graze - 60.0).abs() < EPS);
        assert!((adjusted.normal - 200.0).abs() < EPS);
        assert!((adjusted.crit - 50.0).abs() < EPS);
    }

    #[test]
    fn half_accuracy_moves_quarter_of_miss_and_injure() {
        let adjusted = adjust(&sample(), 0.5, &BandAdjustment::default()).unwrap();
        assert!((adjusted.injure - 3.75).abs() < EPS);
        assert!((adjusted.miss - 33.75).abs() < EPS);
        assert!((adjusted.graze - 60.0).abs() < EPS);
        assert!((adjusted.normal - 210.0).abs() < EPS);
        assert!((adjusted.crit - 52.5).abs() < EPS);
    }

    #[test]
    fn widths_sum_to_full_circle_across_accuracy_range() {
        let configs = [
            sample(),
            WeaponBandConfig::new(0.0, 30.0, 30.0, 100.0, 20.0),
            WeaponBandConfig::new(17.3, 41.9, 12.1, 0.0, 0.0),
            WeaponBandConfig::new(90.0, 90.0, 90.0, 90.0, 0.0),
        ];
        let params = BandAdjustment::default();

        for bands in &configs {
            for step in 0..=100 {
                let accuracy = step as f64 / 100.0;
                let adjusted = adjust(bands, accuracy, &params).unwrap();
                for zone in HitZone::CANONICAL {
                    assert!(adjusted.width(zone) >= 0.0, "{zone} negative at {accuracy}");
                }
                assert!(
                    (adjusted.total() - FULL_CIRCLE).abs() < EPS,
                    "total {} at accuracy {accuracy}",
                    adjusted.total()
                );
            }
        }
    }

    #[test]
    fn higher_accuracy_never_widens_failure_bands() {
        let params = BandAdjustment::default();
        let mut previous = adjust(&sample(), 0.0, &params).unwrap();
        for step in 1..=20 {
            let next = adjust(&sample(), step as f64 / 20.0, &params).unwrap();
            assert!(next.miss <= previous.miss + EPS);
            assert!(next.injure <= previous.injure + EPS);
            assert!(next.normal + next.crit >= previous.normal + previous.crit - EPS);
            previous = next;
        }
    }

    #[test]
    fn accuracy_is_clamped_to_cap() {
        let params = BandAdjustment::default();
        let capped = adjust(&sample(), 1.0, &params).unwrap();
        assert_eq!(adjust(&sample(), 7.5, &params).unwrap(), capped);
        assert_eq!(
            adjust(&sample(), -2.0, &params).unwrap(),
            adjust(&sample(), 0.0, &params).unwrap()
        );
        assert_eq!(
            adjust(&sample(), f64::NAN, &params).unwrap(),
            adjust(&sample(), 0.0, &params).unwrap()
        );
    }

    #[test]
    fn partial_dial_is_stretched() {
        let bands = WeaponBandConfig::new(0.0, 30.0, 30.0, 100.0, 20.0);
        let adjusted = adjust(&bands, 0.0, &BandAdjustment::default()).unwrap();
        assert!((adjusted.miss - 60.0).abs() < EPS);
        assert!((adjusted.normal - 200.0).abs() < EPS);
    }

    #[test]
    fn pool_is_split_evenly_without_payoff_bands() {
        let bands = WeaponBandConfig::new(40.0, 40.0, 280.0, 0.0, 0.0);
        let adjusted = adjust(&bands, 1.0, &BandAdjustment::default()).unwrap();
        assert!((adjusted.normal - 20.0).abs() < EPS);
        assert!((adjusted.crit - 20.0).abs() < EPS);
    }

    #[test]
    fn invalid_bands_are_rejected() {
        let bands = WeaponBandConfig::new(100.0, 100.0, 100.0, 100.0, 100.0);
        assert!(matches!(
            adjust(&bands, 0.5, &BandAdjustment::default()),
            Err(CombatError::InvalidBands { .. })
        ));
    }

    #[test]
    fn boundary_angles_belong_to_following_band() {
        let adjusted = adjust(&sample(), 0.0, &BandAdjustment::default()).unwrap();
        assert_eq!(adjusted.zone_at(0.0).unwrap(), HitZone::Injure);
        assert_eq!(adjusted.zone_at(4.999).unwrap(), HitZone::Injure);
        assert_eq!(adjusted.zone_at(5.0).unwrap(), HitZone::Miss);
        assert_eq!(adjusted.zone_at(50.0).unwrap(), HitZone::Graze);
        assert_eq!(adjusted.zone_at(110.0).unwrap(), HitZone::Normal);
        assert_eq!(adjusted.zone_at(309.999).unwrap(), HitZone::Normal);
        assert_eq!(adjusted.zone_at(310.0).unwrap(), HitZone::Crit);
        assert_eq!(adjusted.zone_at(359.999).unwrap(), HitZone::Crit);
    }

    #[test]
    fn zero_width_band_is_never_hit() {
        let bands = WeaponBandConfig::new(0.0, 60.0, 60.0, 180.0, 60.0);
        let adjusted = adjust(&bands, 0.0, &BandAdjustment::default()).unwrap();
        assert_eq!(adjusted.zone_at(0.0).unwrap(), HitZone::Miss);
    }

    #[test]
    fn every_angle_maps_to_the_band_that_contains_it() {
        let adjusted = adjust(&sample(), 0.37, &BandAdjustment::default()).unwrap();
        let ranges = adjusted.ranges();
        for tenth in 0..3600 {
            let angle = tenth as f64 / 10.0;
            let zone = adjusted.zone_at(angle).unwrap();
            let owners: Vec<HitZone> = ranges
                .iter()
                .filter(|(_, start, end)| angle >= *start && angle < *end)
                .map(|(zone, _, _)| *zone)
                .collect();
            assert_eq!(owners, vec![zone], "angle {angle}");
        }
    }

    #[test]
    fn out_of_range_angles_are_invalid_moves() {
        let adjusted = adjust(&sample(), 0.0, &BandAdjustment::default()).unwrap();
        for angle in [-0.001, 360.0, 720.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                adjusted.zone_at(angle),
                Err(CombatError::InvalidMove { .. })
            ));
        }
    }
}
