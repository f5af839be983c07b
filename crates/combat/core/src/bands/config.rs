//! Per-weapon band configuration.

use crate::combat::HitZone;
use crate::error::CombatError;

use super::FULL_CIRCLE;

/// Raw angular widths for one weapon, in degrees.
///
/// Widths must be finite, non-negative, and sum to a value in `(0, 360]`.
/// A sum below 360 is stretched to a full circle by [`super::adjust`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponBandConfig {
    pub injure: f64,
    pub miss: f64,
    pub graze: f64,
    pub normal: f64,
    pub crit: f64,
    /// Dial rotation speed in degrees per second (presentation hint).
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotation_speed: f64,
    /// Movement pattern tag of the dial (presentation hint).
    #[cfg_attr(feature = "serde", serde(default))]
    pub pattern: String,
}

impl WeaponBandConfig {
    /// Band widths only, with no rotation speed or pattern.
    pub fn new(injure: f64, miss: f64, graze: f64, normal: f64, crit: f64) -> Self {
        Self {
            injure,
            miss,
            graze,
            normal,
            crit,
            rotation_speed: 0.0,
            pattern: String::new(),
        }
    }

    pub fn with_rotation(mut self, rotation_speed: f64, pattern: impl Into<String>) -> Self {
        self.rotation_speed = rotation_speed;
        self.pattern = pattern.into();
        self
    }

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

    /// Sum of the five widths.
    pub fn total(&self) -> f64 {
        self.injure + self.miss + self.graze + self.normal + self.crit
    }

    /// Checks that the widths describe a usable dial.
    pub fn validate(&self) -> Result<(), CombatError> {
        for zone in HitZone::CANONICAL {
            let width = self.width(zone);
            if !width.is_finite() || width < 0.0 {
                return Err(CombatError::InvalidBands {
                    reason: format!("{zone} width {width} must be finite and non-negative"),
                });
            }
        }

        let total = self.total();
        if total <= 0.0 {
            return Err(CombatError::InvalidBands {
                reason: "band widths sum to zero".into(),
            });
        }
        if total > FULL_CIRCLE + 1e-9 {
            return Err(CombatError::InvalidBands {
                reason: format!("band widths sum to {total}, more than {FULL_CIRCLE}"),
            });
        }
        if !self.rotation_speed.is_finite() || self.rotation_speed < 0.0 {
            return Err(CombatError::InvalidBands {
                reason: format!("rotation speed {} is invalid", self.rotation_speed),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_and_partial_dials() {
        assert!(WeaponBandConfig::new(5.0, 45.0, 60.0, 200.0, 50.0).validate().is_ok());
        assert!(WeaponBandConfig::new(0.0, 30.0, 30.0, 100.0, 20.0).validate().is_ok());
    }

    #[test]
    fn rejects_oversized_dial() {
        let err = WeaponBandConfig::new(10.0, 45.0, 60.0, 200.0, 50.0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, CombatError::InvalidBands { .. }));
    }

    #[test]
    fn rejects_negative_nan_and_empty_widths() {
        assert!(WeaponBandConfig::new(-1.0, 45.0, 60.0, 200.0, 50.0).validate().is_err());
        assert!(WeaponBandConfig::new(f64::NAN, 45.0, 60.0, 200.0, 50.0).validate().is_err());
        assert!(WeaponBandConfig::new(0.0, 0.0, 0.0, 0.0, 0.0).validate().is_err());
    }

    #[test]
    fn rejects_bad_rotation_speed() {
        let bands = WeaponBandConfig::new(5.0, 45.0, 60.0, 200.0, 50.0).with_rotation(-3.0, "sweep");
        assert!(bands.validate().is_err());
    }
}
