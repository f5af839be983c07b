//! Combatant stats and content identities.
//!
//! Player stats are a snapshot taken when an encounter starts; equipment and
//! buffs are aggregated elsewhere. Enemy stats are realized from a template
//! for a given difficulty.

use std::collections::BTreeMap;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

string_id!(
    /// Identity of an enemy template in the content catalog.
    EnemyId
);

string_id!(
    /// Identity of a droppable item or material.
    ItemId
);

string_id!(
    /// Identity of a location where encounters happen.
    LocationId
);

string_id!(
    /// Visual style of an enemy, inherited by the materials it drops.
    StyleTag
);

impl StyleTag {
    /// Style carried by enemies without a distinctive look.
    pub const DEFAULT: &'static str = "default";

    /// Returns true for the default style, which is never stamped on drops.
    pub fn is_default(&self) -> bool {
        self.0.is_empty() || self.0 == Self::DEFAULT
    }
}

impl Default for StyleTag {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self(String::new())
    }
}

/// Frozen player combat stats captured at encounter start.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerStats {
    pub attack: u32,
    /// Accuracy rating; clamped to the band adjustment cap when used.
    pub accuracy: f64,
    pub defense: u32,
    pub hit_points: u32,
}

impl PlayerStats {
    pub const fn new(attack: u32, accuracy: f64, defense: u32, hit_points: u32) -> Self {
        Self {
            attack,
            accuracy,
            defense,
            hit_points,
        }
    }
}

/// Enemy stats realized for one encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyStats {
    pub id: EnemyId,
    pub name: String,
    pub attack: u32,
    pub defense: u32,
    pub hit_points: u32,
    pub style: StyleTag,
    /// Free-form personality traits consumed by narration layers.
    pub personality: BTreeMap<String, String>,
}

impl EnemyStats {
    /// Bare enemy with default style and no personality metadata.
    pub fn new(id: impl Into<EnemyId>, attack: u32, defense: u32, hit_points: u32) -> Self {
        let id = id.into();
        Self {
            name: id.0.clone(),
            id,
            attack,
            defense,
            hit_points,
            style: StyleTag::default(),
            personality: BTreeMap::new(),
        }
    }

    pub fn with_style(mut self, style: impl Into<StyleTag>) -> Self {
        self.style = style.into();
        self
    }
}

impl From<String> for EnemyId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<String> for StyleTag {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Enemy definition as stored in content files.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: EnemyId,
    pub name: String,
    pub attack: u32,
    pub defense: u32,
    pub hit_points: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub style: StyleTag,
    #[cfg_attr(feature = "serde", serde(default))]
    pub personality: BTreeMap<String, String>,
}

impl EnemyTemplate {
    /// Stat growth per difficulty level above 1, in percent.
    pub const GROWTH_PERCENT_PER_LEVEL: u32 = 10;

    /// Realizes the template for `difficulty`.
    ///
    /// Difficulty 0 and 1 use the template values; each level above adds
    /// [`Self::GROWTH_PERCENT_PER_LEVEL`] percent to attack, defense and HP
    /// (rounded down).
    pub fn realize(&self, difficulty: u32) -> EnemyStats {
        let bonus = difficulty.saturating_sub(1) as u64 * Self::GROWTH_PERCENT_PER_LEVEL as u64;
        let scale = |base: u32| -> u32 {
            let scaled = base as u64 * (100 + bonus) / 100;
            scaled.min(u32::MAX as u64) as u32
        };

        EnemyStats {
            id: self.id.clone(),
            name: self.name.clone(),
            attack: scale(self.attack),
            defense: scale(self.defense),
            hit_points: scale(self.hit_points).max(1),
            style: self.style.clone(),
            personality: self.personality.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goblin() -> EnemyTemplate {
        EnemyTemplate {
            id: EnemyId::from("goblin"),
            name: "Goblin".into(),
            attack: 10,
            defense: 3,
            hit_points: 15,
            style: StyleTag::default(),
            personality: BTreeMap::new(),
        }
    }

    #[test]
    fn realize_keeps_base_stats_at_level_one() {
        let stats = goblin().realize(1);
        assert_eq!((stats.attack, stats.defense, stats.hit_points), (10, 3, 15));
        assert_eq!(goblin().realize(0), stats);
    }

    #[test]
    fn realize_scales_with_difficulty() {
        let stats = goblin().realize(3);
        assert_eq!(stats.attack, 12);
        assert_eq!(stats.defense, 3);
        assert_eq!(stats.hit_points, 18);
    }

    #[test]
    fn default_style_detection() {
        assert!(StyleTag::default().is_default());
        assert!(StyleTag::from("").is_default());
        assert!(!StyleTag::from("frost").is_default());
    }
}
