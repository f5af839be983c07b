//! Player stats and equipped weapons backed by an in-memory map.
use std::collections::HashMap;

use async_trait::async_trait;
use combat_core::{PlayerStats, WeaponBandConfig};

use crate::api::{
    CollaboratorError, CollaboratorResult, PlayerId, PlayerStatsProvider, WeaponProvider,
};

/// Everything the engine reads about one player.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerProfile {
    pub stats: PlayerStats,
    pub weapon: WeaponBandConfig,
}

impl PlayerProfile {
    pub fn new(stats: PlayerStats, weapon: WeaponBandConfig) -> Self {
        Self { stats, weapon }
    }
}

/// Serves both [`PlayerStatsProvider`] and [`WeaponProvider`].
#[derive(Debug, Default)]
pub struct StaticPlayerDirectory {
    profiles: HashMap<PlayerId, PlayerProfile>,
}

impl StaticPlayerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, player: impl Into<PlayerId>, profile: PlayerProfile) {
        self.profiles.insert(player.into(), profile);
    }

    pub fn with_player(mut self, player: impl Into<PlayerId>, profile: PlayerProfile) -> Self {
        self.insert(player, profile);
        self
    }

    fn profile(&self, player: &PlayerId) -> CollaboratorResult<&PlayerProfile> {
        self.profiles
            .get(player)
            .ok_or_else(|| CollaboratorError::not_found("player", player))
    }
}

#[async_trait]
impl PlayerStatsProvider for StaticPlayerDirectory {
    async fn combat_snapshot(&self, player: &PlayerId) -> CollaboratorResult<PlayerStats> {
        self.profile(player).map(|profile| profile.stats)
    }
}

#[async_trait]
impl WeaponProvider for StaticPlayerDirectory {
    async fn equipped_bands(&self, player: &PlayerId) -> CollaboratorResult<WeaponBandConfig> {
        self.profile(player).map(|profile| profile.weapon.clone())
    }
}
