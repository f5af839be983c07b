//! In-process collaborators backed by static content.
//!
//! These implementations expose the [`crate::api::collaborators`] traits over
//! data loaded by `combat-content`, and bundle them into
//! [`StaticCollaborators`] so a binary or a test can stand up an engine
//! without external services. The data is immutable once built.
mod enemies;
mod locations;
mod players;

use std::sync::Arc;

use combat_content::ContentBundle;

pub use enemies::StaticEnemyCatalog;
pub use locations::StaticLocationDirectory;
pub use players::{PlayerProfile, StaticPlayerDirectory};

use crate::api::{Collaborators, EconomyLedger};

/// Static player, weapon, enemy and location collaborators.
#[derive(Clone, Default)]
pub struct StaticCollaborators {
    pub players: Arc<StaticPlayerDirectory>,
    pub enemies: Arc<StaticEnemyCatalog>,
    pub locations: Arc<StaticLocationDirectory>,
}

impl StaticCollaborators {
    pub fn new(
        players: StaticPlayerDirectory,
        enemies: StaticEnemyCatalog,
        locations: StaticLocationDirectory,
    ) -> Self {
        Self {
            players: Arc::new(players),
            enemies: Arc::new(enemies),
            locations: Arc::new(locations),
        }
    }

    /// Builds every static collaborator from loaded content.
    ///
    /// Players whose weapon is missing from the bundle are skipped; the
    /// bundle's own validation already rejects that case.
    pub fn from_bundle(bundle: &ContentBundle) -> Self {
        let mut players = StaticPlayerDirectory::new();
        for record in &bundle.players {
            if let Some(weapon) = bundle.weapons.get(&record.weapon) {
                players.insert(
                    record.id.as_str(),
                    PlayerProfile::new(record.stats, weapon.clone()),
                );
            }
        }

        let mut enemies = StaticEnemyCatalog::new();
        for template in &bundle.enemies {
            enemies.insert(template.clone());
        }

        let mut locations = StaticLocationDirectory::new();
        for context in &bundle.locations {
            locations.insert(context.clone());
        }

        Self::new(players, enemies, locations)
    }

    /// Completes the bundle with a ledger.
    pub fn with_ledger(self, ledger: Arc<dyn EconomyLedger>) -> Collaborators {
        Collaborators::new(
            self.players.clone(),
            self.players,
            self.enemies,
            self.locations,
            ledger,
        )
    }
}
