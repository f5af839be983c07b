//! Session orchestrator.
//!
//! [`CombatEngine`] owns the session store, the collaborators and the shared
//! random source, and exposes the three operations a client drives an
//! encounter with: `start`, `attack` and `complete`.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use combat_core::{
    AttackResult, CombatError, Encounter, EncounterResult, EncounterStatus, EnemyId, FULL_CIRCLE,
    LocationId, LootTable, PoolCatalog, RandomSource, draw_weighted, resolve_attack,
};
use tracing::{debug, info, warn};

use crate::api::{
    AttackReport, Collaborators, CompletedCombat, DeclaredResult, EngineError, PlayerId, Result,
    SessionId, StartedCombat,
};
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::repository::{InMemorySessionStore, SessionStore, StoreError};
use crate::rewards::RewardDistributor;
use crate::rng::SharedRng;
use crate::session::CombatSession;
use crate::workers::{self, ReaperHandle};

/// Entry point for running encounters.
///
/// Cheap to share behind an [`Arc`]; every operation takes `&self`.
pub struct CombatEngine {
    config: EngineConfig,
    store: Arc<dyn SessionStore>,
    collaborators: Collaborators,
    enemy_pools: PoolCatalog<EnemyId>,
    rewards: RewardDistributor,
    rng: SharedRng,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl CombatEngine {
    pub fn builder() -> CombatEngineBuilder {
        CombatEngineBuilder::new()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Opens an encounter for `player` at `location`.
    ///
    /// The enemy is drawn from the location's pool (or the default pool when
    /// nothing matches), realized at the location's difficulty, and frozen
    /// together with the player's stats and weapon.
    pub async fn start(&self, player: &PlayerId, location: &LocationId) -> Result<StartedCombat> {
        let context = self.collaborators.locations.context(location).await?;

        if let Some(existing) = self.store.active_for_player(player)? {
            return Err(EngineError::ConcurrentSession {
                player: player.clone(),
                existing: existing.id,
            });
        }

        let resolution = self
            .enemy_pools
            .candidates_or_fallback(&context)
            .map_err(|_| EngineError::EnemyPoolEmpty {
                location: location.clone(),
            })?;
        if resolution.used_fallback {
            warn!(
                player = %player,
                location = %location,
                "no enemy filter matched; using default enemy pool"
            );
        }
        let enemy_id = self
            .rng
            .with(|rng| draw_weighted(&resolution.candidates, 1, rng))
            .ok()
            .and_then(|mut drawn| drawn.pop())
            .ok_or_else(|| EngineError::EnemyPoolEmpty {
                location: location.clone(),
            })?;

        let (stats, weapon, enemy) = tokio::try_join!(
            self.collaborators.players.combat_snapshot(player),
            self.collaborators.weapons.equipped_bands(player),
            self.collaborators.enemies.realize(&enemy_id, context.difficulty),
        )?;

        let encounter = Encounter::new(stats, enemy, weapon, &self.config.combat.bands).map_err(
            |source| match source {
                CombatError::InvalidBands { .. } => EngineError::InvalidWeapon {
                    player: player.clone(),
                    source,
                },
                other => other.into(),
            },
        )?;

        let session = CombatSession::new(
            SessionId::generate(),
            player.clone(),
            context,
            encounter,
            self.clock.now(),
        );
        let started = StartedCombat::new(&session, session.expires_at(self.ttl));
        self.store.create(session)?;

        info!(
            session = %started.session_id,
            player = %player,
            location = %location,
            enemy = %started.enemy.id,
            difficulty = started.difficulty,
            "encounter started"
        );
        Ok(started)
    }

    /// Resolves one tap at `angle` degrees.
    ///
    /// The angle is validated before the store is touched. Finished sessions
    /// reject further attacks but stay stored until completed.
    pub async fn attack(&self, session_id: &SessionId, angle: f64) -> Result<AttackReport> {
        if !angle.is_finite() || !(0.0..FULL_CIRCLE).contains(&angle) {
            return Err(EngineError::InvalidMove { angle });
        }

        let multipliers = self.config.combat.multipliers;
        let mut outcome: Option<std::result::Result<AttackResult, CombatError>> = None;
        let updated = self
            .store
            .update(session_id, &mut |session: &mut CombatSession| {
                let resolved = self.rng.with(|rng| {
                    resolve_attack(&mut session.encounter, angle, rng, &multipliers)
                });
                let applied = resolved.is_ok();
                outcome = Some(resolved);
                applied
            });
        if let Err(err) = updated {
            return Err(self.store_failure(err).await);
        }

        match outcome {
            Some(Ok(result)) => {
                debug!(
                    session = %session_id,
                    turn = result.turn,
                    zone = %result.zone,
                    dealt = result.damage_dealt,
                    taken = result.damage_taken(),
                    status = %result.status,
                    "attack resolved"
                );
                Ok(AttackReport::new(*session_id, result))
            }
            Some(Err(CombatError::EncounterOver { status })) => Err(EngineError::SessionNotActive {
                id: *session_id,
                status,
            }),
            Some(Err(other)) => Err(other.into()),
            None => Err(EngineError::SessionNotFound(*session_id)),
        }
    }

    /// Claims a session, distributes rewards and returns the outcome.
    ///
    /// A finished session must be declared with its actual result. An
    /// ongoing one may be forfeited with [`DeclaredResult::Defeat`]. The
    /// session leaves the store before any reward work starts, so a
    /// concurrent `attack` or `complete` on it fails with
    /// [`EngineError::SessionNotFound`]. It stays removed even when the
    /// ledger commit fails.
    pub async fn complete(
        &self,
        session_id: &SessionId,
        declared: DeclaredResult,
    ) -> Result<CompletedCombat> {
        let mut observed = None;
        let claimed = self
            .store
            .claim(session_id, &mut |session: &CombatSession| {
                observed = Some(session.status());
                settle(session.status(), declared).is_some()
            });
        let session = match claimed {
            Ok(Some(session)) => session,
            Ok(None) => {
                return Err(match observed {
                    Some(actual) => EngineError::ResultMismatch {
                        id: *session_id,
                        declared,
                        actual,
                    },
                    None => EngineError::SessionNotFound(*session_id),
                });
            }
            Err(err) => return Err(self.store_failure(err).await),
        };

        let status = session.status();
        let result = settle(status, declared).ok_or(EngineError::ResultMismatch {
            id: *session_id,
            declared,
            actual: status,
        })?;

        let distribution = self.rewards.distribute(&session, result, &self.rng).await?;

        info!(
            session = %session_id,
            player = %session.player,
            result = %result,
            forfeit = status == EncounterStatus::Ongoing,
            gold = distribution.bundle.gold_delta,
            xp = distribution.bundle.xp_delta,
            loot = distribution.bundle.loot.len(),
            "encounter completed"
        );
        Ok(CompletedCombat {
            session_id: *session_id,
            result,
            rewards: distribution.bundle,
            history: distribution.history,
        })
    }

    /// Removes every expired session and records each as abandoned.
    ///
    /// Returns how many sessions were swept.
    pub async fn sweep_expired(&self) -> Result<usize> {
        let expired = self.store.sweep_expired()?;
        let count = expired.len();
        for session in expired {
            self.record_expiry(session).await;
        }
        Ok(count)
    }

    /// Starts a background task that calls [`Self::sweep_expired`] every
    /// `interval`.
    pub fn spawn_reaper(self: &Arc<Self>, interval: Duration) -> ReaperHandle {
        workers::spawn_reaper(Arc::clone(self), interval)
    }

    /// Maps a store failure, recording abandonment for expired sessions.
    async fn store_failure(&self, err: StoreError) -> EngineError {
        match err {
            StoreError::Expired(session) => {
                let id = session.id;
                self.record_expiry(*session).await;
                EngineError::SessionExpired(id)
            }
            other => other.into(),
        }
    }

    /// Best-effort commit for an expired session. Failures are logged only.
    ///
    /// Sessions that already reached a terminal status keep their result.
    async fn record_expiry(&self, session: CombatSession) {
        let result =
            EncounterResult::from_status(session.status()).unwrap_or(EncounterResult::Abandoned);
        match self.rewards.distribute(&session, result, &self.rng).await {
            Ok(_) => info!(
                session = %session.id,
                player = %session.player,
                result = %result,
                "expired encounter recorded"
            ),
            Err(err) => warn!(
                session = %session.id,
                player = %session.player,
                error = %err,
                "failed to record expired encounter"
            ),
        }
    }
}

/// The result a completion records, or `None` when `declared` contradicts
/// `status`. Ongoing sessions may only be forfeited.
fn settle(status: EncounterStatus, declared: DeclaredResult) -> Option<EncounterResult> {
    match EncounterResult::from_status(status) {
        Some(actual) if actual == EncounterResult::from(declared) => Some(actual),
        None if declared == DeclaredResult::Defeat => Some(EncounterResult::Defeat),
        _ => None,
    }
}

/// Builder for [`CombatEngine`].
pub struct CombatEngineBuilder {
    config: EngineConfig,
    store: Option<Arc<dyn SessionStore>>,
    collaborators: Option<Collaborators>,
    enemy_pools: Option<PoolCatalog<EnemyId>>,
    loot: Option<LootTable>,
    rng: Option<SharedRng>,
    clock: Option<Arc<dyn Clock>>,
}

impl CombatEngineBuilder {
    fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            store: None,
            collaborators: None,
            enemy_pools: None,
            loot: None,
            rng: None,
            clock: None,
        }
    }

    /// Override engine configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom session store. Defaults to [`InMemorySessionStore`]
    /// sharing the engine's clock and TTL.
    pub fn store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set required collaborators
    pub fn collaborators(mut self, collaborators: Collaborators) -> Self {
        self.collaborators = Some(collaborators);
        self
    }

    /// Set required enemy pools
    pub fn enemy_pools(mut self, pools: PoolCatalog<EnemyId>) -> Self {
        self.enemy_pools = Some(pools);
        self
    }

    /// Set required loot table
    pub fn loot(mut self, loot: LootTable) -> Self {
        self.loot = Some(loot);
        self
    }

    /// Inject the random source. Defaults to an entropy-seeded PCG.
    pub fn rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(SharedRng::new(rng));
        self
    }

    /// Inject the clock. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<CombatEngine> {
        let collaborators = self
            .collaborators
            .ok_or(EngineError::MissingComponent("collaborators"))?;
        let enemy_pools = self
            .enemy_pools
            .ok_or(EngineError::MissingComponent("enemy pools"))?;
        let loot = self.loot.ok_or(EngineError::MissingComponent("loot table"))?;

        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };
        let store: Arc<dyn SessionStore> = match self.store {
            Some(store) => store,
            None => Arc::new(InMemorySessionStore::new(
                Arc::clone(&clock),
                self.config.session_ttl,
            )),
        };
        let rng = self.rng.unwrap_or_else(SharedRng::from_entropy);
        let rewards = RewardDistributor::new(
            Arc::clone(&collaborators.ledger),
            Arc::new(loot),
            self.config.combat.rewards,
            self.config.commit_retry,
        );

        Ok(CombatEngine {
            ttl: TimeDelta::from_std(self.config.session_ttl).unwrap_or(TimeDelta::MAX),
            config: self.config,
            store,
            collaborators,
            enemy_pools,
            rewards,
            rng,
            clock,
        })
    }
}
