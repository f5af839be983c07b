//! Turns a finished session into one ledger commit.

use std::sync::Arc;

use combat_core::{EncounterResult, LootDrop, LootTable, PoolError, RewardBundle, RewardPolicy};
use tracing::{error, warn};

use crate::api::{CommitRequest, EconomyLedger, EngineError, PlayerHistory, Result};
use crate::config::RetryPolicy;
use crate::rng::SharedRng;
use crate::session::CombatSession;

/// Rewards applied for one session and the history the ledger returned.
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution {
    pub bundle: RewardBundle,
    pub history: PlayerHistory,
}

/// Computes rewards and commits them to the economy ledger.
pub struct RewardDistributor {
    ledger: Arc<dyn EconomyLedger>,
    loot: Arc<LootTable>,
    policy: RewardPolicy,
    retry: RetryPolicy,
}

impl RewardDistributor {
    pub fn new(
        ledger: Arc<dyn EconomyLedger>,
        loot: Arc<LootTable>,
        policy: RewardPolicy,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            ledger,
            loot,
            policy,
            retry,
        }
    }

    /// Builds the bundle for `result` and commits it under the session id.
    ///
    /// Loot is only rolled on victory. An empty loot pool is logged and the
    /// victory is rewarded without items.
    pub async fn distribute(
        &self,
        session: &CombatSession,
        result: EncounterResult,
        rng: &SharedRng,
    ) -> Result<Distribution> {
        let loot = if result == EncounterResult::Victory {
            self.roll_loot(session, rng)
        } else {
            Vec::new()
        };
        let bundle = self.policy.bundle(result, session.difficulty(), loot);

        let request = CommitRequest::new(session, &bundle);
        let history = self.commit(&request, bundle.clone()).await?;

        Ok(Distribution { bundle, history })
    }

    fn roll_loot(&self, session: &CombatSession, rng: &SharedRng) -> Vec<LootDrop> {
        let count = self.policy.loot_rolls as usize;
        if count == 0 {
            return Vec::new();
        }

        let style = &session.encounter.enemy.style;
        match rng.with(|rng| self.loot.roll(&session.context, count, style, rng)) {
            Ok(roll) => {
                if roll.used_fallback {
                    warn!(
                        session = %session.id,
                        location = %session.context.location,
                        "no loot filter matched; using default loot pool"
                    );
                }
                roll.drops
            }
            Err(PoolError::Empty) => {
                let err = EngineError::LootPoolEmpty {
                    location: session.context.location.clone(),
                };
                warn!(session = %session.id, error = %err, "rewarding victory without loot");
                Vec::new()
            }
        }
    }

    async fn commit(&self, request: &CommitRequest, bundle: RewardBundle) -> Result<PlayerHistory> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.ledger.commit_outcome(request).await {
                Ok(history) => return Ok(history),
                Err(err) if err.is_transient() && attempt < max_attempts => {
                    let delay = self.retry.backoff(attempt);
                    warn!(
                        session = %request.session_id,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "ledger commit failed; retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    error!(
                        session = %request.session_id,
                        player = %request.player_id,
                        attempts = attempt,
                        error = %err,
                        "ledger commit failed; rewards not delivered"
                    );
                    return Err(EngineError::RewardCommit {
                        session: request.session_id,
                        attempts: attempt,
                        bundle: Box::new(bundle),
                        source: err,
                    });
                }
            }
        }
    }
}
