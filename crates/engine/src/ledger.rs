//! In-memory economy ledger.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use combat_core::LootDrop;
use tracing::debug;

use crate::api::{
    CollaboratorError, CollaboratorResult, CommitRequest, EconomyLedger, PlayerHistory, PlayerId,
    SessionId,
};

/// Balances and history of one player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerAccount {
    pub gold: u64,
    pub xp: u64,
    pub inventory: Vec<LootDrop>,
    pub history: PlayerHistory,
}

impl PlayerAccount {
    fn apply(&mut self, request: &CommitRequest) {
        self.gold = self.gold.saturating_add_signed(request.gold_delta);
        self.xp = self.xp.saturating_add(request.xp_delta);
        self.inventory.extend(request.loot.iter().cloned());
        self.history.record(request.result);
    }
}

#[derive(Default)]
struct LedgerState {
    accounts: HashMap<PlayerId, PlayerAccount>,
    /// History returned by the first commit of each session.
    commits: HashMap<SessionId, PlayerHistory>,
}

/// Ledger kept in process memory.
///
/// Commits are idempotent per session id. Gold never drops below zero.
#[derive(Default)]
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
    outages: AtomicU32,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a player's balances.
    pub fn with_account(self, player: impl Into<PlayerId>, account: PlayerAccount) -> Self {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .accounts
            .insert(player.into(), account);
        self
    }

    /// Makes the next `count` commits fail as unavailable.
    pub fn fail_next(&self, count: u32) {
        self.outages.store(count, Ordering::SeqCst);
    }

    pub fn account(&self, player: &PlayerId) -> Option<PlayerAccount> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .accounts
            .get(player)
            .cloned()
    }

    /// Number of distinct sessions applied.
    pub fn commit_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .commits
            .len()
    }

    fn take_outage(&self) -> bool {
        self.outages
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl EconomyLedger for InMemoryLedger {
    async fn commit_outcome(&self, request: &CommitRequest) -> CollaboratorResult<PlayerHistory> {
        if self.take_outage() {
            return Err(CollaboratorError::unavailable(
                "ledger",
                "simulated outage",
            ));
        }

        let mut state = self
            .state
            .lock()
            .map_err(|_| CollaboratorError::unavailable("ledger", "state lock poisoned"))?;

        if let Some(history) = state.commits.get(&request.session_id) {
            debug!(session = %request.session_id, "duplicate commit ignored");
            return Ok(*history);
        }

        let account = state.accounts.entry(request.player_id.clone()).or_default();
        account.apply(request);
        let history = account.history;
        state.commits.insert(request.session_id, history);

        debug!(
            session = %request.session_id,
            player = %request.player_id,
            result = %request.result,
            gold = request.gold_delta,
            xp = request.xp_delta,
            "outcome committed"
        );
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{EncounterResult, LocationId};

    use super::*;

    fn request(session: SessionId, result: EncounterResult, gold: i64) -> CommitRequest {
        CommitRequest {
            session_id: session,
            player_id: PlayerId::from("ayla"),
            location_id: LocationId::from("woods"),
            result,
            gold_delta: gold,
            xp_delta: if result == EncounterResult::Victory { 30 } else { 0 },
            loot: Vec::new(),
        }
    }

    #[tokio::test]
    async fn replayed_commit_is_not_applied_twice() {
        let ledger = InMemoryLedger::new();
        let session = SessionId::generate();

        let first = ledger
            .commit_outcome(&request(session, EncounterResult::Victory, 15))
            .await
            .unwrap();
        let replay = ledger
            .commit_outcome(&request(session, EncounterResult::Victory, 15))
            .await
            .unwrap();

        assert_eq!(first, replay);
        assert_eq!(first.wins, 1);
        let account = ledger.account(&PlayerId::from("ayla")).unwrap();
        assert_eq!(account.gold, 15);
        assert_eq!(account.xp, 30);
        assert_eq!(ledger.commit_count(), 1);
    }

    #[tokio::test]
    async fn gold_penalty_floors_at_zero() {
        let ledger = InMemoryLedger::new().with_account(
            "ayla",
            PlayerAccount {
                gold: 3,
                ..PlayerAccount::default()
            },
        );

        let history = ledger
            .commit_outcome(&request(SessionId::generate(), EncounterResult::Defeat, -5))
            .await
            .unwrap();

        assert_eq!(history.losses, 1);
        assert_eq!(ledger.account(&PlayerId::from("ayla")).unwrap().gold, 0);
    }

    #[tokio::test]
    async fn simulated_outage_is_transient() {
        let ledger = InMemoryLedger::new();
        ledger.fail_next(1);
        let req = request(SessionId::generate(), EncounterResult::Abandoned, 0);

        let err = ledger.commit_outcome(&req).await.unwrap_err();
        assert!(err.is_transient());
        assert_eq!(ledger.commit_outcome(&req).await.unwrap().abandons, 1);
    }
}
