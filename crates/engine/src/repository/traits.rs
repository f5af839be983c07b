//! Session store contract.

use super::error::Result;
use crate::api::{PlayerId, SessionId};
use crate::session::CombatSession;

/// Store for live combat sessions.
///
/// Implementations enforce two invariants:
/// - at most one non-terminal session per player
/// - a session untouched for longer than the configured TTL is never
///   returned; the first access after expiry marks it abandoned, removes it,
///   and fails with [`super::StoreError::Expired`]
pub trait SessionStore: Send + Sync {
    /// Insert a new session.
    ///
    /// Fails with `ConcurrentSession` when the player already owns a live,
    /// non-terminal session. Expired leftovers are reaped first.
    fn create(&self, session: CombatSession) -> Result<SessionId>;

    /// Snapshot of a session.
    fn get(&self, id: &SessionId) -> Result<CombatSession>;

    /// Reset the inactivity timer.
    fn touch(&self, id: &SessionId) -> Result<()>;

    /// Mutate a session under its lock and return the result.
    ///
    /// The session is touched only when `apply` returns true, so a refused
    /// change does not extend its lifetime. Concurrent updates of one session
    /// run one after another.
    fn update(
        &self,
        id: &SessionId,
        apply: &mut dyn FnMut(&mut CombatSession) -> bool,
    ) -> Result<CombatSession>;

    /// Remove a session if `accept` approves its current state.
    ///
    /// The check and the removal are one step: once a session is claimed,
    /// every later `get`, `update` or `claim` fails with `NotFound`, even one
    /// already waiting on it. Returns `None`, leaving the session in place,
    /// when `accept` refuses. Expired sessions fail with `Expired` without
    /// consulting `accept`.
    fn claim(
        &self,
        id: &SessionId,
        accept: &mut dyn FnMut(&CombatSession) -> bool,
    ) -> Result<Option<CombatSession>>;

    /// Remove a session. Unknown ids are a no-op.
    fn delete(&self, id: &SessionId) -> Result<Option<CombatSession>>;

    /// The player's live, non-terminal session, if any.
    fn active_for_player(&self, player: &PlayerId) -> Result<Option<CombatSession>>;

    /// Remove every expired session, returning them marked abandoned.
    fn sweep_expired(&self) -> Result<Vec<CombatSession>>;

    /// Number of stored sessions, expired ones included until swept.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
