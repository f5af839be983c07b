//! In-memory session store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, warn};

use super::error::{Result, StoreError};
use super::traits::SessionStore;
use crate::api::{PlayerId, SessionId};
use crate::clock::{Clock, SystemClock};
use crate::session::CombatSession;

/// A stored session.
///
/// `removed` is set under the entry lock when the session leaves the map, so
/// a caller that fetched the entry earlier sees it as gone.
struct Slot {
    session: CombatSession,
    removed: bool,
}

type Entry = Arc<Mutex<Slot>>;

/// Thread-safe in-process session store.
///
/// Lock order is player index, then session map, then a single session entry.
/// Entry locks are never held while acquiring the other two.
///
/// Sessions reaped implicitly (an expired leftover found by `create` or
/// `active_for_player`) are queued and handed out by the next
/// [`SessionStore::sweep_expired`], so their abandonment is still reported.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Entry>>,
    players: Mutex<HashMap<PlayerId, SessionId>>,
    reaped: Mutex<Vec<CombatSession>>,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
}

impl InMemorySessionStore {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            players: Mutex::new(HashMap::new()),
            reaped: Mutex::new(Vec::new()),
            clock,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    fn entry(&self, id: &SessionId) -> Result<Entry> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;

        sessions.get(id).cloned().ok_or(StoreError::NotFound(*id))
    }

    /// Runs `f` on a live session, or expires it.
    fn with_live<R>(
        &self,
        id: &SessionId,
        f: impl FnOnce(&mut CombatSession, DateTime<Utc>) -> R,
    ) -> Result<R> {
        let entry = self.entry(id)?;
        let now = self.clock.now();

        let expired = {
            let mut slot = entry.lock().map_err(|_| StoreError::LockPoisoned)?;
            // Claimed, deleted, or expired by a concurrent caller.
            if slot.removed {
                return Err(StoreError::NotFound(*id));
            }
            if !slot.session.is_expired(now, self.ttl) {
                return Ok(f(&mut slot.session, now));
            }
            slot.removed = true;
            slot.session.encounter.abandon();
            slot.session.clone()
        };

        self.unlink(&expired.id, &expired.player)?;
        warn!(session = %expired.id, player = %expired.player, "session expired");
        Err(StoreError::Expired(Box::new(expired)))
    }

    /// Removes a session and its index entry.
    fn unlink(&self, id: &SessionId, player: &PlayerId) -> Result<()> {
        let mut players = self.players.lock().map_err(|_| StoreError::LockPoisoned)?;
        self.sessions
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .remove(id);

        if players.get(player) == Some(id) {
            players.remove(player);
        }
        Ok(())
    }

    /// The session indexed for `player`, reaping it first if it expired.
    ///
    /// Caller holds the player index lock.
    fn indexed_session(
        &self,
        players: &mut HashMap<PlayerId, SessionId>,
        player: &PlayerId,
        now: DateTime<Utc>,
    ) -> Result<Option<CombatSession>> {
        let Some(id) = players.get(player).copied() else {
            return Ok(None);
        };

        let entry = self
            .sessions
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .get(&id)
            .cloned();
        let Some(entry) = entry else {
            players.remove(player);
            return Ok(None);
        };

        let session = {
            let mut slot = entry.lock().map_err(|_| StoreError::LockPoisoned)?;
            if slot.removed {
                players.remove(player);
                return Ok(None);
            }
            if !slot.session.is_expired(now, self.ttl) {
                return Ok(Some(slot.session.clone()));
            }
            slot.removed = true;
            slot.session.encounter.abandon();
            slot.session.clone()
        };

        self.sessions
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .remove(&id);
        players.remove(player);
        warn!(session = %id, player = %player, "reaped expired session");
        self.reaped
            .lock()
            .map_err(|_| StoreError::LockPoisoned)?
            .push(session);
        Ok(None)
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Self::DEFAULT_TTL)
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self, session: CombatSession) -> Result<SessionId> {
        let now = self.clock.now();
        let mut players = self.players.lock().map_err(|_| StoreError::LockPoisoned)?;

        let live = self
            .indexed_session(&mut players, &session.player, now)?
            .filter(|existing| !existing.encounter.is_over());
        if let Some(existing) = live {
            return Err(StoreError::ConcurrentSession {
                player: session.player,
                existing: existing.id,
            });
        }

        let id = session.id;
        let player = session.player.clone();
        let slot = Slot {
            session,
            removed: false,
        };
        self.sessions
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .insert(id, Arc::new(Mutex::new(slot)));
        players.insert(player.clone(), id);

        debug!(session = %id, player = %player, "session created");
        Ok(id)
    }

    fn get(&self, id: &SessionId) -> Result<CombatSession> {
        self.with_live(id, |session, _| session.clone())
    }

    fn touch(&self, id: &SessionId) -> Result<()> {
        self.with_live(id, |session, now| session.touch(now))
    }

    fn update(
        &self,
        id: &SessionId,
        apply: &mut dyn FnMut(&mut CombatSession) -> bool,
    ) -> Result<CombatSession> {
        self.with_live(id, |session, now| {
            if apply(session) {
                session.touch(now);
            }
            session.clone()
        })
    }

    fn claim(
        &self,
        id: &SessionId,
        accept: &mut dyn FnMut(&CombatSession) -> bool,
    ) -> Result<Option<CombatSession>> {
        let now = self.clock.now();
        let mut players = self.players.lock().map_err(|_| StoreError::LockPoisoned)?;
        let entry = self.entry(id)?;

        let (session, expired) = {
            let mut slot = entry.lock().map_err(|_| StoreError::LockPoisoned)?;
            if slot.removed {
                return Err(StoreError::NotFound(*id));
            }
            let expired = slot.session.is_expired(now, self.ttl);
            if expired {
                slot.session.encounter.abandon();
            } else if !accept(&slot.session) {
                return Ok(None);
            }
            slot.removed = true;
            (slot.session.clone(), expired)
        };

        self.sessions
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .remove(id);
        if players.get(&session.player) == Some(id) {
            players.remove(&session.player);
        }

        if expired {
            warn!(session = %id, player = %session.player, "session expired");
            return Err(StoreError::Expired(Box::new(session)));
        }
        debug!(session = %id, player = %session.player, "session claimed");
        Ok(Some(session))
    }

    fn delete(&self, id: &SessionId) -> Result<Option<CombatSession>> {
        let mut players = self.players.lock().map_err(|_| StoreError::LockPoisoned)?;
        let removed = self
            .sessions
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .remove(id);
        let Some(entry) = removed else {
            return Ok(None);
        };

        let session = {
            let mut slot = entry.lock().map_err(|_| StoreError::LockPoisoned)?;
            if slot.removed {
                return Ok(None);
            }
            slot.removed = true;
            slot.session.clone()
        };
        if players.get(&session.player) == Some(id) {
            players.remove(&session.player);
        }

        debug!(session = %id, player = %session.player, "session deleted");
        Ok(Some(session))
    }

    fn active_for_player(&self, player: &PlayerId) -> Result<Option<CombatSession>> {
        let now = self.clock.now();
        let mut players = self.players.lock().map_err(|_| StoreError::LockPoisoned)?;

        Ok(self
            .indexed_session(&mut players, player, now)?
            .filter(|session| !session.encounter.is_over()))
    }

    fn sweep_expired(&self) -> Result<Vec<CombatSession>> {
        let now = self.clock.now();
        let mut players = self.players.lock().map_err(|_| StoreError::LockPoisoned)?;
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;

        let mut expired = std::mem::take(
            &mut *self
                .reaped
                .lock()
                .map_err(|_| StoreError::LockPoisoned)?,
        );
        sessions.retain(|id, entry| {
            let Ok(mut slot) = entry.lock() else {
                return true;
            };
            // Removed entries are unlinked by whoever removed them.
            if slot.removed || !slot.session.is_expired(now, self.ttl) {
                return true;
            }
            slot.removed = true;
            slot.session.encounter.abandon();
            if players.get(&slot.session.player) == Some(id) {
                players.remove(&slot.session.player);
            }
            expired.push(slot.session.clone());
            false
        });

        if !expired.is_empty() {
            debug!(count = expired.len(), "swept expired sessions");
        }
        Ok(expired)
    }

    fn len(&self) -> usize {
        self.sessions
            .read()
            .map(|sessions| sessions.len())
            .unwrap_or(0)
    }
}
