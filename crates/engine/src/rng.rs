//! Shared random source for the engine.

use std::sync::{Arc, Mutex};

use combat_core::{PcgRng, RandomSource};

/// Random source shared by all sessions.
///
/// The lock is held only for the duration of one draw. A poisoned lock is
/// recovered: a half-advanced generator is still a valid generator.
#[derive(Clone)]
pub struct SharedRng {
    inner: Arc<Mutex<Box<dyn RandomSource>>>,
}

impl SharedRng {
    pub fn new(rng: impl RandomSource + 'static) -> Self {
        Self::from_boxed(Box::new(rng))
    }

    pub fn from_boxed(rng: Box<dyn RandomSource>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(rng)),
        }
    }

    /// PCG generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(PcgRng::seeded(rand::random::<u64>()))
    }

    /// Runs `f` with exclusive access to the generator.
    pub fn with<R>(&self, f: impl FnOnce(&mut dyn RandomSource) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut **guard)
    }
}

impl std::fmt::Debug for SharedRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRng").finish_non_exhaustive()
    }
}
