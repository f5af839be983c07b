//! Engine configuration structures and loaders.
use std::env;
use std::time::Duration;

use combat_core::CombatConfig;

/// Configuration required to run a [`crate::CombatEngine`].
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub combat: CombatConfig,
    /// Inactivity after which a session expires.
    pub session_ttl: Duration,
    /// Period of the background expiry sweep.
    pub sweep_interval: Duration,
    pub commit_retry: RetryPolicy,
}

impl EngineConfig {
    pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(15 * 60);
    pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

    pub fn new(combat: CombatConfig) -> Self {
        Self {
            combat,
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_SESSION_TTL_SECS` - Session inactivity timeout (default: 900)
    /// - `COMBAT_SWEEP_INTERVAL_SECS` - Expiry sweep period (default: 60)
    /// - `COMBAT_COMMIT_ATTEMPTS` - Ledger commit attempts (default: 3)
    /// - `COMBAT_COMMIT_BACKOFF_MS` - First retry delay (default: 50)
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies the variables listed in [`Self::from_env`] on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(secs) = read_env::<u64>("COMBAT_SESSION_TTL_SECS") {
            self.session_ttl = Duration::from_secs(secs.max(1));
        }

        if let Some(secs) = read_env::<u64>("COMBAT_SWEEP_INTERVAL_SECS") {
            self.sweep_interval = Duration::from_secs(secs.max(1));
        }

        if let Some(attempts) = read_env::<u32>("COMBAT_COMMIT_ATTEMPTS") {
            self.commit_retry.max_attempts = attempts.max(1);
        }

        if let Some(ms) = read_env::<u64>("COMBAT_COMMIT_BACKOFF_MS") {
            self.commit_retry.initial_backoff = Duration::from_millis(ms);
        }

        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            session_ttl: Self::DEFAULT_SESSION_TTL,
            sweep_interval: Self::DEFAULT_SWEEP_INTERVAL,
            commit_retry: RetryPolicy::default(),
        }
    }
}

/// Exponential backoff for ledger commits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub multiplier: u32,
}

impl RetryPolicy {
    /// No retries.
    pub const fn once() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            multiplier: 1,
        }
    }

    /// Delay before attempt `attempt + 1`, where `attempt` starts at 1.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = self
            .multiplier
            .max(1)
            .saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(50),
            multiplier: 2,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
