//! Tracker configuration.
//!
//! All delays are in milliseconds. The defaults match the human-paced
//! multisig workflow the tracker serves: a 3-second poll cadence and a
//! 2-second grace window so consumers can see the final state before the
//! tracker clears itself.

use {
    serde::{Deserialize, Serialize},
    std::time::Duration,
};

/// Configuration for the proposal tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Interval between recurring polls of the proposal account in
    /// milliseconds. The first poll always runs immediately.
    /// Default: 3000.
    pub poll_interval_ms: u64,

    /// How long to keep showing a freshly executed proposal before
    /// auto-dismissing, in milliseconds.
    /// Default: 2000.
    pub dismiss_grace_ms: u64,

    /// Interval between signature-status polls while waiting for a
    /// submitted transaction to confirm, in milliseconds.
    /// Default: 2000.
    pub confirmation_interval_ms: u64,

    /// Deadline for signature confirmation in milliseconds. The
    /// transaction may still land after this; the caller is told to check
    /// an explorer.
    /// Default: 120_000 (2 minutes).
    pub confirmation_timeout_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 3_000,
            dismiss_grace_ms: 2_000,
            confirmation_interval_ms: 2_000,
            confirmation_timeout_ms: 120_000,
        }
    }
}

impl TrackerConfig {
    /// Poll cadence as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Auto-dismiss grace window as a [`Duration`].
    pub fn dismiss_grace(&self) -> Duration {
        Duration::from_millis(self.dismiss_grace_ms)
    }

    /// Confirmation poll cadence as a [`Duration`].
    pub fn confirmation_interval(&self) -> Duration {
        Duration::from_millis(self.confirmation_interval_ms)
    }

    /// Confirmation deadline as a [`Duration`].
    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_millis(self.confirmation_timeout_ms)
    }

    /// Validate configuration parameters.
    ///
    /// A zero grace window is allowed (dismiss immediately on execution);
    /// zero poll cadences are not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }
        if self.confirmation_interval_ms == 0 {
            return Err(ConfigError::InvalidConfirmationInterval);
        }
        if self.confirmation_timeout_ms < self.confirmation_interval_ms {
            return Err(ConfigError::ConfirmationTimeoutTooShort {
                timeout_ms: self.confirmation_timeout_ms,
                interval_ms: self.confirmation_interval_ms,
            });
        }
        Ok(())
    }

    /// Create a config suitable for tests, with short delays.
    #[cfg(any(test, feature = "dev-context-only-utils"))]
    pub fn dev_default() -> Self {
        Self {
            poll_interval_ms: 25,
            dismiss_grace_ms: 50,
            confirmation_interval_ms: 10,
            confirmation_timeout_ms: 100,
        }
    }
}

/// Errors in tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("poll_interval_ms must be > 0")]
    InvalidPollInterval,
    #[error("confirmation_interval_ms must be > 0")]
    InvalidConfirmationInterval,
    #[error("confirmation_timeout_ms ({timeout_ms}) must be >= confirmation_interval_ms ({interval_ms})")]
    ConfirmationTimeoutTooShort { timeout_ms: u64, interval_ms: u64 },
}
