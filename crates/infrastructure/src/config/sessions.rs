//! Conversation session retention.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Session history and expiry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsConfig {
    /// Number of recent translations kept per conversation
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,

    /// Idle time after which a session is evicted, in seconds (0 = never)
    #[serde(default = "default_idle_ttl")]
    pub idle_ttl_secs: u64,

    /// How often the eviction task runs, in seconds
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

const fn default_history_depth() -> usize {
    10
}

const fn default_idle_ttl() -> u64 {
    86_400 // 24 hours
}

const fn default_cleanup_interval() -> u64 {
    3_600
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            history_depth: default_history_depth(),
            idle_ttl_secs: default_idle_ttl(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

impl SessionsConfig {
    /// Idle TTL, or `None` when expiry is disabled
    #[must_use]
    pub const fn idle_ttl(&self) -> Option<Duration> {
        if self.idle_ttl_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.idle_ttl_secs))
        }
    }

    #[must_use]
    pub const fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    /// Validate the sessions section
    pub fn validate(&self) -> Result<(), String> {
        if self.idle_ttl_secs > 0 && self.cleanup_interval_secs == 0 {
            return Err(
                "cleanup_interval_secs must be greater than 0 when idle_ttl_secs is set"
                    .to_string(),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionsConfig::default();
        assert_eq!(config.history_depth, 10);
        assert_eq!(config.idle_ttl(), Some(Duration::from_secs(86_400)));
        assert_eq!(config.cleanup_interval(), Duration::from_secs(3_600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_ttl_disables_expiry() {
        let config = SessionsConfig {
            idle_ttl_secs: 0,
            cleanup_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.idle_ttl(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn expiry_needs_an_interval() {
        let config = SessionsConfig {
            cleanup_interval_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
