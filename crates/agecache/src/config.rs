//! Cache configuration

use crate::errors::{CacheError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the age limit in milliseconds
pub const AGE_LIMIT_ENV: &str = "AGECACHE_AGE_LIMIT_MS";

/// Configuration for a memory cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum time an entry may go unaccessed before the periodic trim
    /// removes it. `Duration::ZERO` disables periodic trimming.
    pub age_limit: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            age_limit: Duration::ZERO,
        }
    }
}

impl CacheConfig {
    /// Build a configuration from the environment, falling back to defaults
    /// for unset variables
    pub fn from_env() -> Result<Self> {
        match std::env::var(AGE_LIMIT_ENV) {
            Ok(raw) => Self::default().with_age_limit_millis(&raw),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(CacheError::configuration(format!(
                "{AGE_LIMIT_ENV} is not valid unicode: {e}"
            ))),
        }
    }

    fn with_age_limit_millis(mut self, raw: &str) -> Result<Self> {
        let millis: u64 = raw.trim().parse().map_err(|e| {
            CacheError::configuration(format!(
                "{AGE_LIMIT_ENV}='{raw}' is not a number of milliseconds: {e}"
            ))
        })?;
        self.age_limit = Duration::from_millis(millis);
        Ok(self)
    }

    /// Whether periodic trimming is enabled
    #[must_use]
    pub fn trims_periodically(&self) -> bool {
        !self.age_limit.is_zero()
    }
}
