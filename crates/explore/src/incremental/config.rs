use std::time::Duration;

use thiserror::Error;

/// Configuration for an [`IncrementalExploration`](super::IncrementalExploration).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    min_level: u32,
    max_level: u32,
    debounce: Duration,
}

/// Errors that can occur when validating an incremental exploration config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_level {0} exceeds the limit of {limit}", limit = Config::LEVEL_LIMIT)]
    MaxLevel(u32),

    #[error("min_level {min} must not exceed max_level {max}")]
    LevelOrder { min: u32, max: u32 },
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(4, 8, Duration::from_millis(100)).unwrap()
    }
}

impl Config {
    /// Highest supported level, a grid of `2^11 x 2^11` cells.
    pub const LEVEL_LIMIT: u32 = 11;

    /// Creates a new config.
    ///
    /// Level `l` sweeps a `2^l x 2^l` grid. A run starts at `min_level` and
    /// refines up to `max_level`. Requests arriving within `debounce` of
    /// each other are merged.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_level` exceeds [`Config::LEVEL_LIMIT`] or is
    /// below `min_level`.
    pub fn new(min_level: u32, max_level: u32, debounce: Duration) -> Result<Self, ConfigError> {
        if max_level > Self::LEVEL_LIMIT {
            return Err(ConfigError::MaxLevel(max_level));
        }
        if min_level > max_level {
            return Err(ConfigError::LevelOrder {
                min: min_level,
                max: max_level,
            });
        }

        Ok(Self {
            min_level,
            max_level,
            debounce,
        })
    }

    /// Returns a copy with a different maximum level.
    ///
    /// # Errors
    ///
    /// Returns an error if the new level is out of range.
    pub fn with_max_level(self, max_level: u32) -> Result<Self, ConfigError> {
        Self::new(self.min_level, max_level, self.debounce)
    }

    #[must_use]
    pub fn min_level(&self) -> u32 {
        self.min_level
    }

    #[must_use]
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        self.debounce
    }
}
