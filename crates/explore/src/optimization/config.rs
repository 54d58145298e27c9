use thiserror::Error;

/// Configuration for [`optimize`](super::optimize).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    epsilon: f64,
    seed: u64,
    simplified: bool,
}

/// Errors that can occur when validating an optimization config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_iters must be positive")]
    MaxIters,

    #[error("epsilon must be finite and positive")]
    Epsilon,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(10_000, 1e-5).unwrap()
    }
}

impl Config {
    const DEFAULT_SEED: u64 = 1_241_249_190;

    /// Creates a new config.
    ///
    /// `max_iters` caps the iterations of a single simplex search. A search
    /// has settled once the mean cost of its vertices lies within `epsilon`
    /// of the best cost.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iters` is zero or `epsilon` is not finite
    /// and positive.
    pub fn new(max_iters: usize, epsilon: f64) -> Result<Self, ConfigError> {
        if max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ConfigError::Epsilon);
        }

        Ok(Self {
            max_iters,
            epsilon,
            seed: Self::DEFAULT_SEED,
            simplified: false,
        })
    }

    /// Returns a copy seeding the restart perturbations with `seed`.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Returns a copy that skips dimensions without effect in the
    /// simplified model.
    #[must_use]
    pub fn with_simplified(self, simplified: bool) -> Self {
        Self { simplified, ..self }
    }

    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn simplified(&self) -> bool {
        self.simplified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(Config::new(0, 1e-5), Err(ConfigError::MaxIters));
        assert_eq!(Config::new(10, 0.0), Err(ConfigError::Epsilon));
        assert_eq!(Config::new(10, f64::NAN), Err(ConfigError::Epsilon));
    }

    #[test]
    fn builders_keep_other_fields() {
        let config = Config::default().with_seed(7).with_simplified(true);

        assert_eq!(config.seed(), 7);
        assert!(config.simplified());
        assert_eq!(config.max_iters(), 10_000);
    }
}
