use adexp_core::Time;
use thiserror::Error;

/// Configuration for the Dormand–Prince integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    e_tar: f64,
    min_step: Time,
    max_step: Time,
}

/// Errors that can occur when validating a Dormand–Prince config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("e_tar must be finite and positive")]
    Tolerance,

    #[error("min_step must be positive")]
    MinStep,

    #[error("max_step must not be smaller than min_step")]
    MaxStep,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1e-3, Time::sec(1e-6), Time::msec(10.0)).unwrap()
    }
}

impl Config {
    /// Creates a new config.
    ///
    /// `e_tar` is the target error per component, `min_step` and `max_step`
    /// bound the adaptive step size.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite and positive or if the
    /// step bounds are empty.
    pub fn new(e_tar: f64, min_step: Time, max_step: Time) -> Result<Self, ConfigError> {
        if !e_tar.is_finite() || e_tar <= 0.0 {
            return Err(ConfigError::Tolerance);
        }
        if min_step <= Time::ZERO {
            return Err(ConfigError::MinStep);
        }
        if max_step < min_step {
            return Err(ConfigError::MaxStep);
        }

        Ok(Self {
            e_tar,
            min_step,
            max_step,
        })
    }

    /// Returns a copy with a different target error.
    ///
    /// # Errors
    ///
    /// Returns an error if `e_tar` is not finite and positive.
    pub fn with_e_tar(self, e_tar: f64) -> Result<Self, ConfigError> {
        Self::new(e_tar, self.min_step, self.max_step)
    }

    /// Returns the target error per component.
    #[must_use]
    pub fn e_tar(&self) -> f64 {
        self.e_tar
    }

    /// Returns the smallest step the integrator will take.
    #[must_use]
    pub fn min_step(&self) -> Time {
        self.min_step
    }

    /// Returns the largest step the integrator will take.
    #[must_use]
    pub fn max_step(&self) -> Time {
        self.max_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_values() {
        let ms = Time::msec(1.0);
        assert_eq!(Config::new(0.0, ms, ms), Err(ConfigError::Tolerance));
        assert_eq!(Config::new(f64::NAN, ms, ms), Err(ConfigError::Tolerance));
        assert_eq!(Config::new(1e-3, Time::ZERO, ms), Err(ConfigError::MinStep));
        assert_eq!(
            Config::new(1e-3, ms, Time::sec(1e-6)),
            Err(ConfigError::MaxStep)
        );
    }

    #[test]
    fn default_is_valid() {
        let config = Config::default();
        assert!(config.min_step() < config.max_step());
        assert!(config.with_e_tar(1e-6).is_ok());
    }
}
