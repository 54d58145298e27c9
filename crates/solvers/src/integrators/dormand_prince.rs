//! Adaptive Dormand–Prince integrator.
//!
//! # Algorithm
//!
//! Each attempt evaluates the seven stages of the Dormand–Prince 5(4) pair.
//! The fifth-order solution advances the state and the difference to the
//! embedded fourth-order solution estimates the local error:
//!
//! ```text
//! err = sqrt(Σ_k (err_k / e_tar)² / 4)
//! ```
//!
//! A step with `err < 1` is accepted and the next step is scaled by
//! `clamp(0.9 / err, 0.2, 10)`. Otherwise the step size is halved and the
//! caller retries. Steps at the minimum step size are always accepted and
//! marked as stalled if they exceed the tolerance.

mod config;

pub use config::{Config, ConfigError};

use adexp_core::{Integrator, State, Step, StepIntegrable, Time};

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

/// Fifth-order weights, also the last stage's coefficients.
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

/// Difference between the fifth- and fourth-order weights.
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339_200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

const SAFETY: f64 = 0.9;
const MIN_SCALE: f64 = 0.2;
const MAX_SCALE: f64 = 10.0;

/// Adaptive fifth-order integrator with embedded error control.
///
/// The integrator remembers its step size between calls. Call
/// [`Integrator::reset`] before reusing it for an unrelated run.
#[derive(Debug, Clone, Default)]
pub struct DormandPrince {
    config: Config,
    h: Option<Time>,
}

impl DormandPrince {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config, h: None }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Step size the next attempt will use, if one has been estimated.
    #[must_use]
    pub fn step_size(&self) -> Option<Time> {
        self.h
    }

    /// Scaled error norm of a step.
    fn error_norm(&self, err: &State) -> f64 {
        let e_tar = self.config.e_tar();
        let sum: f64 = err.to_array().iter().map(|e| (e / e_tar).powi(2)).sum();
        #[allow(clippy::cast_precision_loss)]
        let len = State::LEN as f64;
        (sum / len).sqrt()
    }
}

/// Factor applied to the step size after an accepted step.
fn growth(err: f64) -> f64 {
    if err == 0.0 {
        MAX_SCALE
    } else if err.is_nan() {
        MIN_SCALE
    } else {
        (SAFETY / err).clamp(MIN_SCALE, MAX_SCALE)
    }
}

impl Integrator for DormandPrince {
    fn step<F>(&mut self, t: Time, h: Time, t_stop: Time, state: &State, df: F) -> Step
    where
        F: Fn(&State) -> State,
    {
        let min_step = self.config.min_step();
        let max_step = self.config.max_step();

        let h_try = self.h.unwrap_or(h).clamp(min_step, max_step);
        let truncated = h_try >= t_stop - t;
        let time = (if truncated { t_stop } else { t + h_try }).max(t + Time::EPSILON);
        let dt = (time - t).as_sec();

        let k1 = df(state);
        let k2 = df(&state.step(k1 * A21, dt));
        let k3 = df(&state.step(k1 * A31 + k2 * A32, dt));
        let k4 = df(&state.step(k1 * A41 + k2 * A42 + k3 * A43, dt));
        let k5 = df(&state.step(k1 * A51 + k2 * A52 + k3 * A53 + k4 * A54, dt));
        let k6 = df(&state.step(k1 * A61 + k2 * A62 + k3 * A63 + k4 * A64 + k5 * A65, dt));
        let next = state.step(k1 * B1 + k3 * B3 + k4 * B4 + k5 * B5 + k6 * B6, dt);
        let k7 = df(&next);

        let err_state = (k1 * E1 + k3 * E3 + k4 * E4 + k5 * E5 + k6 * E6 + k7 * E7) * dt;
        let err = self.error_norm(&err_state);

        let at_floor = h_try <= min_step;
        if err < 1.0 || at_floor {
            let mut h_next = h_try.scale(growth(err));
            if truncated {
                h_next = h_next.max(h_try);
            }
            self.h = Some(h_next.clamp(min_step, max_step));

            return Step {
                state: next,
                time,
                accepted: true,
                stalled: !(err < 1.0),
            };
        }

        self.h = Some(h_try.scale(0.5).max(min_step));
        Step::rejected(*state, t)
    }

    fn reset(&mut self) {
        self.h = None;
    }
}
