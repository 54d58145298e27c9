use crate::{State, Time};

/// Outcome of a single integrator attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// State at the end of the step. Meaningless if the step was rejected.
    pub state: State,

    /// Time at the end of the step.
    pub time: Time,

    /// Whether the step was accepted.
    ///
    /// A rejected step leaves the caller's state untouched; the integrator has
    /// already shrunk its internal step size and the caller simply retries.
    pub accepted: bool,

    /// Whether the step was forced through at the minimum step size despite
    /// exceeding the error tolerance.
    pub stalled: bool,
}

impl Step {
    /// An accepted step.
    #[must_use]
    pub const fn accepted(state: State, time: Time) -> Self {
        Self {
            state,
            time,
            accepted: true,
            stalled: false,
        }
    }

    /// A rejected step at the original time.
    #[must_use]
    pub const fn rejected(state: State, time: Time) -> Self {
        Self {
            state,
            time,
            accepted: false,
            stalled: false,
        }
    }
}

/// Advances the neuron state by one step of an ODE `ds/dt = df(s)`.
///
/// Implementations must never step beyond `t_stop` and must always make
/// progress: every call either returns an accepted step with
/// `time > t` or a rejected one after reducing the internal step size, and a
/// finite number of rejections is always followed by an acceptance.
pub trait Integrator {
    /// Attempts to advance `state` from time `t`.
    ///
    /// `h` is the requested step size. Fixed-step integrators use it directly,
    /// adaptive ones use it as the initial estimate until [`reset`] is called.
    ///
    /// [`reset`]: Integrator::reset
    fn step<F>(&mut self, t: Time, h: Time, t_stop: Time, state: &State, df: F) -> Step
    where
        F: Fn(&State) -> State;

    /// Forgets any state carried between steps (such as an adaptive step
    /// size estimate).
    fn reset(&mut self) {}
}
