use adexp_core::{State, Time};

/// Indicates how a simulation run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached the requested end time.
    Complete,

    /// Stopped early because the neuron settled with no input pending.
    Settled,

    /// Stopped by the controller.
    Aborted,
}

/// The result of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// How the run terminated.
    pub status: Status,

    /// Time at which the run stopped.
    pub time: Time,

    /// State at `time`.
    pub state: State,

    /// Number of output spikes emitted.
    pub output_spikes: usize,

    /// Number of accepted integration steps.
    pub steps: usize,

    /// Number of rejected integration attempts.
    pub rejected: usize,

    /// Number of steps forced through at the minimum step size.
    pub stalled: usize,
}
