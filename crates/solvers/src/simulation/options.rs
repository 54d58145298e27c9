use adexp_core::{State, Time};

use super::Flags;

/// Settings of a single simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    /// Model switches.
    pub flags: Flags,

    /// Requested integration step.
    ///
    /// `None` or a non-positive value selects the step proposed by the
    /// working parameters.
    pub step: Option<Time>,

    /// Simulation start time.
    pub start: Time,

    /// Simulation end time. Runs without an end stop once the neuron settles
    /// or the controller aborts.
    pub end: Time,

    /// State at `start`.
    pub initial: State,

    /// Time of the most recent output spike before `start`, used to continue
    /// a refractory period into the run.
    pub last_output_spike: Option<Time>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            flags: Flags::default(),
            step: None,
            start: Time::ZERO,
            end: Time::MAX,
            initial: State::default(),
            last_output_spike: None,
        }
    }
}

impl Options {
    #[must_use]
    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_step(mut self, step: Time) -> Self {
        self.step = Some(step);
        self
    }

    #[must_use]
    pub fn with_start(mut self, start: Time) -> Self {
        self.start = start;
        self
    }

    #[must_use]
    pub fn with_end(mut self, end: Time) -> Self {
        self.end = end;
        self
    }

    #[must_use]
    pub fn with_initial(mut self, initial: State) -> Self {
        self.initial = initial;
        self
    }

    #[must_use]
    pub fn with_last_output_spike(mut self, time: Time) -> Self {
        self.last_output_spike = Some(time);
        self
    }
}
