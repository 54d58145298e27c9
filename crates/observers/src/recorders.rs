//! Recorders capturing what happens during a simulation run.
//!
//! # Recorders
//!
//! - [`NullRecorder`]: discards everything (as does `()`)
//! - [`LastState`]: the most recent sample
//! - [`Trajectory`]: every sample, with per-component ranges and
//!   interpolation
//! - [`OutputSpikes`]: output spike times and post-spike states
//! - [`SpikeCounter`]: a shared output spike count
//! - [`LocalMaxima`]: local maxima of the membrane potential
//!
//! Recorders compose: tuples of recorders record into each member.

mod last_state;
mod local_maxima;
mod output_spikes;
mod spike_counter;
mod trajectory;

pub use last_state::LastState;
pub use local_maxima::LocalMaxima;
pub use output_spikes::OutputSpikes;
pub use spike_counter::SpikeCounter;
pub use trajectory::{Sample, Trajectory};

use adexp_core::{AuxiliaryState, Recorder, State, Time};

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRecorder;

impl Recorder for NullRecorder {
    fn step(&mut self, _time: Time, _state: &State, _aux: &AuxiliaryState) {}

    fn output_spike(&mut self, _time: Time, _state: &State) {}
}
