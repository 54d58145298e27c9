//! Controllers deciding when a simulation may stop.
//!
//! # Controllers
//!
//! - [`NullController`]: never intervenes
//! - [`SettleController`]: allows stopping once the neuron has settled
//! - [`MaxValueController`]: tracks the peak potential and allows stopping
//!   once it can no longer grow
//! - [`SpikeCountLimiter`]: aborts a run once too many output spikes occur

mod limiter;
mod max_value;
mod settle;

pub use limiter::SpikeCountLimiter;
pub use max_value::MaxValueController;
pub use settle::SettleController;

use adexp_core::{AuxiliaryState, Controller, Decision, State, Time, WorkingParameters};

/// Always continues, so runs last until their end time.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullController;

impl Controller for NullController {
    fn decide(
        &mut self,
        _time: Time,
        _state: &State,
        _aux: &AuxiliaryState,
        _params: &WorkingParameters,
        _in_refractory: bool,
    ) -> Decision {
        Decision::Continue
    }
}
