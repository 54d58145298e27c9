use crate::{AuxiliaryState, State, Time, WorkingParameters};

/// How a simulation should proceed after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Keep simulating.
    Continue,

    /// The neuron has settled; the run may stop once no input is pending.
    MayContinue,

    /// Stop immediately.
    Abort,
}

/// Decides after every accepted step whether a simulation should continue.
///
/// Closures with the same signature as [`Controller::decide`] implement
/// `Controller`, and `()` never intervenes.
pub trait Controller {
    fn decide(
        &mut self,
        time: Time,
        state: &State,
        aux: &AuxiliaryState,
        params: &WorkingParameters,
        in_refractory: bool,
    ) -> Decision;
}

impl<F> Controller for F
where
    F: FnMut(Time, &State, &AuxiliaryState, &WorkingParameters, bool) -> Decision,
{
    fn decide(
        &mut self,
        time: Time,
        state: &State,
        aux: &AuxiliaryState,
        params: &WorkingParameters,
        in_refractory: bool,
    ) -> Decision {
        self(time, state, aux, params, in_refractory)
    }
}

/// Always continues.
impl Controller for () {
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
