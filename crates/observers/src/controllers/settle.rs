use adexp_core::{AuxiliaryState, Controller, Decision, State, Time, WorkingParameters};

/// Smallest potential considered away from rest [V].
const MIN_VOLTAGE: f64 = 1e-4;

/// Smallest potential rate considered active [V/s].
const MIN_VOLTAGE_RATE: f64 = 1e-3;

/// Smallest channel rate considered open [1/s].
const MIN_CHANNEL_RATE: f64 = 1e-3;

/// Allows a run to stop once the neuron has returned to rest.
///
/// The neuron counts as settled when it is not refractory, both synaptic
/// channels have closed, and the membrane potential is either at rest or no
/// longer moving.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettleController;

impl Controller for SettleController {
    fn decide(
        &mut self,
        _time: Time,
        state: &State,
        aux: &AuxiliaryState,
        _params: &WorkingParameters,
        in_refractory: bool,
    ) -> Decision {
        let moving = state.v.abs() > MIN_VOLTAGE && aux.sum().abs() > MIN_VOLTAGE_RATE;
        let open = state.l_e + state.l_i > MIN_CHANNEL_RATE;

        if moving || open || in_refractory {
            Decision::Continue
        } else {
            Decision::MayContinue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decide(state: State, aux: AuxiliaryState, in_refractory: bool) -> Decision {
        SettleController.decide(
            Time::ZERO,
            &state,
            &aux,
            &WorkingParameters::default(),
            in_refractory,
        )
    }

    #[test]
    fn settles_at_rest() {
        let rest = State::default();
        let quiet = AuxiliaryState::default();

        assert_eq!(decide(rest, quiet, false), Decision::MayContinue);
        assert_eq!(decide(rest, quiet, true), Decision::Continue);
    }

    #[test]
    fn continues_while_channels_are_open() {
        let state = State::new(0.0, 5e-4, 6e-4, 0.0);
        assert_eq!(
            decide(state, AuxiliaryState::default(), false),
            Decision::Continue
        );
    }

    #[test]
    fn continues_while_potential_moves() {
        let state = State::at_potential(-0.01);
        let moving = AuxiliaryState::new(-0.5, 0.0, 0.0, 0.0);
        let stuck = AuxiliaryState::new(1e-4, 0.0, 0.0, 0.0);

        assert_eq!(decide(state, moving, false), Decision::Continue);
        assert_eq!(decide(state, stuck, false), Decision::MayContinue);
    }
}
