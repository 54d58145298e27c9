use adexp_core::{AuxiliaryState, Controller, Decision, State, Time, WorkingParameters};

/// Excitatory channel rate above which the potential may still rise [1/s].
const MIN_EXCITATION: f64 = 10.0;

/// Rate below which the potential counts as falling [V/s].
const MAX_FALLING_RATE: f64 = -1e-4;

/// Tracks the maximum membrane potential of a run.
///
/// The run may stop once the maximum can no longer change: the excitatory
/// drive has decayed, the neuron is not refractory, and the potential is
/// not being pulled upward by the spike-initiation, synaptic or adaptation
/// currents.
#[derive(Debug, Clone, Copy)]
pub struct MaxValueController {
    v_max: f64,
    t_v_max: Option<Time>,
    t_spike_eff: Option<Time>,
    simplified: bool,
}

impl Default for MaxValueController {
    fn default() -> Self {
        Self::new(false)
    }
}

impl MaxValueController {
    /// Creates a controller; `simplified` selects the effective spike
    /// potential of the simplified model.
    #[must_use]
    pub fn new(simplified: bool) -> Self {
        Self {
            v_max: f64::NEG_INFINITY,
            t_v_max: None,
            t_spike_eff: None,
            simplified,
        }
    }

    /// Highest potential seen so far.
    #[must_use]
    pub fn v_max(&self) -> f64 {
        self.v_max
    }

    /// Time at which the highest potential was first reached.
    #[must_use]
    pub fn t_v_max(&self) -> Option<Time> {
        self.t_v_max
    }

    /// First time the potential exceeded the effective spike potential.
    #[must_use]
    pub fn t_spike_eff(&self) -> Option<Time> {
        self.t_spike_eff
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.simplified);
    }
}

impl Controller for MaxValueController {
    fn decide(
        &mut self,
        time: Time,
        state: &State,
        aux: &AuxiliaryState,
        params: &WorkingParameters,
        in_refractory: bool,
    ) -> Decision {
        if state.v > self.v_max {
            self.v_max = state.v;
            self.t_v_max = Some(time);
        }
        if self.t_spike_eff.is_none() && state.v > params.e_spike_eff(self.simplified) {
            self.t_spike_eff = Some(time);
        }

        let dv_sum = aux.dv_th + aux.dv_e + aux.dv_i + state.dv_w;
        let rising = dv_sum < MAX_FALLING_RATE && dv_sum + aux.dv_l < MAX_FALLING_RATE;

        if state.l_e > MIN_EXCITATION || in_refractory || rising {
            Decision::Continue
        } else {
            Decision::MayContinue
        }
    }
}
