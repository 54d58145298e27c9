use adexp_core::{AuxiliaryState, Spike, SpikeKind, State, WorkingParameters};

use crate::fast_exp;

use super::Flags;

/// The right-hand side of the AdExp differential equation.
///
/// ```text
/// dv/dt   = -(lL·v + lE·(v - eE) + lI·(v - eI) - lL·ΔTh·exp((v - eTh)/ΔTh) + dvW)
/// dlE/dt  = -lE / τE
/// dlI/dt  = -lI / τI
/// ddvW/dt = -(dvW - lA·v) / τW
/// ```
///
/// The membrane potential is held while the neuron is refractory.
#[derive(Debug, Clone, Copy)]
pub struct Dynamics {
    params: WorkingParameters,
    flags: Flags,
}

impl Dynamics {
    #[must_use]
    pub fn new(params: &WorkingParameters, flags: Flags) -> Self {
        Self {
            params: *params,
            flags,
        }
    }

    #[must_use]
    pub fn params(&self) -> &WorkingParameters {
        &self.params
    }

    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Individual contributions to the membrane potential derivative.
    #[must_use]
    pub fn auxiliary(&self, s: &State) -> AuxiliaryState {
        let p = &self.params;

        AuxiliaryState {
            dv_l: p.l_l() * s.v,
            dv_e: s.l_e * (s.v - p.e_e()),
            dv_i: s.l_i * (s.v - p.e_i()),
            dv_th: self.threshold_term(s.v),
        }
    }

    /// Time derivative of the state.
    #[must_use]
    pub fn derivative(&self, s: &State, in_refractory: bool) -> State {
        let p = &self.params;

        let dv = if in_refractory {
            0.0
        } else {
            -(self.auxiliary(s).sum() + s.dv_w)
        };

        let ddv_w = if self.flags.simplified {
            0.0
        } else {
            -(s.dv_w - p.l_a() * s.v) * p.l_w()
        };

        State {
            v: dv,
            l_e: -s.l_e * p.l_e(),
            l_i: -s.l_i * p.l_i(),
            dv_w: ddv_w,
        }
    }

    /// Applies the effect of an input spike to the state.
    ///
    /// Synaptic spikes open the excitatory channel for positive weights and
    /// the inhibitory channel for negative ones. Forced output spikes do not
    /// change the state here; the engine fires the neuron instead.
    pub fn apply_input(&self, s: &mut State, spike: &Spike) {
        match spike.kind {
            SpikeKind::Synaptic => {
                let w = spike.weight * self.params.w();
                if w > 0.0 {
                    s.l_e += w;
                } else {
                    s.l_i -= w;
                }
            }
            SpikeKind::SetVoltage(v) => s.v = v,
            SpikeKind::ForceOutput => {}
        }
    }

    /// Resets the state after an output spike.
    pub fn apply_output(&self, s: &mut State) {
        s.v = self.params.e_reset();
        if !self.flags.simplified {
            s.dv_w += self.params.l_b();
        }
    }

    fn threshold_term(&self, v: f64) -> f64 {
        let p = &self.params;
        if self.flags.simplified || self.flags.disable_threshold_current {
            return 0.0;
        }

        let exponent = if self.flags.clamp_threshold {
            (p.e_spike_eff_red().min(v) - p.e_th()) * p.inv_delta_th()
        } else {
            ((v - p.e_th()) * p.inv_delta_th()).min(p.max_i_th_exponent())
        };

        let exp = if self.flags.fast_exp {
            fast_exp(exponent)
        } else {
            exponent.exp()
        };

        -p.l_l() * p.delta_th() * exp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use adexp_core::Time;
    use approx::assert_relative_eq;

    #[test]
    fn resting_neuron_is_nearly_stationary() {
        let p = WorkingParameters::default();
        let dynamics = Dynamics::new(&p, Flags::default());

        let ds = dynamics.derivative(&State::default(), false);

        // Only the spike-initiation current acts at rest.
        let expected = p.l_l() * p.delta_th() * (-p.e_th() * p.inv_delta_th()).exp();
        assert_relative_eq!(ds.v, expected, max_relative = 1e-12);
        assert_eq!(ds.l_e, 0.0);
        assert_eq!(ds.dv_w, 0.0);
    }

    #[test]
    fn refractory_holds_potential() {
        let p = WorkingParameters::default();
        let dynamics = Dynamics::new(&p, Flags::default());
        let s = State::new(p.e_reset(), 10.0, 5.0, 1.0);

        let ds = dynamics.derivative(&s, true);

        assert_eq!(ds.v, 0.0);
        assert_relative_eq!(ds.l_e, -10.0 * p.l_e());
        assert_relative_eq!(ds.l_i, -5.0 * p.l_i());
    }

    #[test]
    fn simplified_model_drops_threshold_and_adaptation() {
        let p = WorkingParameters::default();
        let dynamics = Dynamics::new(&p, Flags::default().with_simplified());
        let s = State::new(p.e_th() * 0.5, 0.0, 0.0, 1.0);

        assert_eq!(dynamics.auxiliary(&s).dv_th, 0.0);
        assert_eq!(dynamics.derivative(&s, false).dv_w, 0.0);

        let mut reset = s;
        dynamics.apply_output(&mut reset);
        assert_eq!(reset.v, p.e_reset());
        assert_eq!(reset.dv_w, 1.0);
    }

    #[test]
    fn clamped_threshold_term_is_bounded() {
        let p = WorkingParameters::default();
        let clamped = Dynamics::new(&p, Flags::default().with_clamped_threshold());
        let free = Dynamics::new(&p, Flags::default());

        let high = p.e_spike();
        let bound = clamped.auxiliary(&State::at_potential(p.e_spike_eff_red())).dv_th;

        assert_relative_eq!(clamped.auxiliary(&State::at_potential(high)).dv_th, bound);
        assert!(free.auxiliary(&State::at_potential(high)).dv_th < bound);
    }

    #[test]
    fn fast_exp_matches_exact_exponential() {
        let p = WorkingParameters::default();
        let exact = Dynamics::new(&p, Flags::default());
        let fast = Dynamics::new(&p, Flags::default().with_fast_exp());
        let s = State::at_potential(p.e_th());

        assert_relative_eq!(
            exact.auxiliary(&s).dv_th,
            fast.auxiliary(&s).dv_th,
            max_relative = 1e-4
        );
    }

    #[test]
    fn input_spikes_open_channels() {
        let p = WorkingParameters::default();
        let dynamics = Dynamics::new(&p, Flags::default());
        let mut s = State::default();

        dynamics.apply_input(&mut s, &Spike::new(Time::ZERO, 2.0));
        dynamics.apply_input(&mut s, &Spike::new(Time::ZERO, -1.0));
        dynamics.apply_input(&mut s, &Spike::set_voltage(Time::ZERO, 0.01));

        assert_relative_eq!(s.l_e, 2.0 * p.w());
        assert_relative_eq!(s.l_i, p.w());
        assert_eq!(s.v, 0.01);
    }
}
