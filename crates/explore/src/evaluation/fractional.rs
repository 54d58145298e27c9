use adexp_core::{Spike, SpikeVec, State, Time, WorkingParameters};
use adexp_observers::{
    controllers::{MaxValueController, SpikeCountLimiter},
    recorders::{LocalMaxima, OutputSpikes, SpikeCounter},
};
use adexp_solvers::{
    integrators::{DormandPrince, dormand_prince},
    simulation::{Flags, Options, simulate},
};
use tracing::trace;

/// Number of intervals the voltage search resolves `[v_min, v_max]` into.
const SEARCH_RESOLUTION: f64 = 65536.0;

/// Upper bound on bisection steps of a single voltage search.
const MAX_SEARCH_STEPS: usize = 32;

/// Outcome of a [`FractionalSpikeCount`] analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionalSpikeCountResult {
    /// Number of output spikes.
    pub spike_count: usize,
    /// Lowest potential that, written after one of the output spikes,
    /// produces one more output spike.
    pub e_req: f64,
    /// [`e_req`](Self::e_req) relative to the available potential range.
    pub p_req: f64,
    /// Highest local maximum of the potential, spikes excluded.
    pub e_max: f64,
    /// [`e_max`](Self::e_max) relative to the available potential range.
    pub p_max: f64,
}

impl FractionalSpikeCountResult {
    /// Result for a run that was cut short; only the count is known.
    #[must_use]
    pub fn integral(spike_count: usize) -> Self {
        Self {
            spike_count,
            e_req: 0.0,
            p_req: 1.0,
            e_max: 0.0,
            p_max: 0.0,
        }
    }

    fn new(spike_count: usize, e_req: f64, e_max: f64, e_norm: f64, e_spike_eff: f64) -> Self {
        let range = e_spike_eff - e_norm;
        Self {
            spike_count,
            e_req,
            p_req: (e_req - e_norm) / range,
            e_max,
            p_max: (e_max - e_norm) / range,
        }
    }

    /// The spike count extended by how close the neuron came to firing once
    /// more.
    ///
    /// Without output spikes this is the peak potential relative to the
    /// effective spike potential. Otherwise the fractional part shrinks with
    /// the perturbation needed for an additional spike.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn frac(&self) -> f64 {
        if self.spike_count == 0 {
            self.p_max
        } else {
            self.spike_count as f64 + 1.0 - self.p_req
        }
    }
}

/// Measures the output spike count of a run as a continuous quantity.
///
/// # Algorithm
///
/// The input is simulated until the potential can no longer rise. If the
/// neuron keeps firing past `max_spike_count`, the integral count is
/// returned. Otherwise each output spike, together with a virtual spike
/// before the run, is probed: the input is replayed from the state right
/// after that spike, and a control spike at the end of the refractory
/// period overwrites the potential. A bisection finds the lowest such
/// potential that yields one spike more than the original run produced
/// from there on. The lowest potential over all spikes, relative to the
/// effective spike potential, defines the fractional part.
#[derive(Debug, Clone, Copy)]
pub struct FractionalSpikeCount {
    simplified: bool,
    integrator: dormand_prince::Config,
    max_spike_count: usize,
}

impl Default for FractionalSpikeCount {
    fn default() -> Self {
        Self::new(false)
    }
}

impl FractionalSpikeCount {
    pub const DEFAULT_E_TAR: f64 = 0.1e-3;
    pub const DEFAULT_MAX_SPIKE_COUNT: usize = 50;

    #[must_use]
    #[allow(clippy::missing_panics_doc)]
    pub fn new(simplified: bool) -> Self {
        Self {
            simplified,
            // Known-good values, unwrap is safe
            integrator: dormand_prince::Config::default()
                .with_e_tar(Self::DEFAULT_E_TAR)
                .unwrap(),
            max_spike_count: Self::DEFAULT_MAX_SPIKE_COUNT,
        }
    }

    #[must_use]
    pub fn with_integrator(mut self, config: dormand_prince::Config) -> Self {
        self.integrator = config;
        self
    }

    #[must_use]
    pub fn with_max_spike_count(mut self, max_spike_count: usize) -> Self {
        self.max_spike_count = max_spike_count;
        self
    }

    #[must_use]
    pub fn simplified(&self) -> bool {
        self.simplified
    }

    #[must_use]
    pub fn max_spike_count(&self) -> usize {
        self.max_spike_count
    }

    fn flags(&self) -> Flags {
        let flags = Flags::default().with_fast_exp();
        if self.simplified {
            flags.with_simplified()
        } else {
            flags
        }
    }

    /// Analyses the response to `input`, starting at rest.
    #[must_use]
    pub fn calculate(
        &self,
        input: &[Spike],
        params: &WorkingParameters,
    ) -> FractionalSpikeCountResult {
        let counter = SpikeCounter::default();
        let handle = counter.clone();
        let mut recorder = (LocalMaxima::default(), OutputSpikes::default(), counter);
        let mut controller = SpikeCountLimiter::new(
            MaxValueController::new(self.simplified),
            || handle.count(),
            self.max_spike_count,
        );

        simulate(
            input,
            &mut recorder,
            &mut controller,
            &mut DormandPrince::new(self.integrator),
            params,
            &Options::default().with_flags(self.flags()),
        );

        let (maxima, outputs, _) = recorder;
        if controller.tripped() {
            trace!(count = outputs.count(), "spike count limit reached");
            return FractionalSpikeCountResult::integral(outputs.count());
        }

        // A virtual output spike right before the run controls the initial
        // potential.
        let mut spikes = vec![(Time::ZERO - Time::EPSILON, State::default())];
        spikes.extend_from_slice(outputs.spikes());
        let count = outputs.count();

        let e_spike_eff = params.e_spike_eff(self.simplified);
        let mut e_req = e_spike_eff;
        for (i, &(t, state)) in spikes.iter().enumerate().rev() {
            e_req = self.min_perturbation(t, state, input, params, e_req, count - i);
        }

        let e_norm = if count == 0 { 0.0 } else { params.e_reset() };
        FractionalSpikeCountResult::new(count, e_req, maxima.v_max(), e_norm, e_spike_eff)
    }

    /// Lowest potential below `bound` which, written at the end of the
    /// refractory period following the output spike at `t`, yields more
    /// than `expected` output spikes. Returns `bound` if there is none.
    fn min_perturbation(
        &self,
        t: Time,
        state: State,
        input: &[Spike],
        params: &WorkingParameters,
        bound: f64,
        expected: usize,
    ) -> f64 {
        let t_ctrl = Time::sec(params.tau_ref());
        let (mut replay, i_ctrl) = rebuild_input(input, t, t_ctrl);
        let options = Options::default()
            .with_flags(self.flags())
            .with_initial(state)
            .with_last_output_spike(Time::ZERO);

        let mut fires = |v: f64| {
            replay[i_ctrl] = Spike::set_voltage(t_ctrl, v);
            let counter = SpikeCounter::default();
            let handle = counter.clone();
            let mut controller = SpikeCountLimiter::new(
                MaxValueController::new(self.simplified),
                || handle.count(),
                expected,
            );
            simulate(
                &replay,
                &mut counter.clone(),
                &mut controller,
                &mut DormandPrince::new(self.integrator),
                params,
                &options,
            );
            counter.count() > expected
        };

        let tolerance = (params.v_max() - params.v_min()) / SEARCH_RESOLUTION;
        let (mut lo, mut hi) = (state.v, bound);
        if hi - lo <= tolerance || !fires(hi) {
            return bound;
        }

        for _ in 0..MAX_SEARCH_STEPS {
            if hi - lo <= tolerance {
                break;
            }
            let mid = lo + 0.5 * (hi - lo);
            if fires(mid) {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        hi.min(bound)
    }
}

/// Shifts `input` to start at `t`, keeping only spikes strictly after it,
/// and inserts a potential-setting control spike at `t_ctrl`.
///
/// Returns the new spikes and the index of the control spike.
fn rebuild_input(input: &[Spike], t: Time, t_ctrl: Time) -> (SpikeVec, usize) {
    let mut replay = SpikeVec::with_capacity(input.len() + 1);
    let mut i_ctrl = None;
    for spike in input {
        let ts = spike.time - t;
        if ts > t_ctrl && i_ctrl.is_none() {
            i_ctrl = Some(replay.len());
            replay.push(Spike::set_voltage(t_ctrl, 0.0));
        }
        if ts > Time::ZERO {
            replay.push(Spike { time: ts, ..*spike });
        }
    }

    let i_ctrl = i_ctrl.unwrap_or_else(|| {
        replay.push(Spike::set_voltage(t_ctrl, 0.0));
        replay.len() - 1
    });
    (replay, i_ctrl)
}

#[cfg(test)]
mod tests {
    use super::*;

    use adexp_core::{Dimension, SpikeKind, build_input_spikes};

    fn burst(count: f64, weight: f64) -> SpikeVec {
        build_input_spikes(count, Time::msec(0.5), Time::ZERO, weight)
    }

    #[test]
    fn rebuild_inserts_control_spike_in_order() {
        let input = burst(4.0, 1.0);

        let t = input[1].time;

        let (replay, i_ctrl) = rebuild_input(&input, t, Time::msec(0.7));

        // Replayed spikes keep their exact fixed-point offsets.
        let times: Vec<Time> = replay.iter().map(|s| s.time).collect();
        assert_eq!(
            times,
            vec![input[2].time - t, Time::msec(0.7), input[3].time - t]
        );
        assert_eq!(input[2].time - t, Time::from_raw(input[1].time.raw()));
        assert_eq!(i_ctrl, 1);
        assert!(matches!(replay[i_ctrl].kind, SpikeKind::SetVoltage(_)));
    }

    #[test]
    fn rebuild_appends_control_spike_after_the_input() {
        let input = burst(2.0, 1.0);

        let (replay, i_ctrl) = rebuild_input(&input, Time::msec(5.0), Time::ZERO);

        assert_eq!(replay.len(), 1);
        assert_eq!(i_ctrl, 0);
        assert_eq!(replay[0].time, Time::ZERO);
    }

    #[test]
    fn silent_neuron_reports_relative_peak() {
        let params = WorkingParameters::default();
        let analysis = FractionalSpikeCount::default();

        let result = analysis.calculate(&burst(1.0, 0.2), &params);

        assert_eq!(result.spike_count, 0);
        assert!(result.e_max > 0.0);
        assert!(result.frac() > 0.0 && result.frac() < 1.0, "{result:?}");
        assert!(result.e_req <= params.e_spike_eff(false));
    }

    #[test]
    fn count_grows_with_input_strength() {
        let params = WorkingParameters::default().with(Dimension::SpikeAdaptation, 0.0);
        let analysis = FractionalSpikeCount::default();
        let weight = params.estimate_w(3.0) / params.w();

        let fracs: Vec<f64> = [0.5, 1.0, 1.5, 2.2, 3.0, 4.0]
            .into_iter()
            .map(|scale| analysis.calculate(&burst(3.0, scale * weight), &params).frac())
            .collect();

        for pair in fracs.windows(2) {
            assert!(pair[1] >= pair[0] - 1e-3, "{fracs:?}");
        }
        assert!(fracs[0] < 1.0);
        assert!(fracs[5] >= 1.0);
    }

    #[test]
    fn runaway_firing_is_capped() {
        let params = WorkingParameters::default().with(Dimension::SpikeAdaptation, 0.0);
        let analysis = FractionalSpikeCount::default().with_max_spike_count(2);
        let input: SpikeVec = (0..20)
            .map(|i| Spike::new(Time::msec(0.5 * f64::from(i)), 4.0))
            .collect();

        let result = analysis.calculate(&input, &params);

        assert_eq!(result, FractionalSpikeCountResult::integral(3));
        assert_eq!(result.frac(), 3.0);
    }
}
