use adexp_core::{Range, SingleGroupSpikeData, Spike, SpikeVec, State, WorkingParameters};
use adexp_observers::{
    controllers::NullController,
    recorders::{LastState, LocalMaxima},
};
use adexp_solvers::{
    integrators::{DormandPrince, dormand_prince},
    simulation::{Flags, Options, simulate},
};

use super::{Descriptor, Evaluation, EvaluationResult, Metric, sigmoid};

/// Potential distance below the threshold at which the soft score of a
/// single run drops to [`TAU_RANGE_VALUE`] [V].
const TAU_RANGE: f64 = 0.002;
const TAU_RANGE_VALUE: f64 = 0.1;

/// Weights of the state components when measuring how far a run ends from
/// rest.
const RESET_SCALE: State = State::new(100.0, 0.1, 0.1, 0.1);

/// Scores how well a neuron separates `n` from `n - 1` synchronous inputs.
///
/// Three runs are made with output spiking disabled, each over the full
/// duration of the spike data:
///
/// - `n` input spikes from rest, which should cross the threshold;
/// - `n - 1` input spikes from rest, which should not;
/// - `n` input spikes starting at the reset potential, which should not
///   either, so that the neuron does not fire again right after its own
///   output spike.
///
/// The crossings are scored softly by a sigmoid of the peak potential
/// around the effective spike potential. All three runs should also end
/// close to rest.
#[derive(Debug, Clone)]
pub struct SingleGroupEvaluation {
    spike_data: SingleGroupSpikeData,
    simplified: bool,
    integrator: dormand_prince::Config,
    descriptor: Descriptor,
    s_n: SpikeVec,
    s_n_m1: SpikeVec,
}

impl Default for SingleGroupEvaluation {
    fn default() -> Self {
        Self::new(SingleGroupSpikeData::default(), false)
    }
}

impl SingleGroupEvaluation {
    pub const SOFT: usize = 0;
    pub const BINARY: usize = 1;
    pub const FALSE_POSITIVE: usize = 2;
    pub const FALSE_NEGATIVE: usize = 3;
    pub const RESET: usize = 4;
    pub const V_MAX_N: usize = 5;
    pub const V_MAX_N_M1: usize = 6;

    /// Creates the evaluation; `simplified` selects the conductance-based
    /// integrate-and-fire model instead of the full AdExp model.
    #[must_use]
    pub fn new(spike_data: SingleGroupSpikeData, simplified: bool) -> Self {
        let potential = Range::new(-0.1, 0.1);
        Self {
            s_n: spike_data.spikes(spike_data.n),
            s_n_m1: spike_data.spikes(spike_data.n_m1),
            spike_data,
            simplified,
            integrator: dormand_prince::Config::default(),
            descriptor: Descriptor::new(vec![
                Metric::score("Soft", "soft", 0.0).optimized(),
                Metric::score("Binary", "binary", 0.0),
                Metric::score("False Pos.", "p_false_pos", 1.0),
                Metric::score("False Neg.", "p_false_neg", 1.0),
                Metric::score("Reset", "p_reset", 0.0),
                Metric::raw("Max. Potential (N)", "v_max_n", "V", potential),
                Metric::raw("Max. Potential (N-1)", "v_max_n_m1", "V", potential),
            ]),
        }
    }

    /// Replaces the integrator configuration used for every run.
    #[must_use]
    pub fn with_integrator(mut self, config: dormand_prince::Config) -> Self {
        self.integrator = config;
        self
    }

    #[must_use]
    pub fn spike_data(&self) -> &SingleGroupSpikeData {
        &self.spike_data
    }

    #[must_use]
    pub fn simplified(&self) -> bool {
        self.simplified
    }

    fn flags(&self) -> Flags {
        let flags = Flags::default().with_spiking_disabled();
        if self.simplified {
            flags.with_simplified()
        } else {
            flags.with_clamped_threshold().with_fast_exp()
        }
    }

    /// Returns the peak potential and the final state of a run.
    fn run(&self, spikes: &[Spike], initial: State, params: &WorkingParameters) -> (f64, State) {
        let mut recorder = (LastState::default(), LocalMaxima::default());
        let options = Options::default()
            .with_flags(self.flags())
            .with_initial(initial)
            .with_end(self.spike_data.t);

        simulate(
            spikes,
            &mut recorder,
            &mut NullController,
            &mut DormandPrince::new(self.integrator),
            params,
            &options,
        );

        let (last, maxima) = recorder;
        (maxima.v_max(), last.state())
    }
}

impl Evaluation for SingleGroupEvaluation {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn evaluate(&self, params: &WorkingParameters) -> EvaluationResult {
        if !params.is_valid() {
            return self.descriptor.default_result();
        }

        let (v_max_n, end_n) = self.run(&self.s_n, State::default(), params);
        let (v_max_n_m1, end_n_m1) = self.run(&self.s_n_m1, State::default(), params);
        let (v_max_s, end_s) =
            self.run(&self.s_n, State::at_potential(params.e_reset()), params);

        let th = params.e_spike_eff(self.simplified);
        let tau = (1.0 / TAU_RANGE_VALUE - 1.0).ln() / TAU_RANGE;
        let below = |v: f64| 1.0 - sigmoid(v, th, tau);

        let binary = v_max_n > th && v_max_n_m1 < th && v_max_s < th;
        let p_false_neg = below(v_max_n);
        let p_false_pos = 1.0 - below(v_max_n_m1) * below(v_max_s);

        let distance = |s: State| ((State::default() - s) * RESET_SCALE).squared_norm();
        let p_reset = (-(distance(end_n) + distance(end_n_m1) + distance(end_s)) / 3.0).exp();

        let soft = (1.0 - p_false_neg) * (1.0 - p_false_pos) * p_reset;

        self.descriptor.sanitize([
            soft,
            if binary { 1.0 } else { 0.0 },
            p_false_pos,
            p_false_neg,
            p_reset,
            v_max_n,
            v_max_n_m1,
        ])
    }
}
