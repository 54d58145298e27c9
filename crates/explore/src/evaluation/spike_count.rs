use adexp_core::{Range, SingleGroupSpikeData, SpikeVec, WorkingParameters};

use super::{Descriptor, Evaluation, EvaluationResult, FractionalSpikeCount, Metric, lorentzian};

/// Half width of the score around the target spike count.
const WIDTH: f64 = 0.5;

/// Scores how closely the fractional output spike counts match their
/// targets.
///
/// `n` input spikes should produce `n_out` output spikes, `n - 1` input
/// spikes none. Each count is compared to its target with a Lorentzian, so
/// parameter sets far from the target still receive a small but
/// distinguishable score.
#[derive(Debug, Clone)]
pub struct SpikeCountEvaluation {
    spike_data: SingleGroupSpikeData,
    analysis: FractionalSpikeCount,
    descriptor: Descriptor,
    s_n: SpikeVec,
    s_n_m1: SpikeVec,
}

impl Default for SpikeCountEvaluation {
    fn default() -> Self {
        Self::new(SingleGroupSpikeData::default(), false)
    }
}

impl SpikeCountEvaluation {
    pub const SOFT: usize = 0;
    pub const BINARY: usize = 1;
    pub const FALSE_POSITIVE: usize = 2;
    pub const FALSE_NEGATIVE: usize = 3;
    pub const COUNT_N: usize = 4;
    pub const COUNT_N_M1: usize = 5;

    #[must_use]
    pub fn new(spike_data: SingleGroupSpikeData, simplified: bool) -> Self {
        let counts = Range::new(0.0, 5.0);
        Self {
            s_n: spike_data.spikes(spike_data.n),
            s_n_m1: spike_data.spikes(spike_data.n_m1),
            spike_data,
            analysis: FractionalSpikeCount::new(simplified),
            descriptor: Descriptor::new(vec![
                Metric::score("Soft", "soft", 0.0).optimized(),
                Metric::score("Binary", "binary", 0.0),
                Metric::score("False Pos.", "p_false_pos", 1.0),
                Metric::score("False Neg.", "p_false_neg", 1.0),
                Metric::raw("Spike Count (N)", "count_n", "", counts),
                Metric::raw("Spike Count (N-1)", "count_n_m1", "", counts),
            ]),
        }
    }

    /// Replaces the spike count analysis, e.g. to change its tolerance.
    #[must_use]
    pub fn with_analysis(mut self, analysis: FractionalSpikeCount) -> Self {
        self.analysis = analysis;
        self
    }

    #[must_use]
    pub fn spike_data(&self) -> &SingleGroupSpikeData {
        &self.spike_data
    }
}

impl Evaluation for SpikeCountEvaluation {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    #[allow(clippy::cast_precision_loss)]
    fn evaluate(&self, params: &WorkingParameters) -> EvaluationResult {
        if !params.is_valid() {
            return self.descriptor.default_result();
        }

        let n = self.analysis.calculate(&self.s_n, params);
        let n_m1 = self.analysis.calculate(&self.s_n_m1, params);
        let target = self.spike_data.n_out as f64;
        let f_n = n.frac().max(0.0);
        let f_n_m1 = n_m1.frac().max(0.0);

        let soft = lorentzian(f_n, target, WIDTH) * lorentzian(f_n_m1, 0.0, WIDTH);
        let binary = n.spike_count == self.spike_data.n_out && n_m1.spike_count == 0;
        let p_false_pos = 1.0 - lorentzian(f_n_m1, 0.0, WIDTH);
        let p_false_neg = 1.0 - lorentzian(f_n.min(target), target, WIDTH);

        self.descriptor.sanitize([
            soft,
            if binary { 1.0 } else { 0.0 },
            p_false_pos,
            p_false_neg,
            f_n,
            f_n_m1,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use adexp_core::Dimension;

    #[test]
    fn invalid_parameters_yield_defaults() {
        let evaluation = SpikeCountEvaluation::default();
        let params = WorkingParameters::default().with(Dimension::SlopeFactor, 0.0);

        let result = evaluation.evaluate(&params);

        assert_eq!(result[SpikeCountEvaluation::SOFT], 0.0);
        assert_eq!(result[SpikeCountEvaluation::FALSE_NEGATIVE], 1.0);
        assert!(result[SpikeCountEvaluation::COUNT_N].is_nan());
    }

    #[test]
    fn silent_neuron_is_a_false_negative() {
        let evaluation = SpikeCountEvaluation::new(
            SingleGroupSpikeData {
                n_patch: 0.1,
                ..SingleGroupSpikeData::default()
            },
            false,
        );

        let result = evaluation.evaluate(&WorkingParameters::default());

        assert_eq!(result[SpikeCountEvaluation::BINARY], 0.0);
        assert!(result[SpikeCountEvaluation::COUNT_N] < 1.0);
        assert!(result[SpikeCountEvaluation::FALSE_NEGATIVE] > 0.5);
        assert!(result[SpikeCountEvaluation::FALSE_POSITIVE] < 0.5);

        let p_hit = 1.0 - result[SpikeCountEvaluation::FALSE_NEGATIVE];
        assert!(result[SpikeCountEvaluation::SOFT] <= p_hit + 1e-12);
    }
}
