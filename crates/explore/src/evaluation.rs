//! Scoring of parameter sets.
//!
//! Every evaluation publishes a [`Descriptor`] listing the metrics it
//! produces and returns an [`EvaluationResult`] with one value per metric,
//! in descriptor order. Evaluations are pure: the same parameters always
//! produce the same result, which lets sweeps evaluate cells in any order
//! and on any thread.
//!
//! Non-finite scores never leave an evaluation. They are replaced by the
//! metric's default value, the same sentinel used for invalid parameters.

mod descriptor;
mod fractional;
mod scoring;
mod single_group;
mod spike_count;

use adexp_core::WorkingParameters;

pub use descriptor::{Descriptor, EvaluationResult, Metric};
pub use fractional::{FractionalSpikeCount, FractionalSpikeCountResult};
pub use scoring::{lorentzian, sigmoid};
pub use single_group::SingleGroupEvaluation;
pub use spike_count::SpikeCountEvaluation;

/// Condenses the behaviour of a neuron into a fixed set of metrics.
pub trait Evaluation: Sync {
    /// The metrics this evaluation produces.
    fn descriptor(&self) -> &Descriptor;

    /// Evaluates a parameter set.
    ///
    /// Invalid parameters yield [`Descriptor::default_result`].
    fn evaluate(&self, params: &WorkingParameters) -> EvaluationResult;
}

impl<E: Evaluation + ?Sized> Evaluation for &E {
    fn descriptor(&self) -> &Descriptor {
        (**self).descriptor()
    }

    fn evaluate(&self, params: &WorkingParameters) -> EvaluationResult {
        (**self).evaluate(params)
    }
}
