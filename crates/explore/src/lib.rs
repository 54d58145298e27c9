//! Parameter evaluations and 2-D parameter-space exploration.
//!
//! An [`Evaluation`] scores a parameter set by simulating the neuron on a
//! fixed input and condensing the outcome into a vector of metrics. The
//! [`exploration`] module sweeps an evaluation over a grid spanned by two
//! parameter dimensions, evaluating the cells of each row in parallel. The
//! [`incremental`] module runs such sweeps on a background worker at
//! successively finer resolutions, restarting whenever the view changes.
//! The [`optimization`] module searches for the parameter set that maximizes
//! an evaluation's primary metric.
//!
//! [`Evaluation`]: evaluation::Evaluation

pub mod evaluation;
pub mod exploration;
pub mod incremental;
pub mod optimization;
