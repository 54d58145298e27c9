//! Sweeps an evaluation over a 2-D grid of parameter sets.
//!
//! # Algorithm
//!
//! The grid is spanned by two parameter dimensions, each sampled by a
//! [`DiscreteRange`]. Cell `(i, j)` evaluates the base parameters with the
//! x dimension set to `x.value(i)` and the y dimension set to `y.value(j)`;
//! cells with invalid parameters receive the descriptor's default result.
//!
//! Rows are processed in order. The cells of a row are evaluated in
//! parallel on the `rayon` thread pool. Before each row the observer
//! receives an [`Event`] and may cancel the sweep, in which case the
//! partially filled memory is discarded.
//!
//! # Example
//!
//! ```ignore
//! use adexp_core::{Dimension, DiscreteRange, WorkingParameters};
//! use adexp_explore::{evaluation::SingleGroupEvaluation, exploration::explore_unobserved};
//!
//! let memory = explore_unobserved(
//!     &SingleGroupEvaluation::default(),
//!     &WorkingParameters::default(),
//!     (Dimension::LeakRate, DiscreteRange::new(10.0, 100.0, 32)),
//!     (Dimension::Weight, DiscreteRange::new(10.0, 60.0, 32)),
//! )?;
//! let soft = memory.metric_range(SingleGroupEvaluation::SOFT);
//! ```

mod memory;

use adexp_core::{Dimension, DiscreteRange, Observer, WorkingParameters};
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::evaluation::{Evaluation, EvaluationResult};

pub use memory::ExplorationMemory;

/// One sampled parameter axis.
pub type Axis = (Dimension, DiscreteRange);

/// Emitted before each row of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Index of the row about to be evaluated.
    pub row: usize,
    /// Total number of rows.
    pub rows: usize,
    /// Fraction of the sweep completed so far, in `[0, 1)`.
    pub progress: f64,
}

/// Actions an observer may request from a running sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Cancel,
}

/// Errors that can occur during a sweep.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("exploration cancelled after {completed_rows} of {rows} rows")]
    Cancelled { completed_rows: usize, rows: usize },
}

/// Evaluates every cell of the grid spanned by `x` and `y`.
///
/// # Errors
///
/// Returns [`Error::Cancelled`] if the observer cancels the sweep.
pub fn explore<E, O>(
    evaluation: &E,
    base: &WorkingParameters,
    x: Axis,
    y: Axis,
    mut observer: O,
) -> Result<ExplorationMemory, Error>
where
    E: Evaluation + ?Sized,
    O: Observer<Event, Action>,
{
    let descriptor = evaluation.descriptor();
    let mut memory = ExplorationMemory::new(descriptor.clone(), x, y);
    let rows = y.1.steps;
    debug!(
        x = ?x.0,
        y = ?y.0,
        resolution = ?memory.resolution(),
        "starting exploration"
    );

    for row in 0..rows {
        #[allow(clippy::cast_precision_loss)]
        let event = Event {
            row,
            rows,
            progress: row as f64 / rows as f64,
        };
        if let Some(Action::Cancel) = observer.observe(&event) {
            debug!(row, rows, "exploration cancelled");
            return Err(Error::Cancelled {
                completed_rows: row,
                rows,
            });
        }

        let params = base.with(y.0, y.1.value(row));
        let results: Vec<EvaluationResult> = (0..x.1.steps)
            .into_par_iter()
            .map(|i| evaluate_cell(evaluation, &params.with(x.0, x.1.value(i))))
            .collect();
        memory.store_row(row, &results);
    }

    memory.update_ranges();
    debug!(rows, "exploration complete");
    Ok(memory)
}

/// Runs [`explore`] without an observer.
///
/// # Errors
///
/// Never fails in practice; the signature mirrors [`explore`].
pub fn explore_unobserved<E>(
    evaluation: &E,
    base: &WorkingParameters,
    x: Axis,
    y: Axis,
) -> Result<ExplorationMemory, Error>
where
    E: Evaluation + ?Sized,
{
    explore(evaluation, base, x, y, ())
}

fn evaluate_cell<E: Evaluation + ?Sized>(
    evaluation: &E,
    params: &WorkingParameters,
) -> EvaluationResult {
    if params.is_valid() {
        evaluation.evaluate(params)
    } else {
        evaluation.descriptor().default_result()
    }
}
