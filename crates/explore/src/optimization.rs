//! Maximizes the primary metric of an evaluation over selected parameter
//! dimensions.
//!
//! # Algorithm
//!
//! Every starting point seeds a downhill simplex (Nelder–Mead) search over
//! the chosen [`Dimension`]s that minimizes the negated primary metric.
//! Invalid parameter sets score zero, the worst possible score. A simplex
//! that settles restarts around its best vertex with randomly scaled axes,
//! so a search can leave shallow local optima.
//!
//! Searches run in rounds, with the searches of one round evaluated in
//! parallel on the `rayon` thread pool. A result whose score still changed
//! substantially is queued for another round, unless it is clearly worse
//! than the best stable result. Stable results enter the output list, which
//! keeps near-duplicate parameter sets only once.
//!
//! # Observer Events
//!
//! Before each round the observer receives an [`Event`]. Returning
//! [`Action::Cancel`] stops the optimization and returns the stable results
//! found so far with [`Status::StoppedByObserver`].
//!
//! # Example
//!
//! ```ignore
//! use adexp_core::{Dimension, WorkingParameters};
//! use adexp_explore::{
//!     evaluation::SingleGroupEvaluation,
//!     optimization::{Config, optimize_unobserved},
//! };
//!
//! let solution = optimize_unobserved(
//!     &SingleGroupEvaluation::default(),
//!     &[WorkingParameters::default()],
//!     &[Dimension::LeakRate, Dimension::Threshold, Dimension::Weight],
//!     &Config::default(),
//! )?;
//! if let Some(best) = solution.best() {
//!     println!("soft score {}", best.score);
//! }
//! ```

mod config;
mod pool;
mod simplex;


use adexp_core::{Dimension, Observer, WorkingParameters};
use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::evaluation::Evaluation;

pub use config::{Config, ConfigError};

use pool::Pool;
use simplex::Simplex;

/// A stable parameter set and its primary metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationResult {
    pub params: WorkingParameters,
    pub score: f64,
}

/// Emitted before each round of searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Index of the round about to start.
    pub round: usize,
    /// Simplex iterations performed so far.
    pub iterations: usize,
    /// Starting points queued for this round.
    pub pending: usize,
    /// Best stable score so far.
    pub best: Option<f64>,
}

/// Actions an observer may request from a running optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Cancel,
}

/// Indicates why the optimization ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No starting point is left to refine.
    Converged,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of an optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: Status,

    /// Stable results, ascending by score.
    pub results: Vec<OptimizationResult>,

    /// Total simplex iterations.
    pub iterations: usize,

    /// Completed rounds.
    pub rounds: usize,
}

impl Solution {
    /// The result with the highest score.
    #[must_use]
    pub fn best(&self) -> Option<&OptimizationResult> {
        self.results.last()
    }
}

/// Errors that can occur when starting an optimization.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum Error {
    #[error("the evaluation has no metric marked for optimization")]
    NoPrimaryMetric,

    #[error("no dimension left to optimize")]
    NoDimensions,
}

/// Maximizes the evaluation's primary metric from each starting point.
///
/// With [`Config::simplified`] set, dimensions without effect in the
/// simplified model are ignored.
///
/// # Errors
///
/// Returns an error if the evaluation has no primary metric or if no
/// dimension is left to optimize.
pub fn optimize<E, O>(
    evaluation: &E,
    starts: &[WorkingParameters],
    dims: &[Dimension],
    config: &Config,
    mut observer: O,
) -> Result<Solution, Error>
where
    E: Evaluation + ?Sized,
    O: Observer<Event, Action>,
{
    let primary = evaluation
        .descriptor()
        .primary()
        .ok_or(Error::NoPrimaryMetric)?;
    let dims: Vec<Dimension> = dims
        .iter()
        .copied()
        .filter(|dim| !config.simplified() || dim.in_simplified_model())
        .collect();
    if dims.is_empty() {
        return Err(Error::NoDimensions);
    }
    info!(?dims, starts = starts.len(), "starting optimization");

    let mut pool = Pool::new(starts);
    let mut iterations = 0;
    let mut round = 0;
    let mut seed = config.seed();

    while pool.pending() > 0 {
        let event = Event {
            round,
            iterations,
            pending: pool.pending(),
            best: pool.best().map(|r| r.score),
        };
        if let Some(Action::Cancel) = observer.observe(&event) {
            debug!(round, "optimization cancelled");
            return Ok(Solution {
                status: Status::StoppedByObserver,
                results: pool.into_output(),
                iterations,
                rounds: round,
            });
        }

        let batch: Vec<(WorkingParameters, u64)> = pool
            .take_input()
            .into_iter()
            .map(|start| {
                seed = seed.wrapping_add(1);
                (start, seed)
            })
            .collect();
        let searches: Vec<Search> = batch
            .into_par_iter()
            .map(|(start, seed)| search(evaluation, primary, &dims, config, &start, seed))
            .collect();

        for s in searches {
            iterations += s.iterations;
            pool.submit(s.params, s.initial, s.score);
        }
        round += 1;
        debug!(round, iterations, pending = pool.pending(), "round complete");
    }

    let results = pool.into_output();
    info!(
        rounds = round,
        iterations,
        best = results.last().map(|r| r.score),
        "optimization complete"
    );
    Ok(Solution {
        status: Status::Converged,
        results,
        iterations,
        rounds: round,
    })
}

/// Runs [`optimize`] without an observer.
///
/// # Errors
///
/// Returns an error if the evaluation has no primary metric or if no
/// dimension is left to optimize.
pub fn optimize_unobserved<E>(
    evaluation: &E,
    starts: &[WorkingParameters],
    dims: &[Dimension],
    config: &Config,
) -> Result<Solution, Error>
where
    E: Evaluation + ?Sized,
{
    optimize(evaluation, starts, dims, config, ())
}

/// Outcome of a single simplex search.
struct Search {
    params: WorkingParameters,
    initial: f64,
    score: f64,
    iterations: usize,
}

fn search<E: Evaluation + ?Sized>(
    evaluation: &E,
    primary: usize,
    dims: &[Dimension],
    config: &Config,
    start: &WorkingParameters,
    seed: u64,
) -> Search {
    let cost = |x: &[f64]| -score(evaluation, primary, &place(start, dims, x));
    let origin: Vec<f64> = dims.iter().map(|&dim| start.get(dim)).collect();
    let mut simplex = Simplex::new(origin, StdRng::seed_from_u64(seed), &cost);

    let mut iterations = 0;
    while iterations < config.max_iters() {
        iterations += 1;
        if simplex.step(config.epsilon(), &cost) {
            break;
        }
    }

    let (best, best_cost) = simplex.best();
    Search {
        params: place(start, dims, best),
        initial: score(evaluation, primary, start),
        score: -best_cost,
        iterations,
    }
}

/// `base` with the coordinates `x` written into `dims`.
fn place(base: &WorkingParameters, dims: &[Dimension], x: &[f64]) -> WorkingParameters {
    dims.iter()
        .zip(x)
        .fold(*base, |params, (&dim, &value)| params.with(dim, value))
}

/// The primary metric, or zero for invalid parameters and non-finite values.
fn score<E: Evaluation + ?Sized>(
    evaluation: &E,
    primary: usize,
    params: &WorkingParameters,
) -> f64 {
    if !params.is_valid() {
        return 0.0;
    }
    let value = evaluation.evaluate(params)[primary];
    if value.is_finite() { value } else { 0.0 }
}
