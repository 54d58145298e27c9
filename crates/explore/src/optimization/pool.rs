use std::collections::VecDeque;

use adexp_core::WorkingParameters;

use super::OptimizationResult;

/// Parameter sets closer than this are duplicates in the input queue.
const MIN_DIST_INPUT: f64 = 0.1;
/// Parameter sets closer than this are duplicates in the output list.
const MIN_DIST_OUTPUT: f64 = 0.1;
/// How much worse than the best output a result may be and still be refined.
const MAX_WORSE: f64 = 0.02;
/// A search that changed the score by more than this is refined again.
const MIN_CHANGE: f64 = 0.1;
/// Smallest score accepted into the output list.
const MIN_SCORE: f64 = 0.1;

/// Queue of starting points and sorted list of stable results.
#[derive(Debug, Default)]
pub(super) struct Pool {
    input: VecDeque<WorkingParameters>,
    output: Vec<OptimizationResult>,
}

impl Pool {
    pub(super) fn new(starts: &[WorkingParameters]) -> Self {
        Self {
            input: starts.iter().copied().collect(),
            output: Vec::new(),
        }
    }

    /// Number of queued starting points.
    pub(super) fn pending(&self) -> usize {
        self.input.len()
    }

    /// Removes and returns every queued starting point.
    pub(super) fn take_input(&mut self) -> Vec<WorkingParameters> {
        self.input.drain(..).collect()
    }

    pub(super) fn best(&self) -> Option<&OptimizationResult> {
        self.output.last()
    }

    /// Files the outcome of a search that started with score `initial`.
    ///
    /// Results that are still moving are queued for another search, stable
    /// ones enter the output list.
    pub(super) fn submit(&mut self, params: WorkingParameters, initial: f64, score: f64) {
        if (score - initial).abs() > MIN_CHANGE {
            self.push_input(params, score);
        } else {
            self.push_output(params, score);
        }
    }

    /// Stable results, ascending by score.
    pub(super) fn into_output(self) -> Vec<OptimizationResult> {
        self.output
    }

    fn best_score(&self) -> f64 {
        self.best().map_or(0.0, |r| r.score)
    }

    fn push_input(&mut self, params: WorkingParameters, score: f64) {
        if self.best_score() - score < MAX_WORSE
            && nearest(self.input.iter(), &params, MIN_DIST_INPUT).is_none()
        {
            self.input.push_back(params);
        }
    }

    fn push_output(&mut self, params: WorkingParameters, score: f64) {
        if score <= MIN_SCORE {
            return;
        }

        let result = OptimizationResult { params, score };
        match nearest(self.output.iter().map(|r| &r.params), &params, MIN_DIST_OUTPUT) {
            None => self.output.push(result),
            Some(i) if score > self.best_score() => self.output[i] = result,
            Some(_) => return,
        }
        self.output.sort_by(|a, b| a.score.total_cmp(&b.score));
    }
}

/// Index of the entry nearest to `params`, if it lies within `threshold`.
fn nearest<'a>(
    entries: impl Iterator<Item = &'a WorkingParameters>,
    params: &WorkingParameters,
    threshold: f64,
) -> Option<usize> {
    entries
        .map(|entry| distance(entry, params))
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .filter(|&(_, d)| d < threshold)
        .map(|(i, _)| i)
}

fn distance(a: &WorkingParameters, b: &WorkingParameters) -> f64 {
    a.values()
        .iter()
        .zip(b.values())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    use adexp_core::Dimension;

    fn params(weight: f64) -> WorkingParameters {
        WorkingParameters::default().with(Dimension::Weight, weight)
    }

    #[test]
    fn stable_results_are_sorted_by_score() {
        let mut pool = Pool::default();

        pool.submit(params(10.0), 0.5, 0.55);
        pool.submit(params(20.0), 0.3, 0.3);
        pool.submit(params(30.0), 0.8, 0.75);

        let scores: Vec<f64> = pool.into_output().iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![0.3, 0.55, 0.75]);
    }

    #[test]
    fn low_scores_are_discarded() {
        let mut pool = Pool::default();

        pool.submit(params(10.0), 0.05, 0.05);

        assert!(pool.best().is_none());
    }

    #[test]
    fn better_duplicate_of_the_best_replaces_it() {
        let mut pool = Pool::default();
        pool.submit(params(10.0), 0.5, 0.5);

        pool.submit(params(10.01), 0.6, 0.6);
        pool.submit(params(10.02), 0.4, 0.4);

        let output = pool.into_output();
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].params, params(10.01));
    }

    #[test]
    fn moving_results_are_queued_once() {
        let mut pool = Pool::new(&[]);

        pool.submit(params(10.0), 0.1, 0.5);
        pool.submit(params(10.05), 0.1, 0.5);
        pool.submit(params(40.0), 0.1, 0.6);

        assert_eq!(pool.pending(), 2);
        assert_eq!(pool.take_input(), vec![params(10.0), params(40.0)]);
        assert_eq!(pool.pending(), 0);
    }

    #[test]
    fn results_far_below_the_best_are_not_refined() {
        let mut pool = Pool::default();
        pool.submit(params(10.0), 0.9, 0.9);

        pool.submit(params(40.0), 0.1, 0.5);

        assert_eq!(pool.pending(), 0);
    }
}
