use adexp_core::Range;

use super::Axis;
use crate::evaluation::{Descriptor, EvaluationResult};

/// Evaluation results of every cell of an exploration grid.
///
/// Values are stored row by row, with all metrics of a cell adjacent.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorationMemory {
    descriptor: Descriptor,
    x: Axis,
    y: Axis,
    values: Vec<f64>,
    ranges: Vec<Range>,
}

impl ExplorationMemory {
    /// Creates a memory with every cell set to the default result.
    pub(crate) fn new(descriptor: Descriptor, x: Axis, y: Axis) -> Self {
        let defaults = descriptor.default_result();
        let cells = x.1.steps * y.1.steps;
        Self {
            values: defaults.iter().copied().cycle().take(cells * defaults.len()).collect(),
            ranges: vec![Range::empty(); descriptor.len()],
            descriptor,
            x,
            y,
        }
    }

    pub(crate) fn store_row(&mut self, row: usize, results: &[EvaluationResult]) {
        let metrics = self.descriptor.len();
        for (i, result) in results.iter().enumerate() {
            let offset = self.offset(i, row);
            let cell = &mut self.values[offset..offset + metrics];
            for (slot, value) in cell.iter_mut().zip(result.iter()) {
                *slot = *value;
            }
        }
    }

    /// Recomputes the per-metric ranges over all cells.
    pub(crate) fn update_ranges(&mut self) {
        let metrics = self.descriptor.len();
        self.ranges = vec![Range::empty(); metrics];
        if metrics == 0 {
            return;
        }
        for cell in self.values.chunks_exact(metrics) {
            for (range, &value) in self.ranges.iter_mut().zip(cell) {
                range.expand(value);
            }
        }
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        (j * self.x.1.steps + i) * self.descriptor.len()
    }

    #[must_use]
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// All metric values of cell `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell lies outside the grid.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> &[f64] {
        assert!(i < self.x.1.steps && j < self.y.1.steps, "cell ({i}, {j}) out of bounds");
        let offset = self.offset(i, j);
        &self.values[offset..offset + self.descriptor.len()]
    }

    /// A single metric value of cell `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if the cell or the metric index is out of bounds.
    #[must_use]
    pub fn value(&self, i: usize, j: usize, metric: usize) -> f64 {
        self.get(i, j)[metric]
    }

    /// Range of the finite values of a metric over all cells.
    ///
    /// # Panics
    ///
    /// Panics if the metric index is out of bounds.
    #[must_use]
    pub fn metric_range(&self, metric: usize) -> Range {
        self.ranges[metric]
    }

    /// The x axis.
    #[must_use]
    pub fn x(&self) -> Axis {
        self.x
    }

    /// The y axis.
    #[must_use]
    pub fn y(&self) -> Axis {
        self.y
    }

    /// Number of cells along x and y.
    #[must_use]
    pub fn resolution(&self) -> (usize, usize) {
        (self.x.1.steps, self.y.1.steps)
    }
}
