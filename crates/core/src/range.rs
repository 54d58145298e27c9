/// A closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// An empty range that any value will widen.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(f64::INFINITY, f64::NEG_INFINITY)
    }

    /// Widens the range to include `value`. Non-finite values are ignored.
    pub fn expand(&mut self, value: f64) {
        if value.is_finite() {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// A range sampled at `steps` equally spaced points.
///
/// Point `i` lies at `min + (max - min) * i / steps`, so the points cover
/// `[min, max)` with `max` itself excluded; a single step samples only `min`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteRange {
    pub range: Range,
    pub steps: usize,
}

impl DiscreteRange {
    #[must_use]
    pub const fn new(min: f64, max: f64, steps: usize) -> Self {
        Self {
            range: Range::new(min, max),
            steps,
        }
    }

    /// Samples a continuous range at the given resolution.
    #[must_use]
    pub const fn from_range(range: Range, steps: usize) -> Self {
        Self { range, steps }
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.range.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.range.max
    }

    /// Distance between adjacent points.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn step_size(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.range.span() / self.steps as f64
        }
    }

    /// Value of point `i`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(&self, i: usize) -> f64 {
        self.range.min + self.step_size() * i as f64
    }

    /// Index of the point at or just below `value`, clamped to the valid
    /// indices.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn index(&self, value: f64) -> usize {
        let step = self.step_size();
        if self.steps == 0 || step == 0.0 || !value.is_finite() {
            return 0;
        }
        let i = ((value - self.range.min) / step).floor().max(0.0) as usize;
        i.min(self.steps - 1)
    }

    /// Iterates over all sample points.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.steps).map(|i| self.value(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn expands_over_finite_values() {
        let mut range = Range::empty();
        assert!(range.is_empty());

        for value in [0.5, -1.0, f64::NAN, 2.0, f64::INFINITY] {
            range.expand(value);
        }

        assert_eq!(range, Range::new(-1.0, 2.0));
        assert!(range.contains(0.0));
        assert!(!range.contains(2.5));
        assert_relative_eq!(range.span(), 3.0);
    }

    #[test]
    fn samples_points() {
        let range = DiscreteRange::new(10.0, 20.0, 4);

        let values: Vec<f64> = range.values().collect();

        assert_eq!(values, vec![10.0, 12.5, 15.0, 17.5]);
        assert_relative_eq!(range.step_size(), 2.5);
    }

    #[test]
    fn index_inverts_value_with_clamping() {
        let range = DiscreteRange::new(-1.0, 1.0, 8);

        for i in 0..8 {
            assert_eq!(range.index(range.value(i) + 1e-9), i);
        }
        assert_eq!(range.index(-5.0), 0);
        assert_eq!(range.index(5.0), 7);
        assert_eq!(range.index(f64::NAN), 0);
    }

    #[test]
    fn single_step_samples_minimum() {
        let range = DiscreteRange::new(3.0, 4.0, 1);
        assert_eq!(range.values().collect::<Vec<_>>(), vec![3.0]);
    }
}
