use std::ops::Deref;

use adexp_core::Range;

/// Describes a single metric of an evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    /// Human readable name.
    pub name: &'static str,
    /// Stable identifier.
    pub id: &'static str,
    /// Unit of the value, empty for dimensionless metrics.
    pub unit: &'static str,
    /// Value reported for invalid parameters and non-finite scores.
    pub default: f64,
    /// Expected range of the value.
    pub range: Range,
    /// Whether this is the metric an optimizer should maximize.
    pub optimize: bool,
}

impl Metric {
    /// A dimensionless score in `[0, 1]`.
    #[must_use]
    pub const fn score(name: &'static str, id: &'static str, default: f64) -> Self {
        Self {
            name,
            id,
            unit: "",
            default,
            range: Range::new(0.0, 1.0),
            optimize: false,
        }
    }

    /// A raw value without a meaningful default.
    #[must_use]
    pub const fn raw(
        name: &'static str,
        id: &'static str,
        unit: &'static str,
        range: Range,
    ) -> Self {
        Self {
            name,
            id,
            unit,
            default: f64::NAN,
            range,
            optimize: false,
        }
    }

    /// Marks the metric as the optimization target.
    #[must_use]
    pub const fn optimized(mut self) -> Self {
        self.optimize = true;
        self
    }
}

/// The ordered list of metrics an evaluation produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    metrics: Vec<Metric>,
}

impl Descriptor {
    #[must_use]
    pub fn new(metrics: Vec<Metric>) -> Self {
        Self { metrics }
    }

    #[must_use]
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Index of the metric with the given id.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.metrics.iter().position(|m| m.id == id)
    }

    /// Index of the first metric marked for optimization.
    #[must_use]
    pub fn primary(&self) -> Option<usize> {
        self.metrics.iter().position(|m| m.optimize)
    }

    /// The result holding every metric's default value.
    #[must_use]
    pub fn default_result(&self) -> EvaluationResult {
        EvaluationResult(self.metrics.iter().map(|m| m.default).collect())
    }

    /// Builds a result from raw values, replacing non-finite values with
    /// the metric defaults.
    ///
    /// Missing trailing values are filled with defaults, surplus values are
    /// dropped.
    #[must_use]
    pub fn sanitize(&self, values: impl IntoIterator<Item = f64>) -> EvaluationResult {
        let mut values = values.into_iter();
        EvaluationResult(
            self.metrics
                .iter()
                .map(|m| match values.next() {
                    Some(v) if v.is_finite() => v,
                    _ => m.default,
                })
                .collect(),
        )
    }
}

/// Metric values in descriptor order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationResult(Vec<f64>);

impl EvaluationResult {
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for EvaluationResult {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for EvaluationResult {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}
