use thiserror::Error;

use super::Dimension;

/// A violated working parameter validity constraint.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InvalidParameters {
    #[error("{0} is not finite")]
    NonFinite(Dimension),

    #[error("{0} must be strictly positive, got {1}")]
    NotPositive(Dimension, f64),

    #[error("{0} must be non-negative, got {1}")]
    Negative(Dimension, f64),

    #[error("{upper} must be greater than {lower}")]
    NotAbove { upper: Dimension, lower: Dimension },

    #[error("reset potential must not exceed the leak potential, got {0} V above it")]
    ResetAboveLeak(f64),
}
