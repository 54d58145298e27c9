use std::f64::consts::LOG2_E;

/// Taylor coefficients of `2^f` for `f` in `[0, 1)`, lowest order first.
const COEFFS: [f64; 6] = [
    0.693_147_180_6,
    0.240_226_507_0,
    0.055_504_108_7,
    0.009_618_129_1,
    0.001_333_355_8,
    0.000_154_035_3,
];

/// Approximates `exp(x)` with a relative error below `1e-4` on `[-20, 20]`.
///
/// The argument is split into `x * log2(e) = i + f` with integer `i`; `2^f` is
/// evaluated with a short polynomial and `2^i` is assembled directly in the
/// exponent bits of an `f64`. Results underflow to zero below `2^-1022` and
/// overflow to infinity above `2^1023`.
#[must_use]
pub fn fast_exp(x: f64) -> f64 {
    let y = x * LOG2_E;
    if y.is_nan() {
        return f64::NAN;
    }
    if y < -1022.0 {
        return 0.0;
    }
    if y > 1023.0 {
        return f64::INFINITY;
    }

    let i = y.floor();
    let f = y - i;

    let p = COEFFS.iter().rev().fold(0.0, |acc, c| (acc + c) * f) + 1.0;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bits = ((i as i64 + 1023) as u64) << 52;
    p * f64::from_bits(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn exact_at_zero() {
        assert_eq!(fast_exp(0.0), 1.0);
    }

    #[test]
    fn saturates_outside_the_exponent_range() {
        assert_eq!(fast_exp(-1000.0), 0.0);
        assert_eq!(fast_exp(1000.0), f64::INFINITY);
        assert!(fast_exp(f64::NAN).is_nan());
    }

    proptest! {
        #[test]
        fn relative_error_is_small(x in -20.0..20.0_f64) {
            let exact = x.exp();
            let rel = (fast_exp(x) - exact).abs() / exact;
            prop_assert!(rel < 1e-4, "x = {x}, rel = {rel}");
        }
    }
}
