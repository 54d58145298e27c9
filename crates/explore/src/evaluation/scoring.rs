/// Logistic function centred at `threshold` with steepness `tau`.
#[must_use]
pub fn sigmoid(x: f64, threshold: f64, tau: f64) -> f64 {
    1.0 / (1.0 + (-tau * (x - threshold)).exp())
}

/// Lorentzian (Cauchy) peak of half width `width` centred at `target`.
///
/// Equals one at the target and decays with the square of the distance.
/// Its long tails keep far-off values distinguishable.
#[must_use]
pub fn lorentzian(x: f64, target: f64, width: f64) -> f64 {
    let d = (x - target) / width;
    1.0 / (1.0 + d * d)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn sigmoid_is_centred_at_threshold() {
        assert_relative_eq!(sigmoid(0.02, 0.02, 1000.0), 0.5);
        assert!(sigmoid(0.03, 0.02, 1000.0) > 0.99);
        assert!(sigmoid(0.01, 0.02, 1000.0) < 0.01);
    }

    #[test]
    fn lorentzian_has_long_tails() {
        assert_relative_eq!(lorentzian(1.0, 1.0, 0.5), 1.0);
        assert_relative_eq!(lorentzian(1.5, 1.0, 0.5), 0.5);
        assert_relative_eq!(lorentzian(0.5, 1.0, 0.5), 0.5);

        let far = lorentzian(6.0, 1.0, 0.5);
        assert!(far > 0.0 && far < 0.01);
        assert!(far > (-25.0_f64).exp());
    }
}
