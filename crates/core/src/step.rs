/// A value that can be advanced along its derivative.
///
/// Integrators build their stages from this single operation: a stage value is
/// `base.step(k, delta)`, where `k` is a derivative evaluated by the model and
/// `delta` is a (possibly fractional) step size. `Delta` is seconds for the
/// neuron state, but any independent variable works.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Membrane potential decaying with a fixed rate, derivative in V/s.
    #[derive(Debug, PartialEq)]
    struct Potential(f64);
    struct Slope(f64);

    impl StepIntegrable<f64> for Potential {
        type Derivative = Slope;

        fn step(&self, derivative: Slope, delta: f64) -> Self {
            Potential(self.0 + derivative.0 * delta)
        }
    }

    fn euler(mut v: Potential, rate: f64, dt: f64, steps: usize) -> Potential {
        for _ in 0..steps {
            v = v.step(Slope(-rate * v.0), dt);
        }
        v
    }

    #[test]
    fn single_step() {
        let next = Potential(0.5).step(Slope(-2.0), 0.25);
        assert_eq!(next, Potential(0.0));
    }

    #[test]
    fn repeated_steps_decay_towards_zero() {
        let v = euler(Potential(1.0), 0.5, 1.0, 3);
        assert_eq!(v, Potential(0.125));
    }
}
