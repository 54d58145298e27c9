use adexp_core::{State, Time};

use crate::integrators::rk4_step;

const MAX_ITERS: usize = 60;

/// Locates the time within a step at which the membrane potential first
/// exceeds `threshold`.
///
/// `start` lies at or below the threshold and `end` above it. Intermediate
/// states are re-integrated from `start` with a single RK4 step, and the
/// bracket is halved until it is no wider than `tolerance`. Returns the
/// earliest bracketed time above the threshold together with its state.
pub(super) fn locate<F>(
    start: (Time, &State),
    end: (Time, State),
    threshold: f64,
    tolerance: Time,
    df: F,
) -> (Time, State)
where
    F: Fn(&State) -> State,
{
    let (t0, s0) = start;
    let (mut lo, mut hi) = (t0, end.0);
    let mut hi_state = end.1;

    for _ in 0..MAX_ITERS {
        if hi - lo <= tolerance {
            break;
        }

        let mid = lo + Time::from_raw((hi - lo).raw() / 2);
        let state = rk4_step(s0, (mid - t0).as_sec(), &df);

        if state.v > threshold {
            hi = mid;
            hi_state = state;
        } else {
            lo = mid;
        }
    }

    (hi, hi_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn finds_linear_crossing() {
        // v rises at 1 V/s, so it crosses 0.5 V after 0.5 s.
        let ramp = |_: &State| State::new(1.0, 0.0, 0.0, 0.0);
        let start = State::default();
        let end = State::at_potential(1.0);

        let (t, s) = locate(
            (Time::ZERO, &start),
            (Time::sec(1.0), end),
            0.5,
            Time::sec(1e-9),
            ramp,
        );

        assert_relative_eq!(t.as_sec(), 0.5, epsilon = 1e-8);
        assert!(s.v > 0.5);
        assert_relative_eq!(s.v, 0.5, epsilon = 1e-8);
    }

    #[test]
    fn keeps_end_when_bracket_is_tight() {
        let ramp = |_: &State| State::new(1.0, 0.0, 0.0, 0.0);
        let end = State::at_potential(1.0);

        let (t, s) = locate(
            (Time::ZERO, &State::default()),
            (Time::EPSILON, end),
            0.5,
            Time::sec(1e-9),
            ramp,
        );

        assert_eq!(t, Time::EPSILON);
        assert_eq!(s, end);
    }
}
