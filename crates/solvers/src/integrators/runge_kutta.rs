use adexp_core::{Integrator, State, StepIntegrable, Step, Time};

/// Fixed-step fourth-order Runge–Kutta integrator.
///
/// Every step is accepted. The requested step size is used as is, truncated
/// so that no step crosses `t_stop`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKutta;

impl Integrator for RungeKutta {
    fn step<F>(&mut self, t: Time, h: Time, t_stop: Time, state: &State, df: F) -> Step
    where
        F: Fn(&State) -> State,
    {
        let h = h.max(Time::EPSILON).min(t_stop - t).max(Time::ZERO);
        let next = rk4_step(state, h.as_sec(), df);
        Step::accepted(next, t + h)
    }
}

/// Advances `state` by a single RK4 step of `h` seconds.
pub fn rk4_step<F>(state: &State, h: f64, df: F) -> State
where
    F: Fn(&State) -> State,
{
    let k1 = df(state);
    let k2 = df(&state.step(k1, h * 0.5));
    let k3 = df(&state.step(k2, h * 0.5));
    let k4 = df(&state.step(k3, h));

    state.step(k1 + (k2 + k3) * 2.0 + k4, h / 6.0)
}
