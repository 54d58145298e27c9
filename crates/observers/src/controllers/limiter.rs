use adexp_core::{AuxiliaryState, Controller, Decision, State, Time, WorkingParameters};

/// Aborts a run once more than `cap` output spikes have been counted.
///
/// The count is read through a caller-supplied function, typically the
/// [`SpikeCounter`](crate::recorders::SpikeCounter) recording the same run.
/// Below the cap every decision is delegated to the wrapped controller.
#[derive(Debug, Clone)]
pub struct SpikeCountLimiter<C, F> {
    inner: C,
    count: F,
    cap: usize,
    tripped: bool,
}

impl<C, F> SpikeCountLimiter<C, F>
where
    C: Controller,
    F: Fn() -> usize,
{
    #[must_use]
    pub fn new(inner: C, count: F, cap: usize) -> Self {
        Self {
            inner,
            count,
            cap,
            tripped: false,
        }
    }

    /// Whether the limiter has aborted a run.
    #[must_use]
    pub fn tripped(&self) -> bool {
        self.tripped
    }

    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }

    #[must_use]
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Returns the wrapped controller.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C, F> Controller for SpikeCountLimiter<C, F>
where
    C: Controller,
    F: Fn() -> usize,
{
    fn decide(
        &mut self,
        time: Time,
        state: &State,
        aux: &AuxiliaryState,
        params: &WorkingParameters,
        in_refractory: bool,
    ) -> Decision {
        if (self.count)() > self.cap {
            self.tripped = true;
            return Decision::Abort;
        }
        self.inner.decide(time, state, aux, params, in_refractory)
    }
}
