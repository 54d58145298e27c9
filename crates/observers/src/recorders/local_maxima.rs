use adexp_core::{AuxiliaryState, Recorder, State, Time};

/// Records the local maxima of the membrane potential.
///
/// Output spikes are not maxima: the sample at the spike potential that
/// precedes every output spike is discarded. The global maximum and the
/// last state are tracked alongside.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalMaxima {
    maxima: Vec<(Time, State)>,
    global: Option<(Time, State)>,
    pending: Option<(Time, State)>,
    last: Option<(Time, State)>,
    rising: bool,
}

impl LocalMaxima {
    /// Local maxima in time order.
    #[must_use]
    pub fn maxima(&self) -> &[(Time, State)] {
        &self.maxima
    }

    /// Sample with the highest potential, ignoring spike peaks.
    #[must_use]
    pub fn global_max(&self) -> Option<(Time, State)> {
        match (self.global, self.pending) {
            (Some(g), Some(p)) if p.1.v > g.1.v => Some(p),
            (None, p) => p,
            (g, _) => g,
        }
    }

    /// Highest potential, or negative infinity if nothing was recorded.
    #[must_use]
    pub fn v_max(&self) -> f64 {
        self.global_max().map_or(f64::NEG_INFINITY, |(_, s)| s.v)
    }

    #[must_use]
    pub fn last_state(&self) -> Option<(Time, State)> {
        self.last
    }

    fn commit(&mut self, sample: (Time, State)) {
        if self.global.is_none_or(|g| sample.1.v > g.1.v) {
            self.global = Some(sample);
        }
    }
}

impl Recorder for LocalMaxima {
    fn step(&mut self, time: Time, state: &State, _aux: &AuxiliaryState) {
        if let Some(prev) = self.pending {
            self.commit(prev);
            if self.rising && state.v < prev.1.v {
                self.maxima.push(prev);
            }
            if state.v != prev.1.v {
                self.rising = state.v > prev.1.v;
            }
        }

        self.pending = Some((time, *state));
        self.last = Some((time, *state));
    }

    fn output_spike(&mut self, _time: Time, _state: &State) {
        self.pending = None;
        self.rising = false;
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(recorder: &mut LocalMaxima, potentials: &[f64]) {
        for (i, &v) in potentials.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let t = Time::msec(i as f64);
            recorder.step(t, &State::at_potential(v), &AuxiliaryState::default());
        }
    }

    #[test]
    fn finds_peaks() {
        let mut recorder = LocalMaxima::default();
        feed(&mut recorder, &[0.0, 0.01, 0.02, 0.015, 0.015, 0.03, 0.01]);

        let peaks: Vec<f64> = recorder.maxima().iter().map(|(_, s)| s.v).collect();
        assert_eq!(peaks, vec![0.02, 0.03]);
        assert_eq!(recorder.v_max(), 0.03);
        assert_eq!(recorder.global_max().map(|(t, _)| t), Some(Time::msec(5.0)));
        assert_eq!(recorder.last_state().map(|(_, s)| s.v), Some(0.01));
    }

    #[test]
    fn ignores_spike_peaks() {
        let mut recorder = LocalMaxima::default();
        let aux = AuxiliaryState::default();
        feed(&mut recorder, &[0.0, 0.01, 0.02]);

        recorder.step(Time::msec(3.0), &State::at_potential(0.09), &aux);
        recorder.output_spike(Time::msec(3.0), &State::at_potential(-0.01));
        recorder.step(Time::msec(3.0), &State::at_potential(-0.01), &aux);
        recorder.step(Time::msec(4.0), &State::at_potential(-0.005), &aux);

        assert!(recorder.maxima().is_empty());
        assert_eq!(recorder.v_max(), 0.02);
    }

    #[test]
    fn rising_tail_counts_toward_global_max() {
        let mut recorder = LocalMaxima::default();
        feed(&mut recorder, &[0.0, 0.01, 0.02]);

        assert!(recorder.maxima().is_empty());
        assert_eq!(recorder.v_max(), 0.02);

        recorder.reset();
        assert_eq!(recorder.v_max(), f64::NEG_INFINITY);
    }
}
