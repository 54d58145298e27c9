use adexp_core::{AuxiliaryState, Recorder, State, Time};

/// Keeps the most recent sample.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LastState {
    last: Option<(Time, State, AuxiliaryState)>,
}

impl LastState {
    #[must_use]
    pub fn time(&self) -> Option<Time> {
        self.last.map(|(t, _, _)| t)
    }

    /// The most recent state, or the resting state if nothing was recorded.
    #[must_use]
    pub fn state(&self) -> State {
        self.last.map(|(_, s, _)| s).unwrap_or_default()
    }

    #[must_use]
    pub fn aux(&self) -> Option<AuxiliaryState> {
        self.last.map(|(_, _, aux)| aux)
    }
}

impl Recorder for LastState {
    fn step(&mut self, time: Time, state: &State, aux: &AuxiliaryState) {
        self.last = Some((time, *state, *aux));
    }

    fn output_spike(&mut self, _time: Time, _state: &State) {}

    fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_latest_sample() {
        let mut recorder = LastState::default();
        assert_eq!(recorder.time(), None);
        assert_eq!(recorder.state(), State::default());

        let aux = AuxiliaryState::default();
        recorder.step(Time::msec(1.0), &State::at_potential(0.01), &aux);
        recorder.step(Time::msec(2.0), &State::at_potential(0.02), &aux);

        assert_eq!(recorder.time(), Some(Time::msec(2.0)));
        assert_eq!(recorder.state().v, 0.02);

        recorder.reset();
        assert_eq!(recorder.aux(), None);
    }
}
