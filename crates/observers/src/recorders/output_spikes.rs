use adexp_core::{AuxiliaryState, Recorder, State, Time};

/// Collects output spikes with the state right after each reset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputSpikes {
    spikes: Vec<(Time, State)>,
}

impl OutputSpikes {
    #[must_use]
    pub fn count(&self) -> usize {
        self.spikes.len()
    }

    #[must_use]
    pub fn spikes(&self) -> &[(Time, State)] {
        &self.spikes
    }

    pub fn times(&self) -> impl Iterator<Item = Time> + '_ {
        self.spikes.iter().map(|(t, _)| *t)
    }
}

impl Recorder for OutputSpikes {
    fn step(&mut self, _time: Time, _state: &State, _aux: &AuxiliaryState) {}

    fn output_spike(&mut self, time: Time, state: &State) {
        self.spikes.push((time, *state));
    }

    fn reset(&mut self) {
        self.spikes.clear();
    }
}
