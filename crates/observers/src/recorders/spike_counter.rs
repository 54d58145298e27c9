use std::{cell::Cell, rc::Rc};

use adexp_core::{AuxiliaryState, Recorder, State, Time};

/// Counts output spikes into a shared cell.
///
/// Clones share the same count, so one clone can record a run while another
/// feeds a [`SpikeCountLimiter`](crate::controllers::SpikeCountLimiter)
/// controlling it.
#[derive(Debug, Clone, Default)]
pub struct SpikeCounter {
    count: Rc<Cell<usize>>,
}

impl SpikeCounter {
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.get()
    }
}

impl Recorder for SpikeCounter {
    fn step(&mut self, _time: Time, _state: &State, _aux: &AuxiliaryState) {}

    fn output_spike(&mut self, _time: Time, _state: &State) {
        self.count.set(self.count.get() + 1);
    }

    fn reset(&mut self) {
        self.count.set(0);
    }
}
