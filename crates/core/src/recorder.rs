use crate::{AuxiliaryState, State, Time};

/// Receives the trajectory of a simulation run.
///
/// Recorders must never fail or block. Variants that grow without bound are
/// bounded by the caller through the run's end time or a spike-count limit.
///
/// `()` discards everything; tuples of recorders forward every call to each
/// member in order, and `&mut R` forwards to `R`.
pub trait Recorder {
    /// Records the state after an integration step or around an event.
    fn step(&mut self, time: Time, state: &State, aux: &AuxiliaryState);

    /// Records an output spike together with the post-reset state.
    fn output_spike(&mut self, time: Time, state: &State);

    /// Records the state right after an input spike was applied.
    fn input_spike(&mut self, _time: Time, _state: &State) {}

    /// Clears everything recorded so far.
    fn reset(&mut self) {}
}

impl Recorder for () {
    fn step(&mut self, _time: Time, _state: &State, _aux: &AuxiliaryState) {}

    fn output_spike(&mut self, _time: Time, _state: &State) {}
}

impl<R: Recorder + ?Sized> Recorder for &mut R {
    fn step(&mut self, time: Time, state: &State, aux: &AuxiliaryState) {
        (**self).step(time, state, aux);
    }

    fn output_spike(&mut self, time: Time, state: &State) {
        (**self).output_spike(time, state);
    }

    fn input_spike(&mut self, time: Time, state: &State) {
        (**self).input_spike(time, state);
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}

macro_rules! impl_recorder_tuple {
    ($($name:ident),+) => {
        impl<$($name: Recorder),+> Recorder for ($($name,)+) {
            #[allow(non_snake_case)]
            fn step(&mut self, time: Time, state: &State, aux: &AuxiliaryState) {
                let ($($name,)+) = self;
                $($name.step(time, state, aux);)+
            }

            #[allow(non_snake_case)]
            fn output_spike(&mut self, time: Time, state: &State) {
                let ($($name,)+) = self;
                $($name.output_spike(time, state);)+
            }

            #[allow(non_snake_case)]
            fn input_spike(&mut self, time: Time, state: &State) {
                let ($($name,)+) = self;
                $($name.input_spike(time, state);)+
            }

            #[allow(non_snake_case)]
            fn reset(&mut self) {
                let ($($name,)+) = self;
                $($name.reset();)+
            }
        }
    };
}

impl_recorder_tuple!(A, B);
impl_recorder_tuple!(A, B, C);
impl_recorder_tuple!(A, B, C, D);
