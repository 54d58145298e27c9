/// Switches that modify the neuron model for a simulation run.
///
/// All flags are off by default, which selects the full AdExp model with an
/// unclamped spike-initiation term and the exact exponential.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags {
    /// Drops the spike-initiation term and adaptation, yielding a conductance
    /// based integrate-and-fire neuron that spikes at the threshold potential.
    pub simplified: bool,

    /// Never emits output spikes.
    pub disable_spiking: bool,

    /// Clamps the membrane potential inside the spike-initiation exponent to
    /// just below the effective spike potential.
    pub clamp_threshold: bool,

    /// Evaluates the spike-initiation exponent with [`fast_exp`](crate::fast_exp).
    pub fast_exp: bool,

    /// Drops the spike-initiation term while keeping adaptation.
    pub disable_threshold_current: bool,
}

impl Flags {
    #[must_use]
    pub fn with_simplified(mut self) -> Self {
        self.simplified = true;
        self
    }

    #[must_use]
    pub fn with_spiking_disabled(mut self) -> Self {
        self.disable_spiking = true;
        self
    }

    #[must_use]
    pub fn with_clamped_threshold(mut self) -> Self {
        self.clamp_threshold = true;
        self
    }

    #[must_use]
    pub fn with_fast_exp(mut self) -> Self {
        self.fast_exp = true;
        self
    }

    #[must_use]
    pub fn with_threshold_current_disabled(mut self) -> Self {
        self.disable_threshold_current = true;
        self
    }
}
