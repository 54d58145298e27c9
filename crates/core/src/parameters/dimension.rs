use std::fmt;

/// One axis of the working parameter space.
///
/// The discriminant is the component's index in [`WorkingParameters`], which
/// also fixes the order of [`Dimension::ALL`].
///
/// [`WorkingParameters`]: super::WorkingParameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
    LeakRate = 0,
    ExcitatoryRate = 1,
    InhibitoryRate = 2,
    AdaptationRate = 3,
    RefractoryPeriod = 4,
    ExcitatoryReversal = 5,
    InhibitoryReversal = 6,
    Threshold = 7,
    SpikePotential = 8,
    ResetPotential = 9,
    SlopeFactor = 10,
    SubthresholdAdaptation = 11,
    SpikeAdaptation = 12,
    Weight = 13,
}

/// How a working component relates to its physical counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transform {
    /// Working value is the physical value divided by the membrane capacitance.
    PerCapacitance,
    /// Working value is the reciprocal of a time constant.
    Reciprocal,
    /// Working value is a potential relative to the leak reversal potential.
    RelativeToLeak,
    /// Working and physical values coincide.
    Identity,
}

impl Dimension {
    /// Number of working dimensions.
    pub const COUNT: usize = 14;

    /// All dimensions in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::LeakRate,
        Self::ExcitatoryRate,
        Self::InhibitoryRate,
        Self::AdaptationRate,
        Self::RefractoryPeriod,
        Self::ExcitatoryReversal,
        Self::InhibitoryReversal,
        Self::Threshold,
        Self::SpikePotential,
        Self::ResetPotential,
        Self::SlopeFactor,
        Self::SubthresholdAdaptation,
        Self::SpikeAdaptation,
        Self::Weight,
    ];

    /// Index of this dimension within the working parameter vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Looks up a dimension by index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Looks up a dimension by its short identifier (e.g. `"lE"`).
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dim| dim.id() == id)
    }

    /// Short ASCII identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::LeakRate => "lL",
            Self::ExcitatoryRate => "lE",
            Self::InhibitoryRate => "lI",
            Self::AdaptationRate => "lW",
            Self::RefractoryPeriod => "tauRef",
            Self::ExcitatoryReversal => "eE",
            Self::InhibitoryReversal => "eI",
            Self::Threshold => "eTh",
            Self::SpikePotential => "eSpike",
            Self::ResetPotential => "eReset",
            Self::SlopeFactor => "deltaTh",
            Self::SubthresholdAdaptation => "lA",
            Self::SpikeAdaptation => "lB",
            Self::Weight => "w",
        }
    }

    /// Display name using the customary symbols.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeakRate => "λL",
            Self::ExcitatoryRate => "λE",
            Self::InhibitoryRate => "λI",
            Self::AdaptationRate => "λW",
            Self::RefractoryPeriod => "τRef",
            Self::ExcitatoryReversal => "eE",
            Self::InhibitoryReversal => "eI",
            Self::Threshold => "eTh",
            Self::SpikePotential => "eSpike",
            Self::ResetPotential => "eReset",
            Self::SlopeFactor => "ΔTh",
            Self::SubthresholdAdaptation => "λA",
            Self::SpikeAdaptation => "λB",
            Self::Weight => "w",
        }
    }

    /// SI unit of the working value.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::LeakRate
            | Self::ExcitatoryRate
            | Self::InhibitoryRate
            | Self::AdaptationRate
            | Self::SubthresholdAdaptation
            | Self::Weight => "Hz",
            Self::RefractoryPeriod => "s",
            Self::ExcitatoryReversal
            | Self::InhibitoryReversal
            | Self::Threshold
            | Self::SpikePotential
            | Self::ResetPotential
            | Self::SlopeFactor => "V",
            Self::SpikeAdaptation => "V/s",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::LeakRate => "Membrane leak rate",
            Self::ExcitatoryRate => "Excitatory channel decay rate",
            Self::InhibitoryRate => "Inhibitory channel decay rate",
            Self::AdaptationRate => "Adaptation current decay rate",
            Self::RefractoryPeriod => "Refractory period",
            Self::ExcitatoryReversal => "Excitatory reversal potential",
            Self::InhibitoryReversal => "Inhibitory reversal potential",
            Self::Threshold => "Spike threshold potential",
            Self::SpikePotential => "Spike generation potential",
            Self::ResetPotential => "Reset potential",
            Self::SlopeFactor => "Spike slope factor",
            Self::SubthresholdAdaptation => "Subthreshold adaptation rate",
            Self::SpikeAdaptation => "Spike adaptation increment",
            Self::Weight => "Synapse weight multiplier",
        }
    }

    /// Whether the dimension is naturally explored on a linear scale.
    ///
    /// The channel and adaptation decay rates are reciprocals of time
    /// constants and are better explored logarithmically.
    #[must_use]
    pub const fn is_linear(self) -> bool {
        !matches!(
            self,
            Self::ExcitatoryRate | Self::InhibitoryRate | Self::AdaptationRate
        )
    }

    /// Whether the dimension has any effect in the simplified
    /// (conductance-based integrate-and-fire) model.
    #[must_use]
    pub const fn in_simplified_model(self) -> bool {
        !matches!(
            self,
            Self::AdaptationRate
                | Self::SlopeFactor
                | Self::SubthresholdAdaptation
                | Self::SpikeAdaptation
        )
    }

    const fn transform(self) -> Transform {
        match self {
            Self::LeakRate
            | Self::SubthresholdAdaptation
            | Self::SpikeAdaptation
            | Self::Weight => Transform::PerCapacitance,
            Self::ExcitatoryRate | Self::InhibitoryRate | Self::AdaptationRate => {
                Transform::Reciprocal
            }
            Self::ExcitatoryReversal
            | Self::InhibitoryReversal
            | Self::Threshold
            | Self::SpikePotential
            | Self::ResetPotential => Transform::RelativeToLeak,
            Self::RefractoryPeriod | Self::SlopeFactor => Transform::Identity,
        }
    }

    /// Converts a physical value in SI base units to its working value.
    ///
    /// `c_m` is the membrane capacitance in farads and `e_l` the leak reversal
    /// potential in volts.
    #[must_use]
    pub fn from_physical(self, value: f64, c_m: f64, e_l: f64) -> f64 {
        match self.transform() {
            Transform::PerCapacitance => value / c_m,
            Transform::Reciprocal => 1.0 / value,
            Transform::RelativeToLeak => value - e_l,
            Transform::Identity => value,
        }
    }

    /// Converts a working value back to its physical value in SI base units.
    #[must_use]
    pub fn to_physical(self, value: f64, c_m: f64, e_l: f64) -> f64 {
        match self.transform() {
            Transform::PerCapacitance => value * c_m,
            Transform::Reciprocal => 1.0 / value,
            Transform::RelativeToLeak => value + e_l,
            Transform::Identity => value,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
