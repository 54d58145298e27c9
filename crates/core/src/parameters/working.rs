use uom::si::{
    capacitance::farad,
    electric_potential::volt,
    f64::{Capacitance, ElectricPotential},
};

use crate::Time;

use super::{Dimension, InvalidParameters, Parameters};

/// Shortest time a spike upstroke from reset to spike potential may take.
/// Bounds the exponent of the spike-initiation term.
const MIN_UPSTROKE: f64 = 0.1e-6;

/// Convergence threshold of the effective spike potential iteration.
const NEWTON_EPS: f64 = 1e-9;

const NEWTON_MAX_ITERS: usize = 100;

/// Distance of the reduced effective spike potential below the effective one.
const SPIKE_EFF_REDUCTION: f64 = 0.1e-3;

/// Bounds of the proposed integration step.
const MIN_STEP: f64 = 0.1e-6;
const STEP_RATE_FRACTION: f64 = 0.1;

/// Normalized AdExp parameters used by the simulation engine.
///
/// The fourteen components (see [`Dimension`]) are rates (reciprocal time
/// constants, or conductances divided by the membrane capacitance) and
/// potentials relative to the leak reversal potential. Derived scalars are
/// computed once at construction, so a `WorkingParameters` value is always
/// consistent; modifying a component through [`WorkingParameters::with`]
/// produces a fresh value.
///
/// Construction never fails. Whether the parameters describe a simulatable
/// neuron is checked separately with [`WorkingParameters::validate`], and the
/// simulation engine assumes callers have done so.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 14]", into = "[f64; 14]")
)]
pub struct WorkingParameters {
    values: [f64; Dimension::COUNT],
    inv_delta_th: f64,
    max_i_th_exponent: f64,
    e_spike_eff: f64,
    e_spike_eff_red: f64,
    t_delta: Time,
    v_min: f64,
    v_max: f64,
}

impl WorkingParameters {
    /// Creates working parameters from raw components in [`Dimension`] order.
    #[must_use]
    pub fn new(values: [f64; Dimension::COUNT]) -> Self {
        let get = |dim: Dimension| values[dim.index()];
        let l_l = get(Dimension::LeakRate);
        let e_th = get(Dimension::Threshold);
        let e_spike = get(Dimension::SpikePotential);
        let e_reset = get(Dimension::ResetPotential);
        let delta_th = get(Dimension::SlopeFactor);

        let e_spike_eff = effective_spike_potential(e_th, delta_th);

        let max_rate = [
            Dimension::LeakRate,
            Dimension::ExcitatoryRate,
            Dimension::InhibitoryRate,
            Dimension::AdaptationRate,
            Dimension::SubthresholdAdaptation,
        ]
        .into_iter()
        .map(get)
        .fold(f64::NEG_INFINITY, f64::max);

        let potentials = [
            0.0,
            get(Dimension::ExcitatoryReversal),
            get(Dimension::InhibitoryReversal),
            e_spike,
            e_th,
            e_reset,
        ];

        Self {
            values,
            inv_delta_th: 1.0 / delta_th,
            max_i_th_exponent: ((e_spike - e_reset) / (MIN_UPSTROKE * delta_th * l_l)).ln(),
            e_spike_eff,
            e_spike_eff_red: e_spike_eff - SPIKE_EFF_REDUCTION,
            t_delta: Time::sec(MIN_STEP.max(STEP_RATE_FRACTION / max_rate)),
            v_min: potentials.into_iter().fold(f64::INFINITY, f64::min),
            v_max: potentials.into_iter().fold(f64::NEG_INFINITY, f64::max),
        }
    }

    /// Converts physical parameters into working parameters.
    #[must_use]
    pub fn from_parameters(params: &Parameters) -> Self {
        let (c_m, e_l) = (params.c_m_farads(), params.e_l_volts());
        let physical = params.physical_values();
        Self::new(std::array::from_fn(|i| {
            Dimension::ALL[i].from_physical(physical[i], c_m, e_l)
        }))
    }

    /// Converts back to physical parameters.
    ///
    /// The working representation does not carry the leak reversal potential
    /// or the membrane capacitance, so both must be supplied.
    #[must_use]
    pub fn to_parameters(&self, e_l: ElectricPotential, c_m: Capacitance) -> Parameters {
        let (e_l, c_m) = (e_l.get::<volt>(), c_m.get::<farad>());
        let physical =
            std::array::from_fn(|i| Dimension::ALL[i].to_physical(self.values[i], c_m, e_l));
        Parameters::from_physical_values(physical, e_l, c_m)
    }

    /// Returns a copy with one component replaced and all derived values
    /// recomputed.
    #[must_use]
    pub fn with(&self, dim: Dimension, value: f64) -> Self {
        let mut values = self.values;
        values[dim.index()] = value;
        Self::new(values)
    }

    /// Returns the raw components in [`Dimension`] order.
    #[must_use]
    pub fn values(&self) -> &[f64; Dimension::COUNT] {
        &self.values
    }

    /// Returns one component.
    #[must_use]
    pub fn get(&self, dim: Dimension) -> f64 {
        self.values[dim.index()]
    }

    /// Checks the validity constraints required before simulation.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), InvalidParameters> {
        if let Some(dim) = Dimension::ALL.into_iter().find(|&d| !self.get(d).is_finite()) {
            return Err(InvalidParameters::NonFinite(dim));
        }

        for dim in [
            Dimension::LeakRate,
            Dimension::ExcitatoryRate,
            Dimension::InhibitoryRate,
            Dimension::AdaptationRate,
            Dimension::SlopeFactor,
        ] {
            if self.get(dim) <= 0.0 {
                return Err(InvalidParameters::NotPositive(dim, self.get(dim)));
            }
        }

        for dim in [
            Dimension::RefractoryPeriod,
            Dimension::SubthresholdAdaptation,
            Dimension::SpikeAdaptation,
        ] {
            if self.get(dim) < 0.0 {
                return Err(InvalidParameters::Negative(dim, self.get(dim)));
            }
        }

        let ordering = [
            (Dimension::ExcitatoryReversal, Dimension::InhibitoryReversal),
            (Dimension::ExcitatoryReversal, Dimension::Threshold),
            (Dimension::SpikePotential, Dimension::Threshold),
        ];
        for (upper, lower) in ordering {
            if self.get(upper) <= self.get(lower) {
                return Err(InvalidParameters::NotAbove { upper, lower });
            }
        }

        for dim in [Dimension::ExcitatoryReversal, Dimension::SpikePotential] {
            if self.get(dim) <= 0.0 {
                return Err(InvalidParameters::NotPositive(dim, self.get(dim)));
            }
        }

        if self.e_reset() > 0.0 {
            return Err(InvalidParameters::ResetAboveLeak(self.e_reset()));
        }

        Ok(())
    }

    /// Returns `true` if [`validate`](Self::validate) succeeds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    #[must_use]
    pub fn l_l(&self) -> f64 {
        self.get(Dimension::LeakRate)
    }

    #[must_use]
    pub fn l_e(&self) -> f64 {
        self.get(Dimension::ExcitatoryRate)
    }

    #[must_use]
    pub fn l_i(&self) -> f64 {
        self.get(Dimension::InhibitoryRate)
    }

    #[must_use]
    pub fn l_w(&self) -> f64 {
        self.get(Dimension::AdaptationRate)
    }

    /// Refractory period in seconds.
    #[must_use]
    pub fn tau_ref(&self) -> f64 {
        self.get(Dimension::RefractoryPeriod)
    }

    #[must_use]
    pub fn e_e(&self) -> f64 {
        self.get(Dimension::ExcitatoryReversal)
    }

    #[must_use]
    pub fn e_i(&self) -> f64 {
        self.get(Dimension::InhibitoryReversal)
    }

    #[must_use]
    pub fn e_th(&self) -> f64 {
        self.get(Dimension::Threshold)
    }

    #[must_use]
    pub fn e_spike(&self) -> f64 {
        self.get(Dimension::SpikePotential)
    }

    #[must_use]
    pub fn e_reset(&self) -> f64 {
        self.get(Dimension::ResetPotential)
    }

    #[must_use]
    pub fn delta_th(&self) -> f64 {
        self.get(Dimension::SlopeFactor)
    }

    #[must_use]
    pub fn l_a(&self) -> f64 {
        self.get(Dimension::SubthresholdAdaptation)
    }

    #[must_use]
    pub fn l_b(&self) -> f64 {
        self.get(Dimension::SpikeAdaptation)
    }

    #[must_use]
    pub fn w(&self) -> f64 {
        self.get(Dimension::Weight)
    }

    /// Reciprocal of the slope factor.
    #[must_use]
    pub fn inv_delta_th(&self) -> f64 {
        self.inv_delta_th
    }

    /// Upper bound for the exponent of the spike-initiation term.
    #[must_use]
    pub fn max_i_th_exponent(&self) -> f64 {
        self.max_i_th_exponent
    }

    /// Potential above which the neuron spikes without further input.
    ///
    /// This is the unstable fixed point of the leak and spike-initiation
    /// terms. The simplified model has no such term and uses the threshold
    /// potential instead.
    #[must_use]
    pub fn e_spike_eff(&self, simplified: bool) -> f64 {
        if simplified { self.e_th() } else { self.e_spike_eff }
    }

    /// Effective spike potential lowered by 0.1 mV, used to clamp the
    /// spike-initiation term.
    #[must_use]
    pub fn e_spike_eff_red(&self) -> f64 {
        self.e_spike_eff_red
    }

    /// Potential at which an output spike is emitted.
    #[must_use]
    pub fn spike_potential(&self, simplified: bool) -> f64 {
        if simplified { self.e_th() } else { self.e_spike() }
    }

    /// Proposed integration step, a tenth of the fastest time constant.
    #[must_use]
    pub fn t_delta(&self) -> Time {
        self.t_delta
    }

    /// Lowest potential among rest, reversal, threshold, spike and reset.
    #[must_use]
    pub fn v_min(&self) -> f64 {
        self.v_min
    }

    /// Highest potential among rest, reversal, threshold, spike and reset.
    #[must_use]
    pub fn v_max(&self) -> f64 {
        self.v_max
    }

    /// Estimates the synapse weight for which `xi` simultaneous input spikes
    /// just reach the effective spike potential.
    ///
    /// The estimate ignores leak and adaptation, so in practice the returned
    /// weight is too small to cause an output spike.
    #[must_use]
    pub fn estimate_w(&self, xi: f64) -> f64 {
        -(1.0 - self.e_spike_eff / self.e_e()).ln() * self.l_e() / xi
    }

    /// Highest potential reachable for an initial excitatory rate `l_e0`,
    /// ignoring leak and adaptation.
    #[must_use]
    pub fn e_extreme(&self, l_e0: f64) -> f64 {
        self.e_e() * (1.0 - (-l_e0 / self.l_e()).exp())
    }
}

impl Default for WorkingParameters {
    fn default() -> Self {
        Self::from_parameters(&Parameters::default())
    }
}

impl From<&Parameters> for WorkingParameters {
    fn from(params: &Parameters) -> Self {
        Self::from_parameters(params)
    }
}

impl From<[f64; Dimension::COUNT]> for WorkingParameters {
    fn from(values: [f64; Dimension::COUNT]) -> Self {
        Self::new(values)
    }
}

impl From<WorkingParameters> for [f64; Dimension::COUNT] {
    fn from(params: WorkingParameters) -> Self {
        params.values
    }
}

/// Solves `ln(delta_th) + (x - e_th) / delta_th = ln(x)` for the root above
/// the threshold with Newton's method.
///
/// Returns `f64::MIN` if no such root exists: a vanishing slope factor, or a
/// threshold at or below the slope factor (the neuron spikes regardless of
/// its potential).
fn effective_spike_potential(e_th: f64, delta_th: f64) -> f64 {
    if !(delta_th >= NEWTON_EPS && e_th > delta_th) {
        return f64::MIN;
    }

    let inv_delta_th = 1.0 / delta_th;
    let ln_delta_th = delta_th.ln();

    let mut x = e_th + NEWTON_EPS;
    for _ in 0..NEWTON_MAX_ITERS {
        let dx = (ln_delta_th + (x - e_th) * inv_delta_th - x.ln()) * (x * delta_th)
            / (x - delta_th);
        x -= dx;
        if dx.abs() < NEWTON_EPS {
            break;
        }
    }
    x
}
