//! Physical and working neuron parameters.
//!
//! [`Parameters`] holds the AdExp model parameters in physical units using
//! [`uom`] quantities. Simulation works on [`WorkingParameters`], a normalized
//! representation (rates instead of time constants, potentials relative to
//! the leak reversal potential) that also caches the derived scalars the
//! integrator needs.

mod dimension;
mod invalid;
mod working;

pub use dimension::Dimension;
pub use invalid::InvalidParameters;
pub use working::WorkingParameters;

use uom::si::{
    capacitance::{farad, nanofarad},
    electric_current::{ampere, nanoampere},
    electric_potential::{millivolt, volt},
    electrical_conductance::{nanosiemens, siemens},
    f64::{Capacitance, ElectricCurrent, ElectricPotential, ElectricalConductance, Time},
    time::{millisecond, second},
};

/// AdExp model parameters in physical units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameters {
    /// Membrane leak conductance.
    pub g_l: ElectricalConductance,
    /// Excitatory channel time constant.
    pub tau_e: Time,
    /// Inhibitory channel time constant.
    pub tau_i: Time,
    /// Adaptation current time constant.
    pub tau_w: Time,
    /// Refractory period.
    pub tau_ref: Time,
    /// Excitatory reversal potential.
    pub e_e: ElectricPotential,
    /// Inhibitory reversal potential.
    pub e_i: ElectricPotential,
    /// Spike threshold potential.
    pub e_th: ElectricPotential,
    /// Spike generation potential.
    pub e_spike: ElectricPotential,
    /// Reset potential.
    pub e_reset: ElectricPotential,
    /// Spike slope factor.
    pub delta_th: ElectricPotential,
    /// Subthreshold adaptation conductance.
    pub a: ElectricalConductance,
    /// Spike-triggered adaptation current.
    pub b: ElectricCurrent,
    /// Synapse weight (conductance added per unit input spike).
    pub w: ElectricalConductance,
    /// Leak reversal potential.
    pub e_l: ElectricPotential,
    /// Membrane capacitance.
    pub c_m: Capacitance,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g_l: ElectricalConductance::new::<nanosiemens>(50.0),
            tau_e: Time::new::<millisecond>(5.0),
            tau_i: Time::new::<millisecond>(5.0),
            tau_w: Time::new::<millisecond>(144.0),
            tau_ref: Time::new::<millisecond>(0.0),
            e_e: ElectricPotential::new::<millivolt>(0.0),
            e_i: ElectricPotential::new::<millivolt>(-70.0),
            e_th: ElectricPotential::new::<millivolt>(-54.0),
            e_spike: ElectricPotential::new::<millivolt>(20.0),
            e_reset: ElectricPotential::new::<millivolt>(-80.0),
            delta_th: ElectricPotential::new::<millivolt>(2.0),
            a: ElectricalConductance::new::<nanosiemens>(4.0),
            b: ElectricCurrent::new::<nanoampere>(0.0805),
            w: ElectricalConductance::new::<nanosiemens>(30.0),
            e_l: ElectricPotential::new::<millivolt>(-70.0),
            c_m: Capacitance::new::<nanofarad>(1.0),
        }
    }
}

impl Parameters {
    /// Returns the value of each working dimension's physical counterpart in
    /// SI base units, in [`Dimension`] order.
    #[must_use]
    pub fn physical_values(&self) -> [f64; Dimension::COUNT] {
        [
            self.g_l.get::<siemens>(),
            self.tau_e.get::<second>(),
            self.tau_i.get::<second>(),
            self.tau_w.get::<second>(),
            self.tau_ref.get::<second>(),
            self.e_e.get::<volt>(),
            self.e_i.get::<volt>(),
            self.e_th.get::<volt>(),
            self.e_spike.get::<volt>(),
            self.e_reset.get::<volt>(),
            self.delta_th.get::<volt>(),
            self.a.get::<siemens>(),
            self.b.get::<ampere>(),
            self.w.get::<siemens>(),
        ]
    }

    /// Builds parameters from physical values in SI base units.
    ///
    /// `values` is in [`Dimension`] order; `e_l` is in volts and `c_m` in
    /// farads.
    #[must_use]
    pub fn from_physical_values(values: [f64; Dimension::COUNT], e_l: f64, c_m: f64) -> Self {
        let [
            g_l,
            tau_e,
            tau_i,
            tau_w,
            tau_ref,
            e_e,
            e_i,
            e_th,
            e_spike,
            e_reset,
            delta_th,
            a,
            b,
            w,
        ] = values;

        Self {
            g_l: ElectricalConductance::new::<siemens>(g_l),
            tau_e: Time::new::<second>(tau_e),
            tau_i: Time::new::<second>(tau_i),
            tau_w: Time::new::<second>(tau_w),
            tau_ref: Time::new::<second>(tau_ref),
            e_e: ElectricPotential::new::<volt>(e_e),
            e_i: ElectricPotential::new::<volt>(e_i),
            e_th: ElectricPotential::new::<volt>(e_th),
            e_spike: ElectricPotential::new::<volt>(e_spike),
            e_reset: ElectricPotential::new::<volt>(e_reset),
            delta_th: ElectricPotential::new::<volt>(delta_th),
            a: ElectricalConductance::new::<siemens>(a),
            b: ElectricCurrent::new::<ampere>(b),
            w: ElectricalConductance::new::<siemens>(w),
            e_l: ElectricPotential::new::<volt>(e_l),
            c_m: Capacitance::new::<farad>(c_m),
        }
    }

    /// Leak reversal potential in volts.
    #[must_use]
    pub fn e_l_volts(&self) -> f64 {
        self.e_l.get::<volt>()
    }

    /// Membrane capacitance in farads.
    #[must_use]
    pub fn c_m_farads(&self) -> f64 {
        self.c_m.get::<farad>()
    }
}
