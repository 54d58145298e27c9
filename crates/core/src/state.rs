use std::ops::{Add, Mul, Sub};

use crate::StepIntegrable;

/// Evolving state of the neuron.
///
/// All components are expressed in working units: the membrane potential is
/// relative to the leak reversal potential and the channel terms are rates
/// (conductance divided by membrane capacitance).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    /// Membrane potential relative to the leak reversal potential [V].
    pub v: f64,

    /// Excitatory channel rate [1/s].
    pub l_e: f64,

    /// Inhibitory channel rate [1/s].
    pub l_i: f64,

    /// Adaptation term expressed as a voltage rate [V/s].
    pub dv_w: f64,
}

impl State {
    /// Number of state components.
    pub const LEN: usize = 4;

    #[must_use]
    pub const fn new(v: f64, l_e: f64, l_i: f64, dv_w: f64) -> Self {
        Self { v, l_e, l_i, dv_w }
    }

    /// A resting state with the given membrane potential.
    #[must_use]
    pub const fn at_potential(v: f64) -> Self {
        Self::new(v, 0.0, 0.0, 0.0)
    }

    /// Returns the components in order `[v, l_e, l_i, dv_w]`.
    #[must_use]
    pub const fn to_array(self) -> [f64; Self::LEN] {
        [self.v, self.l_e, self.l_i, self.dv_w]
    }

    #[must_use]
    pub const fn from_array([v, l_e, l_i, dv_w]: [f64; Self::LEN]) -> Self {
        Self::new(v, l_e, l_i, dv_w)
    }

    /// Returns the squared Euclidean norm.
    #[must_use]
    pub fn squared_norm(&self) -> f64 {
        self.to_array().iter().map(|x| x * x).sum()
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|x| x.is_finite())
    }
}

impl Add for State {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.v + rhs.v,
            self.l_e + rhs.l_e,
            self.l_i + rhs.l_i,
            self.dv_w + rhs.dv_w,
        )
    }
}

impl Sub for State {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.v - rhs.v,
            self.l_e - rhs.l_e,
            self.l_i - rhs.l_i,
            self.dv_w - rhs.dv_w,
        )
    }
}

/// Component-wise product.
impl Mul for State {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.v * rhs.v,
            self.l_e * rhs.l_e,
            self.l_i * rhs.l_i,
            self.dv_w * rhs.dv_w,
        )
    }
}

impl Mul<f64> for State {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.v * rhs, self.l_e * rhs, self.l_i * rhs, self.dv_w * rhs)
    }
}

/// A state is its own derivative type, with time measured in seconds.
impl StepIntegrable<f64> for State {
    type Derivative = State;

    fn step(&self, derivative: State, delta: f64) -> Self {
        *self + derivative * delta
    }
}

/// Per-step contributions to the membrane potential derivative.
///
/// Each term is the rate at which the corresponding current pulls the
/// membrane potential down (a positive value decreases `v`).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuxiliaryState {
    /// Leak term [V/s].
    pub dv_l: f64,

    /// Excitatory synaptic term [V/s].
    pub dv_e: f64,

    /// Inhibitory synaptic term [V/s].
    pub dv_i: f64,

    /// Exponential spike-initiation term [V/s].
    pub dv_th: f64,
}

impl AuxiliaryState {
    #[must_use]
    pub const fn new(dv_l: f64, dv_e: f64, dv_i: f64, dv_th: f64) -> Self {
        Self {
            dv_l,
            dv_e,
            dv_i,
            dv_th,
        }
    }

    /// Sum of all four contributions.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.dv_l + self.dv_e + self.dv_i + self.dv_th
    }
}
