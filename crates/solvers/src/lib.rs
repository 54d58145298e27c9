//! Integrators and the simulation engine for the AdExp neuron model.
//!
//! # Modules
//!
//! - [`integrators`]: fixed-step Runge–Kutta and adaptive Dormand–Prince
//!   implementations of [`Integrator`]
//! - [`simulation`]: the hybrid continuous/event loop that drives a neuron
//!   through a spike sequence
//!
//! [`Integrator`]: adexp_core::Integrator

pub mod integrators;
pub mod simulation;

mod fast_exp;

pub use fast_exp::fast_exp;
