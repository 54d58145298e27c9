//! Numerical integrators for the neuron state.
//!
//! # Integrators
//!
//! - [`RungeKutta`]: classic fixed-step fourth-order Runge–Kutta
//! - [`DormandPrince`]: adaptive fifth-order Dormand–Prince with embedded
//!   fourth-order error estimate
//!
//! Both implement [`adexp_core::Integrator`] and may be plugged into
//! [`simulate`](crate::simulation::simulate).

pub mod dormand_prince;
mod runge_kutta;

pub use dormand_prince::DormandPrince;
pub use runge_kutta::{RungeKutta, rk4_step};
