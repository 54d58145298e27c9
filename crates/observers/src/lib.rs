//! Reusable controllers and recorders for AdExp simulations.
//!
//! This crate provides [`Controller`] and [`Recorder`] implementations that
//! plug into [`adexp_solvers::simulation::simulate`] or any other engine built
//! on the `adexp-core` strategy traits.
//!
//! # Modules
//!
//! - [`controllers`]: decide when a run may stop early
//!   ([`NullController`], [`SettleController`], [`MaxValueController`],
//!   [`SpikeCountLimiter`])
//! - [`recorders`]: capture states and spikes
//!   ([`LastState`], [`Trajectory`], [`OutputSpikes`], [`SpikeCounter`],
//!   [`LocalMaxima`])
//!
//! [`Controller`]: adexp_core::Controller
//! [`Recorder`]: adexp_core::Recorder
//! [`adexp_solvers::simulation::simulate`]: https://docs.rs/adexp-solvers
//! [`NullController`]: controllers::NullController
//! [`SettleController`]: controllers::SettleController
//! [`MaxValueController`]: controllers::MaxValueController
//! [`SpikeCountLimiter`]: controllers::SpikeCountLimiter
//! [`LastState`]: recorders::LastState
//! [`Trajectory`]: recorders::Trajectory
//! [`OutputSpikes`]: recorders::OutputSpikes
//! [`SpikeCounter`]: recorders::SpikeCounter
//! [`LocalMaxima`]: recorders::LocalMaxima

pub mod controllers;
pub mod recorders;
