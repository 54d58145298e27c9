//! Core types and strategy traits for the AdExp neuron simulator.
//!
//! This crate defines the value types and the seams the simulation engine is
//! built on:
//!
//! - [`Time`]: fixed-point simulation time with saturating arithmetic
//! - [`State`], [`AuxiliaryState`]: the neuron state and per-step derivative
//!   contributions
//! - [`Parameters`], [`WorkingParameters`]: physical parameters and their
//!   normalized, pre-computed form used by the engine
//! - [`Spike`], [`SpikeVec`]: timed input events
//! - [`Range`], [`DiscreteRange`]: parameter axes
//! - [`Integrator`], [`Controller`], [`Recorder`]: strategies plugged into a
//!   simulation run
//! - [`Observer`]: receives events from long-running computations and
//!   optionally returns control actions

mod controller;
mod integrator;
mod observer;
mod parameters;
mod range;
mod recorder;
mod spike;
mod state;
mod step;
mod time;

pub use controller::{Controller, Decision};
pub use integrator::{Integrator, Step};
pub use observer::Observer;
pub use parameters::{Dimension, InvalidParameters, Parameters, WorkingParameters};
pub use range::{DiscreteRange, Range};
pub use recorder::Recorder;
pub use spike::{
    SingleGroupSpikeData, Spike, SpikeKind, SpikeVec, build_input_spikes, extract_spikes_from,
    sort_spikes,
};
pub use state::{AuxiliaryState, State};
pub use step::StepIntegrable;
pub use time::Time;
