//! Hybrid continuous/event simulation of a single AdExp neuron.
//!
//! The engine alternates between integrating the neuron's differential
//! equation and applying discrete events: input spikes, threshold crossings
//! that emit output spikes, and the end of refractory periods.
//!
//! # Algorithm
//!
//! 1. Apply every input spike due at the current time, recording the state
//!    before and after each one.
//! 2. Determine the next stopping point: the earliest of the next input
//!    spike, the end of the current refractory period and the end time.
//! 3. Advance toward it with the integrator, retrying rejected attempts.
//! 4. If the potential crossed the spike potential during the step, locate
//!    the crossing by bisection, emit an output spike there, reset the
//!    potential and enter the refractory period. Integration resumes from the
//!    crossing time.
//! 5. Ask the controller whether to continue. Abort stops immediately; a
//!    settled neuron with no pending input stops early.
//!
//! # Example
//!
//! ```ignore
//! use adexp_core::{SingleGroupSpikeData, Time, WorkingParameters};
//! use adexp_solvers::{integrators::DormandPrince, simulation};
//!
//! let params = WorkingParameters::default();
//! let spikes = SingleGroupSpikeData::default().spikes(3.0);
//! let options = simulation::Options::default().with_end(Time::msec(50.0));
//!
//! let solution = simulation::simulate(
//!     &spikes,
//!     &mut (),
//!     &mut (),
//!     &mut DormandPrince::default(),
//!     &params,
//!     &options,
//! );
//! ```

mod crossing;
mod dynamics;
mod flags;
mod options;
mod solution;

pub use dynamics::Dynamics;
pub use flags::Flags;
pub use options::Options;
pub use solution::{Solution, Status};

use adexp_core::{
    Controller, Decision, Integrator, Recorder, Spike, SpikeKind, State, Time, WorkingParameters,
};
use tracing::trace;

/// Width to which threshold crossings are bracketed.
const CROSSING_TOLERANCE: Time = Time::from_raw(Time::UNITS_PER_SEC / 1_000_000_000);

/// Simulates the neuron driven by `spikes` from `options.start` to
/// `options.end`.
///
/// `spikes` must be sorted by time. Spikes before the start time are ignored.
/// The parameters are assumed valid; see [`WorkingParameters::validate`].
///
/// The run always terminates for finite end times. Runs without an end time
/// rely on the controller to settle or abort.
pub fn simulate<R, C, I>(
    spikes: &[Spike],
    recorder: &mut R,
    controller: &mut C,
    integrator: &mut I,
    params: &WorkingParameters,
    options: &Options,
) -> Solution
where
    R: Recorder + ?Sized,
    C: Controller + ?Sized,
    I: Integrator + ?Sized,
{
    let mut run = Run::new(recorder, params, options);
    let mut next_spike = spikes.partition_point(|spike| spike.time < options.start);

    let h = match options.step {
        Some(step) if step > Time::ZERO => step,
        _ => params.t_delta(),
    };

    run.record_step();

    let status = loop {
        while let Some(spike) = spikes.get(next_spike).filter(|spike| spike.time <= run.t) {
            run.apply_input(spike);
            next_spike += 1;
        }

        if run.may_fire() && run.s.v > run.threshold {
            run.fire();
        }

        if run.t >= options.end {
            break Status::Complete;
        }

        let in_refractory = run.in_refractory();
        let mut t_stop = options.end;
        if let Some(spike) = spikes.get(next_spike) {
            t_stop = t_stop.min(spike.time);
        }
        if let Some(end) = run.refractory_end.filter(|_| in_refractory) {
            t_stop = t_stop.min(end);
        }

        let dynamics = run.dynamics;
        let df = |s: &State| dynamics.derivative(s, in_refractory);

        let step = loop {
            let step = integrator.step(run.t, h, t_stop, &run.s, df);
            if step.accepted {
                break step;
            }
            run.rejected += 1;
        };

        run.steps += 1;
        if step.stalled {
            run.stalled += 1;
            trace!(time = %step.time, v = step.state.v, "step forced at minimum size");
        }

        if run.may_fire() && step.state.v > run.threshold {
            let (t, s) = crossing::locate(
                (run.t, &run.s),
                (step.time, step.state),
                run.threshold,
                CROSSING_TOLERANCE,
                df,
            );
            run.t = t;
            run.s = s;
            run.fire();
        } else {
            run.t = step.time;
            run.s = step.state;
            run.record_step();
        }

        let in_refractory = run.in_refractory();
        let aux = run.dynamics.auxiliary(&run.s);
        match controller.decide(run.t, &run.s, &aux, params, in_refractory) {
            Decision::Abort => break Status::Aborted,
            Decision::MayContinue if next_spike >= spikes.len() && !in_refractory => {
                break Status::Settled;
            }
            Decision::Continue | Decision::MayContinue => {}
        }
    };

    Solution {
        status,
        time: run.t,
        state: run.s,
        output_spikes: run.output_spikes,
        steps: run.steps,
        rejected: run.rejected,
        stalled: run.stalled,
    }
}

/// Mutable bookkeeping of a simulation run.
struct Run<'a, R: ?Sized> {
    recorder: &'a mut R,
    dynamics: Dynamics,
    threshold: f64,
    spiking: bool,
    tau_ref: Time,
    t: Time,
    s: State,
    refractory_end: Option<Time>,
    output_spikes: usize,
    steps: usize,
    rejected: usize,
    stalled: usize,
}

impl<'a, R: Recorder + ?Sized> Run<'a, R> {
    fn new(recorder: &'a mut R, params: &WorkingParameters, options: &Options) -> Self {
        let tau_ref = Time::sec(params.tau_ref());
        let refractory_end = options
            .last_output_spike
            .map(|last| last + tau_ref)
            .filter(|end| tau_ref > Time::ZERO && *end > options.start);

        Self {
            recorder,
            dynamics: Dynamics::new(params, options.flags),
            threshold: params.spike_potential(options.flags.simplified),
            spiking: !options.flags.disable_spiking,
            tau_ref,
            t: options.start,
            s: options.initial,
            refractory_end,
            output_spikes: 0,
            steps: 0,
            rejected: 0,
            stalled: 0,
        }
    }

    fn in_refractory(&self) -> bool {
        self.refractory_end.is_some_and(|end| self.t < end)
    }

    fn may_fire(&self) -> bool {
        self.spiking && !self.in_refractory()
    }

    fn record_step(&mut self) {
        let aux = self.dynamics.auxiliary(&self.s);
        self.recorder.step(self.t, &self.s, &aux);
    }

    fn apply_input(&mut self, spike: &Spike) {
        self.record_step();

        if let SpikeKind::ForceOutput = spike.kind {
            self.fire();
            return;
        }

        self.dynamics.apply_input(&mut self.s, spike);
        self.recorder.input_spike(self.t, &self.s);
        self.record_step();
    }

    /// Emits an output spike at the current time and resets the neuron.
    fn fire(&mut self) {
        let top = State {
            v: self.threshold,
            ..self.s
        };
        self.recorder.step(self.t, &top, &self.dynamics.auxiliary(&top));

        self.dynamics.apply_output(&mut self.s);
        self.output_spikes += 1;
        self.recorder.output_spike(self.t, &self.s);
        self.record_step();

        if self.tau_ref > Time::ZERO {
            self.refractory_end = Some(self.t + self.tau_ref);
        }
    }
}

#[cfg(test)]
mod tests;
