use adexp_core::{
    AuxiliaryState, Decision, Dimension, Recorder, Spike, State, Time, WorkingParameters,
};
use approx::assert_relative_eq;

use crate::integrators::{DormandPrince, RungeKutta};

use super::{Flags, Options, Status, simulate};

// --- Test fixtures ---

#[derive(Debug, Default)]
struct Log {
    steps: Vec<(Time, State)>,
    inputs: Vec<Time>,
    outputs: Vec<(Time, State)>,
}

impl Recorder for Log {
    fn step(&mut self, time: Time, state: &State, _aux: &AuxiliaryState) {
        self.steps.push((time, *state));
    }

    fn output_spike(&mut self, time: Time, state: &State) {
        self.outputs.push((time, *state));
    }

    fn input_spike(&mut self, time: Time, _state: &State) {
        self.inputs.push(time);
    }
}

fn abort(_: Time, _: &State, _: &AuxiliaryState, _: &WorkingParameters, _: bool) -> Decision {
    Decision::Abort
}

fn settled(_: Time, _: &State, _: &AuxiliaryState, _: &WorkingParameters, _: bool) -> Decision {
    Decision::MayContinue
}

fn above_spike_potential(params: &WorkingParameters) -> f64 {
    params.e_spike() + 0.01
}

// --- Tests ---

#[test]
fn resting_simplified_neuron_stays_at_rest() {
    let params = WorkingParameters::default();
    let options = Options::default()
        .with_flags(Flags::default().with_simplified())
        .with_end(Time::msec(10.0));
    let mut log = Log::default();

    let solution = simulate(&[], &mut log, &mut (), &mut RungeKutta, &params, &options);

    assert_eq!(solution.status, Status::Complete);
    assert_eq!(solution.time, Time::msec(10.0));
    assert_eq!(solution.state, State::default());
    assert_eq!(solution.output_spikes, 0);
    assert_eq!(solution.steps, log.steps.len() - 1);
    assert!(log.steps.windows(2).all(|w| w[0].0 < w[1].0));
}

#[test]
fn input_spikes_are_recorded_around_their_arrival() {
    let params = WorkingParameters::default();
    let spikes = [Spike::new(Time::msec(1.0), 0.5)];
    let options = Options::default()
        .with_flags(Flags::default().with_spiking_disabled())
        .with_end(Time::msec(2.0));
    let mut log = Log::default();

    simulate(&spikes, &mut log, &mut (), &mut RungeKutta, &params, &options);

    assert_eq!(log.inputs, vec![Time::msec(1.0)]);

    let at_arrival: Vec<_> = log
        .steps
        .iter()
        .filter(|(t, _)| *t == Time::msec(1.0))
        .collect();
    // Integration step, before the spike, after the spike.
    assert_eq!(at_arrival.len(), 3);
    assert_eq!(at_arrival[1].1.l_e, at_arrival[0].1.l_e);
    assert_relative_eq!(at_arrival[2].1.l_e - at_arrival[1].1.l_e, 0.5 * params.w());
}

#[test]
fn abort_stops_after_the_first_step() {
    let params = WorkingParameters::default();
    let options = Options::default().with_end(Time::msec(10.0));

    let solution = simulate(&[], &mut (), &mut abort, &mut RungeKutta, &params, &options);

    assert_eq!(solution.status, Status::Aborted);
    assert_eq!(solution.steps, 1);
    assert_eq!(solution.time, params.t_delta());
}

#[test]
fn settles_only_after_pending_input() {
    let params = WorkingParameters::default();
    let spikes = [Spike::new(Time::msec(5.0), 0.1)];
    let mut log = Log::default();

    let solution = simulate(
        &spikes,
        &mut log,
        &mut settled,
        &mut DormandPrince::default(),
        &params,
        &Options::default(),
    );

    assert_eq!(solution.status, Status::Settled);
    assert_eq!(log.inputs.len(), 1);
    assert!(solution.time > Time::msec(5.0));
}

#[test]
fn forced_output_resets_the_neuron() {
    let params = WorkingParameters::default();
    let spikes = [Spike::force_output(Time::msec(1.0))];
    let options = Options::default().with_end(Time::msec(2.0));
    let mut log = Log::default();

    let solution = simulate(&spikes, &mut log, &mut (), &mut RungeKutta, &params, &options);

    assert_eq!(solution.output_spikes, 1);
    let (t, s) = log.outputs[0];
    assert_eq!(t, Time::msec(1.0));
    assert_eq!(s.v, params.e_reset());
    assert!(s.dv_w > 0.0);
    assert!(log.inputs.is_empty());
}

#[test]
fn fires_when_set_above_spike_potential() {
    let params = WorkingParameters::default();
    let v = above_spike_potential(&params);
    let spikes = [Spike::set_voltage(Time::msec(1.0), v)];
    let mut log = Log::default();

    let options = Options::default().with_end(Time::msec(2.0));
    simulate(&spikes, &mut log, &mut (), &mut RungeKutta, &params, &options);

    assert_eq!(log.outputs.len(), 1);
    assert_eq!(log.outputs[0].0, Time::msec(1.0));

    // The step before the reset is recorded at the spike potential.
    let top = log
        .steps
        .iter()
        .find(|(t, s)| *t == Time::msec(1.0) && s.v == params.e_spike());
    assert!(top.is_some());

    let mut silent = Log::default();
    let options = options.with_flags(Flags::default().with_spiking_disabled());
    simulate(&spikes, &mut silent, &mut (), &mut RungeKutta, &params, &options);

    assert!(silent.outputs.is_empty());
}

#[test]
fn ignores_spikes_before_start() {
    let params = WorkingParameters::default();
    let spikes = [
        Spike::force_output(Time::msec(1.0)),
        Spike::new(Time::msec(3.0), 0.1),
    ];
    let options = Options::default()
        .with_start(Time::msec(2.0))
        .with_end(Time::msec(4.0));
    let mut log = Log::default();

    let solution = simulate(&spikes, &mut log, &mut (), &mut RungeKutta, &params, &options);

    assert_eq!(solution.output_spikes, 0);
    assert_eq!(log.inputs, vec![Time::msec(3.0)]);
    assert_eq!(log.steps[0].0, Time::msec(2.0));
}

#[test]
fn refractory_period_carries_over_from_earlier_spike() {
    let params = WorkingParameters::default().with(Dimension::RefractoryPeriod, 2e-3);
    let spikes = [Spike::set_voltage(
        Time::msec(1.0),
        above_spike_potential(&params),
    )];
    let options = Options::default()
        .with_end(Time::msec(5.0))
        .with_last_output_spike(Time::ZERO);
    let mut log = Log::default();

    let solution = simulate(&spikes, &mut log, &mut (), &mut RungeKutta, &params, &options);

    // The potential is held above the spike potential until the refractory
    // period ends, then the neuron fires.
    assert_eq!(solution.output_spikes, 1);
    assert_eq!(log.outputs[0].0, Time::ZERO + Time::sec(2e-3));
}

#[test]
fn crossing_lies_strictly_inside_the_step() {
    let params = WorkingParameters::default();
    let w = 4.0 * params.estimate_w(1.0) / params.w();
    let spikes = [Spike::new(Time::ZERO, w)];
    let step = Time::msec(0.1);
    let options = Options::default().with_step(step).with_end(Time::msec(20.0));
    let mut log = Log::default();

    simulate(&spikes, &mut log, &mut (), &mut RungeKutta, &params, &options);

    assert!(!log.outputs.is_empty());
    let t_spike = log.outputs[0].0;
    let on_grid = t_spike.raw() % step.raw() == 0;
    assert!(!on_grid, "spike at {t_spike} lies on the step grid");
}
