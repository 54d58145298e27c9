use adexp_core::{Dimension, DiscreteRange, SingleGroupSpikeData, WorkingParameters};
use adexp_explore::{
    evaluation::{Evaluation, FractionalSpikeCount, SingleGroupEvaluation, SpikeCountEvaluation},
    exploration::{Action, Error, Event, explore, explore_unobserved},
};
use tracing_subscriber::EnvFilter;

// --- Test fixtures ---

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Bit-exact equality that treats NaN sentinels as equal.
fn same(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
}

// --- Tests ---

#[test]
fn single_cell_matches_direct_evaluation() {
    init_tracing();
    let evaluation = SingleGroupEvaluation::default();
    let base = WorkingParameters::default();
    let x = (Dimension::LeakRate, DiscreteRange::new(40.0, 60.0, 1));
    let y = (Dimension::Weight, DiscreteRange::new(25.0, 35.0, 1));

    let memory = explore_unobserved(&evaluation, &base, x, y).expect("not cancelled");

    let params = base.with(Dimension::LeakRate, 40.0).with(Dimension::Weight, 25.0);
    let direct = evaluation.evaluate(&params);
    assert_eq!(memory.resolution(), (1, 1));
    assert!(same(memory.get(0, 0), &direct), "{:?} vs {direct:?}", memory.get(0, 0));
}

#[test]
fn evaluations_are_idempotent() {
    init_tracing();
    let params = WorkingParameters::default().with(Dimension::Weight, 45.0);
    let evaluations: [&dyn Evaluation; 2] = [
        &SingleGroupEvaluation::default(),
        &SpikeCountEvaluation::default(),
    ];

    for evaluation in evaluations {
        let first = evaluation.evaluate(&params);
        let second = evaluation.evaluate(&params);
        assert!(same(&first, &second), "{first:?} vs {second:?}");
    }
}

#[test]
fn parallel_sweep_matches_sequential_evaluation() {
    init_tracing();
    let evaluation = SingleGroupEvaluation::new(SingleGroupSpikeData::default(), true);
    let base = WorkingParameters::default();
    let x = (Dimension::Weight, DiscreteRange::new(10.0, 60.0, 5));
    let y = (Dimension::LeakRate, DiscreteRange::new(-20.0, 80.0, 4));

    let memory = explore_unobserved(&evaluation, &base, x, y).expect("not cancelled");

    for (j, l_l) in y.1.values().enumerate() {
        for (i, w) in x.1.values().enumerate() {
            let params = base.with(x.0, w).with(y.0, l_l);
            let expected = if params.is_valid() {
                evaluation.evaluate(&params)
            } else {
                evaluation.descriptor().default_result()
            };
            assert!(same(memory.get(i, j), &expected), "cell ({i}, {j})");
        }
    }

    let soft = memory.metric_range(SingleGroupEvaluation::SOFT);
    assert!(soft.min >= 0.0 && soft.max <= 1.0);
}

#[test]
fn cancelled_sweep_reports_completed_rows() {
    init_tracing();
    let evaluation = SingleGroupEvaluation::default();
    let x = (Dimension::Weight, DiscreteRange::new(10.0, 60.0, 3));
    let y = (Dimension::LeakRate, DiscreteRange::new(20.0, 80.0, 3));

    let result = explore(
        &evaluation,
        &WorkingParameters::default(),
        x,
        y,
        |event: &Event| (event.progress > 0.5).then_some(Action::Cancel),
    );

    assert!(matches!(
        result,
        Err(Error::Cancelled {
            completed_rows: 2,
            rows: 3
        })
    ));
}

#[test]
fn fractional_count_increases_with_weight() {
    init_tracing();
    let spike_data = SingleGroupSpikeData::default();
    let analysis = FractionalSpikeCount::default();
    let params = WorkingParameters::default().with(Dimension::SpikeAdaptation, 0.0);

    let counts: Vec<f64> = [0.2, 0.6, 1.0, 1.6, 2.5]
        .into_iter()
        .map(|scale| {
            let params = params.with(Dimension::Weight, params.w() * scale);
            analysis.calculate(&spike_data.spikes(spike_data.n), &params).frac()
        })
        .collect();

    for pair in counts.windows(2) {
        assert!(pair[1] >= pair[0] - 1e-3, "{counts:?}");
    }
    assert!(counts[0] < 1.0, "{counts:?}");
    assert!(counts[4] > counts[0], "{counts:?}");
}
