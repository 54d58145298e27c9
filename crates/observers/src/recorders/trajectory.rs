use adexp_core::{AuxiliaryState, Range, Recorder, State, Time};

/// A single recorded point of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: Time,
    pub state: State,
    pub aux: AuxiliaryState,
}

/// Records the complete trajectory of a run.
///
/// Samples are kept in recording order, which is non-decreasing in time.
/// Events produce several samples at the same time (before and after an
/// input spike, at the spike potential and after the reset of an output
/// spike).
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
    output_spikes: Vec<Time>,
    ranges: [Range; State::LEN],
}

impl Default for Trajectory {
    fn default() -> Self {
        Self {
            samples: Vec::new(),
            output_spikes: Vec::new(),
            ranges: [Range::empty(); State::LEN],
        }
    }
}

impl Trajectory {
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn output_spikes(&self) -> &[Time] {
        &self.output_spikes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Range of each state component, in [`State::to_array`] order.
    #[must_use]
    pub fn ranges(&self) -> &[Range; State::LEN] {
        &self.ranges
    }

    /// Range of the membrane potential.
    #[must_use]
    pub fn v_range(&self) -> Range {
        self.ranges[0]
    }

    /// Linearly interpolates the state at `t`.
    ///
    /// Where several samples share a time, the last one wins. Returns `None`
    /// outside the recorded interval.
    #[must_use]
    pub fn interpolate(&self, t: Time) -> Option<State> {
        let idx = self.samples.partition_point(|s| s.time <= t);
        if idx == 0 {
            return None;
        }

        let a = &self.samples[idx - 1];
        if a.time == t {
            return Some(a.state);
        }

        let b = self.samples.get(idx)?;
        let alpha = (t - a.time).as_sec() / (b.time - a.time).as_sec();
        Some(a.state + (b.state - a.state) * alpha)
    }

    /// Samples with `t0 <= time <= t1`.
    #[must_use]
    pub fn slice(&self, t0: Time, t1: Time) -> &[Sample] {
        let start = self.samples.partition_point(|s| s.time < t0);
        let end = self.samples.partition_point(|s| s.time <= t1);
        self.samples.get(start..end).unwrap_or_default()
    }
}

impl Recorder for Trajectory {
    fn step(&mut self, time: Time, state: &State, aux: &AuxiliaryState) {
        for (range, value) in self.ranges.iter_mut().zip(state.to_array()) {
            range.expand(value);
        }
        self.samples.push(Sample {
            time,
            state: *state,
            aux: *aux,
        });
    }

    fn output_spike(&mut self, time: Time, _state: &State) {
        self.output_spikes.push(time);
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn ramp() -> Trajectory {
        let mut trajectory = Trajectory::default();
        let aux = AuxiliaryState::default();
        for ms in 0..=4 {
            let v = f64::from(ms) * 0.01;
            trajectory.step(Time::msec(f64::from(ms)), &State::new(v, 1.0, 0.0, -v), &aux);
        }
        trajectory
    }

    #[test]
    fn tracks_component_ranges() {
        let trajectory = ramp();

        assert_eq!(trajectory.samples().len(), 5);
        assert_relative_eq!(trajectory.v_range().max, 0.04);
        assert_eq!(trajectory.ranges()[1], Range::new(1.0, 1.0));
        assert_relative_eq!(trajectory.ranges()[3].min, -0.04);
    }

    #[test]
    fn interpolates_between_samples() {
        let trajectory = ramp();

        let s = trajectory.interpolate(Time::msec(1.5)).expect("inside");
        assert_relative_eq!(s.v, 0.015, epsilon = 1e-9);
        assert_relative_eq!(s.l_e, 1.0);

        assert_eq!(
            trajectory.interpolate(Time::msec(4.0)).map(|s| s.v),
            Some(0.04)
        );
        assert!(trajectory.interpolate(Time::msec(4.5)).is_none());
        assert!(trajectory.interpolate(Time::msec(-1.0)).is_none());
    }

    #[test]
    fn slices_by_time() {
        let trajectory = ramp();

        let slice = trajectory.slice(Time::msec(1.0), Time::msec(3.0));
        assert_eq!(slice.len(), 3);
        assert_eq!(slice[0].time, Time::msec(1.0));

        assert!(trajectory.slice(Time::msec(3.5), Time::msec(3.9)).is_empty());
        assert!(trajectory.slice(Time::msec(3.0), Time::msec(1.0)).is_empty());
    }
}
