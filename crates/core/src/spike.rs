use crate::Time;

/// What happens when a spike is delivered to the neuron.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpikeKind {
    /// A synaptic input; its weight scales the synapse weight parameter.
    #[default]
    Synaptic,

    /// Forces an output spike at the spike's time.
    ForceOutput,

    /// Overwrites the membrane potential (relative to the leak potential).
    SetVoltage(f64),
}

/// A timed event delivered to the neuron.
///
/// Synaptic spikes with positive weight are excitatory, negative weights are
/// inhibitory. Control spikes ([`SpikeKind::ForceOutput`],
/// [`SpikeKind::SetVoltage`]) ignore the weight.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spike {
    pub time: Time,
    pub weight: f64,
    pub kind: SpikeKind,
}

/// An ordered (non-decreasing in time) sequence of spikes.
pub type SpikeVec = Vec<Spike>;

impl Spike {
    /// Creates a synaptic input spike.
    #[must_use]
    pub const fn new(time: Time, weight: f64) -> Self {
        Self {
            time,
            weight,
            kind: SpikeKind::Synaptic,
        }
    }

    /// Creates a control spike that forces an output spike.
    #[must_use]
    pub const fn force_output(time: Time) -> Self {
        Self {
            time,
            weight: 0.0,
            kind: SpikeKind::ForceOutput,
        }
    }

    /// Creates a control spike that sets the membrane potential to `v`.
    #[must_use]
    pub const fn set_voltage(time: Time, v: f64) -> Self {
        Self {
            time,
            weight: 0.0,
            kind: SpikeKind::SetVoltage(v),
        }
    }

    /// Returns `true` for control spikes.
    #[must_use]
    pub const fn is_control(&self) -> bool {
        !matches!(self.kind, SpikeKind::Synaptic)
    }
}

/// Builds a burst of `ceil(xi)` equally spaced spikes.
///
/// Spike `i` arrives at `t0 + interval * i` with weight
/// `min(1, xi - i) * weight`, so a fractional `xi` yields a weaker last
/// spike. Non-positive `xi` yields no spikes.
#[must_use]
pub fn build_input_spikes(xi: f64, interval: Time, t0: Time, weight: f64) -> SpikeVec {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = xi.max(0.0).ceil() as usize;
    (0..count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let fraction = (xi - i as f64).min(1.0);
            #[allow(clippy::cast_possible_wrap)]
            let offset = Time::from_raw(interval.raw().saturating_mul(i as i64));
            Spike::new(t0 + offset, fraction * weight)
        })
        .collect()
}

/// Returns the spikes strictly later than `t`, shifted so that `t` becomes
/// the new origin.
#[must_use]
pub fn extract_spikes_from(spikes: &[Spike], t: Time) -> SpikeVec {
    spikes
        .iter()
        .filter(|spike| spike.time > t)
        .map(|spike| Spike {
            time: spike.time - t,
            ..*spike
        })
        .collect()
}

/// Sorts spikes by time, keeping the relative order of simultaneous spikes.
pub fn sort_spikes(spikes: &mut [Spike]) {
    spikes.sort_by_key(|spike| spike.time);
}

/// Input description for a single group of synchronous input spikes.
///
/// A neuron is expected to respond with `n_out` output spikes to `n` input
/// spikes and stay silent for `n_m1` input spikes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SingleGroupSpikeData {
    /// Number of input spikes that should trigger output.
    pub n: f64,
    /// Number of input spikes that should not trigger output.
    pub n_m1: f64,
    /// Weight of each input spike.
    pub n_patch: f64,
    /// Expected number of output spikes for `n` input spikes.
    pub n_out: usize,
    /// Interval between input spikes.
    pub delta_t: Time,
    /// Simulated duration.
    pub t: Time,
}

impl Default for SingleGroupSpikeData {
    fn default() -> Self {
        Self {
            n: 3.0,
            n_m1: 2.0,
            n_patch: 1.0,
            n_out: 1,
            delta_t: Time::msec(1.0),
            t: Time::msec(33.0),
        }
    }
}

impl SingleGroupSpikeData {
    /// Builds the input burst for `n` spikes starting at time zero.
    #[must_use]
    pub fn spikes(&self, n: f64) -> SpikeVec {
        build_input_spikes(n, self.delta_t, Time::ZERO, self.n_patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn builds_fractional_bursts() {
        let spikes = build_input_spikes(2.5, Time::msec(1.0), Time::msec(10.0), 2.0);

        assert_eq!(spikes.len(), 3);
        assert_eq!(spikes[0].time, Time::msec(10.0));
        assert_eq!(spikes[2].time, Time::msec(10.0) + Time::msec(1.0) + Time::msec(1.0));
        assert_relative_eq!(spikes[0].weight, 2.0);
        assert_relative_eq!(spikes[1].weight, 2.0);
        assert_relative_eq!(spikes[2].weight, 1.0);
        assert!(spikes.iter().all(|s| s.kind == SpikeKind::Synaptic));
    }

    #[test]
    fn empty_burst_for_non_positive_counts() {
        assert!(build_input_spikes(0.0, Time::msec(1.0), Time::ZERO, 1.0).is_empty());
        assert!(build_input_spikes(-3.0, Time::msec(1.0), Time::ZERO, 1.0).is_empty());
    }

    #[test]
    fn extracts_and_shifts_later_spikes() {
        let spikes = vec![
            Spike::new(Time::msec(1.0), 1.0),
            Spike::new(Time::msec(2.0), -1.0),
            Spike::set_voltage(Time::msec(3.0), 0.01),
        ];

        let later = extract_spikes_from(&spikes, Time::msec(2.0));

        assert_eq!(later.len(), 1);
        assert_eq!(later[0].time, Time::msec(3.0) - Time::msec(2.0));
        assert_eq!(later[0].kind, SpikeKind::SetVoltage(0.01));
    }

    #[test]
    fn sorting_is_stable() {
        let mut spikes = vec![
            Spike::new(Time::msec(2.0), 1.0),
            Spike::force_output(Time::msec(1.0)),
            Spike::new(Time::msec(1.0), 0.5),
        ];

        sort_spikes(&mut spikes);

        assert_eq!(spikes[0].kind, SpikeKind::ForceOutput);
        assert_relative_eq!(spikes[1].weight, 0.5);
        assert!(spikes[0].is_control());
        assert!(!spikes[1].is_control());
    }

    #[test]
    fn single_group_defaults() {
        let data = SingleGroupSpikeData::default();

        let n = data.spikes(data.n);
        let n_m1 = data.spikes(data.n_m1);

        assert_eq!(n.len(), 3);
        assert_eq!(n_m1.len(), 2);
        assert_eq!(n[1].time, Time::msec(1.0));
        assert_eq!(data.t, Time::msec(33.0));
    }
}
