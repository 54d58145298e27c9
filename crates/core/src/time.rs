use std::{
    fmt,
    ops::{Add, AddAssign, Mul, Sub, SubAssign},
};

/// Simulation time as a fixed-point count of sub-second units.
///
/// Time is stored as an `i64` with [`Time::UNITS_PER_SEC`] units per second
/// (`2^48`, roughly 3.6 fs resolution and a range of about ±9 hours).
/// Integer arithmetic keeps event timestamps exact over long runs, so that
/// comparing a spike time against the integrator clock never suffers from
/// accumulated floating point drift.
///
/// All arithmetic saturates at [`Time::MIN`] and [`Time::MAX`] instead of
/// wrapping. Conversions from non-finite seconds saturate as well
/// (`NaN` maps to zero).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time(i64);

impl Time {
    /// Number of fractional bits.
    pub const SCALE_BITS: u32 = 48;

    /// Number of time units per second.
    pub const UNITS_PER_SEC: i64 = 1 << Self::SCALE_BITS;

    /// The zero time point.
    pub const ZERO: Self = Self(0);

    /// The smallest representable positive duration.
    pub const EPSILON: Self = Self(1);

    /// The largest representable time.
    pub const MAX: Self = Self(i64::MAX);

    /// The smallest representable time.
    pub const MIN: Self = Self(i64::MIN);

    /// Creates a time directly from its raw unit count.
    #[must_use]
    pub const fn from_raw(units: i64) -> Self {
        Self(units)
    }

    /// Creates a time from seconds, rounding to the nearest unit.
    #[must_use]
    pub fn sec(seconds: f64) -> Self {
        // Float-to-int casts saturate and map NaN to zero.
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        Self((seconds * Self::UNITS_PER_SEC as f64).round() as i64)
    }

    /// Creates a time from milliseconds.
    #[must_use]
    pub fn msec(milliseconds: f64) -> Self {
        Self::sec(milliseconds * 1e-3)
    }

    /// Returns the raw unit count.
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Returns the time in seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_sec(self) -> f64 {
        self.0 as f64 / Self::UNITS_PER_SEC as f64
    }

    /// Returns the time in milliseconds.
    #[must_use]
    pub fn as_msec(self) -> f64 {
        self.as_sec() * 1e3
    }

    /// Scales the time by a floating point factor, saturating on overflow.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::sec(self.as_sec() * factor)
    }

    /// Returns `true` if this is exactly [`Time::MAX`].
    #[must_use]
    pub const fn is_max(self) -> bool {
        self.0 == i64::MAX
    }
}

impl Add for Time {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Time {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Time {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Time {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Time {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

/// Renders the time in milliseconds (e.g., `"1.5 ms"`).
impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ms", self.as_msec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn converts_seconds_and_milliseconds() {
        assert_eq!(Time::sec(1.0).raw(), Time::UNITS_PER_SEC);
        assert_eq!(Time::msec(500.0), Time::sec(0.5));
        assert_relative_eq!(Time::msec(33.0).as_msec(), 33.0, max_relative = 1e-12);
        assert_relative_eq!(Time::sec(-2.25).as_sec(), -2.25);
    }

    #[test]
    fn arithmetic_is_exact() {
        let dt = Time::msec(0.1);
        let mut t = Time::ZERO;
        for _ in 0..10_000 {
            t += dt;
        }
        assert_eq!(t.raw(), dt.raw() * 10_000);
        assert_eq!(t - dt * 2.0, Time::from_raw(dt.raw() * 9_998));
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        assert_eq!(Time::MAX + Time::sec(1.0), Time::MAX);
        assert_eq!(Time::MIN - Time::sec(1.0), Time::MIN);
        assert_eq!(Time::sec(1e12), Time::MAX);
        assert_eq!(Time::sec(-1e12), Time::MIN);
        assert_eq!(Time::sec(f64::INFINITY), Time::MAX);
        assert_eq!(Time::sec(f64::NAN), Time::ZERO);
        assert!(Time::MAX.is_max());
    }

    #[test]
    fn orders_and_displays() {
        assert!(Time::msec(1.0) < Time::msec(1.5));
        assert_eq!(Time::msec(2.0).max(Time::msec(3.0)), Time::msec(3.0));
        assert_eq!(Time::from_raw(Time::UNITS_PER_SEC / 2).to_string(), "500 ms");
    }
}
