//! Virtual simulation time as a monotonically increasing tick counter.
//!
//! [`SimTime`] counts whole evaluation ticks. The bench harness advances it
//! by one tick per loop iteration, so dump timestamps are strictly
//! increasing with step size 1.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in virtual simulation time, measured in ticks.
///
/// One tick corresponds to one evaluation step of the bench loop. Ticks
/// map 1:1 onto the `1ns` timescale declared in the waveform output.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize,
)]
pub struct SimTime(u64);

impl SimTime {
    /// Time zero, the start of every run.
    pub const ZERO: Self = Self(0);

    /// Creates a time point from a raw tick count.
    pub fn from_ticks(ticks: u64) -> Self {
        Self(ticks)
    }

    /// Returns the raw tick count.
    pub fn ticks(self) -> u64 {
        self.0
    }

    /// Returns this time advanced by `ticks`.
    pub fn advanced(self, ticks: u64) -> Self {
        Self(self.0 + ticks)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ns", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_time() {
        assert_eq!(SimTime::ZERO.ticks(), 0);
    }

    #[test]
    fn from_ticks_roundtrip() {
        assert_eq!(SimTime::from_ticks(42).ticks(), 42);
    }

    #[test]
    fn advanced_adds() {
        let t = SimTime::from_ticks(10);
        assert_eq!(t.advanced(1), SimTime::from_ticks(11));
        assert_eq!(t.advanced(0), t);
    }

    #[test]
    fn ordering() {
        assert!(SimTime::from_ticks(1) < SimTime::from_ticks(2));
        assert!(SimTime::ZERO < SimTime::from_ticks(1));
    }

    #[test]
    fn display() {
        assert_eq!(SimTime::from_ticks(10).to_string(), "10 ns");
        assert_eq!(SimTime::ZERO.to_string(), "0 ns");
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(SimTime::default(), SimTime::ZERO);
    }

    #[test]
    fn serde_roundtrip() {
        let t = SimTime::from_ticks(12345);
        let json = serde_json::to_string(&t).unwrap();
        let back: SimTime = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }
}
