//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default upper bound for the target RPM range
pub const DEFAULT_MAX_RPM: u16 = 10_000;

/// Default ramp rate in RPM per second
pub const DEFAULT_RAMP_RPM_PER_S: u16 = 500;

/// Errors detected while constructing a simulator configuration
///
/// All of these are fatal: an invalid geometry refuses to start rather
/// than emitting a pulse train the ECU under test could misread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Fewer than two teeth per revolution
    TooFewTeeth,
    /// More teeth than the edge table can hold
    TooManyTeeth,
    /// Missing-tooth gap covers the whole wheel
    GapTooWide,
    /// Cam offset at or beyond the 720° cycle
    CamOffsetOutOfRange,
    /// Cam offsets not strictly increasing
    CamOffsetsNotSorted,
    /// Cam offset count is odd; the line could not return to idle
    CamEdgeCountOdd,
    /// Combined crank + cam edges exceed the table capacity
    TableOverflow,
    /// Requested pattern preset id does not exist
    UnknownPreset,
}

/// Output line polarity
///
/// Whether a logical "pulse active" level drives the physical line high
/// or low. Configured per channel; some ECU inputs expect open-collector
/// style active-low signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Polarity {
    /// Pulse drives the line high, idle is low
    #[default]
    ActiveHigh,
    /// Pulse drives the line low, idle is high
    ActiveLow,
}

impl Polarity {
    /// Map a logical "active" flag to the physical line level
    pub fn physical(self, active: bool) -> bool {
        match self {
            Polarity::ActiveHigh => active,
            Polarity::ActiveLow => !active,
        }
    }
}

/// Speed-related configuration for the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeedConfig {
    /// Maximum accepted target RPM; requests above this are clamped
    pub max_rpm: u16,
    /// Ramp rate toward the target in RPM per second
    pub ramp_rpm_per_s: u16,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            max_rpm: DEFAULT_MAX_RPM,
            ramp_rpm_per_s: DEFAULT_RAMP_RPM_PER_S,
        }
    }
}

/// Per-channel output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputConfig {
    /// Crank output polarity
    pub crank_polarity: Polarity,
    /// Cam output polarity
    pub cam_polarity: Polarity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_mapping() {
        assert!(Polarity::ActiveHigh.physical(true));
        assert!(!Polarity::ActiveHigh.physical(false));
        assert!(!Polarity::ActiveLow.physical(true));
        assert!(Polarity::ActiveLow.physical(false));
    }

    #[test]
    fn test_speed_defaults() {
        let cfg = SpeedConfig::default();
        assert_eq!(cfg.max_rpm, DEFAULT_MAX_RPM);
        assert_eq!(cfg.ramp_rpm_per_s, DEFAULT_RAMP_RPM_PER_S);
    }
}
