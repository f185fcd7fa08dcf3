//! Edge descriptors emitted by the sequencer
//!
//! An edge is the atomic unit of output: one level change on one channel.
//! The output driver applies it without knowing anything about scheduling.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Channel {
    /// Crankshaft position signal (primary sync reference)
    Crank,
    /// Camshaft position signal (cycle phase reference)
    Cam,
}

impl Channel {
    /// Ordering rank for coincident edges: crank fires first because it is
    /// the primary reference the ECU reads first
    pub fn rank(self) -> u8 {
        match self {
            Channel::Crank => 0,
            Channel::Cam => 1,
        }
    }
}

/// Logical signal level
///
/// `Active` is the pulse level; the physical line polarity is applied by
/// the output driver, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    /// Pulse level (rising edge of the logical signal)
    Active,
    /// Idle level (falling edge of the logical signal)
    Idle,
}

impl Level {
    /// The opposite level
    pub fn opposite(self) -> Self {
        match self {
            Level::Active => Level::Idle,
            Level::Idle => Level::Active,
        }
    }
}

/// A single scheduled level change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Edge {
    /// Which output line
    pub channel: Channel,
    /// Logical level to drive
    pub level: Level,
}

impl Edge {
    /// Create an edge
    pub const fn new(channel: Channel, level: Level) -> Self {
        Self { channel, level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crank_ranks_before_cam() {
        assert!(Channel::Crank.rank() < Channel::Cam.rank());
    }

    #[test]
    fn test_level_opposite() {
        assert_eq!(Level::Active.opposite(), Level::Idle);
        assert_eq!(Level::Idle.opposite(), Level::Active);
    }
}
