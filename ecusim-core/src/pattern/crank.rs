//! Crank tooth wheel description
//!
//! A crank wheel is a ring of evenly spaced teeth with one contiguous
//! missing-tooth region. The gap is the once-per-revolution synchronization
//! marker: the ECU recognizes the widened interval between pulses, so the
//! simulator emits nothing there and simply waits longer.

use crate::config::ConfigError;
use crate::REVOLUTION_X10;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum teeth per revolution the edge table can hold
pub const MAX_TEETH: usize = 60;

/// Immutable crank wheel geometry
///
/// The gap sits at the end of the revolution: tooth indices
/// `teeth_per_revolution - missing_teeth ..` are the missing ones, so a
/// "60-2" wheel has real teeth 0..57 and the gap where teeth 58 and 59
/// would be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ToothPattern {
    teeth_per_revolution: u16,
    missing_teeth: u16,
}

impl ToothPattern {
    /// Create a validated tooth pattern
    ///
    /// # Errors
    /// - `TooFewTeeth` if fewer than 2 teeth
    /// - `TooManyTeeth` if more than [`MAX_TEETH`] or 360° does not divide
    ///   evenly across the teeth
    /// - `GapTooWide` if the gap covers the whole wheel
    pub fn new(teeth_per_revolution: u16, missing_teeth: u16) -> Result<Self, ConfigError> {
        if teeth_per_revolution < 2 {
            return Err(ConfigError::TooFewTeeth);
        }
        if teeth_per_revolution as usize > MAX_TEETH
            || REVOLUTION_X10 % teeth_per_revolution as u32 != 0
        {
            return Err(ConfigError::TooManyTeeth);
        }
        if missing_teeth >= teeth_per_revolution {
            return Err(ConfigError::GapTooWide);
        }
        Ok(Self {
            teeth_per_revolution,
            missing_teeth,
        })
    }

    /// Total tooth positions per revolution (gap included)
    pub fn teeth_per_revolution(&self) -> u16 {
        self.teeth_per_revolution
    }

    /// Number of missing teeth forming the sync gap
    pub fn missing_teeth(&self) -> u16 {
        self.missing_teeth
    }

    /// Number of physical teeth that actually emit pulses
    pub fn physical_teeth(&self) -> u16 {
        self.teeth_per_revolution - self.missing_teeth
    }

    /// Angular pitch of one tooth in tenths of a degree
    pub fn degrees_per_tooth_x10(&self) -> u32 {
        REVOLUTION_X10 / self.teeth_per_revolution as u32
    }

    /// Whether a tooth index falls inside the missing-tooth gap
    pub fn is_in_gap(&self, tooth_index: u16) -> bool {
        tooth_index >= self.physical_teeth() && tooth_index < self.teeth_per_revolution
    }

    /// Angular position of the rising edge for a tooth index, in tenths
    /// of a degree within one revolution
    ///
    /// Indices inside the gap report the position of the next real edge
    /// (tooth 0 of the following revolution), which is what makes the gap
    /// interval larger than a normal tooth interval.
    pub fn degrees_at_x10(&self, tooth_index: u16) -> u32 {
        if self.is_in_gap(tooth_index) {
            REVOLUTION_X10
        } else {
            tooth_index as u32 * self.degrees_per_tooth_x10()
        }
    }

    /// The gap interval expressed as a multiple of the normal tooth interval
    ///
    /// Two missing teeth make the silent stretch from the last real tooth
    /// to the next real one span three tooth pitches.
    pub fn gap_multiple(&self) -> u16 {
        self.missing_teeth + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sixty_minus_two() {
        let wheel = ToothPattern::new(60, 2).unwrap();
        assert_eq!(wheel.physical_teeth(), 58);
        assert_eq!(wheel.degrees_per_tooth_x10(), 60);
        assert_eq!(wheel.gap_multiple(), 3);
        assert!(!wheel.is_in_gap(57));
        assert!(wheel.is_in_gap(58));
        assert!(wheel.is_in_gap(59));
    }

    #[test]
    fn test_degrees_at() {
        let wheel = ToothPattern::new(36, 1).unwrap();
        assert_eq!(wheel.degrees_at_x10(0), 0);
        assert_eq!(wheel.degrees_at_x10(1), 100);
        assert_eq!(wheel.degrees_at_x10(34), 3400);
        // Gap index reports the next real edge position
        assert_eq!(wheel.degrees_at_x10(35), REVOLUTION_X10);
    }

    #[test]
    fn test_validation() {
        assert_eq!(ToothPattern::new(1, 0), Err(ConfigError::TooFewTeeth));
        assert_eq!(ToothPattern::new(61, 0), Err(ConfigError::TooManyTeeth));
        // 7 teeth do not divide 360° evenly
        assert_eq!(ToothPattern::new(7, 0), Err(ConfigError::TooManyTeeth));
        assert_eq!(ToothPattern::new(12, 12), Err(ConfigError::GapTooWide));
        assert!(ToothPattern::new(12, 0).is_ok());
    }

    /// Tooth counts in 2..=60 that divide 360.0° evenly
    const VALID_TEETH: [u16; 22] = [
        2, 3, 4, 5, 6, 8, 9, 10, 12, 15, 16, 18, 20, 24, 25, 30, 36, 40, 45, 48, 50, 60,
    ];

    /// Strategy over valid wheel geometries: a tooth count that divides
    /// the revolution evenly, paired with a gap narrower than the wheel
    fn wheel_geometry() -> impl Strategy<Value = (u16, u16)> {
        (0..VALID_TEETH.len()).prop_flat_map(|i| {
            let teeth = VALID_TEETH[i];
            (Just(teeth), 0..teeth)
        })
    }

    proptest! {
        /// Tooth-to-tooth deltas (gap included) always sum to exactly 360°
        #[test]
        fn prop_deltas_sum_to_full_revolution((teeth, missing) in wheel_geometry()) {
            let wheel = ToothPattern::new(teeth, missing).unwrap();

            // Positions of all real tooth edges within one revolution
            let positions: std::vec::Vec<u32> = (0..teeth)
                .filter(|&i| !wheel.is_in_gap(i))
                .map(|i| wheel.degrees_at_x10(i))
                .collect();

            let mut sum = 0u32;
            for pair in positions.windows(2) {
                sum += pair[1] - pair[0];
            }
            // Delta from the last real tooth across the gap back to tooth 0
            sum += REVOLUTION_X10 - positions[positions.len() - 1];
            prop_assert_eq!(sum, REVOLUTION_X10);

            // The gap delta is the configured multiple of the tooth pitch
            let gap = REVOLUTION_X10 - positions[positions.len() - 1];
            prop_assert_eq!(gap, wheel.gap_multiple() as u32 * wheel.degrees_per_tooth_x10());
        }
    }
}
