//! Camshaft phase pattern
//!
//! The cam turns at half crank speed, so its pattern is described over one
//! full 720° engine cycle. Each offset is a point where the cam line
//! toggles; levels alternate starting with a rising edge, which is why the
//! offset count must be even for the line to sit at idle between cycles.

use heapless::Vec;

use crate::config::ConfigError;
use crate::CYCLE_X10;

/// Maximum cam edges per engine cycle
pub const MAX_CAM_EDGES: usize = 8;

/// Immutable cam phase pattern
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CamPattern {
    offsets_x10: Vec<u16, MAX_CAM_EDGES>,
}

impl CamPattern {
    /// Create a validated cam pattern from edge offsets in tenths of a
    /// degree within the 720° cycle
    ///
    /// # Errors
    /// - `CamOffsetOutOfRange` if an offset is at or beyond 720°
    /// - `CamOffsetsNotSorted` if offsets are not strictly increasing
    /// - `CamEdgeCountOdd` if the count would leave the line active at wrap
    pub fn new(offsets_x10: &[u16]) -> Result<Self, ConfigError> {
        if offsets_x10.len() % 2 != 0 {
            return Err(ConfigError::CamEdgeCountOdd);
        }
        let mut vec = Vec::new();
        let mut prev: Option<u16> = None;
        for &off in offsets_x10 {
            if off as u32 >= CYCLE_X10 {
                return Err(ConfigError::CamOffsetOutOfRange);
            }
            if let Some(p) = prev {
                if off <= p {
                    return Err(ConfigError::CamOffsetsNotSorted);
                }
            }
            prev = Some(off);
            vec.push(off).map_err(|_| ConfigError::TableOverflow)?;
        }
        Ok(Self { offsets_x10: vec })
    }

    /// A cam pattern with no edges (crank-only simulation)
    pub fn none() -> Self {
        Self { offsets_x10: Vec::new() }
    }

    /// Edge offsets in tenths of a degree
    pub fn offsets_x10(&self) -> &[u16] {
        &self.offsets_x10
    }

    /// Number of cam edges per engine cycle
    pub fn edge_count(&self) -> usize {
        self.offsets_x10.len()
    }
}
