//! Named pattern presets
//!
//! Common trigger wheel geometries selectable by id over the control
//! interface. Anything not covered here can be built directly from
//! [`ToothPattern::new`] and [`CamPattern::new`].

use super::cam::CamPattern;
use super::crank::ToothPattern;
use crate::config::ConfigError;

/// A named crank/cam geometry
#[derive(Debug, Clone, Copy)]
pub struct PatternPreset {
    /// Preset id used by the `pattern <id>` control command
    pub id: u8,
    /// Human-readable wheel name
    pub name: &'static str,
    /// Teeth per crank revolution (gap included)
    pub teeth_per_revolution: u16,
    /// Missing teeth forming the sync gap
    pub missing_teeth: u16,
    /// Cam toggle offsets in tenths of a degree over the 720° cycle
    pub cam_offsets_x10: &'static [u16],
}

/// Built-in presets
///
/// The cam pulse positions follow the common convention of a single lobe
/// placed so its rising edge resolves which crank revolution is which.
pub const PRESETS: &[PatternPreset] = &[
    PatternPreset {
        id: 0,
        name: "60-2",
        teeth_per_revolution: 60,
        missing_teeth: 2,
        cam_offsets_x10: &[900, 4500],
    },
    PatternPreset {
        id: 1,
        name: "36-1",
        teeth_per_revolution: 36,
        missing_teeth: 1,
        cam_offsets_x10: &[1200, 4800],
    },
    PatternPreset {
        id: 2,
        name: "12-0",
        teeth_per_revolution: 12,
        missing_teeth: 0,
        cam_offsets_x10: &[],
    },
];

/// Look up a preset and build its validated patterns
pub fn preset_by_id(id: u8) -> Result<(ToothPattern, CamPattern), ConfigError> {
    let preset = PRESETS
        .iter()
        .find(|p| p.id == id)
        .ok_or(ConfigError::UnknownPreset)?;
    let tooth = ToothPattern::new(preset.teeth_per_revolution, preset.missing_teeth)?;
    let cam = CamPattern::new(preset.cam_offsets_x10)?;
    Ok((tooth, cam))
}
