//! Compiled-in board configuration
//!
//! Pin assignments live in `main.rs` next to the peripheral setup; the
//! values here are the behavioral defaults the simulator boots with.

use ecusim_core::config::{OutputConfig, Polarity, SpeedConfig};

/// Pattern preset selected at boot (60-2 crank wheel with one cam lobe)
pub const DEFAULT_PRESET_ID: u8 = 0;

/// Speed limits and ramp rate
pub const SPEED: SpeedConfig = SpeedConfig {
    max_rpm: 10_000,
    ramp_rpm_per_s: 500,
};

/// Output line polarities
pub const OUTPUTS: OutputConfig = OutputConfig {
    crank_polarity: Polarity::ActiveHigh,
    cam_polarity: Polarity::ActiveHigh,
};

/// Poll interval while no edges are pending, microseconds
///
/// Bounds how long a new target RPM can sit unnoticed while the simulated
/// engine is stopped.
pub const SUSPEND_POLL_US: u32 = 10_000;
