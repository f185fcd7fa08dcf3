//! Board-agnostic core logic for the Ecusim engine signal simulator
//!
//! This crate contains all simulation logic that does not depend on
//! specific hardware implementations:
//!
//! - Crank tooth wheel and cam phase pattern definitions
//! - Precomputed edge table for one full 720° engine cycle
//! - RPM ramp controller
//! - Edge sequencer (the timer-driven scheduling state machine)
//! - Serial control command grammar
//! - Hardware abstraction trait for the output lines

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod control;
pub mod pattern;
pub mod scheduler;
pub mod speed;
pub mod traits;

/// Tenths of a degree in one crank revolution.
pub const REVOLUTION_X10: u32 = 3600;

/// Tenths of a degree in one full 4-stroke engine cycle (two crank revolutions).
pub const CYCLE_X10: u32 = 7200;
