//! Simulated engine speed
//!
//! Rate-limited ramping of the simulated RPM toward a target value.

pub mod ramp;

pub use ramp::RpmRamp;
