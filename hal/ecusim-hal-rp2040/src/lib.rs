//! RP2040 hardware bindings for the Ecusim signal simulator
//!
//! Implements the core's output abstraction over embassy-rp GPIO and
//! provides the single owned timer resource the sequencer task paces
//! itself with.

#![no_std]

pub mod outputs;
pub mod timer;

pub use outputs::GpioEdgeOutputs;
pub use timer::EdgeTimer;
