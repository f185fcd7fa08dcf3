//! Simulator configuration types
//!
//! Board-agnostic configuration for the signal generator. All validation
//! happens at construction time; a simulator never starts with an invalid
//! geometry.

pub mod types;

pub use types::*;
