//! Edge scheduling
//!
//! Converts the current simulated RPM and pattern position into
//! time-to-next-edge intervals and the edges due at each timer event.

pub mod edge;
pub mod sequencer;

pub use edge::{Channel, Edge, Level};
pub use sequencer::{
    Arm, EdgeSequencer, RunState, SequencerStatus, StepOutcome, TimingAnomaly,
    MAX_ARM_US, MAX_COINCIDENT_EDGES, MIN_ARM_US,
};
