//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod control;
pub mod sequencer;

pub use control::control_task;
pub use sequencer::sequencer_task;
