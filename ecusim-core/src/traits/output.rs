//! Output signal driver trait
//!
//! The driver is stateless with respect to scheduling: it applies one
//! level change at a time and knows nothing about patterns or timing.
//! Line writes are assumed infallible at this layer; a miswired pin is an
//! integration error, not a runtime condition to recover from.

use crate::scheduler::Edge;

/// Driver for the two sensor output lines
pub trait EdgeOutput {
    /// Apply one level change to the corresponding line
    ///
    /// Channel polarity (active-high vs active-low) is the implementation's
    /// concern; the edge carries only the logical level.
    fn apply(&mut self, edge: Edge);

    /// Drive both lines to their idle level
    ///
    /// Called when the simulated engine stops so the ECU under test sees
    /// clean quiescent inputs rather than a line frozen mid-pulse.
    fn quiesce(&mut self);
}
