//! Edge pacing timer
//!
//! A single owned deadline resource over the embassy time driver. Arming
//! pushes the deadline forward by the computed interval rather than
//! re-reading the clock, so interrupt latency and executor jitter never
//! accumulate into phase drift. Re-arming the same deadline is also what
//! guarantees at most one in-flight scheduling step.

use embassy_time::{Duration, Instant, Timer};

/// Deadline-based timer for the edge sequencer
pub struct EdgeTimer {
    deadline: Instant,
}

impl EdgeTimer {
    /// Create a timer whose deadline starts at "now"
    pub fn new() -> Self {
        Self {
            deadline: Instant::now(),
        }
    }

    /// Re-base the deadline to the current instant
    ///
    /// Must be called when resuming from a suspension, otherwise the stale
    /// deadline would replay the suspended period as a burst of edges.
    pub fn restart(&mut self) {
        self.deadline = Instant::now();
    }

    /// Push the deadline forward by an interval in microseconds
    pub fn arm_us(&mut self, interval_us: u32) {
        self.deadline += Duration::from_micros(interval_us as u64);
    }

    /// Wait until the armed deadline
    pub async fn wait(&self) {
        Timer::at(self.deadline).await;
    }
}

impl Default for EdgeTimer {
    fn default() -> Self {
        Self::new()
    }
}
