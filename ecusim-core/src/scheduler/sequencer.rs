//! Edge sequencer state machine
//!
//! The sequencer is stepped by the timer event: each step advances the RPM
//! ramp, emits the edges due at the current table position, and returns
//! the interval to arm the timer with for the next event. It is the sole
//! owner and writer of the schedule state; the output driver only ever
//! sees the edges it produced.

use heapless::Vec;

use super::edge::{Channel, Edge, Level};
use crate::config::{ConfigError, SpeedConfig};
use crate::pattern::{CamPattern, EdgeTable, ToothPattern};
use crate::speed::RpmRamp;
use crate::{CYCLE_X10, REVOLUTION_X10};

/// Minimum timer arm interval in microseconds
///
/// A computed interval that rounds to zero is clamped here instead of
/// re-arming at zero delay, which would storm the timer.
pub const MIN_ARM_US: u32 = 2;

/// Maximum timer arm interval in microseconds
///
/// At extremely low speeds the next edge can be minutes away; the interval
/// is capped so the stream keeps moving and the anomaly is reported.
pub const MAX_ARM_US: u32 = 1_000_000;

/// Capacity of one fired edge group: coincident crank + cam edges plus
/// the two-edge quiescing prefix after a geometry change
pub const MAX_COINCIDENT_EDGES: usize = 4;

/// Sequencer run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// Simulated engine stopped; no timer armed
    Stopped,
    /// Edges are being generated
    Running,
}

/// Recovered scheduling irregularities
///
/// Anomalies never stop the pulse stream; they are clamped in place and
/// reported so the bench operator can spot a misconfiguration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingAnomaly {
    /// Interval rounded to zero and was clamped up to [`MIN_ARM_US`]
    IntervalUnderflow,
    /// Interval exceeded [`MAX_ARM_US`] and was clamped down
    IntervalOverflow,
}

/// What the timer should do after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Arm {
    /// Re-arm for this many microseconds
    After(u32),
    /// No edges pending; poll again at the control interval
    Suspend,
}

/// Result of one sequencer step
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Edges due now, crank before cam when coincident
    pub edges: Vec<Edge, MAX_COINCIDENT_EDGES>,
    /// Timer instruction for the next event
    pub next: Arm,
    /// Irregularity recovered during this step, if any
    pub anomaly: Option<TimingAnomaly>,
}

/// Diagnostic snapshot for the control interface
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequencerStatus {
    /// Current run state
    pub state: RunState,
    /// Current simulated speed in tenths of an RPM
    pub current_rpm_x10: u32,
    /// Target speed in tenths of an RPM
    pub target_rpm_x10: u32,
    /// Upcoming tooth index within the current revolution
    pub tooth_index: u16,
    /// Total recovered timing anomalies since boot
    pub anomaly_count: u32,
}

/// Timer-driven crank/cam edge generator
///
/// Owns the schedule state exclusively: the table index of the next edge
/// group, the wrap-aware phase accumulator, and the RPM ramp.
#[derive(Debug)]
pub struct EdgeSequencer {
    tooth: ToothPattern,
    table: EdgeTable,
    ramp: RpmRamp,
    state: RunState,
    /// Table index of the next edge group to fire
    index: usize,
    /// Phase of that group, tenths of a degree within the 720° cycle
    phase_x10: u32,
    /// Division remainder carried between interval computations so
    /// truncation never accumulates into phase drift
    interval_carry: u64,
    /// A geometry change may have left a line mid-pulse; the next fired
    /// group re-asserts idle on both lines first
    quiesce_pending: bool,
    anomaly_count: u32,
}

impl EdgeSequencer {
    /// Create a stopped sequencer for the given geometry
    pub fn new(
        tooth: ToothPattern,
        cam: CamPattern,
        speed: SpeedConfig,
    ) -> Result<Self, ConfigError> {
        let table = EdgeTable::build(&tooth, &cam)?;
        Ok(Self {
            tooth,
            table,
            ramp: RpmRamp::new(speed),
            state: RunState::Stopped,
            index: 0,
            phase_x10: 0,
            interval_carry: 0,
            quiesce_pending: false,
            anomaly_count: 0,
        })
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Set the target speed in tenths of an RPM (clamped to the configured
    /// range)
    pub fn set_target_x10(&mut self, rpm_x10: u32) {
        self.ramp.set_target_x10(rpm_x10);
    }

    /// Replace the simulated geometry
    ///
    /// The pulse train restarts from tooth 0 / phase 0, exactly as a cold
    /// start would. A cold start begins with idle lines, so the first
    /// group fired afterwards re-asserts idle on both channels; a switch
    /// mid-pulse must not leave the old pattern's level latched on a line
    /// the new pattern never touches.
    pub fn set_pattern(&mut self, tooth: ToothPattern, cam: CamPattern) -> Result<(), ConfigError> {
        self.table = EdgeTable::build(&tooth, &cam)?;
        self.tooth = tooth;
        self.rewind();
        self.quiesce_pending = true;
        Ok(())
    }

    /// Diagnostic snapshot
    pub fn status(&self) -> SequencerStatus {
        let pitch = self.tooth.degrees_per_tooth_x10();
        SequencerStatus {
            state: self.state,
            current_rpm_x10: self.ramp.current_x10(),
            target_rpm_x10: self.ramp.target_x10(),
            tooth_index: ((self.phase_x10 % REVOLUTION_X10) / pitch) as u16,
            anomaly_count: self.anomaly_count,
        }
    }

    /// Advance the sequencer by one timer event
    ///
    /// `elapsed_us` is the time since the previous step: the interval the
    /// timer was armed with while running, or the poll interval while
    /// suspended. This is the single place the ramp advances, so there is
    /// no second concurrent time source.
    pub fn step(&mut self, elapsed_us: u32) -> StepOutcome {
        let millirpm = self.ramp.advance(elapsed_us);

        match self.state {
            RunState::Stopped => {
                if millirpm == 0 {
                    return StepOutcome {
                        edges: Vec::new(),
                        next: Arm::Suspend,
                        anomaly: None,
                    };
                }
                // Waking up: the train always starts at tooth 0 / phase 0
                self.state = RunState::Running;
                self.rewind();
                self.fire(millirpm)
            }
            RunState::Running => {
                if millirpm == 0 {
                    // Ramp decayed to zero: quiesce both lines and suspend
                    self.state = RunState::Stopped;
                    self.rewind();
                    self.quiesce_pending = false;
                    let mut edges = Vec::new();
                    let _ = edges.push(Edge::new(Channel::Crank, Level::Idle));
                    let _ = edges.push(Edge::new(Channel::Cam, Level::Idle));
                    return StepOutcome {
                        edges,
                        next: Arm::Suspend,
                        anomaly: None,
                    };
                }
                self.fire(millirpm)
            }
        }
    }

    /// Reset schedule position to the start of the cycle
    fn rewind(&mut self) {
        self.index = 0;
        self.phase_x10 = 0;
        self.interval_carry = 0;
    }

    /// Emit the edge group at the current index and compute the interval
    /// to the following group
    fn fire(&mut self, millirpm: u32) -> StepOutcome {
        let group_phase = self.table.event(self.index).phase_x10;

        let mut edges: Vec<Edge, MAX_COINCIDENT_EDGES> = Vec::new();
        if self.quiesce_pending {
            self.quiesce_pending = false;
            let _ = edges.push(Edge::new(Channel::Crank, Level::Idle));
            let _ = edges.push(Edge::new(Channel::Cam, Level::Idle));
        }

        // Coincident events were sorted crank-first at table build time
        while self.index < self.table.len()
            && self.table.event(self.index).phase_x10 == group_phase
        {
            let _ = edges.push(self.table.event(self.index).edge);
            self.index += 1;
        }

        // Degree delta to the next group, wrapping at the cycle boundary
        let (next_index, delta_x10) = if self.index == self.table.len() {
            let next = self.table.event(0);
            (0, CYCLE_X10 - group_phase as u32 + next.phase_x10 as u32)
        } else {
            let next = self.table.event(self.index);
            (self.index, next.phase_x10 as u32 - group_phase as u32)
        };
        self.index = next_index;
        self.phase_x10 = self.table.event(next_index).phase_x10 as u32;

        // dt_µs = Δdeg / (rpm · 6 deg/s) with Δdeg and rpm in fixed point:
        // dt_µs = delta_x10 · 10⁸ / (6 · millirpm). The division remainder
        // is carried into the next interval so rounding never drifts.
        let divisor = 6 * millirpm as u64;
        let numer = delta_x10 as u64 * 100_000_000 + self.interval_carry;
        let dt = numer / divisor;
        self.interval_carry = numer % divisor;

        let (dt, anomaly) = if dt == 0 {
            (MIN_ARM_US, Some(TimingAnomaly::IntervalUnderflow))
        } else if dt > MAX_ARM_US as u64 {
            // Discard the carry: it is meaningless once clamped
            self.interval_carry = 0;
            (MAX_ARM_US, Some(TimingAnomaly::IntervalOverflow))
        } else {
            (dt as u32, None)
        };
        if anomaly.is_some() {
            self.anomaly_count = self.anomaly_count.wrapping_add(1);
        }

        StepOutcome {
            edges,
            next: Arm::After(dt),
            anomaly,
        }
    }
}
