//! Inter-task communication
//!
//! The control task writes, the sequencer task reads. The target speed is
//! a plain atomic because the sequencer samples it at every step anyway;
//! everything else goes through embassy-sync signals.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicU32;

use ecusim_core::scheduler::SequencerStatus;

/// Target speed in tenths of an RPM (single writer: control task)
pub static TARGET_RPM_X10: AtomicU32 = AtomicU32::new(0);

/// Pattern preset selection, applied between edge groups
pub static PATTERN_SELECT: Signal<CriticalSectionRawMutex, u8> = Signal::new();

/// Status request from the control task
pub static STATUS_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Status snapshot answered by the sequencer task
pub static STATUS_REPLY: Signal<CriticalSectionRawMutex, SequencerStatus> = Signal::new();
