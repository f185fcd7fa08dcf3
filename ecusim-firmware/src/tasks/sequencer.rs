//! Edge generation task
//!
//! Owns the sequencer and the output pins. One loop iteration per timer
//! event: apply pending control inputs, step the sequencer, drive the
//! edges it emitted, then sleep until the deadline it asked for.

use defmt::*;
use embassy_futures::select::{select, Either};
use portable_atomic::Ordering;

use ecusim_core::pattern::preset_by_id;
use ecusim_core::scheduler::{Arm, EdgeSequencer, RunState};
use ecusim_core::traits::EdgeOutput;
use ecusim_hal_rp2040::{EdgeTimer, GpioEdgeOutputs};

use crate::channels::{PATTERN_SELECT, STATUS_REPLY, STATUS_REQUEST, TARGET_RPM_X10};
use crate::config::SUSPEND_POLL_US;

/// Timer-paced crank/cam edge generator
#[embassy_executor::task]
pub async fn sequencer_task(mut outputs: GpioEdgeOutputs<'static>, mut seq: EdgeSequencer) {
    info!("Sequencer task started");

    let mut timer = EdgeTimer::new();
    // Time attributed to the first step; the sequencer starts stopped, so
    // this only seeds the ramp at the suspended poll cadence
    let mut elapsed_us = SUSPEND_POLL_US;

    loop {
        // Geometry changes apply between edge groups, never mid-group
        if let Some(id) = PATTERN_SELECT.try_take() {
            match preset_by_id(id) {
                Ok((tooth, cam)) => match seq.set_pattern(tooth, cam) {
                    Ok(()) => {
                        // Drop the lines to idle now; the next timer event
                        // can be most of a second away at low RPM
                        outputs.quiesce();
                        info!("Pattern {} selected", id);
                    }
                    Err(e) => warn!("Pattern {} rejected: {:?}", id, e),
                },
                Err(_) => warn!("Unknown pattern id {}", id),
            }
        }

        seq.set_target_x10(TARGET_RPM_X10.load(Ordering::Relaxed));

        let was_running = seq.state() == RunState::Running;
        let outcome = seq.step(elapsed_us);

        for edge in &outcome.edges {
            outputs.apply(*edge);
        }
        if let Some(anomaly) = outcome.anomaly {
            warn!("Timing anomaly: {:?}", anomaly);
        }

        match outcome.next {
            Arm::After(dt) => {
                if !was_running {
                    // Waking from suspension: the stale deadline would
                    // replay the idle period as a burst
                    timer.restart();
                }
                timer.arm_us(dt);
                wait_answering_status(&timer, &seq).await;
                elapsed_us = dt;
            }
            Arm::Suspend => {
                timer.restart();
                timer.arm_us(SUSPEND_POLL_US);
                wait_answering_status(&timer, &seq).await;
                elapsed_us = SUSPEND_POLL_US;
            }
        }
    }
}

/// Sleep until the armed deadline, answering status requests promptly
/// instead of leaving them to wait out a slow-RPM interval
async fn wait_answering_status(timer: &EdgeTimer, seq: &EdgeSequencer) {
    loop {
        match select(timer.wait(), STATUS_REQUEST.wait()).await {
            Either::First(()) => return,
            Either::Second(()) => STATUS_REPLY.signal(seq.status()),
        }
    }
}
