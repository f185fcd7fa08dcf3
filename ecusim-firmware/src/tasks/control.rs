//! Serial control task
//!
//! Line-oriented console on the control UART. Each received line is parsed
//! and executed, and every non-empty line gets exactly one reply: `ok`, an
//! `err ...` diagnostic, or the status report.

use core::fmt::Write;

use defmt::{info, warn};
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write as _};
use heapless::{String, Vec};
use portable_atomic::Ordering;

use ecusim_core::control::{parse_line, Command, CommandError};
use ecusim_core::pattern::preset_by_id;
use ecusim_core::scheduler::{RunState, SequencerStatus};

use crate::channels::{PATTERN_SELECT, STATUS_REPLY, STATUS_REQUEST, TARGET_RPM_X10};

/// Longest accepted command line, terminator excluded
const LINE_MAX: usize = 64;

/// UART read chunk size
const RX_CHUNK: usize = 32;

/// Longest reply line
const RESPONSE_MAX: usize = 96;

/// Control console task
#[embassy_executor::task]
pub async fn control_task(mut rx: BufferedUartRx, mut tx: BufferedUartTx) {
    info!("Control task started");

    let mut line: Vec<u8, LINE_MAX> = Vec::new();
    let mut overlong = false;
    let mut buf = [0u8; RX_CHUNK];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                for &byte in &buf[..n] {
                    match byte {
                        b'\r' => {}
                        b'\n' => {
                            let response = if overlong {
                                literal("err line too long")
                            } else {
                                match core::str::from_utf8(&line) {
                                    Ok(text) => execute(text).await,
                                    Err(_) => literal("err invalid utf-8"),
                                }
                            };
                            line.clear();
                            overlong = false;
                            if !response.is_empty() {
                                send(&mut tx, &response).await;
                            }
                        }
                        _ => {
                            // Overlong input is rejected at the terminator,
                            // not truncated into a different command
                            if line.push(byte).is_err() {
                                overlong = true;
                            }
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => warn!("UART read error: {:?}", e),
        }
    }
}

/// Execute one parsed line and build its reply
async fn execute(text: &str) -> String<RESPONSE_MAX> {
    match parse_line(text) {
        Ok(Command::SetRpm(rpm_x10)) => {
            TARGET_RPM_X10.store(rpm_x10, Ordering::Relaxed);
            literal("ok")
        }
        Ok(Command::Stop) => {
            TARGET_RPM_X10.store(0, Ordering::Relaxed);
            literal("ok")
        }
        Ok(Command::SelectPattern(id)) => {
            // Validate here so the reply is synchronous; the sequencer
            // applies the change between edge groups
            if preset_by_id(id).is_err() {
                literal("err unknown pattern")
            } else {
                PATTERN_SELECT.signal(id);
                literal("ok")
            }
        }
        Ok(Command::Status) => {
            STATUS_REPLY.reset();
            STATUS_REQUEST.signal(());
            let status = STATUS_REPLY.wait().await;
            format_status(&status)
        }
        // Empty lines are ignored without a reply
        Err(CommandError::Empty) => String::new(),
        Err(e) => literal(reject(e)),
    }
}

fn reject(err: CommandError) -> &'static str {
    match err {
        CommandError::Empty => "",
        CommandError::UnknownCommand => "err unknown command",
        CommandError::MissingArgument => "err missing argument",
        CommandError::InvalidNumber => "err invalid number",
        CommandError::TrailingInput => "err trailing input",
    }
}

fn format_status(status: &SequencerStatus) -> String<RESPONSE_MAX> {
    let state = match status.state {
        RunState::Running => "running",
        RunState::Stopped => "stopped",
    };
    let mut out = String::new();
    let _ = write!(
        out,
        "state={} rpm={}.{} target={}.{} tooth={} anomalies={}",
        state,
        status.current_rpm_x10 / 10,
        status.current_rpm_x10 % 10,
        status.target_rpm_x10 / 10,
        status.target_rpm_x10 % 10,
        status.tooth_index,
        status.anomaly_count,
    );
    out
}

fn literal(text: &str) -> String<RESPONSE_MAX> {
    let mut out = String::new();
    let _ = out.push_str(text);
    out
}

async fn send(tx: &mut BufferedUartTx, response: &str) {
    let result = async {
        tx.write_all(response.as_bytes()).await?;
        tx.write_all(b"\r\n").await
    }
    .await;
    if result.is_err() {
        warn!("UART write error");
    }
}
