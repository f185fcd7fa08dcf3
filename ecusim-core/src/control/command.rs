//! Control command parser
//!
//! Grammar, one command per line:
//!
//! ```text
//! rpm <value>     set target RPM (integer or one decimal, e.g. 3000 or 850.5)
//! stop            set target RPM to zero
//! pattern <id>    select a pattern preset
//! status          report sequencer state
//! ```
//!
//! Out-of-range targets are clamped by the ramp, not rejected here; this
//! boundary only rejects lines it cannot understand.

/// A parsed control command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Set target speed, tenths of an RPM
    SetRpm(u32),
    /// Force target speed to zero
    Stop,
    /// Select a pattern preset by id
    SelectPattern(u8),
    /// Request a status report
    Status,
}

/// Reasons a command line was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Line was empty or whitespace only
    Empty,
    /// First word is not a known command
    UnknownCommand,
    /// Command requires an argument that was not given
    MissingArgument,
    /// Argument was not a valid number
    InvalidNumber,
    /// Extra input after the command
    TrailingInput,
}

/// Parse one command line
pub fn parse_line(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_ascii_whitespace();
    let keyword = words.next().ok_or(CommandError::Empty)?;

    let command = match keyword {
        "rpm" => {
            let arg = words.next().ok_or(CommandError::MissingArgument)?;
            Command::SetRpm(parse_rpm_x10(arg)?)
        }
        "stop" => Command::Stop,
        "pattern" => {
            let arg = words.next().ok_or(CommandError::MissingArgument)?;
            let id: u8 = arg.parse().map_err(|_| CommandError::InvalidNumber)?;
            Command::SelectPattern(id)
        }
        "status" => Command::Status,
        _ => return Err(CommandError::UnknownCommand),
    };

    if words.next().is_some() {
        return Err(CommandError::TrailingInput);
    }
    Ok(command)
}

/// Parse an RPM value with at most one decimal place into tenths
fn parse_rpm_x10(text: &str) -> Result<u32, CommandError> {
    let (whole, frac) = match text.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (text, None),
    };

    let whole: u32 = whole.parse().map_err(|_| CommandError::InvalidNumber)?;
    let tenth = match frac {
        None | Some("") => 0,
        Some(f) if f.len() == 1 => {
            f.parse::<u32>().map_err(|_| CommandError::InvalidNumber)?
        }
        Some(_) => return Err(CommandError::InvalidNumber),
    };

    whole
        .checked_mul(10)
        .and_then(|w| w.checked_add(tenth))
        .ok_or(CommandError::InvalidNumber)
}
