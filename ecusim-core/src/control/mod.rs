//! Serial control interface grammar
//!
//! Line-oriented ASCII commands for the bench operator. Transport (UART,
//! USB-CDC) lives in the firmware crate; this module only defines the
//! commands and their parser so it can be tested on the host.

pub mod command;

pub use command::{parse_line, Command, CommandError};
