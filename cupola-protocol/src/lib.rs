//! Wire protocol for the Cupola dome controller
//!
//! The dome speaks a line-oriented text protocol over TCP. Each connection
//! opens with one handshake line (a protocol-upgrade request) that the dome
//! consumes and discards; everything after it is newline-delimited UTF-8 in
//! both directions.
//!
//! Inbound command lines, matched by case-sensitive prefix in this order:
//!
//! | Prefix    | Meaning                          |
//! |-----------|----------------------------------|
//! | `pos:<n>` | slew to position `n`             |
//! | `home`    | park                             |
//! | `reset`   | run the homing sequence          |
//! | `rot:ccw` | full counter-clockwise rotation  |
//! | `rot`     | full clockwise rotation          |
//!
//! Anything else is silently ignored. Outbound traffic is `pos:<n>` status
//! lines pushed to every connected client.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod status;

pub use command::{Command, Rotation};
pub use line::LineReader;
pub use status::{position_line, StatusLine, MAX_STATUS_LEN};
