//! Inbound command parsing

/// Requested rotation direction on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// A recognized inbound command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `pos:<n>` - slew to position `n`
    Target(i32),
    /// `home` - park the dome
    Home,
    /// `reset` - run the homing sequence
    Reset,
    /// `rot` / `rot:ccw` - one full rotation
    Rotate(Rotation),
}

impl Command {
    /// Parse one inbound line.
    ///
    /// Prefixes are matched case-sensitively in protocol order and the
    /// first match wins, so `rot:ccw` is checked before the bare `rot`
    /// fallback. Unrecognized lines and malformed integers yield `None`
    /// and are silently ignored by the caller.
    pub fn parse(line: &str) -> Option<Self> {
        if let Some(rest) = line.strip_prefix("pos:") {
            return rest.parse::<i32>().ok().map(Command::Target);
        }
        if line.starts_with("home") {
            return Some(Command::Home);
        }
        if line.starts_with("reset") {
            return Some(Command::Reset);
        }
        if line.starts_with("rot:ccw") {
            return Some(Command::Rotate(Rotation::CounterClockwise));
        }
        if line.starts_with("rot") {
            return Some(Command::Rotate(Rotation::Clockwise));
        }
        None
    }
}
