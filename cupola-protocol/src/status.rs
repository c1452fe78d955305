//! Outbound status rendering

use core::fmt::Write;

use heapless::String;

/// Longest possible status line: `pos:` + signed 32-bit digits + newline
pub const MAX_STATUS_LEN: usize = 16;

/// One newline-terminated outbound message
pub type StatusLine = String<MAX_STATUS_LEN>;

/// Render the position broadcast sent to every connected client.
pub fn position_line(position: i32) -> StatusLine {
    let mut line = StatusLine::new();
    // Cannot overflow: MAX_STATUS_LEN covers the widest i32
    let _ = writeln!(line, "pos:{}", position);
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_with_terminator() {
        assert_eq!(position_line(0).as_str(), "pos:0\n");
        assert_eq!(position_line(3999).as_str(), "pos:3999\n");
    }

    #[test]
    fn widest_value_fits() {
        assert_eq!(position_line(i32::MIN).as_str(), "pos:-2147483648\n");
        assert_eq!(position_line(i32::MAX).as_str(), "pos:2147483647\n");
    }
}
