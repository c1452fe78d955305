//! Incremental line assembly
//!
//! Feeds one byte at a time and yields a completed line at each newline.
//! Carriage returns are dropped, oversized lines are discarded up to the
//! next newline, and invalid UTF-8 yields nothing; the connection keeps
//! running in all three cases.

use heapless::{String, Vec};

/// State machine assembling newline-delimited lines from a byte stream
#[derive(Debug, Clone, Default)]
pub struct LineReader<const N: usize> {
    buffer: Vec<u8, N>,
    discarding: bool,
}

impl<const N: usize> LineReader<N> {
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            discarding: false,
        }
    }

    /// Feed a single byte.
    ///
    /// Returns `Some(line)` (without its terminator) when `byte` completes
    /// a valid line, `None` otherwise.
    pub fn feed(&mut self, byte: u8) -> Option<String<N>> {
        match byte {
            b'\n' => {
                let raw = core::mem::take(&mut self.buffer);
                if self.discarding {
                    self.discarding = false;
                    return None;
                }
                String::from_utf8(raw).ok()
            }
            b'\r' => None,
            _ => {
                if !self.discarding && self.buffer.push(byte).is_err() {
                    // Line too long: drop what we have and skip to the
                    // next terminator
                    self.buffer.clear();
                    self.discarding = true;
                }
                None
            }
        }
    }

    /// Drop any partially assembled line.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<const N: usize>(reader: &mut LineReader<N>, bytes: &[u8]) -> Vec<String<N>, 8> {
        let mut lines = Vec::new();
        for &b in bytes {
            if let Some(line) = reader.feed(b) {
                lines.push(line).unwrap();
            }
        }
        lines
    }

    #[test]
    fn splits_on_newlines() {
        let mut reader: LineReader<32> = LineReader::new();
        let lines = collect(&mut reader, b"pos:100\nhome\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].as_str(), "pos:100");
        assert_eq!(lines[1].as_str(), "home");
    }

    #[test]
    fn strips_carriage_returns() {
        let mut reader: LineReader<32> = LineReader::new();
        let lines = collect(&mut reader, b"reset\r\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_str(), "reset");
    }

    #[test]
    fn partial_line_waits_for_its_terminator() {
        let mut reader: LineReader<32> = LineReader::new();
        assert!(collect(&mut reader, b"pos:4").is_empty());
        let lines = collect(&mut reader, b"2\n");
        assert_eq!(lines[0].as_str(), "pos:42");
    }

    #[test]
    fn empty_line_is_yielded() {
        let mut reader: LineReader<32> = LineReader::new();
        let lines = collect(&mut reader, b"\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_str(), "");
    }

    #[test]
    fn oversized_line_is_discarded_and_resyncs() {
        let mut reader: LineReader<8> = LineReader::new();
        let lines = collect(&mut reader, b"this line is far too long\nhome\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_str(), "home");
    }

    #[test]
    fn invalid_utf8_is_dropped() {
        let mut reader: LineReader<32> = LineReader::new();
        let lines = collect(&mut reader, b"po\xffs\nhome\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_str(), "home");
    }

    #[test]
    fn reset_forgets_partial_input() {
        let mut reader: LineReader<32> = LineReader::new();
        assert!(collect(&mut reader, b"pos:1").is_empty());
        reader.reset();
        let lines = collect(&mut reader, b"home\n");
        assert_eq!(lines[0].as_str(), "home");
    }
}
