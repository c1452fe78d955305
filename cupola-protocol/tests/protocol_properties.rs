//! Property tests for the wire protocol

use cupola_protocol::{position_line, Command, LineReader};

use proptest::prelude::*;

proptest! {
    /// A broadcast status line, fed back through the reader, parses as the
    /// target command for the same position.
    #[test]
    fn status_lines_roundtrip_as_commands(position in any::<i32>()) {
        let line = position_line(position);

        let mut reader: LineReader<32> = LineReader::new();
        let mut parsed = None;
        for &byte in line.as_bytes() {
            if let Some(l) = reader.feed(byte) {
                parsed = Command::parse(&l);
            }
        }

        prop_assert_eq!(parsed, Some(Command::Target(position)));
    }

    /// A stream of terminated lines reassembles exactly, byte by byte.
    #[test]
    fn byte_stream_reassembles_into_lines(
        lines in proptest::collection::vec("[a-z:0-9]{0,20}", 1..5),
    ) {
        let mut stream = Vec::new();
        for l in &lines {
            stream.extend_from_slice(l.as_bytes());
            stream.push(b'\n');
        }

        let mut reader: LineReader<32> = LineReader::new();
        let mut seen = Vec::new();
        for &byte in &stream {
            if let Some(l) = reader.feed(byte) {
                seen.push(l.as_str().to_owned());
            }
        }

        prop_assert_eq!(seen, lines);
    }

    /// No input sequence makes the reader yield a line longer than its
    /// capacity or panic.
    #[test]
    fn reader_is_total(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut reader: LineReader<16> = LineReader::new();
        for &byte in &bytes {
            if let Some(line) = reader.feed(byte) {
                prop_assert!(line.len() <= 16);
            }
        }
    }
}
