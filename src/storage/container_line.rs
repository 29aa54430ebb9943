//! Line-level framing of `.mda` containers.
//!
//! A container is a sequence of text lines. Lines starting with `$` introduce a
//! chunk, lines starting with `&` carry radix-64 data, and everything else is
//! inert framing. Lines are handled as raw bytes so framing lines need not be
//! valid UTF-8.

use std::io::BufRead;

use crate::Result;

pub const HEADER_MARKER: u8 = b'$';
pub const DATA_MARKER: u8 = b'&';

/// Shortest line that can carry a chunk tag (`$` plus four tag bytes).
pub const MIN_TAGGED_HEADER_LEN: usize = 5;

/// Classification of one container line, with its line terminator removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerLine<'a> {
    /// A `$` line long enough to carry a chunk tag; holds the whole line.
    Header(&'a [u8]),
    /// A `&` line; holds the payload without the marker and trailing whitespace.
    Data(&'a [u8]),
    Other,
}

impl<'a> ContainerLine<'a> {
    pub fn classify(line: &'a [u8]) -> Self {
        let line = strip_line_terminator(line);
        match line.first() {
            Some(&HEADER_MARKER) if line.len() >= MIN_TAGGED_HEADER_LEN => ContainerLine::Header(line),
            Some(&DATA_MARKER) => ContainerLine::Data(trim_payload_end(&line[1..])),
            _ => ContainerLine::Other,
        }
    }
}

/// Removes a trailing `\n` or `\r\n`.
pub fn strip_line_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Whitespace that may trail a data line payload.
///
/// Unicode whitespace plus the ASCII separators `\x1c`..=`\x1f`; vertical tab
/// and form feed are included.
fn is_payload_space(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Removes trailing whitespace from a data line payload.
///
/// UTF-8 payloads are trimmed by character; anything else by ASCII byte.
pub fn trim_payload_end(payload: &[u8]) -> &[u8] {
    match std::str::from_utf8(payload) {
        Ok(text) => text.trim_end_matches(is_payload_space).as_bytes(),
        Err(_) => {
            let end = payload
                .iter()
                .rposition(|&b| !(b.is_ascii() && is_payload_space(b as char)))
                .map_or(0, |i| i + 1);
            &payload[..end]
        }
    }
}

/// Sequential, read-only line source over a buffered reader.
///
/// Keeps a 1-based count of the lines handed out for diagnostics.
pub struct LineReader<R: BufRead> {
    reader: R,
    buf: Vec<u8>,
    line_no: u64,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: Vec::new(), line_no: 0 }
    }

    /// Returns the next raw line including its terminator, or `None` at end of stream.
    pub fn next_line(&mut self) -> Result<Option<&[u8]>> {
        self.buf.clear();
        let read = self.reader.read_until(b'\n', &mut self.buf)?;
        if read == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some(self.buf.as_slice()))
    }

    /// Number of the line most recently returned by [`Self::next_line`].
    pub fn line_no(&self) -> u64 {
        self.line_no
    }
}
