//! Raw line splitting for ICS byte streams.

use std::collections::VecDeque;

/// Strip a trailing `\n` or `\r\n` from a raw line.
///
/// A line ending in `\n` loses one byte, one ending in `\r\n` loses two;
/// an unterminated fragment is returned unchanged.
pub fn strip_line_ending(line: &[u8]) -> &[u8] {
    if let Some(stripped) = line.strip_suffix(b"\r\n") {
        stripped
    } else if let Some(stripped) = line.strip_suffix(b"\n") {
        stripped
    } else {
        line
    }
}

/// Incremental splitter that turns arriving byte chunks into raw lines.
///
/// Lines are yielded with their terminator bytes intact so the original
/// document can be reproduced verbatim. Only the bytes after the last seen
/// newline are held between calls, so memory stays bounded by the longest
/// line regardless of document size.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: VecDeque<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chunk of incoming bytes.
    pub fn extend(&mut self, chunk: &[u8]) {
        self.buf.extend(chunk);
    }

    /// Pop the next complete line, including its terminator.
    ///
    /// Returns `None` until a newline arrives.
    pub fn next_line(&mut self) -> Option<Vec<u8>> {
        let newline = self.buf.iter().position(|&b| b == b'\n')?;
        Some(self.buf.drain(..=newline).collect())
    }

    /// Take whatever is buffered after the final newline: the unterminated
    /// trailing fragment of a stream that does not end with `\n`.
    pub fn take_remainder(&mut self) -> Option<Vec<u8>> {
        if self.buf.is_empty() {
            return None;
        }
        Some(Vec::from(std::mem::take(&mut self.buf)))
    }
}
