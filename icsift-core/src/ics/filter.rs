//! The VEVENT filter state machine.

use crate::ics::line::{LineBuffer, strip_line_ending};
use crate::sieve::Sieve;

const EVENT_BEGIN: &[u8] = b"BEGIN:VEVENT";
const EVENT_END: &[u8] = b"END:VEVENT";
const SUMMARY_PREFIX: &[u8] = b"SUMMARY:";
const CATEGORIES_PREFIX: &[u8] = b"CATEGORIES:";

/// Which event property supplies the label an event is filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelField {
    /// The token after the last space of the unfolded `SUMMARY:` value.
    /// University feeds end the summary with the course type, e.g.
    /// `SUMMARY:Algebra I loeng`.
    SummaryTrailingToken,
    /// The full unfolded `CATEGORIES:` value.
    Categories,
}

impl LabelField {
    fn prefix(self) -> &'static [u8] {
        match self {
            LabelField::SummaryTrailingToken => SUMMARY_PREFIX,
            LabelField::Categories => CATEGORIES_PREFIX,
        }
    }

    fn extract(self, value: &str) -> String {
        match self {
            LabelField::SummaryTrailingToken => match value.rfind(' ') {
                Some(i) => value[i + 1..].to_string(),
                None => value.to_string(),
            },
            LabelField::Categories => value.to_string(),
        }
    }
}

/// Streaming filter that copies non-event lines through verbatim and
/// buffers each VEVENT block, committing or dropping the whole block when
/// its `END:VEVENT` line arrives.
///
/// Feed raw lines (terminators included) with [`push`](Self::push) and take
/// the filtered document with [`finish`](Self::finish). Memory use is
/// bounded by the largest single event block plus the retained output.
pub struct EventFilter<'a> {
    sieve: &'a Sieve,
    field: LabelField,
    out: Vec<u8>,
    event: Vec<u8>,
    label: Vec<u8>,
    in_event: bool,
    capturing: bool,
}

impl<'a> EventFilter<'a> {
    pub fn new(sieve: &'a Sieve, field: LabelField) -> Self {
        EventFilter {
            sieve,
            field,
            out: Vec::with_capacity(1024),
            event: Vec::with_capacity(256),
            label: Vec::new(),
            in_event: false,
            capturing: false,
        }
    }

    /// Process one raw line, terminator included.
    pub fn push(&mut self, line: &[u8]) {
        if self.in_event {
            self.event.extend_from_slice(line);

            if self.capturing && line.first() == Some(&b' ') {
                // Folded continuation: unfold by dropping the leading space
                // and the terminator.
                self.label.extend_from_slice(strip_line_ending(&line[1..]));
                return;
            }
            // Any other line ends an active fold and is handled normally;
            // it may itself be END:VEVENT or another label field.
            self.capturing = false;

            if line.starts_with(self.field.prefix()) {
                self.capturing = true;
                self.label.clear();
                self.label
                    .extend_from_slice(strip_line_ending(&line[self.field.prefix().len()..]));
            } else if line.starts_with(EVENT_END) {
                self.in_event = false;
                let label = self.field.extract(&String::from_utf8_lossy(&self.label));
                if self.sieve.admits(&label) {
                    self.out.extend_from_slice(&self.event);
                }
            }
        } else if line.starts_with(EVENT_BEGIN) {
            self.in_event = true;
            self.capturing = false;
            self.event.clear();
            self.event.extend_from_slice(line);
            self.label.clear();
        } else {
            self.out.extend_from_slice(line);
        }
    }

    /// Finish the stream and take the filtered document.
    ///
    /// An event still open here never saw its `END:VEVENT`; the buffered
    /// block is dropped rather than flushed half-parsed.
    pub fn finish(self) -> Vec<u8> {
        self.out
    }
}

/// Filter a complete in-memory document.
pub fn filter_document(input: &[u8], sieve: &Sieve, field: LabelField) -> Vec<u8> {
    let mut lines = LineBuffer::new();
    let mut filter = EventFilter::new(sieve, field);

    lines.extend(input);
    while let Some(line) = lines.next_line() {
        filter.push(&line);
    }
    if let Some(fragment) = lines.take_remainder() {
        filter.push(&fragment);
    }

    filter.finish()
}
