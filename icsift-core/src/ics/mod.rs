//! Streaming ICS processing.
//!
//! This module handles splitting an incoming byte stream into raw lines
//! and filtering VEVENT blocks through a [`Sieve`](crate::Sieve) while
//! copying everything else through byte-for-byte.

mod filter;
mod line;

pub use filter::{EventFilter, LabelField, filter_document};
pub use line::{LineBuffer, strip_line_ending};
