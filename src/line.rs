use std::cmp::Ordering;
use std::io::{self, BufRead};

use crate::key::Key;

/// A single input/output record: `prefix` up to and including the first
/// space, `suffix` everything after it. The original bytes are kept
/// verbatim so that writing a `Line` back out reproduces the input
/// exactly - this is what makes re-sorting an already-sorted file
/// byte-identical to its input.
#[derive(Debug, Clone)]
pub(crate) struct Line {
    raw: String,
    // byte offset of the separating space, or raw.len() if there is none
    split_at: usize,
}

impl Line {
    /// Parse a line (without its trailing newline) by splitting once on
    /// the first space. A line with no space becomes `(whole_line, "")`
    /// per the resolution of spec.md section 9's open question.
    pub(crate) fn parse(raw: String) -> Line {
        let split_at = raw.find(' ').unwrap_or(raw.len());
        Line { raw, split_at }
    }

    pub(crate) fn prefix(&self) -> &str {
        &self.raw[..self.split_at]
    }

    pub(crate) fn suffix(&self) -> &str {
        if self.split_at < self.raw.len() {
            &self.raw[self.split_at + 1..]
        } else {
            ""
        }
    }

    pub(crate) fn key(&self) -> Key<'_> {
        Key::new(self.prefix(), self.suffix())
    }

    /// The original line text, unchanged.
    pub(crate) fn as_str(&self) -> &str {
        &self.raw
    }

    /// Read and parse the next line from `reader`, stripping its
    /// terminator. Returns `None` at end-of-stream.
    pub(crate) fn read_next<R: BufRead>(reader: &mut R) -> io::Result<Option<Line>> {
        let mut buf = String::new();
        let bytes_read = reader.read_line(&mut buf)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        let trimmed = buf
            .strip_suffix('\n')
            .map(|s| s.strip_suffix('\r').unwrap_or(s))
            .unwrap_or(&buf);
        Ok(Some(Line::parse(trimmed.to_string())))
    }
}

impl Eq for Line {}

impl PartialEq<Self> for Line {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl PartialOrd<Self> for Line {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Line {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}
