//! Data model for alignment records.
//!
//! A [`Record`] is one FASTA entry: the header text and the sequence
//! bytes. The header is kept exactly as read, so identifier, description
//! and their separator are written back unchanged. Records flow through
//! the mask pipeline one at a time and are never retained after being
//! written.

/// The gap character used in alignments.
pub const GAP: u8 = b'-';

/// The unknown-base symbol written over masked positions.
pub const UNKNOWN: u8 = b'N';

/// A single sequence record with its header and data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Header line content after '>' (trailing whitespace removed)
    pub header: String,
    /// The sequence data (nucleotides, IUPAC codes and gaps)
    pub seq: Vec<u8>,
}

impl Record {
    /// Creates a new record from its header text.
    pub fn new(header: impl Into<String>, seq: impl Into<Vec<u8>>) -> Self {
        Self {
            header: header.into(),
            seq: seq.into(),
        }
    }

    /// Appends a description to the header, separated by a space.
    pub fn with_description(mut self, description: &str) -> Self {
        self.header.push(' ');
        self.header.push_str(description);
        self
    }

    /// Returns the identifier: header text up to the first whitespace.
    pub fn id(&self) -> &str {
        self.header.split_whitespace().next().unwrap_or("")
    }

    /// Returns the header text after the identifier, if any.
    pub fn description(&self) -> Option<&str> {
        let header = self.header.trim_start();
        let (_, rest) = header.split_once(char::is_whitespace)?;
        let rest = rest.trim();
        (!rest.is_empty()).then_some(rest)
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Returns the sequence as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.seq
    }
}
