//! Streaming FASTA reader and writer.
//!
//! Records are read one at a time so an alignment never has to fit in
//! memory. Both single-line and multi-line sequences are supported.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGTACGTACGT...
//! >another_sequence
//! TGCATGCATGCA...
//! ```

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::model::Record;

/// Default sequence line width for written records.
pub const DEFAULT_LINE_WIDTH: usize = 60;

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to read input: {0}")]
    IoError(#[from] io::Error),

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Lazy, forward-only iterator over the records of a FASTA stream.
///
/// # Examples
///
/// ```
/// use seqmask::formats::fasta::FastaReader;
///
/// let input = ">seq1 first\nAC\nGT\n>seq2\nTTGG\n";
/// let records: Vec<_> = FastaReader::new(input.as_bytes())
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].as_bytes(), b"ACGT");
/// assert_eq!(records[0].description(), Some("first"));
/// ```
pub struct FastaReader<R> {
    reader: R,
    line: String,
    line_number: usize,
    /// Header text of the record being accumulated
    header: Option<String>,
    seq: Vec<u8>,
    /// Length of the previous record, used as allocation hint (alignments have uniform length)
    prev_seq_len: usize,
    finished: bool,
}

impl<R: BufRead> FastaReader<R> {
    /// Creates a reader over a buffered FASTA stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_number: 0,
            header: None,
            seq: Vec::new(),
            prev_seq_len: 1000,
            finished: false,
        }
    }

    /// Reads lines until a complete record is available or the stream ends.
    fn next_record(&mut self) -> FastaResult<Option<Record>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                self.finished = true;
                return Ok(self.take_record());
            }
            self.line_number += 1;
            let line = self.line.trim();

            // Skip empty lines
            if line.is_empty() {
                continue;
            }

            if let Some(header) = line.strip_prefix('>') {
                let next = parse_header(header, self.line_number)?;
                let previous = self.take_record();
                self.header = Some(next);
                if previous.is_some() {
                    return Ok(previous);
                }
            } else {
                if self.header.is_none() {
                    return Err(FastaError::SequenceWithoutHeader(self.line_number));
                }

                // Fast append: most FASTA lines don't have internal whitespace
                if line.bytes().all(|b| !b.is_ascii_whitespace()) {
                    self.seq.extend_from_slice(line.as_bytes());
                } else {
                    self.seq
                        .extend(line.bytes().filter(|b| !b.is_ascii_whitespace()));
                }
            }
        }
    }

    /// Finalizes the record being accumulated, if any.
    fn take_record(&mut self) -> Option<Record> {
        let header = self.header.take()?;
        let seq = std::mem::replace(&mut self.seq, Vec::with_capacity(self.prev_seq_len));
        self.prev_seq_len = seq.len().max(1);
        Some(Record { header, seq })
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = FastaResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Validates a header (without '>') and keeps its text as written.
///
/// The line is already stripped of its trailing newline and whitespace.
fn parse_header(header: &str, line_number: usize) -> FastaResult<String> {
    if header.split_whitespace().next().is_none() {
        return Err(FastaError::InvalidFormat(format!(
            "Empty sequence identifier at line {}",
            line_number
        )));
    }
    Ok(header.to_string())
}

/// Writes records in FASTA format, wrapping sequence lines at a fixed width.
pub struct FastaWriter<W: Write> {
    writer: W,
    /// Sequence line width; 0 writes each sequence on a single line
    line_width: usize,
}

impl<W: Write> FastaWriter<W> {
    /// Creates a writer wrapping sequences at `line_width` (0 disables wrapping).
    pub fn with_line_width(writer: W, line_width: usize) -> Self {
        Self { writer, line_width }
    }

    /// Writes one record.
    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        writeln!(self.writer, ">{}", record.header)?;
        if record.is_empty() {
            return Ok(());
        }

        let width = if self.line_width == 0 {
            record.len()
        } else {
            self.line_width
        };
        for chunk in record.as_bytes().chunks(width) {
            self.writer.write_all(chunk)?;
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Flushes buffered output and returns the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_fasta_str(content: &str) -> FastaResult<Vec<Record>> {
        FastaReader::new(content.as_bytes()).collect()
    }

    fn write_fasta_string(records: &[Record], line_width: usize) -> String {
        let mut writer = FastaWriter::with_line_width(Vec::new(), line_width);
        for record in records {
            writer.write_record(record).unwrap();
        }
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_parse_simple_fasta() {
        let records = parse_fasta_str(">seq1\nACGT\n>seq2\nTGCA\n").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id(), "seq1");
        assert_eq!(records[0].as_bytes(), b"ACGT");
        assert_eq!(records[1].id(), "seq2");
        assert_eq!(records[1].as_bytes(), b"TGCA");
    }

    #[test]
    fn test_parse_multiline_sequence() {
        let records = parse_fasta_str(">seq1\nACGT\nTGCA\nAAAA\n").unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_bytes(), b"ACGTTGCAAAAA");
    }

    #[test]
    fn test_parse_with_description() {
        let records = parse_fasta_str(">seq1   This is a description \nACGT\n").unwrap();

        assert_eq!(records[0].id(), "seq1");
        assert_eq!(records[0].description(), Some("This is a description"));
    }

    #[test]
    fn test_header_text_is_kept_verbatim() {
        let records = parse_fasta_str(">seq1\tcollected  2021|EPI  \r\nAC-GT\n").unwrap();

        assert_eq!(records[0].header, "seq1\tcollected  2021|EPI");
        assert_eq!(records[0].id(), "seq1");
        assert_eq!(records[0].description(), Some("collected  2021|EPI"));
        assert_eq!(write_fasta_string(&records, 0), ">seq1\tcollected  2021|EPI\nAC-GT\n");
    }

    #[test]
    fn test_parse_with_empty_lines_and_crlf() {
        let records = parse_fasta_str(">seq1\r\nAC-GT\r\n\r\n>seq2\n\nTG CA\n").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].as_bytes(), b"AC-GT");
        assert_eq!(records[1].as_bytes(), b"TGCA");
    }

    #[test]
    fn test_empty_input_yields_no_records() {
        assert!(parse_fasta_str("").unwrap().is_empty());
        assert!(parse_fasta_str("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_record_without_sequence_is_kept() {
        let records = parse_fasta_str(">empty\n>seq1\nAC\n").unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].is_empty());
        assert_eq!(records[1].as_bytes(), b"AC");
    }

    #[test]
    fn test_sequence_without_header() {
        let result = parse_fasta_str("ACGT\n>seq1\nTGCA\n");
        assert!(matches!(result, Err(FastaError::SequenceWithoutHeader(1))));
    }

    #[test]
    fn test_empty_identifier() {
        let result = parse_fasta_str(">seq1\nAC\n> \nGT\n");
        assert!(matches!(result, Err(FastaError::InvalidFormat(_))));
    }

    #[test]
    fn test_reader_stops_after_error() {
        let mut reader = FastaReader::new("ACGT\n>seq1\nTGCA\n".as_bytes());
        assert!(matches!(reader.next(), Some(Err(_))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_case_preservation() {
        let records = parse_fasta_str(">seq1\nacgt\n").unwrap();
        assert_eq!(records[0].as_bytes(), b"acgt");
    }

    #[test]
    fn test_write_wraps_lines() {
        let records = vec![Record::new("seq1", "ACGTACGTAC").with_description("desc")];
        assert_eq!(
            write_fasta_string(&records, 4),
            ">seq1 desc\nACGT\nACGT\nAC\n"
        );
    }

    #[test]
    fn test_write_without_wrapping() {
        let records = vec![Record::new("seq1", "ACGTACGTAC"), Record::new("seq2", "")];
        assert_eq!(write_fasta_string(&records, 0), ">seq1\nACGTACGTAC\n>seq2\n");
    }

    #[test]
    fn test_write_then_read_preserves_records() {
        let records = vec![
            Record::new("seq1", "NNACGT--").with_description("a b"),
            Record::new("seq2", "ACGTACGT"),
        ];
        let text = write_fasta_string(&records, 3);
        assert_eq!(parse_fasta_str(&text).unwrap(), records);
    }
}
