//! Run orchestration.
//!
//! Streams records from the alignment through the mask stages and into
//! the output, one record at a time and in input order. The first error
//! aborts the run.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;

use crate::formats::fasta::{FastaError, FastaReader, FastaWriter, DEFAULT_LINE_WIDTH};
use crate::formats::{create_writer, open_reader};
use crate::mask::{MaskError, MaskSpec};

/// Errors that abort a masking run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Alignment file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Malformed record: {0}")]
    MalformedRecord(#[from] FastaError),

    #[error("Record '{id}': {source}")]
    Mask {
        id: String,
        #[source]
        source: MaskError,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type for run operations.
pub type RunResult<T> = Result<T, RunError>;

/// Input and output settings of a run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Alignment to read (`-` for stdin)
    pub alignment: PathBuf,
    /// Output file (`-` for stdout)
    pub output: PathBuf,
    /// Sequence line width of the output; 0 disables wrapping
    pub line_width: usize,
}

impl RunOptions {
    /// Creates options with the default output line width.
    pub fn new(alignment: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            alignment: alignment.into(),
            output: output.into(),
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

/// What a completed run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of records written
    pub records: usize,
    /// Number of positions changed by masking (uppercasing not counted)
    pub masked: usize,
}

/// Masks every record of `reader` and writes it to `writer`.
pub fn mask_stream<R: BufRead, W: Write>(
    reader: R,
    writer: &mut FastaWriter<W>,
    spec: &MaskSpec,
) -> RunResult<RunSummary> {
    let mut summary = RunSummary::default();

    for record in FastaReader::new(reader) {
        let mut record = record?;
        let masked = spec
            .apply(&mut record.seq)
            .map_err(|source| RunError::Mask {
                id: record.id().to_string(),
                source,
            })?;
        debug!("{}: masked {} of {} positions", record.id(), masked, record.len());

        writer.write_record(&record)?;
        summary.records += 1;
        summary.masked += masked;
    }

    Ok(summary)
}

/// Runs a complete masking job from file to file.
pub fn run(options: &RunOptions, spec: &MaskSpec) -> RunResult<RunSummary> {
    info!("Masking {}", options.alignment.display());
    if spec.is_noop() {
        warn!("No masking requested; sequences will only be uppercased");
    }

    let reader = open_reader(&options.alignment).map_err(|e| not_found(e, &options.alignment))?;
    let output = create_writer(&options.output)?;

    let mut writer = FastaWriter::with_line_width(output, options.line_width);
    let summary = mask_stream(reader, &mut writer, spec)?;
    writer.into_inner()?.finish()?;

    if summary.records == 0 {
        warn!("No records found in {}", options.alignment.display());
    }
    info!(
        "Wrote {} sequences to {} ({} positions masked)",
        summary.records,
        options.output.display(),
        summary.masked
    );
    Ok(summary)
}

fn not_found(err: io::Error, path: &Path) -> RunError {
    if err.kind() == io::ErrorKind::NotFound {
        RunError::FileNotFound(path.to_path_buf())
    } else {
        RunError::IoError(err)
    }
}
