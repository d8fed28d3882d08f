//! Sequence file access.
//!
//! Opens alignment inputs and outputs, transparently handling gzip
//! compression. Compression is detected from the file extension:
//! - plain text (.fasta, .fa, .fas, .txt, ...)
//! - gzip (.gz, .bgz)
//!
//! The path `-` stands for standard input or standard output.

pub mod fasta;

use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Stdout, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression as GzLevel;

/// Path standing for stdin (when reading) or stdout (when writing).
pub const STDIO_PATH: &str = "-";

const BUFFER_SIZE: usize = 1024 * 1024;

/// Compression of a sequence file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

/// Detects compression from file extension.
pub fn detect_compression_from_extension<P: AsRef<Path>>(path: P) -> Compression {
    let ext = path.as_ref().extension().and_then(OsStr::to_str);
    match ext.map(str::to_lowercase).as_deref() {
        Some("gz" | "bgz") => Compression::Gzip,
        _ => Compression::None,
    }
}

fn is_stdio<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref() == Path::new(STDIO_PATH)
}

/// Opens a file (or stdin for `-`) for buffered reading, decompressing by extension.
pub fn open_reader<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    if is_stdio(&path) {
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = File::open(&path)?;
    match detect_compression_from_extension(&path) {
        Compression::None => Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file))),
        Compression::Gzip => {
            let decoder = MultiGzDecoder::new(BufReader::new(file));
            Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, decoder)))
        }
    }
}

/// Destination of written records.
///
/// Call [`Output::finish`] once done; it flushes buffers and writes the
/// gzip trailer, reporting any error instead of discarding it on drop.
pub enum Output {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
    Stdout(BufWriter<Stdout>),
}

impl Output {
    /// Flushes all pending data and closes the compression stream.
    pub fn finish(self) -> io::Result<()> {
        match self {
            Output::Plain(mut writer) => writer.flush(),
            Output::Gzip(encoder) => encoder.finish()?.flush(),
            Output::Stdout(mut writer) => writer.flush(),
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Plain(writer) => writer.write(buf),
            Output::Gzip(encoder) => encoder.write(buf),
            Output::Stdout(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Plain(writer) => writer.flush(),
            Output::Gzip(encoder) => encoder.flush(),
            Output::Stdout(writer) => writer.flush(),
        }
    }
}

/// Creates (or truncates) a file for writing, compressing by extension. `-` writes to stdout.
pub fn create_writer<P: AsRef<Path>>(path: P) -> io::Result<Output> {
    if is_stdio(&path) {
        return Ok(Output::Stdout(BufWriter::new(io::stdout())));
    }

    let file = BufWriter::with_capacity(BUFFER_SIZE, File::create(&path)?);
    Ok(match detect_compression_from_extension(&path) {
        Compression::None => Output::Plain(file),
        Compression::Gzip => Output::Gzip(GzEncoder::new(file, GzLevel::default())),
    })
}
