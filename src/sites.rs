//! Explicit site lists.
//!
//! Sites to mask come from exactly one source per run: an inline list
//! given on the command line, or a file of whitespace-separated 1-based
//! integers. The file may be gzip-compressed.

use std::collections::BTreeSet;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::formats::open_reader;

/// Errors that can occur while resolving a site list.
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Site file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read site file {}: {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid site '{token}' (entry {index}): sites are 1-based positive integers")]
    InvalidSite { token: String, index: usize },
}

/// Result type for site list operations.
pub type SiteResult<T> = Result<T, SiteError>;

/// Where the explicit sites of a run come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SiteSource {
    /// No explicit site masking
    #[default]
    None,
    /// Sites listed on the command line
    Inline(Vec<usize>),
    /// Whitespace-separated sites read from a file
    File(PathBuf),
}

impl SiteSource {
    /// Resolves the source into a set of 1-based sites.
    pub fn resolve(&self) -> SiteResult<BTreeSet<usize>> {
        match self {
            SiteSource::None => Ok(BTreeSet::new()),
            SiteSource::Inline(sites) => {
                if let Some(pos) = sites.iter().position(|&s| s == 0) {
                    return Err(SiteError::InvalidSite {
                        token: "0".to_string(),
                        index: pos + 1,
                    });
                }
                Ok(sites.iter().copied().collect())
            }
            SiteSource::File(path) => read_site_file(path),
        }
    }
}

/// Parses whitespace-separated 1-based sites.
pub fn parse_sites(content: &str) -> SiteResult<BTreeSet<usize>> {
    content
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| match token.parse::<usize>() {
            Ok(site) if site > 0 => Ok(site),
            _ => Err(SiteError::InvalidSite {
                token: token.to_string(),
                index: i + 1,
            }),
        })
        .collect()
}

/// Reads a site file, decompressing by extension.
pub fn read_site_file<P: AsRef<Path>>(path: P) -> SiteResult<BTreeSet<usize>> {
    let path = path.as_ref();
    let io_error = |source: io::Error| {
        if source.kind() == io::ErrorKind::NotFound {
            SiteError::FileNotFound(path.to_path_buf())
        } else {
            SiteError::IoError {
                path: path.to_path_buf(),
                source,
            }
        }
    };

    let mut content = String::new();
    open_reader(path)
        .and_then(|mut reader| reader.read_to_string(&mut content))
        .map_err(io_error)?;

    let sites = parse_sites(&content)?;
    debug!("Read {} distinct sites from {}", sites.len(), path.display());
    Ok(sites)
}
