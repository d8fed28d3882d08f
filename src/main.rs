//! seqmask - Alignment Masking
//!
//! Masks gaps, alignment ends, and explicit sites with `N`.
//!
//! ## Usage
//!
//! ```bash
//! seqmask --alignment aln.fasta --output masked.fasta --mask-terminal-gaps
//! seqmask --alignment aln.fasta.gz --output masked.fasta \
//!     --mask-from-beginning 100 --mask-from-end 50 --mask-sites 21 42
//! seqmask --alignment aln.fasta --output - --mask-site-file sites.txt
//! ```
//!
//! Compression (gzip) is detected from the `.gz` extension, for input,
//! output and site files. Use `-` for stdin/stdout.

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, warn};

use seqmask::formats::fasta::DEFAULT_LINE_WIDTH;
use seqmask::mask::MaskSpec;
use seqmask::pipeline::{run, RunOptions};
use seqmask::sites::SiteSource;

/// Parses a 1-based site position.
fn parse_site(s: &str) -> std::result::Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("sites are 1-based, 0 is not a valid site".to_string()),
        Ok(site) => Ok(site),
        Err(e) => Err(e.to_string()),
    }
}

/// seqmask - Mask sites of a multiple sequence alignment with N
///
/// Sequences are uppercased, then masked in this order: terminal gaps,
/// all gaps, fixed-length beginning and end, explicit sites (gaps at
/// explicit sites are left untouched).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// FASTA file of the alignment ("-" for stdin, .gz is decompressed)
    #[arg(long = "alignment")]
    alignment: PathBuf,

    /// FASTA file of the output alignment ("-" for stdout, .gz is compressed)
    #[arg(long = "output")]
    output: PathBuf,

    /// Fill all terminal gaps with N as they likely represent missing data
    #[arg(long = "mask-terminal-gaps")]
    mask_terminal_gaps: bool,

    /// Fill all gaps with N
    #[arg(long = "mask-all-gaps")]
    mask_all_gaps: bool,

    /// Number of bases to mask from start
    #[arg(long = "mask-from-beginning", value_name = "N", default_value_t = 0)]
    mask_from_beginning: usize,

    /// Number of bases to mask from end
    #[arg(long = "mask-from-end", value_name = "N", default_value_t = 0)]
    mask_from_end: usize,

    /// List of 1-based sites to mask
    #[arg(
        long = "mask-sites",
        value_name = "SITE",
        num_args = 1..,
        value_parser = parse_site,
        conflicts_with = "mask_site_file"
    )]
    mask_sites: Option<Vec<usize>>,

    /// File of whitespace-separated 1-based sites to mask
    #[arg(long = "mask-site-file", value_name = "PATH")]
    mask_site_file: Option<PathBuf>,

    /// Sequence line width in the output (0: one line per sequence)
    #[arg(long = "line-width", value_name = "N", default_value_t = DEFAULT_LINE_WIDTH)]
    line_width: usize,
}

impl Args {
    /// Returns the single source of explicit sites for this run.
    fn site_source(&self) -> SiteSource {
        match (&self.mask_sites, &self.mask_site_file) {
            (_, Some(path)) => SiteSource::File(path.clone()),
            (Some(sites), None) => SiteSource::Inline(sites.clone()),
            (None, None) => SiteSource::None,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    debug!("{:?}", args);

    let sites = args
        .site_source()
        .resolve()
        .context("Cannot load sites to mask")?;
    if sites.is_empty() && (args.mask_sites.is_some() || args.mask_site_file.is_some()) {
        warn!("Site list is empty; no explicit sites will be masked");
    }

    let spec = MaskSpec {
        mask_terminal_gaps: args.mask_terminal_gaps,
        mask_all_gaps: args.mask_all_gaps,
        prefix_len: args.mask_from_beginning,
        suffix_len: args.mask_from_end,
        sites,
    };
    let options = RunOptions {
        alignment: args.alignment,
        output: args.output,
        line_width: args.line_width,
    };

    run(&options, &spec).with_context(|| {
        format!("Failed to mask alignment {}", options.alignment.display())
    })?;

    Ok(())
}
