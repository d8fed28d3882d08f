//! # seqmask - Alignment Masking
//!
//! Masks selected positions of every sequence in a multiple sequence
//! alignment FASTA file, writing a new FASTA file with the same records
//! and sequence lengths. Masked positions are replaced with `N`.
//!
//! ## Architecture
//!
//! The crate is a single streaming pipeline:
//! - `model`: The sequence record
//! - `formats`: File access (gzip by extension) and FASTA reading/writing
//! - `mask`: The masking stages and their configuration
//! - `sites`: Explicit site lists (inline or from a file)
//! - `pipeline`: Orchestration of read, mask and write
//!
//! ## Masking Order
//!
//! Sequences are uppercased, then terminal gaps and all gaps are filled
//! (when requested), then fixed-length ends are masked, and finally
//! explicit sites are masked unless they hold a gap.

pub mod formats;
pub mod mask;
pub mod model;
pub mod pipeline;
pub mod sites;
