//! Masking stages for alignment sequences.
//!
//! Each stage rewrites a sequence in place, substituting [`UNKNOWN`] for
//! selected positions, and returns how many positions it changed.
//! Working on `&mut [u8]` means no stage can change the sequence length.
//!
//! [`MaskSpec::apply`] runs the stages in a fixed order:
//! 1. uppercase normalization
//! 2. terminal-gap masking (optional)
//! 3. all-gap masking (optional)
//! 4. prefix/suffix masking (no-op when both lengths are 0)
//! 5. explicit-site masking, skipping gaps (optional)

use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::{GAP, UNKNOWN};

/// Errors that can occur while masking a sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    #[error("Site {site} is out of range for a sequence of length {length}")]
    SiteOutOfRange { site: usize, length: usize },
}

/// Replaces the leading and trailing runs of gaps with `N`.
///
/// A sequence made only of gaps becomes all `N`.
pub fn mask_terminal_gaps(seq: &mut [u8]) -> usize {
    let leading = seq.iter().take_while(|&&b| b == GAP).count();
    let trailing = seq[leading..].iter().rev().take_while(|&&b| b == GAP).count();
    let len = seq.len();
    seq[..leading].fill(UNKNOWN);
    seq[len - trailing..].fill(UNKNOWN);
    leading + trailing
}

/// Replaces every gap with `N`.
pub fn mask_all_gaps(seq: &mut [u8]) -> usize {
    let mut masked = 0;
    for b in seq.iter_mut().filter(|b| **b == GAP) {
        *b = UNKNOWN;
        masked += 1;
    }
    masked
}

/// Fills a region with `N`, returning how many positions changed.
fn fill_unknown(region: &mut [u8]) -> usize {
    let changed = region.iter().filter(|&&b| b != UNKNOWN).count();
    region.fill(UNKNOWN);
    changed
}

/// Masks the first `prefix_len` and last `suffix_len` positions.
///
/// Lengths are clamped so the masked regions never exceed the sequence:
/// at most `len` positions from the start, then at most what remains
/// from the end.
pub fn mask_ends(seq: &mut [u8], prefix_len: usize, suffix_len: usize) -> usize {
    let prefix = prefix_len.min(seq.len());
    let masked = fill_unknown(&mut seq[..prefix]);

    if suffix_len == 0 {
        return masked;
    }
    let suffix = suffix_len.min(seq.len() - prefix);
    let start = seq.len() - suffix;
    masked + fill_unknown(&mut seq[start..])
}

/// Masks 1-based `sites`, leaving gaps untouched.
///
/// All sites are checked before anything is written, so on error the
/// sequence is left unmodified. Returns the number of positions changed.
pub fn mask_sites(seq: &mut [u8], sites: &BTreeSet<usize>) -> Result<usize, MaskError> {
    // Sites are sorted, so only the smallest and largest can be out of range
    let out_of_range = sites
        .first()
        .filter(|&&site| site == 0)
        .or_else(|| sites.last().filter(|&&site| site > seq.len()));
    if let Some(&site) = out_of_range {
        return Err(MaskError::SiteOutOfRange {
            site,
            length: seq.len(),
        });
    }

    let mut masked = 0;
    for &site in sites {
        let b = &mut seq[site - 1];
        if *b != GAP && *b != UNKNOWN {
            *b = UNKNOWN;
            masked += 1;
        }
    }
    Ok(masked)
}

/// Immutable masking configuration shared by every record of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskSpec {
    /// Fill leading and trailing gaps with `N`
    pub mask_terminal_gaps: bool,
    /// Fill every gap with `N`
    pub mask_all_gaps: bool,
    /// Number of positions to mask from the start
    pub prefix_len: usize,
    /// Number of positions to mask from the end
    pub suffix_len: usize,
    /// 1-based sites to mask
    pub sites: BTreeSet<usize>,
}

impl MaskSpec {
    /// Uppercases and masks `seq` in place.
    ///
    /// Returns the number of positions changed by masking; uppercasing is
    /// not counted. On error, stages before explicit-site masking have
    /// already been applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqmask::mask::MaskSpec;
    ///
    /// let spec = MaskSpec {
    ///     mask_terminal_gaps: true,
    ///     ..Default::default()
    /// };
    /// let mut seq = b"--acgt--".to_vec();
    /// assert_eq!(spec.apply(&mut seq).unwrap(), 4);
    /// assert_eq!(seq, b"NNACGTNN");
    /// ```
    pub fn apply(&self, seq: &mut [u8]) -> Result<usize, MaskError> {
        seq.make_ascii_uppercase();

        let mut masked = 0;
        if self.mask_terminal_gaps {
            masked += mask_terminal_gaps(seq);
        }
        if self.mask_all_gaps {
            masked += mask_all_gaps(seq);
        }
        masked += mask_ends(seq, self.prefix_len, self.suffix_len);
        if !self.sites.is_empty() {
            masked += mask_sites(seq, &self.sites)?;
        }
        Ok(masked)
    }

    /// Returns true if no stage would change an uppercased sequence.
    pub fn is_noop(&self) -> bool {
        !self.mask_terminal_gaps
            && !self.mask_all_gaps
            && self.prefix_len == 0
            && self.suffix_len == 0
            && self.sites.is_empty()
    }
}
