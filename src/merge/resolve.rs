//! Overlap resolution with soft-mask union
//!
//! Two chunks that cover the same coordinates must agree on every base when
//! case is ignored. Case carries masking: a lowercase base marks a repeat,
//! and a position stays masked if either chunk masked it.
//!
//! # Examples
//!
//! ```
//! use seqstitch::merge::resolve_overlap;
//!
//! let merged = resolve_overlap(b"ACgt", b"acGT").unwrap();
//! assert_eq!(merged, b"acgt");
//!
//! let conflict = resolve_overlap(b"ACGT", b"ACCT").unwrap_err();
//! assert_eq!(conflict.index, 2);
//! ```

/// A position where overlapping chunks disagree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseConflict {
    /// Index within the overlap
    pub index: usize,
    /// Base already emitted
    pub previous: u8,
    /// Base from the incoming chunk
    pub current: u8,
}

/// Merge one pair of overlapping bases
///
/// Returns `None` when the bases differ ignoring case. Otherwise the base is
/// lowercase if either input is lowercase. Non-letters (gaps, `*`) pass
/// through unchanged.
#[inline]
pub fn merge_base(previous: u8, current: u8) -> Option<u8> {
    if !previous.eq_ignore_ascii_case(&current) {
        return None;
    }
    if previous.is_ascii_lowercase() || current.is_ascii_lowercase() {
        Some(current.to_ascii_lowercase())
    } else {
        Some(current)
    }
}

/// Resolve an overlapping span
///
/// Both slices cover the same coordinates, so they must have the same
/// length. The result has that length too.
pub fn resolve_overlap(previous: &[u8], current: &[u8]) -> Result<Vec<u8>, BaseConflict> {
    debug_assert_eq!(previous.len(), current.len());

    let mut merged = Vec::with_capacity(current.len());
    for (index, (&p, &c)) in previous.iter().zip(current).enumerate() {
        match merge_base(p, c) {
            Some(base) => merged.push(base),
            None => {
                return Err(BaseConflict {
                    index,
                    previous: p,
                    current: c,
                })
            }
        }
    }
    Ok(merged)
}

/// Count positions masked in `merged` but not in `previous`
///
/// Used for run statistics: how many bases an overlap newly soft-masked.
pub fn newly_masked(previous: &[u8], merged: &[u8]) -> usize {
    previous
        .iter()
        .zip(merged)
        .filter(|(p, m)| !p.is_ascii_lowercase() && m.is_ascii_lowercase())
        .count()
}
