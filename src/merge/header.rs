//! Chunk header grammar
//!
//! The chunking step labels every chunk with the sequence it came from and
//! where it starts:
//!
//! ```text
//! header := name "|1|" offset [ terminator rest ]
//! name   := any text not containing "|1|", 1..=MAX_NAME_LENGTH bytes
//! offset := ASCII digit+            (decimal, fits in u64)
//! terminator := whitespace | "|"
//! ```
//!
//! The first `|1|` splits name from coordinates. Text after the offset
//! terminator is ignored.

use thiserror::Error;

/// Longest accepted sequence name, in bytes
pub const MAX_NAME_LENGTH: usize = 511;

/// Fixed tag separating the name from the offset
const SEGMENT_TAG: &str = "|1|";

/// Parsed chunk header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Sequence name
    pub name: String,
    /// 0-based start coordinate of the chunk
    pub offset: u64,
}

/// Reason a header was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// No `|1|` tag
    #[error("missing '|1|' delimiter")]
    MissingTag,
    /// Nothing before the tag
    #[error("empty sequence name")]
    EmptyName,
    /// Name longer than the configured limit
    #[error("sequence name is {length} bytes (limit {limit})")]
    NameTooLong {
        /// Actual name length in bytes
        length: usize,
        /// Limit in force
        limit: usize,
    },
    /// No digits after the tag, or the value overflows
    #[error("invalid offset '{0}'")]
    InvalidOffset(String),
}

/// Parse a chunk header (without the leading '>')
///
/// # Examples
///
/// ```
/// use seqstitch::merge::header::{parse_chunk_header, MAX_NAME_LENGTH};
///
/// let header = parse_chunk_header("chrX|1|1500000", MAX_NAME_LENGTH).unwrap();
/// assert_eq!(header.name, "chrX");
/// assert_eq!(header.offset, 1_500_000);
///
/// assert!(parse_chunk_header("chrX:1500000", MAX_NAME_LENGTH).is_err());
/// ```
pub fn parse_chunk_header(header: &str, max_name_length: usize) -> Result<ChunkHeader, HeaderError> {
    let split = header.find(SEGMENT_TAG).ok_or(HeaderError::MissingTag)?;
    let name = &header[..split];

    if name.is_empty() {
        return Err(HeaderError::EmptyName);
    }
    if name.len() > max_name_length {
        return Err(HeaderError::NameTooLong {
            length: name.len(),
            limit: max_name_length,
        });
    }

    let rest = &header[split + SEGMENT_TAG.len()..];
    let field = rest
        .split(|c: char| c == '|' || c.is_whitespace())
        .next()
        .unwrap_or("");

    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HeaderError::InvalidOffset(field.to_string()));
    }
    let offset = field
        .parse::<u64>()
        .map_err(|_| HeaderError::InvalidOffset(field.to_string()))?;

    Ok(ChunkHeader {
        name: name.to_string(),
        offset,
    })
}
