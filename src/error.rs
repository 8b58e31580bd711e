//! Error types for seqstitch

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for seqstitch operations
pub type Result<T> = std::result::Result<T, StitchError>;

/// Error types that can occur while merging chunks
///
/// Every variant raised while merging carries the sequence name, the
/// coordinate, and the chunk file involved so upstream chunking defects can
/// be traced back to their source.
#[derive(Debug, Error)]
pub enum StitchError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be opened
    #[error("Cannot open {}: {source}", .path.display())]
    FileOpen {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A file opened fine but could not be read or decoded
    ///
    /// Covers non-UTF-8 text and truncated or corrupt gzip data. `line` is the
    /// last line read successfully (0 if the failure came before any line).
    #[error("Cannot read {} after line {line}: {source}", .path.display())]
    Read {
        /// File being read
        path: PathBuf,
        /// Last line read successfully
        line: usize,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid FASTA format
    #[error("Invalid FASTA format in {} at line {line}: {msg}", .path.display())]
    InvalidFastaFormat {
        /// File being parsed
        path: PathBuf,
        /// Line number where error occurred
        line: usize,
        /// Error message
        msg: String,
    },

    /// Chunk header does not follow `name|1|offset`
    #[error("Malformed chunk header '{header}' in {}: {msg}", .path.display())]
    MalformedHeader {
        /// Chunk file containing the header
        path: PathBuf,
        /// Header text (without '>')
        header: String,
        /// Error message
        msg: String,
    },

    /// First chunk of a sequence does not start at coordinate 0
    #[error("First chunk of '{name}' starts at offset {offset} instead of 0 ({})", .path.display())]
    InvalidFirstChunk {
        /// Sequence name
        name: String,
        /// Offending offset
        offset: u64,
        /// Chunk file
        path: PathBuf,
    },

    /// Chunk leaves an uncovered span after the previous chunk
    #[error(
        "Gap in '{name}': covered up to {covered_to} but next chunk starts at {offset} ({})",
        .path.display()
    )]
    ChunkGap {
        /// Sequence name
        name: String,
        /// Right edge of the merged sequence so far
        covered_to: u64,
        /// Offending offset
        offset: u64,
        /// Chunk file
        path: PathBuf,
    },

    /// Overlapping bases disagree ignoring case
    #[error(
        "Overlap mismatch in '{name}' at position {position}: previous '{previous}' vs current '{current}' ({})",
        .path.display()
    )]
    OverlapMismatch {
        /// Sequence name
        name: String,
        /// Absolute coordinate within the sequence
        position: u64,
        /// Base already emitted
        previous: char,
        /// Base from the incoming chunk
        current: char,
        /// Chunk file
        path: PathBuf,
    },

    /// Chunk starts before the segment it should follow
    #[error(
        "Chunk of '{name}' at offset {offset} starts before previous chunk at {previous_offset} ({})",
        .path.display()
    )]
    OutOfOrderChunk {
        /// Sequence name
        name: String,
        /// Offending offset
        offset: u64,
        /// Start of the tracked segment
        previous_offset: u64,
        /// Chunk file
        path: PathBuf,
    },

    /// Sequence name appears again after its record was sealed
    #[error("Sequence '{name}' reappears after its record was completed ({})", .path.display())]
    RecordReopened {
        /// Sequence name
        name: String,
        /// Chunk file
        path: PathBuf,
    },

    /// Manifest lists no chunk files
    #[error("Manifest {} lists no chunk files", .path.display())]
    EmptyManifest {
        /// Manifest path
        path: PathBuf,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// Invalid range or region
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}
