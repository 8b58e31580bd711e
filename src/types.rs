//! Common types used throughout seqstitch

use std::path::{Path, PathBuf};

/// A FASTA record as read from a chunk file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// Full header text (without '>' prefix, trimmed)
    pub header: String,
    /// DNA/RNA/protein sequence, line breaks removed
    pub sequence: Vec<u8>,
}

impl FastaRecord {
    /// Create a new FASTA record
    pub fn new(header: String, sequence: Vec<u8>) -> Self {
        Self { header, sequence }
    }
}

/// A fragment of a larger sequence, tagged with where it came from
///
/// The sequence bytes are owned by the record; the merge engine copies
/// whatever it needs to keep before the record is dropped.
///
/// # Examples
///
/// ```
/// use seqstitch::ChunkRecord;
///
/// let chunk = ChunkRecord::new("chr1", 100, b"ACGTacgt".to_vec());
/// assert_eq!(chunk.len(), 8);
/// assert_eq!(chunk.end(), 108);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRecord {
    /// Name of the sequence the chunk was cut from
    pub name: String,
    /// 0-based start coordinate within the full sequence
    pub offset: u64,
    /// Raw chunk bases (case preserved)
    pub sequence: Vec<u8>,
    /// File the chunk was read from
    pub source: PathBuf,
}

impl ChunkRecord {
    /// Create a chunk that did not come from a file
    pub fn new(name: impl Into<String>, offset: u64, sequence: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            offset,
            sequence,
            source: PathBuf::new(),
        }
    }

    /// Attach the chunk file path used in error reports
    pub fn with_source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = path.as_ref().to_path_buf();
        self
    }

    /// Number of bases in the chunk
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Check if the chunk carries no bases
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Exclusive end coordinate (`offset + length`)
    pub fn end(&self) -> u64 {
        self.offset + self.sequence.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_coordinates() {
        let chunk = ChunkRecord::new("seqA", 8, b"acGTNN".to_vec());
        assert_eq!(chunk.len(), 6);
        assert_eq!(chunk.end(), 14);
        assert!(!chunk.is_empty());
        assert_eq!(chunk.source, PathBuf::new());
    }

    #[test]
    fn test_with_source() {
        let chunk = ChunkRecord::new("seqA", 0, b"A".to_vec()).with_source("/tmp/c0.fa");
        assert_eq!(chunk.source, PathBuf::from("/tmp/c0.fa"));
    }
}
