//! Lazy stream of chunk records driven by a manifest
//!
//! Chunk files are opened one at a time, in manifest order, and every FASTA
//! record they contain becomes a [`ChunkRecord`] after its header is parsed.
//! At most one chunk file is open and one record is in memory at any moment.

use crate::error::{Result, StitchError};
use crate::io::compression::CompressedReader;
use crate::io::fasta::FastaStream;
use crate::io::Manifest;
use crate::merge::header::{parse_chunk_header, MAX_NAME_LENGTH};
use crate::types::{ChunkRecord, FastaRecord};
use log::{debug, warn};
use std::path::PathBuf;
use std::vec::IntoIter;

/// Ordered, non-restartable stream of chunks
///
/// # Example
///
/// ```no_run
/// use seqstitch::io::{ChunkSource, Manifest};
///
/// let manifest = Manifest::from_path("chunks.txt")?;
/// for chunk in ChunkSource::new(manifest) {
///     let chunk = chunk?;
///     println!("{} @ {}: {} bp", chunk.name, chunk.offset, chunk.len());
/// }
/// # Ok::<(), seqstitch::StitchError>(())
/// ```
pub struct ChunkSource {
    paths: IntoIter<PathBuf>,
    current: Option<FastaStream<CompressedReader>>,
    current_records: usize,
    max_name_length: usize,
    finished: bool,
}

impl ChunkSource {
    /// Stream the chunks listed in a manifest
    pub fn new(manifest: Manifest) -> Self {
        Self::from_paths(manifest.into_paths())
    }

    /// Stream chunks from an explicit list of chunk files
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            paths: paths.into_iter(),
            current: None,
            current_records: 0,
            max_name_length: MAX_NAME_LENGTH,
            finished: false,
        }
    }

    /// Override the sequence name length limit
    pub fn with_max_name_length(mut self, max_name_length: usize) -> Self {
        self.max_name_length = max_name_length;
        self
    }

    fn to_chunk(&self, record: FastaRecord, path: PathBuf) -> Result<ChunkRecord> {
        let header = parse_chunk_header(&record.header, self.max_name_length).map_err(|e| {
            StitchError::MalformedHeader {
                path: path.clone(),
                header: record.header.clone(),
                msg: e.to_string(),
            }
        })?;

        Ok(ChunkRecord {
            name: header.name,
            offset: header.offset,
            sequence: record.sequence,
            source: path,
        })
    }

    fn read_chunk(&mut self) -> Result<Option<ChunkRecord>> {
        loop {
            if let Some(stream) = self.current.as_mut() {
                match stream.next() {
                    Some(record) => {
                        let record = record?;
                        let path = stream.path().to_path_buf();
                        self.current_records += 1;
                        return self.to_chunk(record, path).map(Some);
                    }
                    None => {
                        if self.current_records == 0 {
                            warn!("Chunk file {} contains no records", stream.path().display());
                        }
                        self.current = None;
                    }
                }
            }

            let Some(path) = self.paths.next() else {
                return Ok(None);
            };
            debug!("Reading chunk file {}", path.display());
            self.current = Some(FastaStream::from_path(&path)?);
            self.current_records = 0;
        }
    }
}

impl Iterator for ChunkSource {
    type Item = Result<ChunkRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_chunk() {
            Ok(Some(chunk)) => Some(Ok(chunk)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
