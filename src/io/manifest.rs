//! Manifest of chunk files
//!
//! A manifest is a text file listing chunk file paths separated by any
//! whitespace (usually one per line). Paths are used as written, so relative
//! paths resolve against the working directory. Order is significant: chunks
//! are merged in exactly the order they are listed.

use crate::error::{Result, StitchError};
use crate::io::compression::{CompressedReader, DataSource};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Ordered list of chunk files to merge
///
/// # Example
///
/// ```
/// use seqstitch::io::Manifest;
/// use std::io::Cursor;
///
/// let manifest = Manifest::from_reader(Cursor::new("c0.fa c1.fa\n\nc2.fa\n"), "list.txt")?;
/// assert_eq!(manifest.len(), 3);
/// # Ok::<(), seqstitch::StitchError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    path: PathBuf,
    chunk_paths: Vec<PathBuf>,
}

impl Manifest {
    /// Read a manifest file (plain or gzip)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = CompressedReader::new(DataSource::from_path(&path))?;
        Self::from_reader(reader, path)
    }

    /// Read a manifest from any reader; `path` is only used in errors
    pub fn from_reader<R: Read, P: AsRef<Path>>(mut reader: R, path: P) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| StitchError::Read {
                path: path.as_ref().to_path_buf(),
                line: 0,
                source,
            })?;

        let chunk_paths: Vec<PathBuf> = text.split_whitespace().map(PathBuf::from).collect();
        if chunk_paths.is_empty() {
            return Err(StitchError::EmptyManifest {
                path: path.as_ref().to_path_buf(),
            });
        }

        Ok(Self {
            path: path.as_ref().to_path_buf(),
            chunk_paths,
        })
    }

    /// Path of the manifest itself
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Chunk files in merge order
    pub fn chunk_paths(&self) -> &[PathBuf] {
        &self.chunk_paths
    }

    /// Number of chunk files listed
    pub fn len(&self) -> usize {
        self.chunk_paths.len()
    }

    /// Always false for a successfully read manifest
    pub fn is_empty(&self) -> bool {
        self.chunk_paths.is_empty()
    }

    /// Consume the manifest, returning the chunk paths
    pub fn into_paths(self) -> Vec<PathBuf> {
        self.chunk_paths
    }
}
