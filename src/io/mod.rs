//! I/O module: manifest, chunk stream, FASTA parsing, and compression
//!
//! Input is read lazily, one chunk file at a time; output goes through a
//! buffered, optionally gzip compressed writer.

mod chunks;
pub mod compression;
pub mod fasta;
mod manifest;
pub mod sink;

pub use chunks::ChunkSource;
pub use compression::{CompressedReader, CompressedWriter, DataSource, MMAP_THRESHOLD};
pub use fasta::FastaStream;
pub use manifest::Manifest;
pub use sink::DataSink;
