//! seqstitch: streaming reassembly of overlapping FASTA chunks
//!
//! # Overview
//!
//! Large genomes are often cut into overlapping chunks so they can be
//! processed in parallel. seqstitch puts them back together: chunks tagged
//! `name|1|offset` are merged, in manifest order, into one FASTA record per
//! sequence name. Overlapping bases must agree ignoring case, and a base
//! soft-masked (lowercase) in either chunk stays soft-masked.
//!
//! ## Key Features
//!
//! - **Streaming**: memory is bounded by the largest chunk, not the genome
//! - **Soft-mask union**: repeat annotations survive every overlap
//! - **Strict**: gaps, conflicting overlaps and misplaced chunks are fatal
//! - **Compression**: gzip chunk files and `.gz` output handled transparently
//!
//! ## Quick Start
//!
//! ```no_run
//! use seqstitch::{merge_manifest, DataSink, MergeConfig};
//!
//! # fn main() -> seqstitch::Result<()> {
//! let summary = merge_manifest(
//!     "chunks.txt",
//!     DataSink::from_path("genome.fa.gz"),
//!     MergeConfig::default(),
//! )?;
//! println!("{} records, {} bp", summary.records, summary.bases);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`io`]: manifest, chunk stream, FASTA parsing, compression
//! - [`merge`]: header grammar, state tracking, overlap resolution, output
//! - [`types`]: chunk and FASTA records
//! - [`error`]: error type shared by everything above

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod io;
pub mod merge;
pub mod types;

pub use error::{Result, StitchError};
pub use io::{ChunkSource, DataSink, FastaStream, Manifest};
pub use merge::{MergeConfig, MergeEngine, MergeSummary};
pub use types::{ChunkRecord, FastaRecord};

use io::CompressedWriter;
use log::info;
use std::io::Write;
use std::path::Path;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Merge an ordered chunk stream into `writer`
///
/// Stops at the first error; whatever was written before it is left as is.
///
/// # Example
///
/// ```
/// use seqstitch::{merge_chunks, ChunkRecord, MergeConfig};
///
/// # fn main() -> seqstitch::Result<()> {
/// let chunks = vec![
///     Ok(ChunkRecord::new("seqA", 0, b"ACGTACGTAC".to_vec())),
///     Ok(ChunkRecord::new("seqA", 8, b"acGTNN".to_vec())),
/// ];
/// let (output, summary) = merge_chunks(chunks, Vec::new(), MergeConfig::default())?;
/// assert_eq!(output, b">seqA\nACGTACGTacGTNN\n");
/// assert_eq!(summary.overlap_bases, 2);
/// # Ok(())
/// # }
/// ```
pub fn merge_chunks<I, W>(chunks: I, writer: W, config: MergeConfig) -> Result<(W, MergeSummary)>
where
    I: IntoIterator<Item = Result<ChunkRecord>>,
    W: Write,
{
    let mut engine = MergeEngine::new(writer, config)?;
    engine.merge_all(chunks)?;
    engine.finish()
}

/// Merge every chunk listed in a manifest file into `sink`
pub fn merge_manifest<P: AsRef<Path>>(
    manifest: P,
    sink: DataSink,
    config: MergeConfig,
) -> Result<MergeSummary> {
    config.validate()?;
    let manifest = Manifest::from_path(manifest)?;
    info!(
        "Merging {} chunk files listed in {} into {}",
        manifest.len(),
        manifest.path().display(),
        sink
    );

    let chunks = ChunkSource::new(manifest).with_max_name_length(config.max_name_length);
    let writer = CompressedWriter::new(sink)?;
    let (writer, summary) = merge_chunks(chunks, writer, config)?;
    writer.finish()?;

    info!(
        "Merged {} chunks into {} records ({} bp, {} bp overlapping, {} bp newly soft-masked)",
        summary.chunks, summary.records, summary.bases, summary.overlap_bases, summary.masked_by_merge
    );
    Ok(summary)
}
