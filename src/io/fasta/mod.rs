//! FASTA format support: streaming parser for chunk files
//!
//! # Basic Usage
//!
//! ```no_run
//! use seqstitch::io::fasta::FastaStream;
//!
//! let stream = FastaStream::from_path("chunk_0.fa.gz")?;
//! for record in stream {
//!     let record = record?;
//!     println!("{}: {} bp", record.header, record.sequence.len());
//! }
//! # Ok::<(), seqstitch::StitchError>(())
//! ```

mod parser;

pub use parser::FastaStream;
