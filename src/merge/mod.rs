//! Overlap merging of ordered sequence chunks
//!
//! Components, leaf to root:
//! - [`header`]: chunk header grammar (`name|1|offset`)
//! - [`state`]: tracker for the most recently emitted segment
//! - [`resolve`]: soft-mask preserving overlap resolution
//! - [`sequencer`]: record framing, tail patching, line wrapping
//! - [`engine`]: the state machine tying them together

pub mod config;
pub mod engine;
pub mod header;
pub mod resolve;
pub mod sequencer;
pub mod state;

pub use config::MergeConfig;
pub use engine::{MergeEngine, MergeSummary};
pub use header::{parse_chunk_header, ChunkHeader, HeaderError, MAX_NAME_LENGTH};
pub use resolve::{merge_base, resolve_overlap, BaseConflict};
pub use sequencer::{OutputSequencer, DEFAULT_LINE_WIDTH};
pub use state::{MergeState, MergeTracker};
