//! Merge engine: turns an ordered chunk stream into FASTA records
//!
//! For every chunk the engine decides whether it opens a new record or
//! continues the open one. Continuing chunks are split into the part that
//! overlaps bases already emitted (resolved against the retained tail and
//! patched in place) and the part that extends the record (appended).
//!
//! ```text
//! record so far      |ACGTACGTAC|
//! next chunk                 |acGTNN|
//!                             ^^ overlap: resolved, patched
//!                               ^^^^ appended
//! result             |ACGTACGTacGTNN|
//! ```

use crate::error::{Result, StitchError};
use crate::merge::config::MergeConfig;
use crate::merge::resolve::{newly_masked, resolve_overlap};
use crate::merge::sequencer::OutputSequencer;
use crate::merge::state::{MergeState, MergeTracker};
use crate::types::ChunkRecord;
use log::debug;
use std::collections::HashSet;
use std::io::Write;

/// Counters collected over a merge run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeSummary {
    /// Chunks merged
    pub chunks: usize,
    /// Records sealed
    pub records: usize,
    /// Bases written across all records
    pub bases: u64,
    /// Bases that were covered by more than one chunk
    pub overlap_bases: u64,
    /// Overlap bases that became soft-masked because only the later chunk masked them
    pub masked_by_merge: u64,
}

/// Streaming merge state machine
///
/// # Example
///
/// ```
/// use seqstitch::{ChunkRecord, MergeConfig, MergeEngine};
///
/// # fn main() -> seqstitch::Result<()> {
/// let mut engine = MergeEngine::new(Vec::new(), MergeConfig::default())?;
/// engine.merge_chunk(&ChunkRecord::new("seqA", 0, b"ACGTACGTAC".to_vec()))?;
/// engine.merge_chunk(&ChunkRecord::new("seqA", 8, b"acGTNN".to_vec()))?;
/// let (output, summary) = engine.finish()?;
///
/// assert_eq!(output, b">seqA\nACGTACGTacGTNN\n");
/// assert_eq!(summary.bases, 14);
/// # Ok(())
/// # }
/// ```
pub struct MergeEngine<W: Write> {
    tracker: MergeTracker,
    sequencer: OutputSequencer<W>,
    sealed: HashSet<String>,
    summary: MergeSummary,
}

impl<W: Write> MergeEngine<W> {
    /// Create an engine writing merged records to `writer`
    pub fn new(writer: W, config: MergeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tracker: MergeTracker::new(),
            sequencer: OutputSequencer::new(writer, config.line_width)?,
            sealed: HashSet::new(),
            summary: MergeSummary::default(),
        })
    }

    /// Merge the next chunk of the stream
    pub fn merge_chunk(&mut self, chunk: &ChunkRecord) -> Result<()> {
        match self.tracker.current().cloned() {
            Some(state) if state.name == chunk.name => self.continue_record(&state, chunk)?,
            _ => self.open_record(chunk)?,
        }

        self.tracker.record(&chunk.name, chunk.offset, chunk.len() as u64);
        // The tracked segment ends at the record end, so it is exactly the
        // span the next chunk may overlap.
        let keep = self.tracker.current().map_or(0, |state| state.length as usize);
        self.sequencer.retain_tail(keep)?;

        self.summary.chunks += 1;
        debug!(
            "Merged {}:{}-{} from {}",
            chunk.name,
            chunk.offset,
            chunk.end(),
            chunk.source.display()
        );
        Ok(())
    }

    /// Merge every chunk of an iterator, stopping at the first error
    pub fn merge_all<I>(&mut self, chunks: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<ChunkRecord>>,
    {
        for chunk in chunks {
            self.merge_chunk(&chunk?)?;
        }
        Ok(())
    }

    /// Whether a record is open (`InRecord`) rather than `Idle`
    pub fn is_in_record(&self) -> bool {
        self.tracker.current().is_some()
    }

    /// The merge state tracker
    pub fn tracker(&self) -> &MergeTracker {
        &self.tracker
    }

    /// Counters so far (records are counted when sealed)
    pub fn summary(&self) -> &MergeSummary {
        &self.summary
    }

    /// Seal the last record and return the writer with the run summary
    pub fn finish(mut self) -> Result<(W, MergeSummary)> {
        self.seal_record()?;
        let writer = self.sequencer.finish()?;
        Ok((writer, self.summary))
    }

    fn open_record(&mut self, chunk: &ChunkRecord) -> Result<()> {
        if self.sealed.contains(&chunk.name) {
            return Err(StitchError::RecordReopened {
                name: chunk.name.clone(),
                path: chunk.source.clone(),
            });
        }
        if chunk.offset != 0 {
            return Err(StitchError::InvalidFirstChunk {
                name: chunk.name.clone(),
                offset: chunk.offset,
                path: chunk.source.clone(),
            });
        }

        self.seal_record()?;
        self.sequencer.start_record(&chunk.name)?;
        self.sequencer.append_new(&chunk.sequence)?;
        self.summary.bases += chunk.len() as u64;
        Ok(())
    }

    fn continue_record(&mut self, state: &MergeState, chunk: &ChunkRecord) -> Result<()> {
        let covered_to = state.end();
        if chunk.offset > covered_to {
            return Err(StitchError::ChunkGap {
                name: chunk.name.clone(),
                covered_to,
                offset: chunk.offset,
                path: chunk.source.clone(),
            });
        }
        if chunk.offset < state.offset {
            return Err(StitchError::OutOfOrderChunk {
                name: chunk.name.clone(),
                offset: chunk.offset,
                previous_offset: state.offset,
                path: chunk.source.clone(),
            });
        }

        // Distance from the record end back to the chunk start; bounded by
        // the tracked segment length, which came from a chunk in memory.
        let back = (covered_to - chunk.offset) as usize;
        let overlap = back.min(chunk.len());

        if overlap > 0 {
            let previous = self.sequencer.tail(back, overlap).ok_or_else(|| {
                StitchError::InvalidRange(format!(
                    "overlap of {} bases at {}:{} is no longer retained",
                    overlap, chunk.name, chunk.offset
                ))
            })?;
            let resolved = resolve_overlap(previous, &chunk.sequence[..overlap]).map_err(
                |conflict| StitchError::OverlapMismatch {
                    name: chunk.name.clone(),
                    position: chunk.offset + conflict.index as u64,
                    previous: char::from(conflict.previous),
                    current: char::from(conflict.current),
                    path: chunk.source.clone(),
                },
            )?;
            let masked = newly_masked(previous, &resolved);

            self.sequencer.patch_tail(back, &resolved)?;
            self.summary.overlap_bases += overlap as u64;
            self.summary.masked_by_merge += masked as u64;
        }

        if chunk.len() > back {
            self.sequencer.append_new(&chunk.sequence[back..])?;
            self.summary.bases += (chunk.len() - back) as u64;
        }
        Ok(())
    }

    fn seal_record(&mut self) -> Result<()> {
        let Some(state) = self.tracker.clear() else {
            return Ok(());
        };
        if let Some(length) = self.sequencer.seal()? {
            debug!("Sealed record {} ({} bp)", state.name, length);
            self.summary.records += 1;
        }
        self.sealed.insert(state.name);
        Ok(())
    }
}
