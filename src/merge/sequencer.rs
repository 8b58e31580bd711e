//! Output sequencer: record framing, tail patching, and line wrapping
//!
//! Merged bases for the open record flow through a small held-back window.
//! Everything left of the window is final and has already been written as
//! fixed-width lines; the window holds the bases a later chunk may still
//! overlap, so overlaps are patched in memory instead of seeking back in the
//! output. Line breaks are computed from the record-wide column when bases
//! leave the window, so the final wrapping depends only on the total record
//! length.
//!
//! ```text
//!   written lines                 window (patchable)
//! |ACGTACGT...ACGT\n|ACGT...|ACGTacgtAC|
//!                           ^ flushed  ^ record end
//! ```

use crate::error::{Result, StitchError};
use std::io::Write;

/// Default FASTA line width
pub const DEFAULT_LINE_WIDTH: usize = 80;

/// Streams FASTA records, keeping the recent tail editable
///
/// # Example
///
/// ```
/// use seqstitch::merge::OutputSequencer;
///
/// # fn main() -> seqstitch::Result<()> {
/// let mut out = OutputSequencer::new(Vec::new(), 4)?;
/// out.start_record("seqA")?;
/// out.append_new(b"ACGTAC")?;
/// out.patch_tail(2, b"ac")?; // last two bases become soft-masked
/// let bytes = out.finish()?;
/// assert_eq!(bytes, b">seqA\nACGT\nac\n");
/// # Ok(())
/// # }
/// ```
pub struct OutputSequencer<W: Write> {
    writer: W,
    line_width: usize,
    /// Bases already written on the current output line
    column: usize,
    /// Emitted but not yet written bases of the open record
    window: Vec<u8>,
    record_open: bool,
    record_length: u64,
}

impl<W: Write> OutputSequencer<W> {
    /// Create a sequencer writing lines of `line_width` bases
    ///
    /// Fails with [`StitchError::InvalidParameter`] if `line_width` is 0.
    pub fn new(writer: W, line_width: usize) -> Result<Self> {
        if line_width == 0 {
            return Err(StitchError::InvalidParameter {
                parameter: "line-width".to_string(),
                reason: "must be >= 1".to_string(),
            });
        }
        Ok(Self {
            writer,
            line_width,
            column: 0,
            window: Vec::new(),
            record_open: false,
            record_length: 0,
        })
    }

    /// Seal any open record and start a new one with a header line
    pub fn start_record(&mut self, name: &str) -> Result<()> {
        self.seal()?;
        self.writer.write_all(b">")?;
        self.writer.write_all(name.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.record_open = true;
        self.record_length = 0;
        Ok(())
    }

    /// Append bases that extend the open record
    pub fn append_new(&mut self, bases: &[u8]) -> Result<()> {
        self.ensure_open()?;
        self.window.extend_from_slice(bases);
        self.record_length += bases.len() as u64;
        Ok(())
    }

    /// Bases emitted `back` positions before the record end, `len` long
    ///
    /// Returns `None` if the span is no longer held in the window.
    pub fn tail(&self, back: usize, len: usize) -> Option<&[u8]> {
        if back > self.window.len() || len > back {
            return None;
        }
        let start = self.window.len() - back;
        Some(&self.window[start..start + len])
    }

    /// Overwrite already emitted bases with resolved ones
    ///
    /// The patch starts `back` positions before the record end. Patching never
    /// changes the record length, so line wrapping is unaffected.
    pub fn patch_tail(&mut self, back: usize, resolved: &[u8]) -> Result<()> {
        self.ensure_open()?;
        if back > self.window.len() || resolved.len() > back {
            return Err(StitchError::InvalidRange(format!(
                "cannot patch {} bases starting {} before record end: only {} bases retained",
                resolved.len(),
                back,
                self.window.len()
            )));
        }
        let start = self.window.len() - back;
        self.window[start..start + resolved.len()].copy_from_slice(resolved);
        Ok(())
    }

    /// Write out all but the last `keep` bases of the window
    pub fn retain_tail(&mut self, keep: usize) -> Result<()> {
        if self.window.len() <= keep {
            return Ok(());
        }
        let flush = self.window.len() - keep;
        let mut window = std::mem::take(&mut self.window);
        self.write_wrapped(&window[..flush])?;
        window.drain(..flush);
        self.window = window;
        Ok(())
    }

    /// Write the rest of the open record and terminate its last line
    ///
    /// Returns the sealed record's length, or `None` if no record was open.
    pub fn seal(&mut self) -> Result<Option<u64>> {
        if !self.record_open {
            return Ok(None);
        }
        self.retain_tail(0)?;
        if self.column > 0 {
            self.writer.write_all(b"\n")?;
            self.column = 0;
        }
        self.record_open = false;
        Ok(Some(self.record_length))
    }

    /// Bases emitted so far for the open (or last sealed) record
    pub fn record_length(&self) -> u64 {
        self.record_length
    }

    /// Number of bases held back in the window
    pub fn retained(&self) -> usize {
        self.window.len()
    }

    /// Seal the open record, flush, and return the writer
    pub fn finish(mut self) -> Result<W> {
        self.seal()?;
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.record_open {
            Ok(())
        } else {
            Err(StitchError::InvalidRange(
                "no open record to write bases into".to_string(),
            ))
        }
    }

    fn write_wrapped(&mut self, mut bases: &[u8]) -> Result<()> {
        while !bases.is_empty() {
            let take = (self.line_width - self.column).min(bases.len());
            self.writer.write_all(&bases[..take])?;
            self.column += take;
            bases = &bases[take..];
            if self.column == self.line_width {
                self.writer.write_all(b"\n")?;
                self.column = 0;
            }
        }
        Ok(())
    }
}
