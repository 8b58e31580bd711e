//! Merge state tracking
//!
//! The tracker remembers the most recently emitted segment of the open
//! record. Its right edge always equals the length of the merged sequence so
//! far, which is what overlaps and gaps are measured against.

/// Coordinates of the most recently finalized segment
///
/// The segment's trailing bases are not copied here. They stay in the
/// [`OutputSequencer`](crate::merge::OutputSequencer) window, which holds the
/// last `length` bases of the record as already merged, so the next overlap
/// is resolved against earlier soft-mask unions rather than raw chunk bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeState {
    /// Sequence name
    pub name: String,
    /// Start coordinate of the segment
    pub offset: u64,
    /// Number of bases in the segment
    pub length: u64,
}

impl MergeState {
    /// Exclusive right edge (`offset + length`)
    pub fn end(&self) -> u64 {
        self.offset + self.length
    }
}

/// Owner of the single live [`MergeState`]
///
/// # Example
///
/// ```
/// use seqstitch::merge::MergeTracker;
///
/// let mut tracker = MergeTracker::new();
/// assert!(tracker.current().is_none());
///
/// tracker.record("chr1", 0, 100);
/// // Contained chunk: boundary does not regress
/// assert!(!tracker.record("chr1", 20, 30));
/// assert_eq!(tracker.current().unwrap().end(), 100);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MergeTracker {
    current: Option<MergeState>,
}

impl MergeTracker {
    /// Create a tracker with no segment ("none" state)
    pub fn new() -> Self {
        Self::default()
    }

    /// The tracked segment, if any chunk has been recorded
    pub fn current(&self) -> Option<&MergeState> {
        self.current.as_ref()
    }

    /// Record a merged segment
    ///
    /// A new name resets the state unconditionally. For the same name the
    /// state only moves when the segment reaches past the tracked right edge.
    /// Returns whether the tracked state changed.
    pub fn record(&mut self, name: &str, offset: u64, length: u64) -> bool {
        match self.current.as_mut() {
            Some(state) if state.name == name => {
                if offset + length > state.end() {
                    state.offset = offset;
                    state.length = length;
                    true
                } else {
                    false
                }
            }
            _ => {
                self.current = Some(MergeState {
                    name: name.to_string(),
                    offset,
                    length,
                });
                true
            }
        }
    }

    /// Drop the tracked state
    pub fn clear(&mut self) -> Option<MergeState> {
        self.current.take()
    }
}
