//! Merge configuration

use crate::error::{Result, StitchError};
use crate::merge::header::MAX_NAME_LENGTH;
use crate::merge::sequencer::DEFAULT_LINE_WIDTH;

/// Tunable merge parameters
///
/// # Example
///
/// ```
/// use seqstitch::MergeConfig;
///
/// let config = MergeConfig::default().with_line_width(60);
/// assert_eq!(config.line_width, 60);
/// assert!(config.validate().is_ok());
/// assert!(MergeConfig::default().with_line_width(0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeConfig {
    /// Bases per output sequence line
    pub line_width: usize,
    /// Longest accepted sequence name in chunk headers
    pub max_name_length: usize,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            max_name_length: MAX_NAME_LENGTH,
        }
    }
}

impl MergeConfig {
    /// Set the output line width
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    /// Set the sequence name length limit
    pub fn with_max_name_length(mut self, max_name_length: usize) -> Self {
        self.max_name_length = max_name_length;
        self
    }

    /// Reject values the merge cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.line_width == 0 {
            return Err(StitchError::InvalidParameter {
                parameter: "line-width".to_string(),
                reason: "must be >= 1".to_string(),
            });
        }
        if self.max_name_length == 0 {
            return Err(StitchError::InvalidParameter {
                parameter: "max-name-length".to_string(),
                reason: "must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}
