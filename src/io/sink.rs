//! Output destinations for merged FASTA
//!
//! `DataSink` is the write counterpart to
//! [`DataSource`](crate::io::compression::DataSource): the merge engine only
//! sees a `Write`, and the sink decides where the bytes land.
//!
//! # Example
//!
//! ```
//! use seqstitch::io::DataSink;
//!
//! // Write to a gzip compressed file
//! let sink = DataSink::from_path("merged.fa.gz");
//! assert!(sink.is_compressed());
//!
//! // "-" means standard output
//! let sink = DataSink::from_arg("-");
//! assert!(matches!(sink, DataSink::Stdout));
//! ```

use std::path::{Path, PathBuf};

/// Output destination for streaming writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSink {
    /// Write to a local file path
    ///
    /// `.gz`/`.bgz` extensions select gzip compression.
    Local(PathBuf),

    /// Write to standard output (always uncompressed)
    Stdout,
}

impl DataSink {
    /// Create a sink from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::Local(path.as_ref().to_path_buf())
    }

    /// Create a sink for standard output
    pub fn stdout() -> Self {
        Self::Stdout
    }

    /// Create a sink from a command-line argument, where `-` is stdout
    pub fn from_arg<P: AsRef<Path>>(arg: P) -> Self {
        if arg.as_ref() == Path::new("-") {
            Self::Stdout
        } else {
            Self::from_path(arg)
        }
    }

    /// Get the file extension if this is a local file sink
    pub(crate) fn extension(&self) -> Option<&str> {
        match self {
            Self::Local(path) => path.extension().and_then(|s| s.to_str()),
            Self::Stdout => None,
        }
    }

    /// Check if this sink represents a compressed output
    pub fn is_compressed(&self) -> bool {
        matches!(self.extension(), Some("gz") | Some("bgz") | Some("gzip"))
    }
}

impl std::fmt::Display for DataSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Stdout => write!(f, "<stdout>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        let sink = DataSink::from_path("merged.fa");
        match sink {
            DataSink::Local(path) => {
                assert_eq!(path, PathBuf::from("merged.fa"));
            }
            _ => panic!("Expected Local variant"),
        }
    }

    #[test]
    fn test_from_arg_dash_is_stdout() {
        assert_eq!(DataSink::from_arg("-"), DataSink::Stdout);
        assert_eq!(
            DataSink::from_arg("out.fa"),
            DataSink::Local(PathBuf::from("out.fa"))
        );
    }

    #[test]
    fn test_extension_detection() {
        assert_eq!(DataSink::from_path("merged.fa.gz").extension(), Some("gz"));
        assert_eq!(DataSink::from_path("merged.fa.bgz").extension(), Some("bgz"));
        assert_eq!(DataSink::from_path("merged.fa").extension(), Some("fa"));
        assert_eq!(DataSink::stdout().extension(), None);
    }

    #[test]
    fn test_is_compressed() {
        assert!(DataSink::from_path("merged.fa.gz").is_compressed());
        assert!(DataSink::from_path("merged.fa.bgz").is_compressed());
        assert!(!DataSink::from_path("merged.fa").is_compressed());
        assert!(!DataSink::stdout().is_compressed());
    }

    #[test]
    fn test_display() {
        assert_eq!(DataSink::stdout().to_string(), "<stdout>");
        assert_eq!(DataSink::from_path("out.fa").to_string(), "out.fa");
    }
}
