//! FASTA streaming parser
//!
//! # Format
//!
//! FASTA format consists of:
//! - Header line starting with '>'
//! - One or more sequence lines (can be wrapped)
//!
//! Example:
//! ```text
//! >chr1|1|0
//! GATTACAGATTACA
//! TGCATGCA
//! >chr1|1|20
//! ACGTACGT
//! ```
//!
//! Only one record is held in memory at a time. Line buffers are reused
//! across records.

use crate::error::{Result, StitchError};
use crate::io::compression::{CompressedReader, DataSource};
use crate::types::FastaRecord;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// FASTA streaming parser yielding one record at a time
///
/// Unlike most FASTA readers the full header line is kept, because chunk
/// coordinates live in the header rather than in a description field.
///
/// # Example
///
/// ```no_run
/// use seqstitch::FastaStream;
///
/// let stream = FastaStream::from_path("chunk_0.fa")?;
/// for record in stream {
///     let record = record?;
///     println!("{}: {} bp", record.header, record.sequence.len());
/// }
/// # Ok::<(), seqstitch::StitchError>(())
/// ```
pub struct FastaStream<R: BufRead> {
    reader: R,
    path: PathBuf,
    line_buffer: String,
    line_number: usize,
    finished: bool,
    /// Peek buffer for look-ahead (to detect next record start)
    next_line: Option<String>,
}

impl FastaStream<CompressedReader> {
    /// Create a FASTA stream from a data source
    pub fn new(source: DataSource) -> Result<Self> {
        let path = source.path().to_path_buf();
        let reader = CompressedReader::new(source)?;
        Ok(Self::from_reader(reader).with_path(path))
    }

    /// Create a FASTA stream from a local file path (plain or gzip)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(DataSource::from_path(path))
    }
}

impl<R: BufRead> FastaStream<R> {
    /// Create a FASTA stream from any buffered reader
    ///
    /// This is useful for testing or reading from in-memory sources.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            path: PathBuf::new(),
            line_buffer: String::with_capacity(256),
            line_number: 0,
            finished: false,
            next_line: None,
        }
    }

    /// Set the path reported in parse errors
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    /// Path this stream reads from (empty for in-memory readers)
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_line(&mut self) -> Result<usize> {
        self.line_buffer.clear();
        self.reader
            .read_line(&mut self.line_buffer)
            .map_err(|source| StitchError::Read {
                path: self.path.clone(),
                line: self.line_number,
                source,
            })
    }

    fn format_error(&self, msg: String) -> StitchError {
        StitchError::InvalidFastaFormat {
            path: self.path.clone(),
            line: self.line_number,
            msg,
        }
    }

    /// Read a single FASTA record
    fn read_record(&mut self) -> Result<Option<FastaRecord>> {
        // Find the header, skipping blank lines
        let header = loop {
            if let Some(peeked) = self.next_line.take() {
                break peeked;
            }
            if self.finished {
                return Ok(None);
            }
            if self.read_line()? == 0 {
                self.finished = true;
                return Ok(None);
            }
            self.line_number += 1;
            let line = self.line_buffer.trim();
            if !line.is_empty() {
                break line.to_string();
            }
        };

        let Some(header) = header.strip_prefix('>') else {
            return Err(self.format_error(format!(
                "Expected '>' at start of header, got: {}",
                header
            )));
        };
        let header = header.trim().to_string();

        // Read sequence lines until next header or EOF
        let mut sequence = Vec::new();

        loop {
            if self.read_line()? == 0 {
                self.finished = true;
                break;
            }
            self.line_number += 1;
            let line = self.line_buffer.trim();

            if line.is_empty() {
                continue;
            }

            if line.starts_with('>') {
                self.next_line = Some(line.to_string());
                break;
            }

            sequence.extend_from_slice(line.as_bytes());
        }

        if sequence.is_empty() {
            return Err(self.format_error(format!("Record '{}' has no sequence", header)));
        }

        Ok(Some(FastaRecord::new(header, sequence)))
    }
}

impl<R: BufRead> Iterator for FastaStream<R> {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.finished = true;
                self.next_line = None;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    fn stream(data: &[u8]) -> FastaStream<BufReader<Cursor<Vec<u8>>>> {
        FastaStream::from_reader(BufReader::new(Cursor::new(data.to_vec())))
    }

    #[test]
    fn test_parse_single_record() {
        let mut stream = stream(b">seqA|1|0\nGATTACA\n");

        let record = stream.next().unwrap().unwrap();
        assert_eq!(record.header, "seqA|1|0");
        assert_eq!(record.sequence, b"GATTACA");

        assert!(stream.next().is_none());
    }

    #[test]
    fn test_parse_multiline_soft_masked() {
        let records: Vec<_> = stream(b">seqA|1|0\nGATT\nacaN\n>seqB|1|0\nACGT\n")
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sequence, b"GATTacaN");
        assert_eq!(records[1].header, "seqB|1|0");
    }

    #[test]
    fn test_header_kept_whole() {
        let mut stream = stream(b">chr 1|1|40 extra words\nACGT\n");
        let record = stream.next().unwrap().unwrap();
        assert_eq!(record.header, "chr 1|1|40 extra words");
    }

    #[test]
    fn test_parse_with_empty_lines_and_crlf() {
        let records: Vec<_> = stream(b"\n>seqA|1|0\r\n\r\nGATTACA\r\n\n")
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].header, "seqA|1|0");
        assert_eq!(records[0].sequence, b"GATTACA");
    }

    #[test]
    fn test_invalid_no_header() {
        let mut stream = stream(b"GATTACA\n").with_path("bad.fa");

        match stream.next().unwrap() {
            Err(StitchError::InvalidFastaFormat { path, line, .. }) => {
                assert_eq!(path, PathBuf::from("bad.fa"));
                assert_eq!(line, 1);
            }
            other => panic!("Expected InvalidFastaFormat, got {:?}", other),
        }
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_empty_sequence() {
        let mut stream = stream(b">seqA|1|0\n>seqB|1|0\nACGT\n");
        assert!(matches!(
            stream.next().unwrap(),
            Err(StitchError::InvalidFastaFormat { .. })
        ));
    }

    #[test]
    fn test_non_utf8_reports_path_and_line() {
        let mut stream = stream(b">seqA|1|0\nACGT\nAC\xffGT\n").with_path("chunk_7.fa");
        match stream.next() {
            Some(Err(StitchError::Read { path, line, .. })) => {
                assert_eq!(path, PathBuf::from("chunk_7.fa"));
                assert_eq!(line, 2);
            }
            other => panic!("Expected Read error, got {:?}", other),
        }
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_empty_file() {
        assert!(stream(b"").next().is_none());
        assert!(stream(b"\n\n").next().is_none());
    }

    use proptest::prelude::*;

    proptest! {
        /// Wrapped sequence lines are joined back together
        #[test]
        fn test_fasta_multiline(
            name in "[A-Za-z0-9_]{1,30}",
            seq in "[ACGTNacgtn]{1,400}",
            width in 1..100usize,
        ) {
            let mut fasta = format!(">{}|1|0\n", name);
            for line in seq.as_bytes().chunks(width) {
                fasta.push_str(std::str::from_utf8(line).unwrap());
                fasta.push('\n');
            }

            let records: Vec<_> = stream(fasta.as_bytes()).collect::<Result<Vec<_>>>().unwrap();

            prop_assert_eq!(records.len(), 1);
            prop_assert_eq!(&records[0].header, &format!("{}|1|0", name));
            prop_assert_eq!(&records[0].sequence, seq.as_bytes());
        }

        /// Headers without '>' are rejected
        #[test]
        fn test_fasta_invalid_header(
            name in "[A-Za-z0-9_]{1,50}",
            seq in "[ACGT]{10,100}",
        ) {
            let fasta = format!("{}\n{}\n", name, seq);
            let result: Result<Vec<_>> = stream(fasta.as_bytes()).collect();
            prop_assert!(result.is_err());
        }
    }
}
