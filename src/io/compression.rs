//! Transparent gzip reading and writing for chunk files and merged output
//!
//! Chunk files and manifests may arrive plain or gzip compressed; the reader
//! sniffs the gzip magic bytes instead of trusting file extensions. Output
//! compression is chosen from the sink's extension.

use crate::error::{Result, StitchError};
use crate::io::DataSink;
use flate2::bufread::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Memory-mapped file threshold (50 MB)
///
/// Below this size the mapping setup costs more than buffered reads save.
pub const MMAP_THRESHOLD: u64 = 50 * 1024 * 1024;

/// Gzip magic bytes
const GZIP_MAGIC: [u8; 2] = [31, 139];

/// Local input file for chunks and manifests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSource {
    path: PathBuf,
}

impl DataSource {
    /// Create a local file data source
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path backing this source
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the data source and return a buffered reader
    pub fn open(&self) -> Result<Box<dyn BufRead + Send>> {
        open_local_file(&self.path).map_err(|source| StitchError::FileOpen {
            path: self.path.clone(),
            source,
        })
    }
}

/// Open a local file, memory mapping it when it is large
fn open_local_file(path: &Path) -> io::Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)?;
    let file_size = file.metadata()?.len();

    if file_size >= MMAP_THRESHOLD {
        // SAFETY: chunk files are inputs produced before the merge runs and
        // are not modified while mapped.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Box::new(io::Cursor::new(mmap)))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Reader that decompresses gzip input and passes plain input through
///
/// # Example
///
/// ```no_run
/// use seqstitch::io::compression::{CompressedReader, DataSource};
/// use std::io::BufRead;
///
/// # fn main() -> seqstitch::Result<()> {
/// let reader = CompressedReader::new(DataSource::from_path("chunk_0.fa.gz"))?;
/// for line in reader.lines() {
///     println!("{}", line?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct CompressedReader {
    inner: Box<dyn BufRead + Send>,
}

impl CompressedReader {
    /// Open a data source, detecting gzip compression from its first bytes
    pub fn new(source: DataSource) -> Result<Self> {
        let reader = source.open()?;
        Self::from_reader(reader).map_err(|source_err| StitchError::Read {
            path: source.path().to_path_buf(),
            line: 0,
            source: source_err,
        })
    }

    /// Wrap an already open reader, detecting gzip compression
    pub fn from_reader(mut reader: Box<dyn BufRead + Send>) -> io::Result<Self> {
        let is_gzipped = {
            let peeked = reader.fill_buf()?;
            peeked.len() >= 2 && peeked[..2] == GZIP_MAGIC
        };

        if is_gzipped {
            // Multi-member so concatenated and bgzip files decode fully
            Ok(Self {
                inner: Box::new(BufReader::new(MultiGzDecoder::new(reader))),
            })
        } else {
            Ok(Self { inner: reader })
        }
    }
}

impl Read for CompressedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for CompressedReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt)
    }
}

/// Writer with optional gzip compression
///
/// Always call [`CompressedWriter::finish`] so the gzip trailer is written
/// and errors surface; `Drop` only makes a best-effort flush.
pub enum CompressedWriter {
    /// Uncompressed writer with buffering
    Plain(Option<BufWriter<Box<dyn Write>>>),

    /// Gzip compressed writer
    Gzip(Option<GzEncoder<BufWriter<Box<dyn Write>>>>),
}

impl CompressedWriter {
    /// Create a writer for a data sink
    ///
    /// Local paths ending in `.gz` or `.bgz` are gzip compressed; anything
    /// else, and stdout, is written plain.
    pub fn new(sink: DataSink) -> Result<Self> {
        let compressed = sink.is_compressed();
        match sink {
            DataSink::Local(path) => {
                let file = File::create(&path)
                    .map_err(|source| StitchError::FileOpen { path, source })?;
                if compressed {
                    Ok(Self::new_gzip(Box::new(file)))
                } else {
                    Ok(Self::new_plain(Box::new(file)))
                }
            }
            DataSink::Stdout => Ok(Self::new_plain(Box::new(io::stdout()))),
        }
    }

    /// Create a plain (uncompressed) writer
    pub fn new_plain(writer: Box<dyn Write>) -> Self {
        Self::Plain(Some(BufWriter::new(writer)))
    }

    /// Create a gzip compressed writer at the default level
    pub fn new_gzip(writer: Box<dyn Write>) -> Self {
        Self::Gzip(Some(GzEncoder::new(
            BufWriter::new(writer),
            Compression::default(),
        )))
    }

    /// Finish writing, flushing buffers and finalizing compression
    pub fn finish(mut self) -> io::Result<()> {
        match &mut self {
            Self::Plain(w) => match w.take() {
                Some(mut writer) => writer.flush(),
                None => Ok(()),
            },
            Self::Gzip(w) => match w.take() {
                Some(encoder) => encoder.finish()?.flush(),
                None => Ok(()),
            },
        }
    }
}

impl Write for CompressedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(Some(w)) => w.write(buf),
            Self::Gzip(Some(w)) => w.write(buf),
            _ => Err(io::Error::new(
                io::ErrorKind::Other,
                "Cannot write to finished writer",
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(Some(w)) => w.flush(),
            Self::Gzip(Some(w)) => w.flush(),
            _ => Ok(()),
        }
    }
}

impl Drop for CompressedWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
