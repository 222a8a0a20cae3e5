//! Input sources and output writers with transparent gzip support.
//!
//! bcftools stats reports are small text files, but pipelines commonly keep
//! them gzipped next to the VCF they describe. Readers sniff the gzip magic
//! bytes instead of trusting the extension; writers compress only when the
//! caller asks for [`Encoding::Gzip`].

use crate::error::{Result, VchkError};
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Gzip magic bytes (RFC 1952)
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Where a report is read from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Local file path
    Local(PathBuf),
}

impl DataSource {
    /// Create a local file data source
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        DataSource::Local(path.as_ref().to_path_buf())
    }

    /// Open the data source, decompressing gzip input.
    ///
    /// # Errors
    ///
    /// Returns [`VchkError::FileNotFound`] if the file does not exist, or an
    /// I/O error if it cannot be opened or read.
    pub fn open(&self) -> Result<Box<dyn BufRead + Send>> {
        Ok(CompressedReader::new(self)?.into_inner())
    }

    fn open_raw(&self) -> Result<Box<dyn BufRead + Send>> {
        match self {
            DataSource::Local(path) => match File::open(path) {
                Ok(file) => Ok(Box::new(BufReader::new(file))),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    Err(VchkError::FileNotFound { path: path.clone() })
                }
                Err(e) => Err(e.into()),
            },
        }
    }
}

/// Buffered reader that decompresses gzip (including multi-member bgzip)
/// when the stream starts with the gzip magic bytes.
///
/// # Example
///
/// ```no_run
/// use vchk::io::{CompressedReader, DataSource};
/// use std::io::BufRead;
///
/// # fn main() -> vchk::Result<()> {
/// let reader = CompressedReader::new(&DataSource::from_path("sample.vchk.gz"))?;
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
    /// Open a source, sniffing for gzip.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be opened or read.
    pub fn new(source: &DataSource) -> Result<Self> {
        let mut reader = source.open_raw()?;

        let is_gzipped = reader.fill_buf()?.starts_with(&GZIP_MAGIC);

        if is_gzipped {
            Ok(Self {
                inner: Box::new(BufReader::new(MultiGzDecoder::new(reader))),
            })
        } else {
            Ok(Self { inner: reader })
        }
    }

    /// Get the inner buffered reader
    pub fn into_inner(self) -> Box<dyn BufRead + Send> {
        self.inner
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

/// Encoding of an exported file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Uncompressed text
    #[default]
    Plain,
    /// Gzip; file names get a `.gz` suffix
    Gzip,
}

impl Encoding {
    /// Builds the file name for `stem.extension` in this encoding.
    pub fn file_name(self, stem: &str, extension: &str) -> String {
        match self {
            Encoding::Plain => format!("{stem}.{extension}"),
            Encoding::Gzip => format!("{stem}.{extension}.gz"),
        }
    }
}

/// Buffered file writer, gzip-compressed when asked for.
///
/// # Example
///
/// ```no_run
/// use vchk::io::{CompressedWriter, Encoding};
/// use std::io::Write;
///
/// # fn main() -> std::io::Result<()> {
/// let mut writer = CompressedWriter::create("dp.txt.gz", Encoding::Gzip)?;
/// writer.write_all(b"# DP\t[2]id\n")?;
/// writer.finish()?;
/// # Ok(())
/// # }
/// ```
pub enum CompressedWriter {
    /// Uncompressed writer with buffering
    Plain(Option<BufWriter<Box<dyn Write>>>),

    /// Gzip compressed writer
    Gzip(Option<GzEncoder<BufWriter<Box<dyn Write>>>>),
}

impl CompressedWriter {
    /// Create (or truncate) a file and write it in `encoding`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output file cannot be created.
    pub fn create(path: impl AsRef<Path>, encoding: Encoding) -> io::Result<Self> {
        let file: Box<dyn Write> = Box::new(File::create(path)?);
        Ok(match encoding {
            Encoding::Plain => Self::new_plain(file),
            Encoding::Gzip => Self::new_gzip(file),
        })
    }

    /// Create a plain (uncompressed) writer
    pub fn new_plain(writer: Box<dyn Write>) -> Self {
        Self::Plain(Some(BufWriter::new(writer)))
    }

    /// Create a gzip writer (default level 6)
    pub fn new_gzip(writer: Box<dyn Write>) -> Self {
        Self::Gzip(Some(GzEncoder::new(
            BufWriter::new(writer),
            Compression::default(),
        )))
    }

    /// Flush buffered data without finalizing a gzip stream.
    pub fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(Some(w)) => w.flush(),
            Self::Gzip(Some(w)) => w.flush(),
            _ => Ok(()),
        }
    }

    /// Flush everything and write the gzip trailer, if any.
    ///
    /// Call this explicitly; dropping only makes a best-effort flush.
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
        CompressedWriter::flush(self)
    }
}

impl Drop for CompressedWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    const TEXT: &str = "# SN\t[2]id\t[3]key\t[4]value\nSN\t0\tnumber of samples:\t1\n";

    fn read_all(source: &DataSource) -> String {
        let mut text = String::new();
        source.open().unwrap().read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn test_plain_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.vchk");

        let mut writer = CompressedWriter::create(&path, Encoding::Plain).unwrap();
        writer.write_all(TEXT.as_bytes()).unwrap();
        writer.finish().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), TEXT);
        assert_eq!(read_all(&DataSource::from_path(&path)), TEXT);
    }

    #[test]
    fn test_gzip_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.vchk.gz");

        let mut writer = CompressedWriter::create(&path, Encoding::Gzip).unwrap();
        writer.write_all(TEXT.as_bytes()).unwrap();
        writer.finish().unwrap();

        let raw = std::fs::read(&path).unwrap();
        assert_eq!(&raw[..2], &GZIP_MAGIC);
        assert_eq!(read_all(&DataSource::from_path(&path)), TEXT);
    }

    #[test]
    fn test_gzip_detected_by_content_not_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.vchk");

        let file = File::create(&path).unwrap();
        let mut writer = CompressedWriter::new_gzip(Box::new(file));
        writer.write_all(TEXT.as_bytes()).unwrap();
        writer.finish().unwrap();

        assert_eq!(read_all(&DataSource::from_path(&path)), TEXT);
    }

    #[test]
    fn test_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.vchk");
        File::create(&path).unwrap();

        assert_eq!(read_all(&DataSource::from_path(&path)), "");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.vchk");

        match DataSource::from_path(&path).open() {
            Err(VchkError::FileNotFound { path: missing }) => assert_eq!(missing, path),
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn test_gz_extension_alone_does_not_compress() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.vchk.gz");

        let mut writer = CompressedWriter::create(&path, Encoding::Plain).unwrap();
        writer.write_all(TEXT.as_bytes()).unwrap();
        writer.finish().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), TEXT);
    }

    #[test]
    fn test_encoding_file_name() {
        assert_eq!(Encoding::Plain.file_name("dp", "txt"), "dp.txt");
        assert_eq!(Encoding::Gzip.file_name("dp", "json"), "dp.json.gz");
        assert_eq!(Encoding::default(), Encoding::Plain);
    }

    #[test]
    fn test_write_after_finish_is_rejected() {
        let mut writer = CompressedWriter::Plain(None);
        assert!(writer.write(b"x").is_err());
        assert!(writer.flush().is_ok());
    }
}
