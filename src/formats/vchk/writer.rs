//! Section export.
//!
//! Each exported section gets its own directory under the output root:
//!
//! ```text
//! out/
//! ├── dp/
//! │   ├── dp.txt     raw lines, byte-for-byte
//! │   └── dp.json    {"name", "columns", "rows"}
//! └── qual/
//!     └── qual.txt
//! ```
//!
//! With [`Encoding::Gzip`] each file is compressed and named `dp.txt.gz`,
//! `dp.json.gz`.
//!
//! # Example
//!
//! ```no_run
//! use vchk::formats::vchk::{write_section_text, StatsParser};
//! use vchk::io::Encoding;
//!
//! # fn main() -> vchk::Result<()> {
//! let stats = StatsParser::new().with_sections(["dp"]).parse_path("sample.vchk")?;
//! let path = write_section_text("out", stats.get("dp")?, Encoding::Plain)?;
//! assert!(path.ends_with("dp/dp.txt"));
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::formats::vchk::section::Section;
use crate::io::{CompressedWriter, Encoding};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes a section's raw lines to `writer`, unaltered.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_raw<W: Write>(writer: &mut W, section: &Section) -> Result<()> {
    for line in section.raw_lines() {
        writer.write_all(line.as_bytes())?;
    }
    Ok(())
}

/// Writes `<out_dir>/<code>/<code>.txt` with the section's source text.
///
/// Creates the section directory if needed and returns the file path.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_section_text(
    out_dir: impl AsRef<Path>,
    section: &Section,
    encoding: Encoding,
) -> Result<PathBuf> {
    let path = section_path(out_dir.as_ref(), section, "txt", encoding)?;
    let mut writer = CompressedWriter::create(&path, encoding)?;
    write_raw(&mut writer, section)?;
    writer.finish()?;
    log::debug!("Wrote {}", path.display());
    Ok(path)
}

/// Writes `<out_dir>/<code>/<code>.json` with the section's typed table.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_section_json(
    out_dir: impl AsRef<Path>,
    section: &Section,
    encoding: Encoding,
) -> Result<PathBuf> {
    let path = section_path(out_dir.as_ref(), section, "json", encoding)?;
    let mut writer = CompressedWriter::create(&path, encoding)?;
    serde_json::to_writer_pretty(&mut writer, section)?;
    writer.write_all(b"\n")?;
    writer.finish()?;
    log::debug!("Wrote {}", path.display());
    Ok(path)
}

fn section_path(
    out_dir: &Path,
    section: &Section,
    extension: &str,
    encoding: Encoding,
) -> Result<PathBuf> {
    let dir = out_dir.join(section.name());
    fs::create_dir_all(&dir)?;
    Ok(dir.join(encoding.file_name(section.name(), extension)))
}
