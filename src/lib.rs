//! vchk: section-oriented parser for bcftools stats reports
//!
//! # Overview
//!
//! `bcftools stats` writes a tab-delimited report (`.vchk`) made of named
//! sections: summary numbers, depth distribution, per-sample counts, and so
//! on. vchk scans the report once, keeps the sections you ask for (plus the
//! summary), and gives each back as a typed table alongside its original
//! text for lossless re-export.
//!
//! ## Quick Start
//!
//! ```no_run
//! use vchk::StatsParser;
//!
//! # fn main() -> vchk::Result<()> {
//! let stats = StatsParser::new()
//!     .with_sections(["dp", "qual"])
//!     .parse_path("sample.vchk.gz")?;
//!
//! for section in stats.iter() {
//!     println!("{}: {} rows of {:?}", section.name(), section.len(), section.columns());
//! }
//!
//! for failure in stats.failures() {
//!     eprintln!("dropped {}: {}", failure.code, failure.message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`formats`]: report parsing (cursor, cells, headers, sections)
//! - [`io`]: gzip-aware sources and export writers
//! - [`error`]: error type shared by every module

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod formats;
pub mod io;

// Re-export commonly used types
pub use error::{Result, VchkError};
pub use formats::vchk::{KNOWN_SECTIONS, SUMMARY_SECTION};
pub use formats::{CellValue, Section, SectionFailure, StatsFile, StatsParser};
