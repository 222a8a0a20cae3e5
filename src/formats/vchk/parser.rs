//! Report scanner: finds section headers and hands the cursor to [`Section`].
//!
//! # Examples
//!
//! ```
//! use vchk::formats::vchk::StatsParser;
//!
//! # fn main() -> vchk::Result<()> {
//! let report = concat!(
//!     "# This file was produced by bcftools stats\n",
//!     "# SN\t[2]id\t[3]key\t[4]value\n",
//!     "SN\t0\tnumber of samples:\t1\n",
//!     "# DP\t[2]id\t[3]bin\t[4]count\n",
//!     "DP\t0\t10\t452\n",
//!     "# PSC\t[2]id\t[3]sample\n",
//!     "PSC\t0\tNA12878\n",
//! );
//!
//! let stats = StatsParser::new().with_sections(["dp"]).parse_reader(report.as_bytes())?;
//!
//! assert_eq!(stats.names().collect::<Vec<_>>(), vec!["sn", "dp"]);
//! assert_eq!(stats.get("dp")?.len(), 1);
//! assert!(stats.get("psc").is_err());
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, VchkError};
use crate::formats::primitives::LineCursor;
use crate::formats::vchk::header::SectionHeader;
use crate::formats::vchk::section::Section;
use crate::formats::vchk::{KNOWN_SECTIONS, SUMMARY_SECTION};
use crate::io::DataSource;
use std::collections::{BTreeSet, HashMap};
use std::io::BufRead;
use std::path::Path;

/// A section dropped because one of its rows had the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFailure {
    /// Section code
    pub code: String,
    /// Line number of the offending row
    pub line: usize,
    /// Human-readable reason
    pub message: String,
}

/// Parsed report: sections by code, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct StatsFile {
    sections: Vec<Section>,
    index: HashMap<String, usize>,
    failures: Vec<SectionFailure>,
}

impl StatsFile {
    fn insert(&mut self, section: Section) {
        match self.index.get(section.name()) {
            Some(&idx) => self.sections[idx] = section,
            None => {
                self.index.insert(section.name().to_string(), self.sections.len());
                self.sections.push(section);
            }
        }
    }

    fn remove(&mut self, code: &str) {
        let Some(idx) = self.index.remove(code) else {
            return;
        };
        self.sections.remove(idx);
        for pos in self.index.values_mut() {
            if *pos > idx {
                *pos -= 1;
            }
        }
    }

    /// Looks up a registered section.
    ///
    /// # Errors
    ///
    /// Returns [`VchkError::SectionUnavailable`] if the section was not
    /// requested, not present in the input, or dropped.
    pub fn get(&self, code: &str) -> Result<&Section> {
        self.section(code)
            .ok_or_else(|| VchkError::SectionUnavailable(code.to_string()))
    }

    /// Looks up a registered section, `None` if absent.
    pub fn section(&self, code: &str) -> Option<&Section> {
        self.index.get(code).map(|&idx| &self.sections[idx])
    }

    /// Whether `code` was registered.
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// The always-included summary section, if the input had one.
    pub fn summary(&self) -> Option<&Section> {
        self.section(SUMMARY_SECTION)
    }

    /// Section codes in order of first appearance.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(Section::name)
    }

    /// Sections in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Number of registered sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// `true` if no section was registered.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections dropped because of row-shape violations.
    pub fn failures(&self) -> &[SectionFailure] {
        &self.failures
    }

    /// Whether `code` was dropped because of a row-shape violation.
    pub fn failed(&self, code: &str) -> bool {
        self.failures.iter().any(|f| f.code == code)
    }
}

/// Scans a report and builds a [`StatsFile`] from the requested sections.
///
/// The summary section (`sn`) is always parsed, whatever was requested.
#[derive(Debug, Clone, Default)]
pub struct StatsParser {
    requested: BTreeSet<String>,
}

impl StatsParser {
    /// Creates a parser that only keeps the summary section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests additional sections by code (case-insensitive).
    pub fn with_sections<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.requested
            .extend(codes.into_iter().map(|c| c.as_ref().to_lowercase()));
        self
    }

    /// Requests every section in [`KNOWN_SECTIONS`].
    pub fn with_all_sections(self) -> Self {
        self.with_sections(KNOWN_SECTIONS.iter().map(|(code, _)| *code))
    }

    /// Whether sections with this (lower-case) code will be kept.
    pub fn requests(&self, code: &str) -> bool {
        code == SUMMARY_SECTION || self.requested.contains(code)
    }

    /// Parses a report file, transparently decompressing gzip input.
    ///
    /// # Errors
    ///
    /// Returns [`VchkError::FileNotFound`] if the path does not exist, and
    /// otherwise the same errors as [`parse_reader`](Self::parse_reader).
    pub fn parse_path(&self, path: impl AsRef<Path>) -> Result<StatsFile> {
        let reader = DataSource::from_path(path).open()?;
        self.parse_reader(reader)
    }

    /// Parses a report from any buffered reader.
    ///
    /// Sections whose rows do not match their header are dropped and listed
    /// in [`StatsFile::failures`]; scanning continues with the next header.
    /// A dropped code stays dropped: earlier blocks with the same code are
    /// discarded and later ones are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`VchkError::MalformedHeader`] if any header (requested or
    /// not) has a column without the `[N]name` form, or an I/O error from
    /// the reader. No partial result is returned.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<StatsFile> {
        let mut cursor = LineCursor::new(reader);
        let mut stats = StatsFile::default();
        let mut failed: BTreeSet<String> = BTreeSet::new();

        while let Some(line) = cursor.next_line()? {
            let Some(header) = SectionHeader::parse(&line, cursor.line_number())? else {
                continue;
            };

            if !self.requests(&header.code) || failed.contains(&header.code) {
                log::debug!("Skipping section {} at line {}", header.code, cursor.line_number());
                continue;
            }

            match Section::consume(header.code.as_str(), header.columns, line, &mut cursor) {
                Ok(section) => {
                    log::debug!("Parsed section {} ({} rows)", section.name(), section.len());
                    stats.insert(section);
                }
                Err(err @ VchkError::FieldCount { .. }) => {
                    stats.remove(&header.code);
                    failed.insert(header.code.clone());
                    stats.failures.push(SectionFailure {
                        code: header.code,
                        line: cursor.line_number(),
                        message: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        Ok(stats)
    }
}
