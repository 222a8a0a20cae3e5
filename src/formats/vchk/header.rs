//! Section header recognition.
//!
//! A header introduces a section and declares its columns:
//!
//! ```text
//! # DP\t[2]id\t[3]bin\t[4]number of genotypes\n
//! ```
//!
//! The code after `# ` must be followed by a tab. Other lines starting with
//! `#` are comments: they end a section but introduce nothing.

use crate::error::{Result, VchkError};
use regex::Regex;
use std::sync::LazyLock;

static RE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^# (\w+)\t").expect("valid header regex"));
static RE_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\d+\](.+)").expect("valid column regex"));

/// A parsed section header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    /// Lower-cased section code
    pub code: String,
    /// Cleaned, lower-cased column names in declared order
    pub columns: Vec<String>,
}

impl SectionHeader {
    /// Parses a header line.
    ///
    /// Returns `Ok(None)` if the line is not a header. `line_number` is only
    /// used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`VchkError::MalformedHeader`] if any column field lacks the
    /// `[N]name` form.
    ///
    /// # Examples
    ///
    /// ```
    /// use vchk::formats::vchk::SectionHeader;
    ///
    /// # fn main() -> vchk::Result<()> {
    /// let header = SectionHeader::parse("# QUAL\t[2]id\t[3]Quality\n", 1)?.unwrap();
    /// assert_eq!(header.code, "qual");
    /// assert_eq!(header.columns, vec!["id", "quality"]);
    ///
    /// assert!(SectionHeader::parse("# This file was produced by bcftools stats\n", 1)?.is_none());
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(line: &str, line_number: usize) -> Result<Option<SectionHeader>> {
        let code = match RE_HEADER.captures(line) {
            Some(caps) => caps[1].to_lowercase(),
            None => return Ok(None),
        };

        // Everything after the code's tab is one field per column
        let columns = line
            .split('\t')
            .skip(1)
            .map(|field| clean_column(field, line_number))
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(SectionHeader { code, columns }))
    }
}

/// Strips the `[N]` index prefix from a column field and lower-cases the name.
///
/// # Errors
///
/// Returns [`VchkError::MalformedHeader`] if the field does not match.
pub fn clean_column(field: &str, line_number: usize) -> Result<String> {
    let field = field.trim();
    RE_COLUMN
        .captures(field)
        .map(|caps| caps[1].to_lowercase())
        .ok_or_else(|| VchkError::MalformedHeader {
            line: line_number,
            field: field.to_string(),
        })
}
