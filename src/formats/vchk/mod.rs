//! bcftools stats report (`.vchk`) parser.
//!
//! # Format
//!
//! A report is a sequence of sections. Each starts with a header line
//! declaring a short code and indexed column names, followed by tab-delimited
//! rows that repeat the code in their first field:
//!
//! ```text
//! # This file was produced by bcftools stats
//! # SN, Summary numbers:
//! # SN    [2]id   [3]key  [4]value
//! SN      0       number of samples:      1
//! SN      0       number of records:      1054
//! # QUAL, Stats by quality
//! # QUAL  [2]id   [3]Quality      [4]number of SNPs
//! QUAL    0       30      12
//! ```
//!
//! Any line starting with `#` ends the current section. Only `# CODE<TAB>`
//! lines introduce a new one.
//!
//! # Module Organization
//!
//! - [`header`]: header recognition and column name cleaning
//! - [`section`]: row consumption into a typed [`Section`]
//! - [`parser`]: [`StatsParser`] scan and the resulting [`StatsFile`]
//! - [`writer`]: verbatim text and JSON export of sections

pub mod header;
pub mod parser;
pub mod section;
pub mod writer;

pub use header::SectionHeader;
pub use parser::{SectionFailure, StatsFile, StatsParser};
pub use section::Section;
pub use writer::{write_raw, write_section_json, write_section_text};

/// Code of the summary-numbers section, kept regardless of what is requested.
pub const SUMMARY_SECTION: &str = "sn";

/// Section codes emitted by bcftools stats, with a short description.
pub const KNOWN_SECTIONS: &[(&str, &str)] = &[
    ("tstv", "transitions/transversions"),
    ("sis", "singleton stats"),
    ("af", "stats by non-reference allele frequency"),
    ("qual", "stats by quality"),
    ("idd", "InDel distribution"),
    ("st", "substitution types"),
    ("dp", "depth distribution"),
    ("psc", "per-sample counts"),
    ("psi", "per-sample InDels"),
    ("hwe", "Hardy-Weinberg equilibrium"),
    ("sn", "summary numbers"),
];

/// Description of a known section code (case-insensitive).
///
/// # Examples
///
/// ```
/// use vchk::formats::vchk::describe;
///
/// assert_eq!(describe("DP"), Some("depth distribution"));
/// assert_eq!(describe("xyz"), None);
/// ```
pub fn describe(code: &str) -> Option<&'static str> {
    let code = code.to_lowercase();
    KNOWN_SECTIONS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, description)| *description)
}

/// Whether `code` is a known section code (case-insensitive).
pub fn is_known(code: &str) -> bool {
    describe(code).is_some()
}
