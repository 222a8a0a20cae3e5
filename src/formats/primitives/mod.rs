//! Shared primitives for line-oriented report formats.
//!
//! - [`cursor`]: forward-only line reader with one line of lookahead
//! - [`value`]: typed cells and literal coercion
//! - [`split_fields`]: tab splitting of a trimmed line
//!
//! # Example
//!
//! ```
//! use vchk::formats::primitives::{split_fields, CellValue};
//!
//! let fields = split_fields("DP\t0\t1\t2.5\r\n");
//! assert_eq!(fields, vec!["DP", "0", "1", "2.5"]);
//!
//! let cells: Vec<CellValue> = fields[1..].iter().map(|f| CellValue::coerce(f)).collect();
//! assert_eq!(cells[2], CellValue::Float(2.5));
//! ```

pub mod cursor;
pub mod value;

// Re-exports
pub use cursor::LineCursor;
pub use value::CellValue;

/// Comment / header marker that starts every non-data line.
pub const COMMENT_MARKER: char = '#';

/// Splits a line on tabs after trimming trailing whitespace.
///
/// The trailing line terminator (`\n` or `\r\n`) is removed along with any
/// other trailing whitespace. An empty line yields a single empty field.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.trim_end().split('\t').collect()
}

/// Returns `true` if the line starts with [`COMMENT_MARKER`].
pub fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT_MARKER)
}
