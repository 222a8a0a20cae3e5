//! One section of a report: declared columns, typed rows, and source text.
//!
//! A section owns every line from its header up to (not including) the next
//! line starting with `#`, or end of input. Body lines look like
//!
//! ```text
//! DP\t0\t10\t452\t0.048\n
//! ```
//!
//! where the first field repeats the section code and is discarded.
//!
//! # Examples
//!
//! ```
//! use vchk::formats::primitives::{CellValue, LineCursor};
//! use vchk::formats::vchk::Section;
//!
//! # fn main() -> vchk::Result<()> {
//! let body = "QUAL\t0\t30\t12\n# DP\t[2]id\n";
//! let mut cursor = LineCursor::new(body.as_bytes());
//!
//! let section = Section::consume(
//!     "qual",
//!     vec!["id".into(), "quality".into(), "count".into()],
//!     "# QUAL\t[2]id\t[3]Quality\t[4]count\n",
//!     &mut cursor,
//! )?;
//!
//! assert_eq!(section.len(), 1);
//! assert_eq!(section.rows()[0][1], CellValue::Integer(30));
//!
//! // The next header is still there for the caller
//! assert_eq!(cursor.peek()?, Some("# DP\t[2]id\n"));
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, VchkError};
use crate::formats::primitives::{is_comment, split_fields, CellValue, LineCursor};
use serde::Serialize;
use std::io::BufRead;

/// A finalized report section.
///
/// Immutable once returned by [`Section::consume`]. Every row has exactly
/// `columns().len()` values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    #[serde(skip)]
    raw_lines: Vec<String>,
}

impl Section {
    /// Consumes body lines from `cursor` until the next `#` line or end of
    /// input.
    ///
    /// The terminating line is left unconsumed. Any line not starting with
    /// `#` is taken as a row of this section; its leading code field is not
    /// checked against `name`.
    ///
    /// # Errors
    ///
    /// Returns [`VchkError::FieldCount`] if a row's value count differs from
    /// `columns.len()`. The cursor is then positioned just after the
    /// offending row and everything accumulated so far is discarded.
    /// I/O errors from the cursor are propagated.
    pub fn consume<R: BufRead>(
        name: impl Into<String>,
        columns: Vec<String>,
        header_line: impl Into<String>,
        cursor: &mut LineCursor<R>,
    ) -> Result<Section> {
        let name = name.into();
        let mut rows = Vec::new();
        let mut raw_lines = vec![header_line.into()];

        loop {
            match cursor.peek()? {
                Some(line) if !is_comment(line) => {}
                _ => break,
            }
            // Peeked a body line above, so this is Some
            let Some(line) = cursor.next_line()? else {
                break;
            };

            let row = parse_row(&line, &name, columns.len(), cursor.line_number())?;
            rows.push(row);
            raw_lines.push(line);
        }

        Ok(Section {
            name,
            columns,
            rows,
            raw_lines,
        })
    }

    /// Lower-cased section code.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Typed rows, aligned to [`columns`](Self::columns).
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Header and body lines exactly as read, terminators included.
    pub fn raw_lines(&self) -> &[String] {
        &self.raw_lines
    }

    /// The section's source text (concatenated [`raw_lines`](Self::raw_lines)).
    pub fn raw_text(&self) -> String {
        self.raw_lines.concat()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` if the section has a header but no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by (lower-case) name.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// All values of one column, in row order.
    ///
    /// # Examples
    ///
    /// ```
    /// use vchk::formats::primitives::LineCursor;
    /// use vchk::formats::vchk::Section;
    ///
    /// # fn main() -> vchk::Result<()> {
    /// let mut cursor = LineCursor::new("DP\t0\t10\nDP\t0\t11\n".as_bytes());
    /// let columns = vec!["id".into(), "bin".into()];
    /// let section = Section::consume("dp", columns, "# DP\t[2]id\t[3]bin\n", &mut cursor)?;
    ///
    /// let bins: Vec<i64> = section
    ///     .column("bin")
    ///     .unwrap()
    ///     .iter()
    ///     .filter_map(|v| v.as_i64())
    ///     .collect();
    /// assert_eq!(bins, vec![10, 11]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn column(&self, column: &str) -> Option<Vec<&CellValue>> {
        let idx = self.column_index(column)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }
}

/// Splits one body line, drops the code field, and coerces the rest.
fn parse_row(
    line: &str,
    section: &str,
    expected: usize,
    line_number: usize,
) -> Result<Vec<CellValue>> {
    let fields = split_fields(line);
    let values = &fields[1..];

    if values.len() != expected {
        return Err(VchkError::FieldCount {
            section: section.to_string(),
            expected,
            actual: values.len(),
            line: line_number,
        });
    }

    Ok(values.iter().map(|field| CellValue::coerce(field)).collect())
}
