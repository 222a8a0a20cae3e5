//! Forward-only line cursor with one line of lookahead.
//!
//! Line-oriented report formats hand a single reader back and forth between
//! an orchestrator (looking for headers) and a block consumer (reading rows
//! until the next header). [`LineCursor`] is that shared reader: the block
//! consumer [`peek`](LineCursor::peek)s at a line to decide whether it
//! belongs to the block and only [`next_line`](LineCursor::next_line)s the
//! lines it keeps, so the boundary line is left for the orchestrator.
//!
//! # Examples
//!
//! ```
//! use vchk::formats::primitives::LineCursor;
//!
//! # fn main() -> vchk::Result<()> {
//! let mut cursor = LineCursor::new("SN\t0\ta\t1\n# DP\t[2]bin\n".as_bytes());
//!
//! assert_eq!(cursor.peek()?, Some("SN\t0\ta\t1\n"));
//! assert_eq!(cursor.next_line()?.as_deref(), Some("SN\t0\ta\t1\n"));
//! assert_eq!(cursor.line_number(), 1);
//!
//! // Peeking does not advance
//! assert_eq!(cursor.peek()?, Some("# DP\t[2]bin\n"));
//! assert_eq!(cursor.peek()?, Some("# DP\t[2]bin\n"));
//! assert_eq!(cursor.line_number(), 1);
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use std::io::BufRead;

/// Shared line reader over a [`BufRead`] source.
///
/// Lines keep their terminators (`\n` or `\r\n`) exactly as read, so
/// concatenating every returned line reproduces the input.
pub struct LineCursor<R: BufRead> {
    reader: R,
    peeked: Option<String>,
    line_number: usize,
    exhausted: bool,
}

impl<R: BufRead> LineCursor<R> {
    /// Creates a cursor positioned before the first line.
    pub fn new(reader: R) -> Self {
        LineCursor {
            reader,
            peeked: None,
            line_number: 0,
            exhausted: false,
        }
    }

    /// Returns the next line without consuming it.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reader fails or the line is not
    /// valid UTF-8.
    pub fn peek(&mut self) -> Result<Option<&str>> {
        if self.peeked.is_none() && !self.exhausted {
            let mut buf = String::new();
            if self.reader.read_line(&mut buf)? == 0 {
                self.exhausted = true;
            } else {
                self.peeked = Some(buf);
            }
        }
        Ok(self.peeked.as_deref())
    }

    /// Consumes and returns the next line.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reader fails or the line is not
    /// valid UTF-8.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        self.peek()?;
        let line = self.peeked.take();
        if line.is_some() {
            self.line_number += 1;
        }
        Ok(line)
    }

    /// Returns the 1-based number of the last consumed line (0 before any).
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for LineCursor<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let mut cursor = LineCursor::new("".as_bytes());
        assert_eq!(cursor.peek().unwrap(), None);
        assert_eq!(cursor.next_line().unwrap(), None);
        assert_eq!(cursor.line_number(), 0);
    }

    #[test]
    fn test_terminators_preserved() {
        let data = "a\r\nb\nc";
        let lines: Vec<String> = LineCursor::new(data.as_bytes())
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(lines, vec!["a\r\n", "b\n", "c"]);
        assert_eq!(lines.concat(), data);
    }

    #[test]
    fn test_peek_then_next_returns_same_line() {
        let mut cursor = LineCursor::new("first\nsecond\n".as_bytes());

        let peeked = cursor.peek().unwrap().map(str::to_owned);
        let taken = cursor.next_line().unwrap();
        assert_eq!(peeked, taken);
        assert_eq!(cursor.line_number(), 1);

        assert_eq!(cursor.next_line().unwrap().as_deref(), Some("second\n"));
        assert_eq!(cursor.line_number(), 2);
        assert_eq!(cursor.peek().unwrap(), None);
    }

    #[test]
    fn test_line_number_ignores_peeks() {
        let mut cursor = LineCursor::new("1\n2\n3\n".as_bytes());
        for _ in 0..5 {
            cursor.peek().unwrap();
        }
        assert_eq!(cursor.line_number(), 0);

        cursor.next_line().unwrap();
        cursor.next_line().unwrap();
        assert_eq!(cursor.line_number(), 2);
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let data: &[u8] = &[b'o', b'k', b'\n', 0xff, 0xfe, b'\n'];
        let mut cursor = LineCursor::new(data);
        assert_eq!(cursor.next_line().unwrap().as_deref(), Some("ok\n"));
        assert!(cursor.next_line().is_err());
    }
}
