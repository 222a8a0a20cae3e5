//! Report format parsers.
//!
//! - [`primitives`]: shared line-oriented infrastructure
//!   - line cursor with lookahead, typed cells, field splitting
//! - [`vchk`]: bcftools stats report sections
//!
//! # Design Principles
//!
//! - Single forward pass over the input; no seeking, no re-reading
//! - No `panic!` in library code (all errors use `Result`)
//! - Structural errors abort the parse; per-section errors are isolated

pub mod primitives;
pub mod vchk;

// Re-export commonly used types
pub use primitives::{CellValue, LineCursor};
pub use vchk::{Section, SectionFailure, StatsFile, StatsParser};
