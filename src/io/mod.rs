//! I/O module: report sources and export destinations.
//!
//! Reading goes through [`DataSource`], which hands back a buffered reader
//! and undoes gzip compression when present. Writing goes through
//! [`CompressedWriter`], plain or gzip per [`Encoding`].

pub mod compression;

pub use compression::{CompressedReader, CompressedWriter, DataSource, Encoding};
