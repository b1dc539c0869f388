//! `reportkit_io_csv` v1:
//! Rust-side untyped tabular report reader.
//!
//! - `read` : CSV file reading and record collection
//! - `spec` : dataset model, read options, typed errors

pub mod read;
pub mod spec;

pub use read::read_tabular_file;
pub use spec::{ReadTabularError, SpecReadOptions, SpecTabularDataset};
