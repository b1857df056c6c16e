//! CSV backend for the `spaced` tables.
//!
//! Each table is one CSV file with a header row. Reads and writes run on the
//! blocking thread pool so they never stall the async runtime, and every
//! write goes through a temporary file that is renamed over the target.

mod encode;
mod file;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{CsvStore, TablePaths};
