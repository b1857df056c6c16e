//! Error type for `spaced-store-csv`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] spaced_core::Error),

  #[error("i/o error on {}: {source}", .path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("csv error in {}: {source}", .path.display())]
  Csv {
    path:   PathBuf,
    #[source]
    source: csv::Error,
  },

  /// A row parsed as CSV but does not hold a valid record.
  #[error("malformed row {row} in {}: {reason}", .path.display())]
  Malformed {
    path:   PathBuf,
    row:    usize,
    reason: String,
  },

  #[error("blocking task failed: {0}")]
  Join(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
