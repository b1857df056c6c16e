//! Error types for `spaced-core`.

use chrono::NaiveDate;
use thiserror::Error;

use crate::topic::Topic;

#[derive(Debug, Error)]
pub enum Error {
  #[error("topic already present: '{0}'; update the entry instead")]
  DuplicateTopic(Topic),

  #[error("topic not found: '{0}'; add it first")]
  TopicNotFound(Topic),

  #[error("reset level must be between 0 and 8, got {0}")]
  InvalidResetLevel(i64),

  #[error("invalid date {input:?}, expected YYYY-MM-DD: {source}")]
  InvalidDate {
    input:  String,
    #[source]
    source: chrono::ParseError,
  },

  #[error("date out of range: {start} + {days} days")]
  DateOutOfRange { start: NaiveDate, days: u64 },

  #[error("topic must not be empty")]
  EmptyTopic,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
