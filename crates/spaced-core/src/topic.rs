//! Topic identity.
//!
//! A topic is compared by its normalised form: surrounding whitespace is
//! trimmed and the text is lower-cased. The raw user input is never used for
//! equality, so `" Rust Lifetimes "` and `"rust lifetimes"` are the same key.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A normalised, non-empty topic name. The primary key of the Seen table.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Topic(String);

impl Topic {
  /// Normalise `raw` into a topic key. Fails with [`Error::EmptyTopic`] if
  /// nothing is left after trimming.
  pub fn new(raw: &str) -> Result<Self> {
    let normalised = raw.trim().to_lowercase();
    if normalised.is_empty() {
      return Err(Error::EmptyTopic);
    }
    Ok(Self(normalised))
  }

  pub fn as_str(&self) -> &str { &self.0 }

  /// Sorts before every real topic. Only used as a range bound.
  pub(crate) fn lowest() -> Self { Self(String::new()) }
}

impl fmt::Display for Topic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for Topic {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::new(s) }
}

impl TryFrom<String> for Topic {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { Self::new(&s) }
}

impl From<Topic> for String {
  fn from(t: Topic) -> Self { t.0 }
}

impl AsRef<str> for Topic {
  fn as_ref(&self) -> &str { &self.0 }
}
