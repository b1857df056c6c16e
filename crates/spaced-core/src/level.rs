//! Reset levels: which step of the backoff sequence a schedule starts from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An index into the backoff sequence `{1, 2, 4, …, 256}` days, in `0..=8`.
///
/// Level 0 restarts the schedule from one day out; level 8 keeps only the
/// final 256-day review.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct ResetLevel(u8);

impl ResetLevel {
  pub const MIN: Self = Self(0);
  pub const MAX: Self = Self(8);

  /// Saturate an arbitrary integer into `0..=8`.
  pub fn clamped(value: i64) -> Self {
    Self(value.clamp(Self::MIN.0.into(), Self::MAX.0.into()) as u8)
  }

  pub fn get(self) -> u8 { self.0 }

  /// Days from the start date to the review at this level: `2^level`.
  pub fn offset_days(self) -> u64 { 1u64 << self.0 }

  /// This level and every level above it, up to [`ResetLevel::MAX`].
  pub fn and_above(self) -> impl Iterator<Item = ResetLevel> {
    (self.0..=Self::MAX.0).map(Self)
  }
}

impl TryFrom<i64> for ResetLevel {
  type Error = Error;

  fn try_from(value: i64) -> Result<Self> {
    match u8::try_from(value) {
      Ok(v) if v <= Self::MAX.0 => Ok(Self(v)),
      _ => Err(Error::InvalidResetLevel(value)),
    }
  }
}

impl From<ResetLevel> for u8 {
  fn from(level: ResetLevel) -> Self { level.0 }
}

impl From<ResetLevel> for i64 {
  fn from(level: ResetLevel) -> Self { level.0.into() }
}

impl fmt::Display for ResetLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_zero_through_eight() {
    for v in 0..=8 {
      assert_eq!(ResetLevel::try_from(v).unwrap().get() as i64, v);
    }
  }

  #[test]
  fn rejects_out_of_range() {
    for v in [-1, 9, 256, i64::MIN, i64::MAX] {
      let err = ResetLevel::try_from(v).unwrap_err();
      assert!(matches!(err, Error::InvalidResetLevel(got) if got == v));
    }
  }

  #[test]
  fn clamps_into_range() {
    assert_eq!(ResetLevel::clamped(-5), ResetLevel::MIN);
    assert_eq!(ResetLevel::clamped(42), ResetLevel::MAX);
    assert_eq!(ResetLevel::clamped(3).get(), 3);
  }

  #[test]
  fn offsets_double_per_level() {
    let offsets: Vec<u64> =
      ResetLevel::MIN.and_above().map(ResetLevel::offset_days).collect();
    assert_eq!(offsets, [1, 2, 4, 8, 16, 32, 64, 128, 256]);
  }
}
