//! Calendar date helpers. Every date in the tables is a `YYYY-MM-DD` string.

use chrono::{Local, NaiveDate};

use crate::{Error, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date. Surrounding whitespace is ignored; anything
/// else that does not match the format is rejected.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|source| {
    Error::InvalidDate {
      input: input.to_owned(),
      source,
    }
  })
}

pub fn format_date(date: NaiveDate) -> String {
  date.format(DATE_FORMAT).to_string()
}

/// The current date in the local timezone.
pub fn today() -> NaiveDate { Local::now().date_naive() }
