//! Plain-text rendering of tracker results for the terminal.

use std::io::{self, Write};

use chrono::NaiveDate;
use spaced_core::{Added, DueList, Updated};

pub fn added(out: &mut impl Write, added: &Added) -> io::Result<()> {
  writeln!(out, "added topic: {}", added.record.topic)?;
  schedule(out, &added.scheduled)
}

pub fn updated(out: &mut impl Write, updated: &Updated) -> io::Result<()> {
  let record = &updated.record;
  writeln!(
    out,
    "reset topic: {} from {} at level {} ({} scheduled review(s) removed)",
    record.topic, record.first_reviewed, record.reset_level, updated.purged,
  )?;
  schedule(out, &updated.scheduled)
}

pub fn due(out: &mut impl Write, due: &DueList) -> io::Result<()> {
  writeln!(out, "Topics to revise on {}:", due.date)?;
  if due.is_empty() {
    return writeln!(out, "  nothing due.");
  }

  for entry in &due.entries {
    writeln!(out, "  - {}", entry.topic)?;
    writeln!(out, "      first reviewed: {}", entry.first_reviewed)?;
    writeln!(out, "      reset level:    {}", entry.reset_level)?;
    if let Some(url) = &entry.url {
      writeln!(out, "      link/notes:     {url}")?;
    }
  }
  for topic in &due.orphans {
    writeln!(out, "  ! {topic} is scheduled but has no seen record")?;
  }
  Ok(())
}

pub fn upcoming(
  out: &mut impl Write,
  topic: &str,
  dates: &[NaiveDate],
) -> io::Result<()> {
  if dates.is_empty() {
    return writeln!(out, "no upcoming reviews for {}", topic.trim());
  }
  writeln!(out, "upcoming reviews for {}:", topic.trim())?;
  schedule(out, dates)
}

fn schedule(out: &mut impl Write, dates: &[NaiveDate]) -> io::Result<()> {
  for date in dates {
    writeln!(out, "  {date}")?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use spaced_core::{DueEntry, ResetLevel, Topic, parse_date};

  use super::*;

  fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
    let mut buf = Vec::new();
    f(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
  }

  #[test]
  fn empty_day_says_nothing_due() {
    let list = DueList {
      date:    parse_date("2025-06-30").unwrap(),
      entries: vec![],
      orphans: vec![],
    };
    let text = render(|out| due(out, &list));
    assert_eq!(text, "Topics to revise on 2025-06-30:\n  nothing due.\n");
  }

  #[test]
  fn entries_and_orphans_are_listed() {
    let list = DueList {
      date:    parse_date("2025-06-30").unwrap(),
      entries: vec![DueEntry {
        topic:          Topic::new("two sum").unwrap(),
        first_reviewed: parse_date("2025-06-29").unwrap(),
        reset_level:    ResetLevel::MIN,
        url:            Some("https://leetcode.com/problems/two-sum/".into()),
      }],
      orphans: vec![Topic::new("ghost").unwrap()],
    };
    let text = render(|out| due(out, &list));
    assert!(text.contains("  - two sum\n"));
    assert!(text.contains("link/notes:     https://leetcode.com/problems/two-sum/"));
    assert!(text.contains("  ! ghost is scheduled"));
  }
}
