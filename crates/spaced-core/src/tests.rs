//! Tracker tests against the in-memory store.

use chrono::NaiveDate;

use crate::{
  Error, ResetLevel, RevisionRecord, RevisionTable, SeenRecord, SeenTable,
  Topic, Tracker, memory::MemoryStore, parse_date,
};

fn d(s: &str) -> NaiveDate { parse_date(s).unwrap() }

fn t(s: &str) -> Topic { Topic::new(s).unwrap() }

fn tracker() -> Tracker<MemoryStore> { Tracker::new(MemoryStore::new()) }

fn dates(table: &RevisionTable, topic: &str) -> Vec<String> {
  table.dates_for(&t(topic)).map(|d| d.to_string()).collect()
}

// ─── add_topic ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_topic_writes_seen_row_and_schedule() {
  let tr = tracker();
  let added = tr
    .add_topic("x", Some(d("2024-06-28")), None)
    .await
    .unwrap();

  assert_eq!(added.record.topic, t("x"));
  assert_eq!(added.record.reset_level, ResetLevel::MIN);
  assert_eq!(added.scheduled.len(), 9);

  let (seen, revisions) = tr.store().snapshot();
  assert_eq!(seen.len(), 1);
  assert_eq!(dates(&revisions, "x"), [
    "2024-06-29",
    "2024-06-30",
    "2024-07-02",
    "2024-07-06",
    "2024-07-14",
    "2024-07-30",
    "2024-08-31",
    "2024-11-03",
    "2025-03-11",
  ]);
}

#[tokio::test]
async fn add_topic_normalises_topic_and_url() {
  let tr = tracker();
  let added = tr
    .add_topic(
      "  Leetcode Two Sum ",
      Some(d("2025-06-29")),
      Some("  https://leetcode.com/problems/two-sum/ ".into()),
    )
    .await
    .unwrap();
  assert_eq!(added.record.topic.as_str(), "leetcode two sum");
  assert_eq!(
    added.record.url.as_deref(),
    Some("https://leetcode.com/problems/two-sum/")
  );

  let blank = tr
    .add_topic("other", Some(d("2025-06-29")), Some("   ".into()))
    .await
    .unwrap();
  assert_eq!(blank.record.url, None);
}

#[tokio::test]
async fn add_duplicate_topic_is_rejected_without_writing() {
  let tr = tracker();
  tr.add_topic("graphs", Some(d("2025-06-29")), None)
    .await
    .unwrap();
  let writes = tr.store().writes();
  let before = tr.store().snapshot();

  let err = tr
    .add_topic(" GRAPHS", Some(d("2025-07-01")), None)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DuplicateTopic(ref topic) if topic.as_str() == "graphs"));

  assert_eq!(tr.store().writes(), writes);
  assert_eq!(tr.store().snapshot(), before);
  assert_eq!(tr.store().snapshot().0.len(), 1);
}

#[tokio::test]
async fn add_blank_topic_is_rejected() {
  let tr = tracker();
  let err = tr.add_topic("  ", None, None).await.unwrap_err();
  assert!(matches!(err, Error::EmptyTopic));
  assert_eq!(tr.store().writes(), 0);
}

// ─── update_entry ────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_entry_resets_seen_row_and_reschedules() {
  let tr = tracker();
  tr.add_topic("x", Some(d("2024-06-20")), None)
    .await
    .unwrap();

  let updated = tr
    .update_entry("X", Some(d("2024-06-24")), 1)
    .await
    .unwrap();
  assert_eq!(updated.record.first_reviewed, d("2024-06-24"));
  assert_eq!(updated.record.reset_level.get(), 1);
  assert_eq!(updated.scheduled.len(), 8);

  let (seen, revisions) = tr.store().snapshot();
  let row = seen.get(&t("x")).unwrap();
  assert_eq!(row.first_reviewed, d("2024-06-24"));
  assert_eq!(row.reset_level.get(), 1);

  // 2024-06-21 and 2024-06-22 predate the cutoff and stay as history; every
  // later row of the old schedule is gone.
  assert_eq!(dates(&revisions, "x"), [
    "2024-06-21",
    "2024-06-22",
    "2024-06-26",
    "2024-06-28",
    "2024-07-02",
    "2024-07-10",
    "2024-07-26",
    "2024-08-27",
    "2024-10-30",
    "2025-03-07",
  ]);
  assert_eq!(updated.purged, 7);
}

#[tokio::test]
async fn update_before_first_review_purges_whole_schedule() {
  let tr = tracker();
  tr.add_topic("x", Some(d("2024-06-28")), None)
    .await
    .unwrap();

  let updated = tr
    .update_entry("x", Some(d("2024-06-24")), 1)
    .await
    .unwrap();
  assert_eq!(updated.purged, 9);

  let (seen, revisions) = tr.store().snapshot();
  let row = seen.get(&t("x")).unwrap();
  assert_eq!(row.first_reviewed, d("2024-06-24"));
  assert_eq!(row.reset_level.get(), 1);

  let expected = [
    "2024-06-26",
    "2024-06-28",
    "2024-07-02",
    "2024-07-10",
    "2024-07-26",
    "2024-08-27",
    "2024-10-30",
    "2025-03-07",
  ];
  assert_eq!(dates(&revisions, "x"), expected);

  let reported: Vec<String> =
    updated.scheduled.iter().map(|d| d.to_string()).collect();
  assert_eq!(reported, expected);
}

#[tokio::test]
async fn update_entry_leaves_other_topics_alone() {
  let tr = tracker();
  tr.add_topic("a", Some(d("2024-06-20")), None).await.unwrap();
  tr.add_topic("b", Some(d("2024-06-20")), None).await.unwrap();

  tr.update_entry("a", Some(d("2024-06-20")), 8).await.unwrap();

  let (_, revisions) = tr.store().snapshot();
  assert_eq!(revisions.dates_for(&t("a")).count(), 1);
  assert_eq!(revisions.dates_for(&t("b")).count(), 9);
}

#[tokio::test]
async fn update_unknown_topic_fails() {
  let tr = tracker();
  let err = tr
    .update_entry("missing", Some(d("2024-06-24")), 0)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::TopicNotFound(_)));
  assert_eq!(tr.store().writes(), 0);
}

#[tokio::test]
async fn update_with_out_of_range_level_changes_nothing() {
  let tr = tracker();
  tr.add_topic("x", Some(d("2024-06-20")), None).await.unwrap();
  let before = tr.store().snapshot();
  let writes = tr.store().writes();

  for level in [9, -1] {
    let err = tr
      .update_entry("x", Some(d("2024-06-24")), level)
      .await
      .unwrap_err();
    assert!(matches!(err, Error::InvalidResetLevel(got) if got == level));
  }

  assert_eq!(tr.store().snapshot(), before);
  assert_eq!(tr.store().writes(), writes);
}

// ─── list_due ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_due_joins_seen_metadata() {
  let tr = tracker();
  tr.add_topic("b", Some(d("2025-06-29")), Some("https://example.com/b".into()))
    .await
    .unwrap();
  tr.add_topic("a", Some(d("2025-06-29")), None).await.unwrap();

  let due = tr.list_due(Some(d("2025-06-30"))).await.unwrap();
  assert_eq!(due.date, d("2025-06-30"));
  assert!(due.orphans.is_empty());

  let topics: Vec<&str> = due.entries.iter().map(|e| e.topic.as_str()).collect();
  assert_eq!(topics, ["a", "b"]);
  assert_eq!(due.entries[1].url.as_deref(), Some("https://example.com/b"));
  assert_eq!(due.entries[1].first_reviewed, d("2025-06-29"));
}

#[tokio::test]
async fn list_due_on_empty_day_is_empty() {
  let tr = tracker();
  tr.add_topic("a", Some(d("2025-06-29")), None).await.unwrap();

  let due = tr.list_due(Some(d("2025-06-29"))).await.unwrap();
  assert!(due.is_empty());
  assert_eq!(tr.store().writes(), 2);
}

#[tokio::test]
async fn list_due_reports_orphans_and_keeps_listing() {
  let seen = SeenTable::from_rows([SeenRecord {
    topic:          t("kept"),
    first_reviewed: d("2025-06-01"),
    reset_level:    ResetLevel::MIN,
    url:            None,
  }])
  .unwrap();
  let revisions: RevisionTable = [
    RevisionRecord { date: d("2025-06-02"), topic: t("ghost") },
    RevisionRecord { date: d("2025-06-02"), topic: t("kept") },
  ]
  .into_iter()
  .collect();
  let tr = Tracker::new(MemoryStore::with_tables(seen, revisions));

  let due = tr.list_due(Some(d("2025-06-02"))).await.unwrap();
  assert_eq!(due.orphans, [t("ghost")]);
  assert_eq!(due.entries.len(), 1);
  assert_eq!(due.entries[0].topic, t("kept"));
}

// ─── upcoming ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upcoming_lists_remaining_dates() {
  let tr = tracker();
  tr.add_topic("x", Some(d("2024-06-28")), None).await.unwrap();

  let rest = tr.upcoming("x", Some(d("2024-08-01"))).await.unwrap();
  assert_eq!(rest, [d("2024-08-31"), d("2024-11-03"), d("2025-03-11")]);

  let err = tr.upcoming("y", None).await.unwrap_err();
  assert!(matches!(err, Error::TopicNotFound(_)));
}
