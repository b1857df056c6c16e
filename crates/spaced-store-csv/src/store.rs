//! [`CsvStore`] — the CSV implementation of [`TableStore`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use serde::Deserialize;
use spaced_core::{RevisionTable, SeenTable, TableStore};
use tracing::{debug, info};

use crate::{
  Error, Result,
  encode::{REVISIONS_HEADER, RawRevisionRow, RawSeenRow, SEEN_HEADER},
  file::{read_rows, write_rows},
};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Locations of the two table files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TablePaths {
  pub seen:      PathBuf,
  pub revisions: PathBuf,
}

impl TablePaths {
  /// `seen.csv` and `revisions.csv` inside `dir`.
  pub fn in_dir(dir: impl AsRef<Path>) -> Self {
    let dir = dir.as_ref();
    Self {
      seen:      dir.join("seen.csv"),
      revisions: dir.join("revisions.csv"),
    }
  }
}

impl Default for TablePaths {
  fn default() -> Self { Self::in_dir("./data") }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Seen and Revisions tables stored as two CSV files.
///
/// Cloning is cheap — the paths are reference-counted.
#[derive(Debug, Clone)]
pub struct CsvStore {
  paths: Arc<TablePaths>,
}

impl CsvStore {
  pub fn new(paths: TablePaths) -> Self {
    Self { paths: Arc::new(paths) }
  }

  pub fn paths(&self) -> &TablePaths { &self.paths }

  /// Create any missing table file with just its header row. Existing files
  /// are left untouched. Returns the paths that were created.
  pub async fn init(&self) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();

    if !exists(&self.paths.seen).await? {
      self.save_seen(&SeenTable::new()).await?;
      created.push(self.paths.seen.clone());
    }
    if !exists(&self.paths.revisions).await? {
      self.save_revisions(&RevisionTable::new()).await?;
      created.push(self.paths.revisions.clone());
    }

    for path in &created {
      info!(path = %path.display(), "created empty table");
    }
    Ok(created)
  }
}

async fn exists(path: &Path) -> Result<bool> {
  tokio::fs::try_exists(path)
    .await
    .map_err(|source| Error::Io { path: path.to_owned(), source })
}

fn malformed(path: &Path, row: usize, err: spaced_core::Error) -> Error {
  Error::Malformed {
    path:   path.to_owned(),
    row,
    reason: err.to_string(),
  }
}

/// Rows are numbered from 1, not counting the header.
fn read_seen(path: &Path) -> Result<SeenTable> {
  let mut table = SeenTable::new();
  for (i, raw) in read_rows::<RawSeenRow>(path)?.into_iter().enumerate() {
    let row = i + 1;
    let record = raw.into_record().map_err(|e| malformed(path, row, e))?;
    let topic = record.topic.clone();
    if table.insert(record).is_err() {
      return Err(Error::Malformed {
        path: path.to_owned(),
        row,
        reason: format!("topic '{topic}' appears more than once"),
      });
    }
  }
  Ok(table)
}

fn read_revisions(path: &Path) -> Result<RevisionTable> {
  read_rows::<RawRevisionRow>(path)?
    .into_iter()
    .enumerate()
    .map(|(i, raw)| raw.into_record().map_err(|e| malformed(path, i + 1, e)))
    .collect()
}

// ─── TableStore impl ─────────────────────────────────────────────────────────

impl TableStore for CsvStore {
  type Error = Error;

  async fn load_seen(&self) -> Result<SeenTable> {
    let path = self.paths.seen.clone();
    let table = tokio::task::spawn_blocking(move || read_seen(&path)).await??;
    debug!(path = %self.paths.seen.display(), rows = table.len(), "loaded seen table");
    Ok(table)
  }

  async fn load_revisions(&self) -> Result<RevisionTable> {
    let path = self.paths.revisions.clone();
    let table =
      tokio::task::spawn_blocking(move || read_revisions(&path)).await??;
    debug!(path = %self.paths.revisions.display(), rows = table.len(), "loaded revisions table");
    Ok(table)
  }

  async fn save_seen(&self, table: &SeenTable) -> Result<()> {
    let path = self.paths.seen.clone();
    let rows: Vec<RawSeenRow> = table.iter().map(RawSeenRow::from_record).collect();
    let count = rows.len();

    tokio::task::spawn_blocking(move || write_rows(&path, &SEEN_HEADER, rows))
      .await??;
    debug!(path = %self.paths.seen.display(), rows = count, "wrote seen table");
    Ok(())
  }

  async fn save_revisions(&self, table: &RevisionTable) -> Result<()> {
    let path = self.paths.revisions.clone();
    let rows: Vec<RawRevisionRow> =
      table.iter().map(RawRevisionRow::from_record).collect();
    let count = rows.len();

    tokio::task::spawn_blocking(move || {
      write_rows(&path, &REVISIONS_HEADER, rows)
    })
    .await??;
    debug!(path = %self.paths.revisions.display(), rows = count, "wrote revisions table");
    Ok(())
  }
}
