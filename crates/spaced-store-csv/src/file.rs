//! Blocking whole-file CSV reads and atomic rewrites.
//!
//! Called from [`tokio::task::spawn_blocking`] by the store.

use std::{
  fs::{self, File},
  io,
  path::Path,
};

use serde::{Serialize, de::DeserializeOwned};
use tempfile::NamedTempFile;

use crate::{Error, Result};

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> Error + '_ {
  move |source| Error::Io { path: path.to_owned(), source }
}

fn csv_error(path: &Path) -> impl FnOnce(csv::Error) -> Error + '_ {
  move |source| Error::Csv { path: path.to_owned(), source }
}

/// Read every data row of the CSV file at `path`. The header row is matched
/// against the field names of `T`.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
  let file = File::open(path).map_err(io_error(path))?;
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(true)
    .trim(csv::Trim::Headers)
    .from_reader(file);

  reader
    .deserialize()
    .collect::<Result<Vec<T>, csv::Error>>()
    .map_err(csv_error(path))
}

/// Replace the file at `path` with `header` followed by `rows`.
///
/// The rows are written and synced to a uniquely named temporary file in the
/// same directory, then renamed over `path`. A crash mid-write leaves the
/// previous file intact, and two concurrent writers each publish a whole
/// table (the last rename wins). Missing parent directories are created.
pub fn write_rows<T, I>(path: &Path, header: &[&str], rows: I) -> Result<()>
where
  T: Serialize,
  I: IntoIterator<Item = T>,
{
  let dir = path
    .parent()
    .filter(|p| !p.as_os_str().is_empty())
    .unwrap_or(Path::new("."));
  fs::create_dir_all(dir).map_err(io_error(dir))?;

  // Removed on drop unless persisted.
  let tmp = NamedTempFile::new_in(dir).map_err(io_error(dir))?;
  write_csv(tmp.as_file(), tmp.path(), header, rows)?;

  tmp
    .persist(path)
    .map_err(|e| io_error(path)(e.error))?;
  Ok(())
}

fn write_csv<T, I>(file: &File, tmp: &Path, header: &[&str], rows: I) -> Result<()>
where
  T: Serialize,
  I: IntoIterator<Item = T>,
{
  let mut writer = csv::WriterBuilder::new()
    .has_headers(false)
    .from_writer(file);

  writer.write_record(header).map_err(csv_error(tmp))?;
  for row in rows {
    writer.serialize(row).map_err(csv_error(tmp))?;
  }

  writer.flush().map_err(io_error(tmp))?;
  let file = writer
    .into_inner()
    .map_err(|e| io_error(tmp)(io::Error::new(e.error().kind(), e.to_string())))?;
  file.sync_all().map_err(io_error(tmp))
}
