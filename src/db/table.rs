// CSV file holding the profiles table

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::db::error::DbError;
use crate::models::{ProfileRecord, PROFILE_COLUMNS};

/// Handle on the CSV file backing the profiles table
///
/// Reads and writes are whole-file. A rewrite goes to a sibling temporary
/// file that is then renamed over the table, so a reader sees either the old
/// or the new contents.
#[derive(Debug, Clone)]
pub struct CsvTable {
    path: PathBuf,
}

impl CsvTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory and a header-only table if missing
    pub fn ensure(&self) -> Result<(), DbError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if !self.path.exists() {
            tracing::info!("Creating profiles table at {}", self.path.display());
            self.write_all(&[])?;
        }

        Ok(())
    }

    /// Loads every row of the table
    ///
    /// A missing file reads as an empty table and is not created here.
    pub fn read_all(&self) -> Result<Vec<ProfileRecord>, DbError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let mut records = Vec::new();
        for row in reader.deserialize::<ProfileRecord>() {
            records.push(row?);
        }

        Ok(records)
    }

    /// Replaces the table contents with `records`
    pub fn write_all(&self, records: &[ProfileRecord]) -> Result<(), DbError> {
        let tmp_path = self.tmp_path();

        let result = write_file(&tmp_path, records)
            .and_then(|()| fs::rename(&tmp_path, &self.path).map_err(DbError::from));
        if result.is_err() {
            if let Err(e) = fs::remove_file(&tmp_path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Could not remove {}: {}", tmp_path.display(), e);
                }
            }
        }
        result
    }

    // Unique per write so concurrent writers never share a temporary file
    fn tmp_path(&self) -> PathBuf {
        static NEXT: AtomicU64 = AtomicU64::new(0);

        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(
            ".{}.{}.tmp",
            std::process::id(),
            NEXT.fetch_add(1, Ordering::Relaxed)
        ));
        self.path.with_file_name(name)
    }
}

fn write_file(path: &Path, records: &[ProfileRecord]) -> Result<(), DbError> {
    // Header is written by hand so an empty table still carries it
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(PROFILE_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(user_id: &str, amount: f64) -> ProfileRecord {
        let t0 = Utc.with_ymd_and_hms(2025, 10, 19, 14, 3, 7).unwrap();
        ProfileRecord {
            user_id: user_id.to_string(),
            first_seen: t0,
            last_seen: t0,
            visits: 1,
            amount,
        }
    }

    #[test]
    fn test_ensure_creates_parent_and_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("profiles.csv");
        let table = CsvTable::new(&path);

        table.ensure().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "user_id,first_seen,last_seen,visits,amount\n");
        assert!(table.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_write_then_read_rows() {
        let dir = tempfile::tempdir().unwrap();
        let table = CsvTable::new(dir.path().join("profiles.csv"));

        table.write_all(&[record("u1", 42.5), record("u2", 0.0)]).unwrap();

        let contents = fs::read_to_string(table.path()).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("user_id,first_seen,last_seen,visits,amount"));
        assert_eq!(
            lines.next(),
            Some("u1,2025-10-19T14:03:07+00:00,2025-10-19T14:03:07+00:00,1,42.5")
        );

        let rows = table.read_all().unwrap();
        assert_eq!(rows, vec![record("u1", 42.5), record("u2", 0.0)]);
        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_missing_table_reads_empty_without_creating_it() {
        let dir = tempfile::tempdir().unwrap();
        let table = CsvTable::new(dir.path().join("profiles.csv"));

        assert!(table.read_all().unwrap().is_empty());
        assert!(!table.path().exists());
    }

    #[test]
    fn test_failed_rewrite_leaves_no_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory where the table should be makes the rename fail
        let path = dir.path().join("profiles.csv");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("blocker"), "x").unwrap();

        let err = CsvTable::new(&path).write_all(&[record("u1", 1.0)]).unwrap_err();

        assert!(matches!(err, DbError::Io(_)));
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["profiles.csv".to_string()]);
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.csv");
        fs::write(
            &path,
            "user_id,first_seen,last_seen,visits,amount\nu1,yesterday,today,1,abc\n",
        )
        .unwrap();

        let err = CsvTable::new(&path).read_all().unwrap_err();
        assert!(matches!(err, DbError::Csv(_)));
    }
}
