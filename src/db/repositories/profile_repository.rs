use std::sync::Arc;

use tokio::sync::Mutex;

use crate::db::error::DbError;
use crate::db::table::CsvTable;
use crate::models::{ProfileRecord, VisitorProfile};

/// Repository for visitor profile rows, keyed by `user_id`
#[derive(Clone)]
pub struct ProfileRepository {
    table: CsvTable,
    // Held across every read-modify-write of the table
    write_lock: Arc<Mutex<()>>,
}

impl ProfileRepository {
    /// Creates a new profile repository over the given table
    pub fn new(table: CsvTable) -> Self {
        Self {
            table,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Creates the table file (header only) if it does not exist yet
    pub async fn ensure(&self) -> Result<(), DbError> {
        let _guard = self.write_lock.lock().await;
        let table = self.table.clone();
        tokio::task::spawn_blocking(move || table.ensure()).await?
    }

    /// Get all profile rows in table order
    pub async fn all(&self) -> Result<Vec<ProfileRecord>, DbError> {
        let table = self.table.clone();
        tokio::task::spawn_blocking(move || table.read_all()).await?
    }

    /// Find the row for a user, if one has been stored
    pub async fn find(&self, user_id: &str) -> Result<Option<ProfileRecord>, DbError> {
        let records = self.all().await?;
        Ok(records.into_iter().find(|r| r.user_id == user_id))
    }

    /// Inserts or overwrites the row for `profile.user_id` with the latest
    /// profile fields and `amount`, then rewrites the table
    pub async fn upsert(
        &self,
        profile: &VisitorProfile,
        amount: f64,
    ) -> Result<ProfileRecord, DbError> {
        if profile.user_id.is_empty() {
            return Err(DbError::InvalidRecord("user_id must not be empty".to_string()));
        }
        if !amount.is_finite() {
            return Err(DbError::InvalidRecord(format!("amount {} is not finite", amount)));
        }

        let row = ProfileRecord::from_profile(profile, amount);

        let _guard = self.write_lock.lock().await;
        let table = self.table.clone();
        let stored = row.clone();
        let inserted =
            tokio::task::spawn_blocking(move || -> Result<bool, DbError> {
                table.ensure()?;
                let mut records = table.read_all()?;
                let inserted = upsert_row(&mut records, stored);
                table.write_all(&records)?;
                Ok(inserted)
            })
            .await??;

        if inserted {
            tracing::info!("Inserted profile row for {}", row.user_id);
        } else {
            tracing::debug!("Updated profile row for {}", row.user_id);
        }

        Ok(row)
    }
}

/// Places `row` in `records`, returning true when it was appended
///
/// The first row with a matching key is overwritten in place and any later
/// duplicates are removed.
fn upsert_row(records: &mut Vec<ProfileRecord>, row: ProfileRecord) -> bool {
    match records.iter().position(|r| r.user_id == row.user_id) {
        Some(index) => {
            let mut seen = 0usize;
            records.retain(|r| {
                if r.user_id != row.user_id {
                    return true;
                }
                seen += 1;
                seen == 1
            });
            records[index] = row;
            false
        }
        None => {
            records.push(row);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn profile(user_id: &str) -> VisitorProfile {
        let t0 = Utc.with_ymd_and_hms(2025, 10, 19, 14, 3, 7).unwrap();
        VisitorProfile {
            user_id: user_id.to_string(),
            first_seen: t0,
            last_seen: t0,
            visits: 1,
        }
    }

    fn repository(dir: &tempfile::TempDir) -> ProfileRepository {
        ProfileRepository::new(CsvTable::new(dir.path().join("profiles.csv")))
    }

    #[tokio::test]
    async fn test_upsert_into_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repository(&dir);

        repo.upsert(&profile("u1"), 42.5).await.unwrap();

        let rows = repo.all().await.unwrap();
        assert_eq!(rows, vec![ProfileRecord::from_profile(&profile("u1"), 42.5)]);
    }

    #[tokio::test]
    async fn test_upsert_same_user_overwrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repository(&dir);
        repo.upsert(&profile("u1"), 10.0).await.unwrap();
        repo.upsert(&profile("u2"), 5.0).await.unwrap();

        let mut returning = profile("u1");
        returning.visits = 4;
        repo.upsert(&returning, 99.9).await.unwrap();

        let rows = repo.all().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user_id, "u1");
        assert_eq!(rows[0].amount, 99.9);
        assert_eq!(rows[0].visits, 4);
        assert_eq!(rows[1], ProfileRecord::from_profile(&profile("u2"), 5.0));
    }

    #[tokio::test]
    async fn test_upsert_new_user_leaves_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repository(&dir);
        repo.upsert(&profile("u1"), 1.0).await.unwrap();
        repo.upsert(&profile("u2"), 2.0).await.unwrap();
        let before = repo.all().await.unwrap();

        repo.upsert(&profile("u3"), 3.0).await.unwrap();

        let after = repo.all().await.unwrap();
        assert_eq!(after.len(), 3);
        assert_eq!(&after[..2], &before[..]);
        assert_eq!(after[2].user_id, "u3");
    }

    #[tokio::test]
    async fn test_upsert_rejects_empty_user_id() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repository(&dir);

        let err = repo.upsert(&profile(""), 1.0).await.unwrap_err();

        assert!(matches!(err, DbError::InvalidRecord(_)));
        assert!(!dir.path().join("profiles.csv").exists());
    }

    #[tokio::test]
    async fn test_upsert_recreates_deleted_table() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repository(&dir);
        repo.ensure().await.unwrap();
        std::fs::remove_file(dir.path().join("profiles.csv")).unwrap();

        assert!(repo.all().await.unwrap().is_empty());
        repo.upsert(&profile("u1"), 2.0).await.unwrap();

        let contents = std::fs::read_to_string(dir.path().join("profiles.csv")).unwrap();
        assert!(contents.starts_with("user_id,first_seen,last_seen,visits,amount\n"));
        assert_eq!(repo.all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_returns_stored_row() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repository(&dir);
        repo.upsert(&profile("u1"), 7.25).await.unwrap();

        assert_eq!(repo.find("u1").await.unwrap().map(|r| r.amount), Some(7.25));
        assert!(repo.find("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_upserts_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repository(&dir);

        let mut handles = Vec::new();
        for i in 0..16 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.upsert(&profile(&format!("user-{}", i)), i as f64).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.all().await.unwrap().len(), 16);
    }

    #[test]
    fn test_upsert_row_collapses_duplicates() {
        let stale = ProfileRecord::from_profile(&profile("u1"), 1.0);
        let other = ProfileRecord::from_profile(&profile("u2"), 2.0);
        let mut records = vec![other.clone(), stale.clone(), stale.clone()];

        let inserted = upsert_row(&mut records, ProfileRecord::from_profile(&profile("u1"), 3.0));

        assert!(!inserted);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], other);
        assert_eq!(records[1].amount, 3.0);
    }
}
