use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use game_core::model::{GameKind, SchoolProfile, SessionRecord};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted run record together with its storage row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecordRow {
    pub id: i64,
    pub record: SessionRecord,
}

impl SessionRecordRow {
    #[must_use]
    pub fn new(id: i64, record: SessionRecord) -> Self {
        Self { id, record }
    }
}

/// Durable, per-game record list. Append-only from the engine's perspective.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Append a finished-run record and return its row id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn append_record(
        &self,
        game: GameKind,
        record: &SessionRecord,
    ) -> Result<i64, StorageError>;

    /// List records for one game, most recent first.
    ///
    /// An empty or missing list reads as an empty sequence, never an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_records(
        &self,
        game: GameKind,
        limit: u32,
    ) -> Result<Vec<SessionRecordRow>, StorageError>;
}

/// Single persisted school profile (name + character).
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Persist or replace the profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn save_profile(&self, profile: &SchoolProfile) -> Result<(), StorageError>;

    /// Fetch the profile, or `None` when none was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the persisted profile is
    /// malformed, or other storage errors.
    async fn load_profile(&self) -> Result<Option<SchoolProfile>, StorageError>;

    /// Remove the profile. No-op when none exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn clear_profile(&self) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<Mutex<HashMap<GameKind, Vec<SessionRecordRow>>>>,
    next_id: Arc<Mutex<i64>>,
    profile: Arc<Mutex<Option<SchoolProfile>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRepository {
    async fn append_record(
        &self,
        game: GameKind,
        record: &SessionRecord,
    ) -> Result<i64, StorageError> {
        let id = {
            let mut next = self
                .next_id
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            *next += 1;
            *next
        };
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .entry(game)
            .or_default()
            .push(SessionRecordRow::new(id, record.clone()));
        Ok(id)
    }

    async fn list_records(
        &self,
        game: GameKind,
        limit: u32,
    ) -> Result<Vec<SessionRecordRow>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let Some(rows) = guard.get(&game) else {
            return Ok(Vec::new());
        };
        Ok(rows
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn save_profile(&self, profile: &SchoolProfile) -> Result<(), StorageError> {
        let mut guard = self
            .profile
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(profile.clone());
        Ok(())
    }

    async fn load_profile(&self) -> Result<Option<SchoolProfile>, StorageError> {
        let guard = self
            .profile
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn clear_profile(&self) -> Result<(), StorageError> {
        let mut guard = self
            .profile
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Aggregates the record and profile repositories behind trait objects.
#[derive(Clone)]
pub struct Storage {
    pub records: Arc<dyn RecordRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let records: Arc<dyn RecordRepository> = Arc::new(repo.clone());
        let profiles: Arc<dyn ProfileRepository> = Arc::new(repo);
        Self { records, profiles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::model::CharacterKind;
    use game_core::time::fixed_now;

    #[tokio::test]
    async fn records_list_most_recent_first() {
        let repo = InMemoryRepository::new();

        let first = SessionRecord::new(fixed_now(), 100, 60_000);
        let second = SessionRecord::new(fixed_now() + chrono::Duration::minutes(5), 250, 90_000);

        let first_id = repo.append_record(GameKind::Math, &first).await.unwrap();
        let second_id = repo.append_record(GameKind::Math, &second).await.unwrap();

        let rows = repo.list_records(GameKind::Math, 10).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, second_id);
        assert_eq!(rows[0].record, second);
        assert_eq!(rows[1].id, first_id);
    }

    #[tokio::test]
    async fn records_are_scoped_per_game() {
        let repo = InMemoryRepository::new();
        let record = SessionRecord::new(fixed_now(), 100, 60_000);
        repo.append_record(GameKind::Korean, &record).await.unwrap();

        let math = repo.list_records(GameKind::Math, 10).await.unwrap();
        assert!(math.is_empty());

        let korean = repo.list_records(GameKind::Korean, 10).await.unwrap();
        assert_eq!(korean.len(), 1);
    }

    #[tokio::test]
    async fn list_honors_limit() {
        let repo = InMemoryRepository::new();
        for score in 0..5 {
            let record = SessionRecord::new(fixed_now(), score, 1_000);
            repo.append_record(GameKind::Math, &record).await.unwrap();
        }
        let rows = repo.list_records(GameKind::Math, 2).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].record.score(), 4);
    }

    #[tokio::test]
    async fn profile_round_trips_and_clears() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_profile().await.unwrap().is_none());

        let profile = SchoolProfile::new("별빛학교", CharacterKind::Teacher).unwrap();
        repo.save_profile(&profile).await.unwrap();
        assert_eq!(repo.load_profile().await.unwrap(), Some(profile));

        repo.clear_profile().await.unwrap();
        assert!(repo.load_profile().await.unwrap().is_none());
    }
}
