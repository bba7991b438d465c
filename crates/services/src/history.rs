use std::sync::Arc;

use game_core::model::GameKind;
use storage::repository::{RecordRepository, SessionRecordRow};

use crate::error::HistoryError;

/// Read side of the durable record list, for score-history screens.
#[derive(Clone)]
pub struct RecordHistoryService {
    records: Arc<dyn RecordRepository>,
}

impl RecordHistoryService {
    #[must_use]
    pub fn new(records: Arc<dyn RecordRepository>) -> Self {
        Self { records }
    }

    /// List past runs for one game, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` on repository failures.
    pub async fn list(
        &self,
        game: GameKind,
        limit: u32,
    ) -> Result<Vec<SessionRecordRow>, HistoryError> {
        let rows = self.records.list_records(game, limit).await?;
        Ok(rows)
    }

    /// Most recent run for one game, if any.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` on repository failures.
    pub async fn latest(&self, game: GameKind) -> Result<Option<SessionRecordRow>, HistoryError> {
        let rows = self.records.list_records(game, 1).await?;
        Ok(rows.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::model::SessionRecord;
    use game_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn latest_returns_newest_record() {
        let repo = InMemoryRepository::new();
        let old = SessionRecord::new(fixed_now(), 50, 30_000);
        let new = SessionRecord::new(fixed_now() + chrono::Duration::hours(1), 80, 20_000);
        repo.append_record(GameKind::Korean, &old).await.unwrap();
        repo.append_record(GameKind::Korean, &new).await.unwrap();

        let service = RecordHistoryService::new(Arc::new(repo));
        let latest = service.latest(GameKind::Korean).await.unwrap().unwrap();
        assert_eq!(latest.record.score(), 80);

        assert!(service.latest(GameKind::Math).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_empty_for_fresh_store() {
        let repo = InMemoryRepository::new();
        let service = RecordHistoryService::new(Arc::new(repo));
        let rows = service.list(GameKind::Math, 10).await.unwrap();
        assert!(rows.is_empty());
    }
}
