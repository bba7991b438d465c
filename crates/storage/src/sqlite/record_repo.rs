use sqlx::Row;

use game_core::model::{GameKind, SessionRecord};

use super::SqliteRepository;
use super::mapping::{game_kind_from_str, i64_from_u64, ser, u32_from_i64, u64_from_i64};
use crate::repository::{RecordRepository, SessionRecordRow, StorageError};

fn map_record_row(row: &sqlx::sqlite::SqliteRow) -> Result<SessionRecordRow, StorageError> {
    let id: i64 = row.try_get("id").map_err(ser)?;
    let recorded_at = row.try_get("recorded_at").map_err(ser)?;
    let score = u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?;
    let duration_ms = u64_from_i64(
        "duration_ms",
        row.try_get::<i64, _>("duration_ms").map_err(ser)?,
    )?;

    Ok(SessionRecordRow::new(
        id,
        SessionRecord::from_persisted(recorded_at, score, duration_ms),
    ))
}

#[async_trait::async_trait]
impl RecordRepository for SqliteRepository {
    async fn append_record(
        &self,
        game: GameKind,
        record: &SessionRecord,
    ) -> Result<i64, StorageError> {
        let duration_ms = i64_from_u64("duration_ms", record.duration_ms())?;

        let res = sqlx::query(
            r"
                INSERT INTO session_records (game, recorded_at, score, duration_ms)
                VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(game.as_str())
        .bind(record.recorded_at())
        .bind(i64::from(record.score()))
        .bind(duration_ms)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(res.last_insert_rowid())
    }

    async fn list_records(
        &self,
        game: GameKind,
        limit: u32,
    ) -> Result<Vec<SessionRecordRow>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, game, recorded_at, score, duration_ms
                FROM session_records
                WHERE game = ?1
                ORDER BY id DESC
                LIMIT ?2
            ",
        )
        .bind(game.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            // The stored key must parse back to the same game.
            game_kind_from_str(row.try_get::<String, _>("game").map_err(ser)?.as_str())?;
            out.push(map_record_row(&row)?);
        }

        Ok(out)
    }
}
