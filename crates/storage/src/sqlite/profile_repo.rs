use sqlx::Row;

use game_core::model::SchoolProfile;

use super::SqliteRepository;
use super::mapping::{character_from_str, ser};
use crate::repository::{ProfileRepository, StorageError};

#[async_trait::async_trait]
impl ProfileRepository for SqliteRepository {
    async fn save_profile(&self, profile: &SchoolProfile) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO school_profile (id, school_name, character)
                VALUES (1, ?1, ?2)
                ON CONFLICT(id) DO UPDATE SET
                    school_name = excluded.school_name,
                    character = excluded.character
            ",
        )
        .bind(profile.school_name())
        .bind(profile.character().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn load_profile(&self) -> Result<Option<SchoolProfile>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT school_name, character
                FROM school_profile
                WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let name: String = row.try_get("school_name").map_err(ser)?;
        let character = character_from_str(row.try_get::<String, _>("character").map_err(ser)?.as_str())?;
        let profile = SchoolProfile::new(&name, character).map_err(ser)?;

        Ok(Some(profile))
    }

    async fn clear_profile(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM school_profile WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
