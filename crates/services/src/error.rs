//! Shared error types for the services crate.

use thiserror::Error;

use game_core::model::ProfileError;
use storage::repository::StorageError;

/// Errors emitted by the session engine and its runtime driver.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("level {level} is outside the playable range")]
    LevelOutOfRange { level: u8 },

    #[error("session is not finished")]
    NotFinished,

    #[error("session state lock poisoned")]
    Poisoned,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `RecordHistoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `SchoolProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
