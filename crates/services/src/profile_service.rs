use std::sync::Arc;

use game_core::model::{CharacterKind, SchoolProfile};
use storage::repository::ProfileRepository;

use crate::error::ProfileServiceError;

/// Validates and persists the player's school name and character choice.
#[derive(Clone)]
pub struct SchoolProfileService {
    repo: Arc<dyn ProfileRepository>,
}

impl SchoolProfileService {
    #[must_use]
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }

    /// Validate the name, build the profile, and persist it.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Profile` when the trimmed name is empty
    /// or too long, or `ProfileServiceError::Storage` on persistence failures.
    pub async fn save(
        &self,
        school_name: &str,
        character: CharacterKind,
    ) -> Result<SchoolProfile, ProfileServiceError> {
        let profile = SchoolProfile::new(school_name, character)?;
        self.repo.save_profile(&profile).await?;
        Ok(profile)
    }

    /// Load the persisted profile, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` on repository failures.
    pub async fn load(&self) -> Result<Option<SchoolProfile>, ProfileServiceError> {
        let profile = self.repo.load_profile().await?;
        Ok(profile)
    }

    /// Clear the persisted profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` on repository failures.
    pub async fn reset(&self) -> Result<(), ProfileServiceError> {
        self.repo.clear_profile().await?;
        Ok(())
    }
}
