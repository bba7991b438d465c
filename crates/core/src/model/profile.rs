use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MAX_NAME_CHARS: usize = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("school name must be 1 to {MAX_NAME_CHARS} characters after trimming, got {chars}")]
    InvalidName { chars: usize },

    #[error("unknown character: {0}")]
    UnknownCharacter(String),
}

/// Classroom character the player picks at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterKind {
    Cat,
    Teacher,
}

impl CharacterKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterKind::Cat => "cat",
            CharacterKind::Teacher => "teacher",
        }
    }
}

impl fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterKind {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cat" => Ok(CharacterKind::Cat),
            "teacher" => Ok(CharacterKind::Teacher),
            other => Err(ProfileError::UnknownCharacter(other.to_string())),
        }
    }
}

/// Player-chosen school name and character, persisted across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolProfile {
    school_name: String,
    character: CharacterKind,
}

impl SchoolProfile {
    /// Validate and build a profile. The name is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::InvalidName` when the trimmed name is empty or
    /// longer than 10 characters.
    pub fn new(school_name: &str, character: CharacterKind) -> Result<Self, ProfileError> {
        let trimmed = school_name.trim();
        let chars = trimmed.chars().count();
        if chars == 0 || chars > MAX_NAME_CHARS {
            return Err(ProfileError::InvalidName { chars });
        }
        Ok(Self {
            school_name: trimmed.to_string(),
            character,
        })
    }

    #[must_use]
    pub fn school_name(&self) -> &str {
        &self.school_name
    }

    #[must_use]
    pub fn character(&self) -> CharacterKind {
        self.character
    }
}
