use thiserror::Error;

use crate::model::{GameRulesError, ProfileError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Rules(#[from] GameRulesError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
}
