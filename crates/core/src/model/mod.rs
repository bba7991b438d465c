mod game;
mod profile;
mod question;
mod record;

pub use game::{GameKind, GameRules, GameRulesError, ParseGameKindError, QUESTIONS_PER_BLOCK};
pub use profile::{CharacterKind, ProfileError, SchoolProfile};
pub use question::{Answer, Question};
pub use record::SessionRecord;
