#![forbid(unsafe_code)]

pub mod error;
pub mod history;
pub mod profile_service;
pub mod session;

pub use game_core::Clock;
pub use game_core::scoring::AnswerResult;

pub use error::{EngineError, HistoryError, ProfileServiceError};
pub use history::RecordHistoryService;
pub use profile_service::SchoolProfileService;

pub use session::{
    BlockTransition, GameLoopService, GradedAnswer, QuizSession, SessionPhase, SessionProgress,
    SubmitGuard, SubmitOutcome,
};
