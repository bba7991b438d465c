mod engine;
mod progress;
mod runtime;

// Public API of the session subsystem.
pub use crate::error::EngineError;
pub use engine::{
    BlockTransition, CountdownStep, GradedAnswer, LEVEL_COUNTDOWN_SECS, PREGAME_COUNTDOWN_SECS,
    QuizSession, SessionPhase, SubmitGuard, SubmitOutcome,
};
pub use progress::SessionProgress;
pub use runtime::GameLoopService;
