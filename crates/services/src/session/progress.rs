use game_core::model::GameKind;
use game_core::scoring::AnswerResult;

/// Snapshot of session state for the presentation layer.
///
/// Everything a screen needs to render one frame of the game, with no access
/// to the engine's internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub game: GameKind,
    pub level: u8,
    pub score: u32,
    /// Block position, e.g. `"3 / 10"`.
    pub progress_text: String,
    /// Prompt of the current question, when one is live.
    pub prompt: Option<String>,
    pub last_result: Option<AnswerResult>,
    pub countdown: u8,
    pub next_level_countdown: u8,
    pub elapsed_sec: u64,
    pub is_finished: bool,
}
