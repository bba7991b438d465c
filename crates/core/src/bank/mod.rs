//! Question generation, one bank per game variant.

mod arithmetic;
mod hangul;

pub use arithmetic::ArithmeticBank;
pub use hangul::HangulBank;

use crate::model::{GameKind, Question};

/// Bound on redraws when avoiding an immediately repeated question.
const REDRAW_ATTEMPTS: usize = 8;

/// Generator contract consumed by the session engine.
///
/// Banks own their randomness and their last-prompt memory, so two live
/// sessions never share generator state.
pub trait QuestionBank: Send {
    /// Which game this bank feeds.
    fn game(&self) -> GameKind;

    /// Draw the next question for `level`.
    ///
    /// Levels outside the game's range fall back to the hardest tier rather
    /// than failing; the engine validates levels before asking.
    fn next_question(&mut self, level: u8) -> Question;
}

/// Default bank for a game variant.
#[must_use]
pub fn bank_for(game: GameKind) -> Box<dyn QuestionBank> {
    match game {
        GameKind::Korean => Box::new(HangulBank::new()),
        GameKind::Math => Box::new(ArithmeticBank::new()),
    }
}

/// Redraws until the prompt differs from `last`, bounded by `REDRAW_ATTEMPTS`.
pub(crate) fn draw_distinct(last: Option<&str>, mut draw: impl FnMut() -> Question) -> Question {
    let mut question = draw();
    let Some(last) = last else {
        return question;
    };
    for _ in 0..REDRAW_ATTEMPTS {
        if question.prompt() != last {
            break;
        }
        question = draw();
    }
    question
}
