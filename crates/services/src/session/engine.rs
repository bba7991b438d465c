use chrono::{DateTime, Utc};
use log::debug;
use std::fmt;

use game_core::bank::{ArithmeticBank, HangulBank, QuestionBank};
use game_core::model::{GameKind, GameRules, QUESTIONS_PER_BLOCK, Question, SessionRecord};
use game_core::scoring::{AnswerResult, score_answer};

use crate::error::EngineError;

/// Seconds counted down before level 1 starts.
pub const PREGAME_COUNTDOWN_SECS: u8 = 3;
/// Seconds counted down between a passed block and the next level.
pub const LEVEL_COUNTDOWN_SECS: u8 = 5;

//
// ─── TRANSITION OUTCOMES ───────────────────────────────────────────────────────
//

/// Why a `submit` call was suppressed without touching state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitGuard {
    NotStarted,
    CountdownInProgress,
    SessionFinished,
}

/// What happened after grading an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTransition {
    /// The block continues with a freshly drawn question.
    NextQuestion,
    /// The block was passed below the top level; the inter-level countdown began.
    LevelCountdown,
    /// The run ended; a `SessionRecord` is ready to persist.
    Finished,
}

/// Result of one `submit` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubmitOutcome {
    Ignored(SubmitGuard),
    Graded(GradedAnswer),
}

/// Grade, points, and follow-on transition for one accepted answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradedAnswer {
    pub result: AnswerResult,
    pub earned: u32,
    pub transition: BlockTransition,
}

/// Outcome of a 1 Hz countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// Still counting; schedule another tick.
    Pending,
    /// Countdown hit zero and the next phase started.
    Done,
    /// No countdown was in progress for this session.
    Inactive,
}

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    CountingDown,
    Playing,
    LevelCountdown,
    Finished,
}

fn ms_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    u64::try_from((to - from).num_milliseconds().max(0)).unwrap_or(0)
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State machine for one leveled, timed, scored play-through.
///
/// All mutating operations take `now` explicitly; scheduling lives in
/// `GameLoopService`, which calls the tick methods from timer tasks. That
/// split keeps every transition here synchronous and deterministic.
pub struct QuizSession {
    rules: GameRules,
    bank: Box<dyn QuestionBank>,

    level: u8,
    score: u32,
    question_index: u8,
    correct_count: u8,
    current_question: Option<Question>,
    last_result: Option<AnswerResult>,

    is_started: bool,
    is_running: bool,
    is_finished: bool,
    countdown: u8,
    next_level_countdown: u8,

    started_at: Option<DateTime<Utc>>,
    question_started_at: Option<DateTime<Utc>>,
    elapsed_ms: u64,

    record: Option<SessionRecord>,
    record_id: Option<i64>,
}

impl QuizSession {
    #[must_use]
    pub fn new(rules: GameRules, bank: Box<dyn QuestionBank>) -> Self {
        Self {
            rules,
            bank,
            level: 1,
            score: 0,
            question_index: 0,
            correct_count: 0,
            current_question: None,
            last_result: None,
            is_started: false,
            is_running: false,
            is_finished: false,
            countdown: 0,
            next_level_countdown: 0,
            started_at: None,
            question_started_at: None,
            elapsed_ms: 0,
            record: None,
            record_id: None,
        }
    }

    /// Session for the Korean literacy game.
    #[must_use]
    pub fn korean() -> Self {
        Self::new(GameRules::korean(), Box::new(HangulBank::new()))
    }

    /// Session for the math game.
    #[must_use]
    pub fn math() -> Self {
        Self::new(GameRules::math(), Box::new(ArithmeticBank::new()))
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn game(&self) -> GameKind {
        self.bank.game()
    }

    #[must_use]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn question_index(&self) -> u8 {
        self.question_index
    }

    #[must_use]
    pub fn correct_count(&self) -> u8 {
        self.correct_count
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    #[must_use]
    pub fn last_result(&self) -> Option<AnswerResult> {
        self.last_result
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.is_started
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    #[must_use]
    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    #[must_use]
    pub fn next_level_countdown(&self) -> u8 {
        self.next_level_countdown
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    #[must_use]
    pub fn elapsed_sec(&self) -> u64 {
        self.elapsed_ms / 1000
    }

    /// Block position for display, e.g. `"3 / 10"`.
    #[must_use]
    pub fn progress_text(&self) -> String {
        format!("{} / {}", self.question_index + 1, QUESTIONS_PER_BLOCK)
    }

    /// Record built when the run finished, if any.
    #[must_use]
    pub fn record(&self) -> Option<&SessionRecord> {
        self.record.as_ref()
    }

    /// Storage row id of the persisted record, once appended.
    #[must_use]
    pub fn record_id(&self) -> Option<i64> {
        self.record_id
    }

    pub(crate) fn set_record_id(&mut self, id: i64) {
        self.record_id = Some(id);
    }

    /// Snapshot for the presentation layer.
    #[must_use]
    pub fn progress(&self) -> super::SessionProgress {
        super::SessionProgress {
            game: self.game(),
            level: self.level,
            score: self.score,
            progress_text: self.progress_text(),
            prompt: self
                .current_question
                .as_ref()
                .map(|q| q.prompt().to_string()),
            last_result: self.last_result,
            countdown: self.countdown,
            next_level_countdown: self.next_level_countdown,
            elapsed_sec: self.elapsed_sec(),
            is_finished: self.is_finished,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if !self.is_started {
            SessionPhase::Idle
        } else if self.countdown > 0 {
            SessionPhase::CountingDown
        } else if self.is_finished {
            SessionPhase::Finished
        } else if self.next_level_countdown > 0 {
            SessionPhase::LevelCountdown
        } else {
            SessionPhase::Playing
        }
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Reset everything and begin the pre-game countdown.
    pub fn start_with_countdown(&mut self) {
        self.reset();
        self.is_started = true;
        self.countdown = PREGAME_COUNTDOWN_SECS;
    }

    /// One pre-game countdown tick. On reaching zero, level 1 begins and the
    /// elapsed timer anchors.
    pub fn tick_countdown(&mut self, now: DateTime<Utc>) -> CountdownStep {
        if !self.is_started || self.countdown == 0 {
            return CountdownStep::Inactive;
        }
        self.countdown -= 1;
        if self.countdown > 0 {
            return CountdownStep::Pending;
        }
        self.begin_level(1, now);
        self.started_at = Some(now);
        self.elapsed_ms = 0;
        self.is_running = true;
        CountdownStep::Done
    }

    /// Jump to a specific level, resetting block state and drawing the first
    /// question.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::LevelOutOfRange` when `level` is not playable
    /// under the session's rules.
    pub fn start_level(&mut self, level: u8, now: DateTime<Utc>) -> Result<(), EngineError> {
        if !self.rules.contains_level(level) {
            return Err(EngineError::LevelOutOfRange { level });
        }
        self.begin_level(level, now);
        Ok(())
    }

    fn begin_level(&mut self, level: u8, now: DateTime<Utc>) {
        self.level = level;
        self.question_index = 0;
        self.correct_count = 0;
        self.last_result = None;
        self.is_finished = false;
        self.draw_question(now);
    }

    fn draw_question(&mut self, now: DateTime<Utc>) {
        self.current_question = Some(self.bank.next_question(self.level));
        self.question_started_at = Some(now);
    }

    /// Grade an answer and advance the session.
    ///
    /// Suppressed (state untouched) outside the playing phase: before the
    /// session starts, while either countdown runs, and after the run
    /// finished.
    pub fn submit(&mut self, raw: &str, now: DateTime<Utc>) -> SubmitOutcome {
        if !self.is_started {
            return SubmitOutcome::Ignored(SubmitGuard::NotStarted);
        }
        if self.countdown > 0 || self.next_level_countdown > 0 {
            return SubmitOutcome::Ignored(SubmitGuard::CountdownInProgress);
        }
        if self.is_finished {
            return SubmitOutcome::Ignored(SubmitGuard::SessionFinished);
        }
        let (Some(question), Some(asked_at)) = (&self.current_question, self.question_started_at)
        else {
            return SubmitOutcome::Ignored(SubmitGuard::NotStarted);
        };

        let correct = question.check(raw);
        let mut result = if correct {
            AnswerResult::Correct
        } else {
            AnswerResult::Wrong
        };
        let mut earned = 0;

        if correct {
            self.correct_count += 1;
            let base = self.rules.base_score_for(self.level);
            let response_ms = ms_between(asked_at, now);
            let scored = score_answer(base, response_ms);
            earned = scored.earned;
            self.score += earned;
            result = scored.result;
            debug!(
                "level {} answer in {:.1}s: base {base}, earned {earned}",
                self.level,
                response_ms as f64 / 1000.0,
            );
        }
        self.last_result = Some(result);

        let transition = if self.question_index + 1 < QUESTIONS_PER_BLOCK {
            self.question_index += 1;
            self.draw_question(now);
            BlockTransition::NextQuestion
        } else {
            let passed = self.correct_count >= self.rules.pass_threshold();
            if passed && self.level < self.rules.max_level() {
                self.next_level_countdown = LEVEL_COUNTDOWN_SECS;
                BlockTransition::LevelCountdown
            } else {
                self.finish(now);
                BlockTransition::Finished
            }
        };

        SubmitOutcome::Graded(GradedAnswer {
            result,
            earned,
            transition,
        })
    }

    /// One inter-level countdown tick. On reaching zero, the next level
    /// begins; the elapsed timer keeps its original anchor.
    pub fn tick_level_countdown(&mut self, now: DateTime<Utc>) -> CountdownStep {
        if !self.is_started || self.is_finished || self.next_level_countdown == 0 {
            return CountdownStep::Inactive;
        }
        self.next_level_countdown -= 1;
        if self.next_level_countdown > 0 {
            return CountdownStep::Pending;
        }
        self.begin_level(self.level + 1, now);
        CountdownStep::Done
    }

    /// Periodic elapsed-time sample; only advances while the timer runs.
    pub fn sample_elapsed(&mut self, now: DateTime<Utc>) {
        if !self.is_running {
            return;
        }
        if let Some(started) = self.started_at {
            self.elapsed_ms = ms_between(started, now);
        }
    }

    fn finish(&mut self, now: DateTime<Utc>) {
        self.is_finished = true;
        self.is_running = false;
        if let Some(started) = self.started_at {
            self.elapsed_ms = ms_between(started, now);
        }
        self.record = Some(SessionRecord::new(now, self.score, self.elapsed_ms));
    }

    /// Stop the timer and restore defaults. Persisted records are untouched;
    /// calling this twice leaves the same state as calling it once.
    pub fn reset(&mut self) {
        self.level = 1;
        self.score = 0;
        self.question_index = 0;
        self.correct_count = 0;
        self.current_question = None;
        self.last_result = None;
        self.is_started = false;
        self.is_running = false;
        self.is_finished = false;
        self.countdown = 0;
        self.next_level_countdown = 0;
        self.started_at = None;
        self.question_started_at = None;
        self.elapsed_ms = 0;
        self.record = None;
        self.record_id = None;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("game", &self.game())
            .field("level", &self.level)
            .field("score", &self.score)
            .field("question_index", &self.question_index)
            .field("correct_count", &self.correct_count)
            .field("phase", &self.phase())
            .field("elapsed_ms", &self.elapsed_ms)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
