use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use game_core::Clock;
use game_core::bank::QuestionBank;
use game_core::model::{GameKind, GameRules, SessionRecord};
use storage::repository::RecordRepository;

use super::engine::{BlockTransition, CountdownStep, QuizSession, SubmitOutcome};
use super::progress::SessionProgress;
use crate::error::EngineError;

const COUNTDOWN_TICK: Duration = Duration::from_secs(1);
const ELAPSED_SAMPLE: Duration = Duration::from_millis(100);

/// Drives a `QuizSession` with real countdown and elapsed-time tickers and
/// persists the record when a run finishes.
///
/// Every spawned ticker captures the session generation at spawn time and
/// exits as soon as a newer generation is observed, so a task left over from
/// before a reset or restart can never mutate the superseded session. Ticks
/// of one countdown chain stay strictly sequential: each iteration sleeps
/// before ticking again.
#[derive(Clone)]
pub struct GameLoopService {
    clock: Clock,
    records: Arc<dyn RecordRepository>,
    session: Arc<Mutex<QuizSession>>,
    generation: Arc<AtomicU64>,
}

impl GameLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        records: Arc<dyn RecordRepository>,
        rules: GameRules,
        bank: Box<dyn QuestionBank>,
    ) -> Self {
        Self {
            clock,
            records,
            session: Arc::new(Mutex::new(QuizSession::new(rules, bank))),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Engine for the Korean literacy game.
    #[must_use]
    pub fn korean(clock: Clock, records: Arc<dyn RecordRepository>) -> Self {
        Self::new(
            clock,
            records,
            GameRules::korean(),
            game_core::bank::bank_for(GameKind::Korean),
        )
    }

    /// Engine for the math game.
    #[must_use]
    pub fn math(clock: Clock, records: Arc<dyn RecordRepository>) -> Self {
        Self::new(
            clock,
            records,
            GameRules::math(),
            game_core::bank::bank_for(GameKind::Math),
        )
    }

    /// Shared handle to the underlying session, for callers that need the
    /// live question or other detail beyond `progress()`.
    #[must_use]
    pub fn session(&self) -> Arc<Mutex<QuizSession>> {
        Arc::clone(&self.session)
    }

    fn bump_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, QuizSession>, EngineError> {
        self.session.lock().map_err(|_| EngineError::Poisoned)
    }

    /// Reset the session and begin the 3-second pre-game countdown.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Poisoned` if the session lock is poisoned.
    pub fn start_with_countdown(&self) -> Result<(), EngineError> {
        let generation = self.bump_generation();
        self.lock()?.start_with_countdown();
        self.spawn_pregame_ticks(generation);
        Ok(())
    }

    /// Alias for `start_with_countdown`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Poisoned` if the session lock is poisoned.
    pub fn restart(&self) -> Result<(), EngineError> {
        self.start_with_countdown()
    }

    /// Stop all timers and restore defaults. Persisted records are untouched.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Poisoned` if the session lock is poisoned.
    pub fn reset_game(&self) -> Result<(), EngineError> {
        self.bump_generation();
        self.lock()?.reset();
        Ok(())
    }

    /// Grade an answer; on a finished run the record is persisted before
    /// returning.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Storage` if the finished-run record cannot be
    /// appended, or `EngineError::Poisoned` on a poisoned lock.
    pub async fn submit(&self, raw: &str) -> Result<SubmitOutcome, EngineError> {
        let now = self.clock.now();
        let generation = self.generation.load(Ordering::SeqCst);
        let outcome = self.lock()?.submit(raw, now);

        if let SubmitOutcome::Graded(graded) = &outcome {
            match graded.transition {
                BlockTransition::NextQuestion => {}
                BlockTransition::LevelCountdown => self.spawn_level_countdown(generation),
                BlockTransition::Finished => {
                    self.finalize_record().await?;
                }
            }
        }

        Ok(outcome)
    }

    /// Append the finished run's record, once.
    ///
    /// Safe to call again after a transient storage failure; a record that
    /// was already appended is not appended twice.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotFinished` if the run has not finished, or
    /// `EngineError::Storage` if persistence fails.
    pub async fn finalize_record(&self) -> Result<i64, EngineError> {
        let generation = self.generation.load(Ordering::SeqCst);
        let (game, record): (GameKind, SessionRecord) = {
            let guard = self.lock()?;
            if let Some(id) = guard.record_id() {
                return Ok(id);
            }
            if !guard.is_finished() {
                return Err(EngineError::NotFinished);
            }
            let record = guard.record().cloned().ok_or(EngineError::NotFinished)?;
            (guard.game(), record)
        };

        let id = self.records.append_record(game, &record).await?;

        let mut guard = self.lock()?;
        if self.generation.load(Ordering::SeqCst) == generation {
            guard.set_record_id(id);
        }
        Ok(id)
    }

    /// Snapshot for the presentation layer.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Poisoned` if the session lock is poisoned.
    pub fn progress(&self) -> Result<SessionProgress, EngineError> {
        Ok(self.lock()?.progress())
    }

    fn spawn_pregame_ticks(&self, generation: u64) {
        let this = self.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(COUNTDOWN_TICK).await;
                let step = {
                    let Ok(mut guard) = this.session.lock() else {
                        return;
                    };
                    if this.generation.load(Ordering::SeqCst) != generation {
                        return;
                    }
                    guard.tick_countdown(this.clock.now())
                };
                match step {
                    CountdownStep::Pending => {}
                    CountdownStep::Done => {
                        this.spawn_elapsed_sampler(generation);
                        return;
                    }
                    CountdownStep::Inactive => return,
                }
            }
        });
    }

    fn spawn_level_countdown(&self, generation: u64) {
        let this = self.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(COUNTDOWN_TICK).await;
                let step = {
                    let Ok(mut guard) = this.session.lock() else {
                        return;
                    };
                    if this.generation.load(Ordering::SeqCst) != generation {
                        return;
                    }
                    guard.tick_level_countdown(this.clock.now())
                };
                if step == CountdownStep::Pending {
                    continue;
                }
                return;
            }
        });
    }

    fn spawn_elapsed_sampler(&self, generation: u64) {
        let this = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(ELAPSED_SAMPLE);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let Ok(mut guard) = this.session.lock() else {
                    return;
                };
                if this.generation.load(Ordering::SeqCst) != generation {
                    return;
                }
                if !guard.is_running() {
                    return;
                }
                guard.sample_elapsed(this.clock.now());
            }
        });
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
