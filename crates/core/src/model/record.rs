use chrono::{DateTime, Utc};

/// Immutable summary of one completed run, written exactly once per finish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    recorded_at: DateTime<Utc>,
    score: u32,
    duration_ms: u64,
}

impl SessionRecord {
    #[must_use]
    pub fn new(recorded_at: DateTime<Utc>, score: u32, duration_ms: u64) -> Self {
        Self {
            recorded_at,
            score,
            duration_ms,
        }
    }

    /// Rehydrate a record from persisted storage.
    #[must_use]
    pub fn from_persisted(recorded_at: DateTime<Utc>, score: u32, duration_ms: u64) -> Self {
        Self::new(recorded_at, score, duration_ms)
    }

    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Run duration in whole seconds, for display.
    #[must_use]
    pub fn duration_secs(&self) -> u64 {
        self.duration_ms / 1000
    }
}
