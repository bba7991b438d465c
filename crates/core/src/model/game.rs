use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of questions in every level block.
pub const QUESTIONS_PER_BLOCK: u8 = 10;

/// Base score applied when a level has no entry in the table.
const FALLBACK_BASE_SCORE: u32 = 10;

//
// ─── GAME KIND ─────────────────────────────────────────────────────────────────
//

/// The two game variants in the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    /// Korean-alphabet/word quiz (jamo, syllables, whole words).
    Korean,
    /// Arithmetic quiz (leveled addition and subtraction).
    Math,
}

impl GameKind {
    /// Stable key used to scope persisted records per game.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Korean => "korean-game",
            GameKind::Math => "math-game",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown game kind: {0}")]
pub struct ParseGameKindError(pub String);

impl FromStr for GameKind {
    type Err = ParseGameKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "korean-game" => Ok(GameKind::Korean),
            "math-game" => Ok(GameKind::Math),
            other => Err(ParseGameKindError(other.to_string())),
        }
    }
}

//
// ─── RULES ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameRulesError {
    #[error("base score table must have one entry per level ({max_level} levels, {entries} entries)")]
    BaseScoreTableMismatch { max_level: u8, entries: usize },

    #[error("max level must be >= 1")]
    NoLevels,

    #[error("pass threshold must be between 1 and {QUESTIONS_PER_BLOCK}")]
    InvalidPassThreshold,
}

/// Per-game configuration for the session engine.
///
/// Both game variants run the same engine; only this record differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRules {
    max_level: u8,
    pass_threshold: u8,
    base_scores: Vec<u32>,
}

impl GameRules {
    /// Build a custom rule set.
    ///
    /// # Errors
    ///
    /// Returns `GameRulesError` when the level count, pass threshold, or base
    /// score table are inconsistent.
    pub fn new(
        max_level: u8,
        pass_threshold: u8,
        base_scores: Vec<u32>,
    ) -> Result<Self, GameRulesError> {
        if max_level == 0 {
            return Err(GameRulesError::NoLevels);
        }
        if pass_threshold == 0 || pass_threshold > QUESTIONS_PER_BLOCK {
            return Err(GameRulesError::InvalidPassThreshold);
        }
        if base_scores.len() != usize::from(max_level) {
            return Err(GameRulesError::BaseScoreTableMismatch {
                max_level,
                entries: base_scores.len(),
            });
        }
        Ok(Self {
            max_level,
            pass_threshold,
            base_scores,
        })
    }

    /// Rules for the Korean literacy game: levels 1-3, pass at 8 of 10.
    #[must_use]
    pub fn korean() -> Self {
        Self {
            max_level: 3,
            pass_threshold: 8,
            base_scores: vec![10, 20, 30],
        }
    }

    /// Rules for the math game: levels 1-5, pass at 6 of 10.
    #[must_use]
    pub fn math() -> Self {
        Self {
            max_level: 5,
            pass_threshold: 6,
            base_scores: vec![10, 20, 30, 40, 50],
        }
    }

    #[must_use]
    pub fn max_level(&self) -> u8 {
        self.max_level
    }

    #[must_use]
    pub fn pass_threshold(&self) -> u8 {
        self.pass_threshold
    }

    /// True if `level` is a playable level under these rules.
    #[must_use]
    pub fn contains_level(&self, level: u8) -> bool {
        (1..=self.max_level).contains(&level)
    }

    /// Base score for a correct answer at `level`.
    #[must_use]
    pub fn base_score_for(&self, level: u8) -> u32 {
        let idx = usize::from(level.saturating_sub(1));
        self.base_scores.get(idx).copied().unwrap_or(FALLBACK_BASE_SCORE)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_rules_match_variant() {
        let rules = GameRules::korean();
        assert_eq!(rules.max_level(), 3);
        assert_eq!(rules.pass_threshold(), 8);
        assert_eq!(rules.base_score_for(1), 10);
        assert_eq!(rules.base_score_for(3), 30);
    }

    #[test]
    fn math_rules_match_variant() {
        let rules = GameRules::math();
        assert_eq!(rules.max_level(), 5);
        assert_eq!(rules.pass_threshold(), 6);
        assert_eq!(rules.base_score_for(5), 50);
    }

    #[test]
    fn out_of_table_level_falls_back() {
        let rules = GameRules::korean();
        assert_eq!(rules.base_score_for(9), 10);
        assert!(!rules.contains_level(0));
        assert!(!rules.contains_level(4));
        assert!(rules.contains_level(3));
    }

    #[test]
    fn custom_rules_validate_table() {
        let err = GameRules::new(3, 8, vec![10, 20]).unwrap_err();
        assert!(matches!(err, GameRulesError::BaseScoreTableMismatch { .. }));

        let err = GameRules::new(0, 8, Vec::new()).unwrap_err();
        assert!(matches!(err, GameRulesError::NoLevels));

        let err = GameRules::new(2, 11, vec![10, 20]).unwrap_err();
        assert!(matches!(err, GameRulesError::InvalidPassThreshold));
    }

    #[test]
    fn game_kind_round_trips_through_key() {
        for kind in [GameKind::Korean, GameKind::Math] {
            let parsed: GameKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("piano-game".parse::<GameKind>().is_err());
    }
}
