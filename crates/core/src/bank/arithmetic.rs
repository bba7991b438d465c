use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{QuestionBank, draw_distinct};
use crate::model::{Answer, GameKind, Question};

/// Question bank for the math game.
///
/// Each level has its own operand range and operator rule; results are never
/// negative and the mixed tier is capped at 999.
pub struct ArithmeticBank {
    rng: StdRng,
    last_prompt: Option<String>,
}

impl ArithmeticBank {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            last_prompt: None,
        }
    }

    /// Deterministic bank for tests.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            last_prompt: None,
        }
    }

    /// Operands, operator, and result for one question at `level`.
    fn draw_terms(&mut self, level: u8) -> (i64, char, i64, i64) {
        match level {
            1 => loop {
                // Single-digit addition, sum capped at 10.
                let a = self.rng.random_range(0..10);
                let b = self.rng.random_range(0..10);
                if a + b <= 10 {
                    return (a, '+', b, a + b);
                }
            },
            2 => loop {
                // Single-digit subtraction, no negative result.
                let a = self.rng.random_range(0..10);
                let b = self.rng.random_range(0..10);
                if a - b >= 0 {
                    return (a, '-', b, a - b);
                }
            },
            3 => loop {
                // Two-digit addition, sum capped at 100.
                let a = self.rng.random_range(10..100);
                let b = self.rng.random_range(10..100);
                if a + b <= 100 {
                    return (a, '+', b, a + b);
                }
            },
            4 => loop {
                // Two-digit subtraction, no negative result.
                let a = self.rng.random_range(10..100);
                let b = self.rng.random_range(10..100);
                if a - b >= 0 {
                    return (a, '-', b, a - b);
                }
            },
            _ => loop {
                // Mixed two-digit addition/subtraction, result in [0, 999].
                let a = self.rng.random_range(10..100);
                let b = self.rng.random_range(10..100);
                let op = if self.rng.random_bool(0.5) { '+' } else { '-' };
                let result = if op == '+' { a + b } else { a - b };
                if (0..=999).contains(&result) {
                    return (a, op, b, result);
                }
            },
        }
    }
}

impl Default for ArithmeticBank {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionBank for ArithmeticBank {
    fn game(&self) -> GameKind {
        GameKind::Math
    }

    fn next_question(&mut self, level: u8) -> Question {
        let last = self.last_prompt.take();
        let question = draw_distinct(last.as_deref(), || {
            let (a, op, b, result) = self.draw_terms(level);
            Question::new(format!("{a} {op} {b} = ?"), Answer::Number(result))
        });
        self.last_prompt = Some(question.prompt().to_string());
        question
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_answer(q: &Question) -> i64 {
        match q.answer() {
            Answer::Number(n) => *n,
            Answer::Text(_) => panic!("math question with text answer"),
        }
    }

    #[test]
    fn level_one_sums_stay_single_digit() {
        let mut bank = ArithmeticBank::with_seed(1);
        for _ in 0..200 {
            let q = bank.next_question(1);
            let n = expected_answer(&q);
            assert!((0..=10).contains(&n), "sum {n} out of range");
            assert!(q.prompt().contains('+'));
        }
    }

    #[test]
    fn level_two_never_goes_negative() {
        let mut bank = ArithmeticBank::with_seed(2);
        for _ in 0..200 {
            let q = bank.next_question(2);
            assert!(expected_answer(&q) >= 0);
            assert!(q.prompt().contains('-'));
        }
    }

    #[test]
    fn level_three_sums_stay_under_one_hundred() {
        let mut bank = ArithmeticBank::with_seed(3);
        for _ in 0..200 {
            let q = bank.next_question(3);
            let n = expected_answer(&q);
            assert!((20..=100).contains(&n), "sum {n} out of range");
        }
    }

    #[test]
    fn level_four_differences_stay_non_negative() {
        let mut bank = ArithmeticBank::with_seed(4);
        for _ in 0..200 {
            let q = bank.next_question(4);
            let n = expected_answer(&q);
            assert!((0..=89).contains(&n), "difference {n} out of range");
        }
    }

    #[test]
    fn level_five_mixes_operators_within_bounds() {
        let mut bank = ArithmeticBank::with_seed(5);
        let mut saw_plus = false;
        let mut saw_minus = false;
        for _ in 0..200 {
            let q = bank.next_question(5);
            let n = expected_answer(&q);
            assert!((0..=999).contains(&n));
            saw_plus |= q.prompt().contains('+');
            saw_minus |= q.prompt().contains('-');
        }
        assert!(saw_plus && saw_minus);
    }

    #[test]
    fn prompt_matches_expected_result() {
        let mut bank = ArithmeticBank::with_seed(6);
        for level in 1..=5 {
            let q = bank.next_question(level);
            let body = q.prompt().strip_suffix(" = ?").unwrap();
            let (a, rest) = body.split_once(' ').unwrap();
            let (op, b) = rest.split_once(' ').unwrap();
            let a: i64 = a.parse().unwrap();
            let b: i64 = b.parse().unwrap();
            let computed = if op == "+" { a + b } else { a - b };
            assert_eq!(computed, expected_answer(&q));
        }
    }

    #[test]
    fn consecutive_questions_differ() {
        let mut bank = ArithmeticBank::with_seed(7);
        let mut last = bank.next_question(1).prompt().to_string();
        for _ in 0..200 {
            let next = bank.next_question(1).prompt().to_string();
            assert_ne!(next, last);
            last = next;
        }
    }
}
