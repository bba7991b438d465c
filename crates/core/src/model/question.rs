use std::fmt;

/// Expected answer for a question.
///
/// Text answers match the trimmed raw input exactly; numeric answers match
/// after integer parsing, so unparseable input can never be correct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Number(i64),
}

/// One prompt plus its expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    answer: Answer,
}

impl Question {
    #[must_use]
    pub fn new(prompt: impl Into<String>, answer: Answer) -> Self {
        Self {
            prompt: prompt.into(),
            answer,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    /// Normalizes `raw` and compares it against the expected answer.
    #[must_use]
    pub fn check(&self, raw: &str) -> bool {
        match &self.answer {
            Answer::Text(expected) => raw.trim() == expected.trim(),
            Answer::Number(expected) => raw.trim().parse::<i64>() == Ok(*expected),
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prompt)
    }
}
