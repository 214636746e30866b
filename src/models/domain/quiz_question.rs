use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// One parsed multiple-choice question. Only the option letters actually
/// recovered from the completion text are present in `options`; the raw
/// answer string is kept verbatim and normalized at grading time.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub stem: String,
    pub options: BTreeMap<String, String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    pub fn empty() -> Self {
        QuizQuestion {
            stem: String::new(),
            options: BTreeMap::new(),
            correct_answer: String::new(),
        }
    }

    /// A question survives the validation filter only with a stem and at
    /// least one captured option.
    pub fn is_complete(&self) -> bool {
        !self.stem.is_empty() && !self.options.is_empty()
    }

    /// Normalize the raw answer string to a single letter for grading.
    /// An exact "A".."D" passes through; any other non-empty string yields
    /// its first character; an empty answer yields `None` and the question
    /// can never be answered correctly.
    pub fn normalized_answer(&self) -> Option<String> {
        let raw = self.correct_answer.trim();
        if OPTION_LETTERS.iter().any(|l| raw == l.to_string()) {
            return Some(raw.to_string());
        }
        raw.chars().next().map(|c| c.to_string())
    }
}
