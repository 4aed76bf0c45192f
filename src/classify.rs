//! Line classification from leading markers.
//!
//! A line opens a question when it starts with the question pattern
//! (`12.` by default) and opens an option when it starts with a single
//! label character followed by a period (`β.`). Everything else
//! continues whatever is open.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ExtractConfig;
use crate::error::ConfigError;

/// Lower- and upper-case Greek letters.
pub static GREEK_LABELS: Lazy<String> =
    Lazy::new(|| ('α'..='ω').chain('Α'..='Ω').collect());

pub const DEFAULT_QUESTION_PATTERN: &str = r"[0-9]+\.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    QuestionStart,
    OptionStart,
    Continuation,
}

impl LineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::QuestionStart => "question",
            Self::OptionStart => "option",
            Self::Continuation => "continuation",
        }
    }
}

/// Compiled question and option-label patterns.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    question: Regex,
    option: Regex,
}

impl LineClassifier {
    pub fn new(question_pattern: &str, label_alphabet: &str) -> Result<Self, ConfigError> {
        let question = Regex::new(&format!("^(?:{question_pattern})")).map_err(|source| {
            ConfigError::QuestionPattern {
                pattern: question_pattern.to_string(),
                source,
            }
        })?;

        if label_alphabet.trim().is_empty() {
            return Err(ConfigError::EmptyLabelAlphabet);
        }
        let class: String = label_alphabet
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| regex::escape(&c.to_string()))
            .collect();
        let option = Regex::new(&format!(r"^[{class}]\.")).map_err(|source| {
            ConfigError::LabelPattern {
                alphabet: label_alphabet.to_string(),
                source,
            }
        })?;

        Ok(Self { question, option })
    }

    pub fn from_config(config: &ExtractConfig) -> Result<Self, ConfigError> {
        Self::new(&config.question_pattern, &config.label_alphabet)
    }

    /// Classify a line's joined, trimmed text. Question markers win when
    /// both patterns match.
    pub fn classify(&self, text: &str) -> LineKind {
        if self.question.is_match(text) {
            LineKind::QuestionStart
        } else if self.option.is_match(text) {
            LineKind::OptionStart
        } else {
            LineKind::Continuation
        }
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTION_PATTERN, &GREEK_LABELS)
            .expect("built-in patterns are valid")
    }
}
