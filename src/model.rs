//! Extracted question records.
//!
//! These are the only types that leave the crate: no span or color data is
//! carried past color evaluation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn correct_options(&self) -> impl Iterator<Item = &QuestionOption> {
        self.options.iter().filter(|o| o.is_correct)
    }

    pub fn has_answer(&self) -> bool {
        self.options.iter().any(|o| o.is_correct)
    }
}

/// Questions extracted from one document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub questions: Vec<Question>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn option_count(&self) -> usize {
        self.questions.iter().map(|q| q.options.len()).sum()
    }

    pub fn correct_count(&self) -> usize {
        self.questions.iter().map(|q| q.correct_options().count()).sum()
    }

    /// Questions that have options but none marked correct.
    pub fn unanswered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| !q.options.is_empty() && !q.has_answer())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(text: &str, is_correct: bool) -> QuestionOption {
        QuestionOption {
            text: text.to_string(),
            is_correct,
        }
    }

    #[test]
    fn serializes_to_public_shape() {
        let extraction = Extraction {
            questions: vec![Question {
                text: "1. Capital of France?".into(),
                options: vec![option("α. Paris", true)],
            }],
        };
        let json = serde_json::to_value(&extraction).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "questions": [{
                    "text": "1. Capital of France?",
                    "options": [{"text": "α. Paris", "is_correct": true}]
                }]
            })
        );
    }

    #[test]
    fn counts() {
        let extraction = Extraction {
            questions: vec![
                Question {
                    text: "1.".into(),
                    options: vec![option("α.", false), option("β.", true)],
                },
                Question {
                    text: "2.".into(),
                    options: vec![option("α.", false)],
                },
                Question {
                    text: "3.".into(),
                    options: vec![],
                },
            ],
        };
        assert_eq!(extraction.option_count(), 3);
        assert_eq!(extraction.correct_count(), 1);
        assert_eq!(extraction.unanswered_count(), 1);
        assert!(!extraction.is_empty());
    }
}
