//! Extraction pipeline.
//!
//! ```text
//! SpanDocument → joined line text → LineClassifier → StructureBuilder → RedThreshold → Extraction
//! ```
//!
//! An [`Extractor`] holds only compiled configuration. Each call builds its
//! own [`StructureBuilder`], so one extractor can serve many documents,
//! including from several threads at once.

use std::path::Path;

use crate::builder::{DraftOption, DraftQuestion, StructureBuilder};
use crate::classify::{LineClassifier, LineKind};
use crate::color::RedThreshold;
use crate::config::ExtractConfig;
use crate::document::{ReaderRouter, SpanDocument};
use crate::error::Result;
use crate::model::{Extraction, Question, QuestionOption};

/// A non-empty line with its classification, for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub kind: LineKind,
    pub text: String,
    pub has_red: bool,
}

#[derive(Debug, Clone)]
pub struct Extractor {
    classifier: LineClassifier,
    red: RedThreshold,
}

impl Extractor {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        Ok(Self {
            classifier: config.classifier()?,
            red: config.red,
        })
    }

    pub fn red_threshold(&self) -> RedThreshold {
        self.red
    }

    /// Read and extract a file. Reader failures abort the document.
    pub fn extract_path(&self, path: &Path) -> Result<Extraction> {
        let doc = ReaderRouter::new().read_path(path)?;
        Ok(self.extract(&doc))
    }

    /// Read and extract in-memory document bytes.
    pub fn extract_bytes(&self, bytes: &[u8], source_name: &str) -> Result<Extraction> {
        let doc = ReaderRouter::new().read(bytes, source_name)?;
        Ok(self.extract(&doc))
    }

    /// Run the builder over every line, then evaluate option colors.
    pub fn extract(&self, doc: &SpanDocument) -> Extraction {
        let mut builder = StructureBuilder::new();

        for line in doc.lines() {
            let text = line.joined_text();
            if text.is_empty() {
                continue;
            }
            builder.push(self.classifier.classify(&text), &text, &line.spans);
        }

        let dropped = builder.dropped();
        let questions: Vec<Question> = builder
            .finish()
            .into_iter()
            .map(|draft| self.evaluate(draft))
            .collect();
        let extraction = Extraction { questions };

        tracing::info!(
            source = %doc.source_name,
            questions = extraction.questions.len(),
            options = extraction.option_count(),
            correct = extraction.correct_count(),
            dropped,
            "extracted"
        );
        let unanswered = extraction.unanswered_count();
        if unanswered > 0 {
            tracing::warn!(
                source = %doc.source_name,
                unanswered,
                "questions with options but no red option"
            );
        }

        extraction
    }

    /// Every non-empty line with its kind, in reader order.
    pub fn classify_lines(&self, doc: &SpanDocument) -> Vec<ClassifiedLine> {
        doc.lines()
            .filter_map(|line| {
                let text = line.joined_text();
                if text.is_empty() {
                    return None;
                }
                Some(ClassifiedLine {
                    kind: self.classifier.classify(&text),
                    has_red: self
                        .red
                        .any_red(line.spans.iter().filter(|s| !s.text.trim().is_empty())),
                    text,
                })
            })
            .collect()
    }

    pub fn read_path(&self, path: &Path) -> Result<SpanDocument> {
        ReaderRouter::new().read_path(path)
    }

    fn evaluate(&self, draft: DraftQuestion) -> Question {
        Question {
            text: draft.text,
            options: draft
                .options
                .into_iter()
                .map(|option| self.evaluate_option(option))
                .collect(),
        }
    }

    /// Spans are consumed here and never reach the output.
    fn evaluate_option(&self, option: DraftOption) -> QuestionOption {
        QuestionOption {
            is_correct: self.red.any_red(&option.spans),
            text: option.text,
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            classifier: LineClassifier::default(),
            red: RedThreshold::default(),
        }
    }
}

/// Extract with default configuration.
pub fn extract_questions(doc: &SpanDocument) -> Vec<Question> {
    Extractor::default().extract(doc).questions
}
