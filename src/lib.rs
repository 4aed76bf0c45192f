//! `redmark` - multiple-choice question extraction from red-marked PDFs
//!
//! Exam PDFs often mark the correct option by printing it in red. This
//! crate rebuilds the question/option structure from styled text using only
//! typographic cues:
//!
//! - **Questions** start with a number and a period (`12.`)
//! - **Options** start with a label character and a period (`β.`)
//! - **Correct options** contain at least one red span
//!
//! # Example
//!
//! ```rust
//! use redmark::document::{Block, Line, Page, Span, SpanDocument};
//! use redmark::extract_questions;
//!
//! let line = |text: &str, color: u32| Line::new(vec![Span::new(text, color)]);
//! let doc = SpanDocument::new(
//!     "inline",
//!     vec![Page {
//!         blocks: vec![Block {
//!             lines: vec![
//!                 line("1. Capital of France?", 0x000000),
//!                 line("α. Lyon", 0x000000),
//!                 line("β. Paris", 0xFF0000),
//!             ],
//!         }],
//!     }],
//! );
//!
//! let questions = extract_questions(&doc);
//! assert_eq!(questions.len(), 1);
//! assert!(!questions[0].options[0].is_correct);
//! assert!(questions[0].options[1].is_correct);
//! ```

pub mod builder;
pub mod classify;
pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod model;

pub use builder::{BuilderPhase, StructureBuilder};
pub use classify::{LineClassifier, LineKind};
pub use color::{RedThreshold, Rgb};
pub use config::ExtractConfig;
pub use document::{ReaderRouter, SpanDocument};
pub use error::{ConfigError, ExtractError, Result};
pub use extract::{extract_questions, ClassifiedLine, Extractor};
pub use model::{Extraction, Question, QuestionOption};

/// Version of redmark
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
