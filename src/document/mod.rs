//! Styled text input: pages → blocks → lines → spans.
//!
//! Readers turn raw document bytes into a [`SpanDocument`]. Each reader
//! implements [`DocumentReader`]; [`ReaderRouter`] picks one by file
//! extension, falling back to sniffing the leading bytes.
//!
//! # Supported Inputs
//!
//! | Input | Reader | Feature Flag |
//! |-------|--------|-------------|
//! | `.json` span dump | [`SpanDumpReader`] | always |
//! | `.pdf` | [`PdfReader`] | `pdf` |
//!
//! # Example
//!
//! ```rust
//! use redmark::document::ReaderRouter;
//!
//! let dump = br#"{"pages":[{"blocks":[{"lines":[{"spans":[{"text":"1. Q","color":0}]}]}]}]}"#;
//! let doc = ReaderRouter::new().read(dump, "inline.json").unwrap();
//! assert_eq!(doc.lines().count(), 1);
//! ```

pub mod dump;
#[cfg(feature = "pdf")]
pub mod pdf;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

pub use dump::SpanDumpReader;
#[cfg(feature = "pdf")]
pub use pdf::PdfReader;

/// Smallest styled text unit.
///
/// `color` is packed `0xRRGGBB`; see [`crate::color::Rgb::unpack`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    #[serde(default)]
    pub color: u32,
}

impl Span {
    pub fn new(text: impl Into<String>, color: u32) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// One visual text line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Trimmed span texts joined by single spaces. Whitespace-only spans
    /// contribute nothing.
    pub fn joined_text(&self) -> String {
        let mut text = String::new();
        for span in &self.spans {
            let trimmed = span.text.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(trimmed);
        }
        text
    }
}

/// A group of lines. Image blocks carry no `lines` and read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// A fully read document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanDocument {
    /// File name or other label used in logs and errors.
    #[serde(skip)]
    pub source_name: String,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl SpanDocument {
    pub fn new(source_name: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            source_name: source_name.into(),
            pages,
        }
    }

    /// Every line in reader order: page, then block, then line.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.pages
            .iter()
            .flat_map(|page| page.blocks.iter())
            .flat_map(|block| block.lines.iter())
    }
}

/// Turns raw document bytes into spans.
///
/// Implementations are stateless; every call opens, reads and releases
/// its own document handle.
pub trait DocumentReader: Send + Sync {
    /// Lower-case file extensions this reader handles (e.g., `["pdf"]`).
    fn extensions(&self) -> &[&str];

    /// Whether the leading bytes look like this reader's format.
    fn sniff(&self, bytes: &[u8]) -> bool;

    fn read(&self, bytes: &[u8], source_name: &str) -> Result<SpanDocument>;
}

/// Routes document bytes to the matching [`DocumentReader`].
pub struct ReaderRouter {
    readers: Vec<Box<dyn DocumentReader>>,
}

impl ReaderRouter {
    /// Create a router with all available readers.
    ///
    /// The PDF reader is included only when the `pdf` feature is enabled.
    pub fn new() -> Self {
        #[cfg(feature = "pdf")]
        let readers: Vec<Box<dyn DocumentReader>> =
            vec![Box::new(PdfReader::new()), Box::new(SpanDumpReader)];

        #[cfg(not(feature = "pdf"))]
        let readers: Vec<Box<dyn DocumentReader>> = vec![Box::new(SpanDumpReader)];

        Self { readers }
    }

    /// Read bytes, choosing the reader by the extension of `source_name`,
    /// then by sniffing the content.
    pub fn read(&self, bytes: &[u8], source_name: &str) -> Result<SpanDocument> {
        let ext = Path::new(source_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        let by_ext = ext.as_deref().and_then(|ext| {
            self.readers
                .iter()
                .find(|r| r.extensions().contains(&ext))
        });

        match by_ext.or_else(|| self.readers.iter().find(|r| r.sniff(bytes))) {
            Some(reader) => reader.read(bytes, source_name),
            None => Err(ExtractError::Unsupported {
                path: source_name.into(),
            }),
        }
    }

    pub fn read_path(&self, path: &Path) -> Result<SpanDocument> {
        let bytes = std::fs::read(path)?;
        self.read(&bytes, &path.display().to_string())
    }
}

impl Default for ReaderRouter {
    fn default() -> Self {
        Self::new()
    }
}
