//! PDF span extraction.
//!
//! Uses `pdfium-render` (Chromium's PDF library) to extract characters with
//! their positions and fill colors, then rebuilds the page → block → line →
//! span shape the rest of the crate consumes.
//!
//! # Pipeline
//!
//! ```text
//! PDF bytes → pdfium char extraction → line reconstruction → color runs → blocks
//! ```
//!
//! The pdfium library is bound once per process at first use, first from
//! the working directory, then from the system library path.

use once_cell::sync::OnceCell;
use pdfium_render::prelude::*;

use super::{Block, DocumentReader, Line, Page, Span, SpanDocument};
use crate::color::Rgb;
use crate::error::{ExtractError, Result};

static PDFIUM: OnceCell<Pdfium> = OnceCell::new();

/// A vertical gap wider than this many line heights starts a new block.
const BLOCK_GAP_FACTOR: f32 = 1.4;

/// A positioned, colored character extracted from a PDF page.
#[derive(Debug, Clone)]
pub struct PdfChar {
    pub ch: char,
    /// Left edge in PDF points (1pt = 1/72 inch).
    pub x: f32,
    /// Bottom edge of the glyph's tight bounds (bottom-up coordinate
    /// system). Varies within a line: descenders sit below the baseline.
    pub y: f32,
    pub width: f32,
    /// Font size approximation (character height).
    pub height: f32,
    /// Packed `0xRRGGBB` fill color.
    pub color: u32,
}

/// Running vertical extent of the line being grouped.
#[derive(Debug, Clone, Copy)]
struct LineBand {
    bottom: f32,
    top: f32,
}

impl LineBand {
    fn of(ch: &PdfChar) -> Self {
        Self {
            bottom: ch.y,
            top: ch.y + ch.height.max(1.0),
        }
    }

    /// More than half of the shorter of the glyph and the band overlap.
    fn admits(&self, ch: &PdfChar) -> bool {
        let glyph = Self::of(ch);
        let overlap = self.top.min(glyph.top) - self.bottom.max(glyph.bottom);
        let shorter = (self.top - self.bottom).min(glyph.top - glyph.bottom);
        overlap > shorter * 0.5
    }

    fn add(&mut self, ch: &PdfChar) {
        let glyph = Self::of(ch);
        self.bottom = self.bottom.min(glyph.bottom);
        self.top = self.top.max(glyph.top);
    }
}

/// A text line rebuilt from grouped characters, before span splitting.
#[derive(Debug, Clone)]
struct CharLine {
    y: f32,
    height: f32,
    chars: Vec<PdfChar>,
}

/// Reads PDFs through pdfium.
pub struct PdfReader;

impl PdfReader {
    pub fn new() -> Self {
        Self
    }

    /// The process-wide pdfium instance, bound on first use.
    ///
    /// Dropping a `Pdfium` tears down the library's global state, so a
    /// single instance lives for the whole process and only documents are
    /// opened per call. A failed bind is retried on the next read.
    fn pdfium(source_name: &str) -> Result<&'static Pdfium> {
        PDFIUM.get_or_try_init(|| {
            let bindings =
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                    .or_else(|_| Pdfium::bind_to_system_library())
                    .map_err(|e| {
                        ExtractError::malformed(
                            source_name,
                            format!("pdfium library unavailable: {e}"),
                        )
                    })?;
            tracing::debug!("pdfium library bound");
            Ok(Pdfium::new(bindings))
        })
    }

    /// Extract every page's characters. The pdfium document handle is
    /// dropped before this returns, on success or error; the library stays
    /// bound.
    #[allow(deprecated)] // PdfRect field access deprecated in 0.8.28, removed in 0.9.0
    fn extract_chars(bytes: &[u8], source_name: &str) -> Result<Vec<Vec<PdfChar>>> {
        let doc = Self::pdfium(source_name)?
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| ExtractError::malformed(source_name, e))?;
        let mut pages = Vec::new();

        for (page_idx, page) in doc.pages().iter().enumerate() {
            let text = page.text().map_err(|e| {
                ExtractError::malformed(source_name, format!("page {}: {e}", page_idx + 1))
            })?;
            let mut chars = Vec::new();
            for ch in text.chars().iter() {
                let Some(unicode_ch) = ch.unicode_char() else {
                    continue;
                };
                // Word breaks come back from gap detection, not from pdfium's
                // generated whitespace.
                if unicode_ch.is_whitespace() || unicode_ch.is_control() {
                    continue;
                }
                let Ok(rect) = ch.tight_bounds() else {
                    continue;
                };
                let color = ch
                    .fill_color()
                    .map(|c| Rgb::new(c.red(), c.green(), c.blue()).pack())
                    .unwrap_or(0);
                chars.push(PdfChar {
                    ch: unicode_ch,
                    x: rect.left.value,
                    y: rect.bottom.value,
                    width: (rect.right.value - rect.left.value).abs(),
                    height: (rect.top.value - rect.bottom.value).abs(),
                    color,
                });
            }
            tracing::debug!(source = source_name, page = page_idx + 1, chars = chars.len(), "extracted page");
            pages.push(chars);
        }

        Ok(pages)
    }

    /// Group one page's characters into lines.
    ///
    /// 1. Sort by Y descending (top-to-bottom), then X ascending.
    /// 2. A character joins the current line when its box overlaps the
    ///    line's vertical band by more than half. Glyph bottoms differ inside
    ///    one line (`+` and quotes sit high, `g` low), so membership is
    ///    measured against the whole line, not the previous character.
    /// 3. Each finished line is re-sorted left to right.
    fn reconstruct_lines(chars: &[PdfChar]) -> Vec<CharLine> {
        let mut sorted = chars.to_vec();
        sorted.sort_by(|a, b| {
            b.y.partial_cmp(&a.y)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        });

        let mut lines: Vec<CharLine> = Vec::new();
        let mut current: Vec<PdfChar> = Vec::new();
        let mut band: Option<LineBand> = None;

        for ch in sorted {
            match band.as_mut() {
                Some(b) if b.admits(&ch) => b.add(&ch),
                _ => {
                    if !current.is_empty() {
                        lines.push(Self::char_line(std::mem::take(&mut current)));
                    }
                    band = Some(LineBand::of(&ch));
                }
            }
            current.push(ch);
        }

        if !current.is_empty() {
            lines.push(Self::char_line(current));
        }

        lines
    }

    #[allow(clippy::cast_precision_loss)]
    fn char_line(mut chars: Vec<PdfChar>) -> CharLine {
        chars.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
        let count = chars.len() as f32;
        CharLine {
            y: chars.iter().map(|c| c.y).sum::<f32>() / count,
            height: chars.iter().map(|c| c.height).sum::<f32>() / count,
            chars,
        }
    }

    /// Split a line into spans of consecutive same-colored characters,
    /// inserting spaces at horizontal gaps.
    #[allow(clippy::cast_precision_loss)]
    fn build_spans(line: &CharLine) -> Line {
        let chars = &line.chars;
        let avg_char_width = chars.iter().map(|c| c.width).sum::<f32>() / chars.len() as f32;
        let space_threshold = avg_char_width * 0.3;

        let mut spans: Vec<Span> = Vec::new();
        for (i, ch) in chars.iter().enumerate() {
            let gap = i > 0 && ch.x - (chars[i - 1].x + chars[i - 1].width) > space_threshold;
            match spans.last_mut() {
                Some(span) if span.color == ch.color => {
                    if gap {
                        span.text.push(' ');
                    }
                    span.text.push(ch.ch);
                }
                _ => spans.push(Span::new(ch.ch.to_string(), ch.color)),
            }
        }

        Line::new(spans)
    }

    /// Group a page's lines into blocks at wide vertical gaps.
    fn build_blocks(lines: Vec<CharLine>) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut current = Block::default();
        let mut prev: Option<(f32, f32)> = None;

        for line in lines {
            if let Some((prev_y, prev_height)) = prev {
                if (prev_y - line.y).abs() > prev_height * BLOCK_GAP_FACTOR
                    && !current.lines.is_empty()
                {
                    blocks.push(std::mem::take(&mut current));
                }
            }
            prev = Some((line.y, line.height));
            current.lines.push(Self::build_spans(&line));
        }

        if !current.lines.is_empty() {
            blocks.push(current);
        }

        blocks
    }

    fn build_page(chars: &[PdfChar]) -> Page {
        Page {
            blocks: Self::build_blocks(Self::reconstruct_lines(chars)),
        }
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentReader for PdfReader {
    fn extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn sniff(&self, bytes: &[u8]) -> bool {
        bytes.starts_with(b"%PDF-")
    }

    fn read(&self, bytes: &[u8], source_name: &str) -> Result<SpanDocument> {
        let pages = Self::extract_chars(bytes, source_name)?;

        if !pages.is_empty() && pages.iter().all(Vec::is_empty) {
            tracing::warn!(
                source = source_name,
                pages = pages.len(),
                "no text layer detected; scanned PDFs need OCR"
            );
        }

        let pages = pages.iter().map(|chars| Self::build_page(chars)).collect();
        Ok(SpanDocument::new(source_name, pages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0xFF0000;

    fn chars_at(text: &str, x: f32, y: f32, color: u32) -> Vec<PdfChar> {
        text.chars()
            .enumerate()
            .filter(|(_, ch)| *ch != ' ')
            .map(|(i, ch)| PdfChar {
                ch,
                x: x + i as f32 * 6.0,
                y,
                width: 5.0,
                height: 12.0,
                color,
            })
            .collect()
    }

    #[test]
    fn reconstruct_lines_empty() {
        assert!(PdfReader::reconstruct_lines(&[]).is_empty());
    }

    #[test]
    fn reconstruct_lines_orders_top_to_bottom() {
        let mut chars = chars_at("low", 10.0, 80.0, 0);
        chars.extend(chars_at("top", 10.0, 100.0, 0));
        let page = PdfReader::build_page(&chars);
        let texts: Vec<String> = page
            .blocks
            .iter()
            .flat_map(|b| b.lines.iter())
            .map(Line::joined_text)
            .collect();
        assert_eq!(texts, ["top", "low"]);
    }

    fn glyph(ch: char, x: f32, y: f32, height: f32) -> PdfChar {
        PdfChar {
            ch,
            x,
            y,
            width: 5.0,
            height,
            color: 0,
        }
    }

    #[test]
    fn reconstruct_lines_keeps_left_to_right_order_with_uneven_glyph_bottoms() {
        // Shared baseline at 100: `+` floats above it, `g` and `?` hang below.
        let chars = vec![
            glyph('1', 10.0, 100.0, 12.0),
            glyph('.', 16.0, 100.0, 2.0),
            glyph('2', 28.0, 100.0, 12.0),
            glyph('+', 34.0, 102.5, 5.0),
            glyph('2', 40.0, 100.0, 12.0),
            glyph('g', 52.0, 97.0, 12.0),
            glyph('o', 58.0, 100.0, 8.0),
            glyph('α', 10.0, 84.0, 8.0),
            glyph('.', 16.0, 84.0, 2.0),
            glyph('y', 28.0, 81.0, 10.0),
        ];
        let page = PdfReader::build_page(&chars);
        let texts: Vec<String> = page
            .blocks
            .iter()
            .flat_map(|b| b.lines.iter())
            .map(Line::joined_text)
            .collect();
        assert_eq!(texts, ["1. 2+2 go", "α. y"]);
    }

    #[test]
    fn reconstructed_question_line_classifies_as_question() {
        use crate::classify::{LineClassifier, LineKind};

        let chars = vec![
            glyph('3', 10.0, 200.0, 12.0),
            glyph('.', 16.0, 200.0, 2.0),
            glyph('"', 28.0, 207.0, 4.0),
            glyph('x', 34.0, 200.0, 8.0),
            glyph('"', 40.0, 207.0, 4.0),
        ];
        let lines = PdfReader::reconstruct_lines(&chars);
        assert_eq!(lines.len(), 1);
        let text = PdfReader::build_spans(&lines[0]).joined_text();
        assert_eq!(text, "3. \"x\"");
        assert_eq!(
            LineClassifier::default().classify(&text),
            LineKind::QuestionStart
        );
    }

    #[test]
    fn build_spans_inserts_spaces_at_gaps() {
        let chars = chars_at("β. 4", 10.0, 100.0, 0);
        let lines = PdfReader::reconstruct_lines(&chars);
        assert_eq!(lines.len(), 1);
        assert_eq!(PdfReader::build_spans(&lines[0]).joined_text(), "β. 4");
    }

    #[test]
    fn build_spans_splits_on_color_change() {
        let mut chars = chars_at("β.", 10.0, 100.0, 0);
        chars.extend(chars_at("4", 30.0, 100.0, RED));
        let lines = PdfReader::reconstruct_lines(&chars);
        let line = PdfReader::build_spans(&lines[0]);
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].color, 0);
        assert_eq!(line.spans[1], Span::new("4", RED));
        assert_eq!(line.joined_text(), "β. 4");
    }

    #[test]
    fn build_blocks_splits_on_wide_gaps() {
        let mut chars = chars_at("1. Q", 10.0, 700.0, 0);
        chars.extend(chars_at("α. a", 10.0, 686.0, 0));
        chars.extend(chars_at("2. R", 10.0, 600.0, 0));
        let page = PdfReader::build_page(&chars);
        assert_eq!(page.blocks.len(), 2);
        assert_eq!(page.blocks[0].lines.len(), 2);
        assert_eq!(page.blocks[1].lines[0].joined_text(), "2. R");
    }

    #[test]
    fn shared_pdfium_instance_is_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pdfium>();
        assert_send_sync::<PdfReader>();
    }

    #[test]
    fn concurrent_reads_of_broken_pdfs_fail_as_documents() {
        // Either the library is missing or the bytes do not parse; both are
        // document errors, on every thread and on every retry.
        let outcomes: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    s.spawn(move || {
                        let name = format!("broken-{i}.pdf");
                        PdfReader.read(b"%PDF-1.4\nnot really a pdf", &name)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for (i, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Err(ExtractError::MalformedDocument { source_name, .. }) => {
                    assert_eq!(source_name, format!("broken-{i}.pdf"));
                }
                other => panic!("unexpected outcome: {other:?}"),
            }
        }
    }

    #[test]
    fn sniff_requires_pdf_magic() {
        assert!(PdfReader.sniff(b"%PDF-1.4\n..."));
        assert!(!PdfReader.sniff(b"{\"pages\":[]}"));
    }

    #[test]
    fn extensions_is_pdf() {
        assert_eq!(PdfReader::new().extensions(), &["pdf"]);
    }
}
