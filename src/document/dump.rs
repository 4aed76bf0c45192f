//! JSON span dumps.
//!
//! Reads the nested dict shape PDF toolkits emit for styled text:
//!
//! ```json
//! {"pages": [{"blocks": [{"lines": [{"spans": [{"text": "1. Q", "color": 16711680}]}]}]}]}
//! ```
//!
//! Extra keys (`bbox`, `font`, `size`, ...) are ignored. Blocks without a
//! `lines` key, such as image blocks, read as empty.

use super::{DocumentReader, SpanDocument};
use crate::error::{ExtractError, Result};

pub struct SpanDumpReader;

impl DocumentReader for SpanDumpReader {
    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn sniff(&self, bytes: &[u8]) -> bool {
        bytes
            .iter()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|b| *b == b'{')
    }

    fn read(&self, bytes: &[u8], source_name: &str) -> Result<SpanDocument> {
        let mut doc: SpanDocument = serde_json::from_slice(bytes)
            .map_err(|e| ExtractError::malformed(source_name, e))?;
        doc.source_name = source_name.to_string();
        tracing::debug!(source = source_name, pages = doc.pages.len(), "read span dump");
        Ok(doc)
    }
}
