use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};

use redmark::{ExtractConfig, Extractor};

use super::output::{render_json, render_text, write_output};
use crate::OutputFormat;

pub fn cmd_extract(
    config: &ExtractConfig,
    files: &[PathBuf],
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let extractor = Extractor::new(config)?;
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let start = Instant::now();
        let extraction = extractor
            .extract_path(path)
            .with_context(|| format!("failed to extract {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "document done"
        );
        results.push((path.clone(), extraction));
    }

    let rendered = match format {
        OutputFormat::Json => render_json(&results)?,
        OutputFormat::Text => render_text(&results),
    };
    write_output(&rendered, output.as_deref())
}
