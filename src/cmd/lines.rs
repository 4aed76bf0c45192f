use std::path::Path;

use anyhow::{Context, Result};

use redmark::{ExtractConfig, Extractor};

pub fn cmd_lines(config: &ExtractConfig, file: &Path) -> Result<()> {
    let extractor = Extractor::new(config)?;
    let doc = extractor
        .read_path(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let lines = extractor.classify_lines(&doc);
    for line in &lines {
        let red = if line.has_red { "red" } else { "   " };
        println!("{:<12} {red}  {}", line.kind.as_str(), line.text);
    }
    eprintln!("({} lines)", lines.len());

    Ok(())
}
