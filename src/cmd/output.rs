use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use redmark::{Extraction, Question};

/// One document's result when several files are extracted together.
#[derive(Serialize)]
pub struct DocumentResult<'a> {
    pub source: String,
    pub questions: &'a [Question],
}

#[derive(Serialize)]
struct Documents<'a> {
    documents: Vec<DocumentResult<'a>>,
}

/// Single file: `{"questions": [...]}`. Several files:
/// `{"documents": [{"source": ..., "questions": [...]}]}`.
pub fn render_json(results: &[(PathBuf, Extraction)]) -> Result<String> {
    let json = match results {
        [(_, extraction)] => serde_json::to_string_pretty(extraction)?,
        _ => serde_json::to_string_pretty(&Documents {
            documents: results
                .iter()
                .map(|(path, extraction)| DocumentResult {
                    source: path.display().to_string(),
                    questions: &extraction.questions,
                })
                .collect(),
        })?,
    };
    Ok(json)
}

pub fn render_text(results: &[(PathBuf, Extraction)]) -> String {
    let mut out = String::new();
    for (i, (path, extraction)) in results.iter().enumerate() {
        if results.len() > 1 {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("# {}\n\n", path.display()));
        }
        if extraction.is_empty() {
            out.push_str("(no questions found)\n");
            continue;
        }
        for question in &extraction.questions {
            out.push_str(&question.text);
            out.push('\n');
            for option in &question.options {
                let mark = if option.is_correct { "[x]" } else { "[ ]" };
                out.push_str(&format!("  {mark} {}\n", option.text));
            }
            out.push('\n');
        }
    }
    out
}

pub fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    // Save to file if requested
    if let Some(path) = output_file {
        let mut file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        file.write_all(content.as_bytes())?;
        if !content.ends_with('\n') {
            file.write_all(b"\n")?;
        }
        eprintln!("💾 Saved {} bytes to {}", content.len(), path.display());
        return Ok(());
    }

    if content.ends_with('\n') {
        print!("{content}");
    } else {
        println!("{content}");
    }
    Ok(())
}
