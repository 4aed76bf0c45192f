//! `redmark` CLI - extract red-marked multiple-choice questions from PDFs

mod cmd;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use redmark::ExtractConfig;

#[derive(Parser)]
#[command(name = "redmark")]
#[command(about = "Extract multiple-choice questions from PDFs where correct answers are printed in red")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    overrides: ConfigArgs,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Configuration file and per-field overrides.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Config file (default: ~/.config/redmark/config.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Option label characters, e.g. "ABCD" or "αβγδ"
    #[arg(long, global = true, value_name = "CHARS")]
    labels: Option<String>,

    /// Regex that starts a question line (matched at line start)
    #[arg(long, global = true, value_name = "REGEX")]
    question_pattern: Option<String>,

    /// Red channel must be above this to count as red
    #[arg(long, global = true, value_name = "0-255")]
    red_floor: Option<u8>,

    /// Green channel must be below this to count as red
    #[arg(long, global = true, value_name = "0-255")]
    green_ceiling: Option<u8>,

    /// Blue channel must be below this to count as red
    #[arg(long, global = true, value_name = "0-255")]
    blue_ceiling: Option<u8>,
}

impl ConfigArgs {
    /// Defaults ← config file ← command-line flags.
    pub fn resolve(&self) -> Result<ExtractConfig> {
        let mut config = ExtractConfig::load(self.config.as_deref())?;

        if let Some(labels) = &self.labels {
            config.label_alphabet.clone_from(labels);
        }
        if let Some(pattern) = &self.question_pattern {
            config.question_pattern.clone_from(pattern);
        }
        if let Some(v) = self.red_floor {
            config.red.red_floor = v;
        }
        if let Some(v) = self.green_ceiling {
            config.red.green_ceiling = v;
        }
        if let Some(v) = self.blue_ceiling {
            config.red.blue_ceiling = v;
        }

        config.classifier().context("invalid configuration")?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract questions and options from one or more documents
    Extract {
        /// PDF files or JSON span dumps
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show every text line with its classification
    Lines {
        /// PDF file or JSON span dump
        file: PathBuf,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{"questions": [...]}`
    #[default]
    Json,
    /// Indented questions with [x] / [ ] option markers
    Text,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries results; logs go to stderr
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = cli.overrides.resolve()?;

    match cli.command {
        Commands::Extract {
            files,
            format,
            output,
        } => cmd::extract::cmd_extract(&config, &files, format, output),
        Commands::Lines { file } => cmd::lines::cmd_lines(&config, &file),
        Commands::Config => {
            cmd::config::cmd_config(&config);
            Ok(())
        }
    }
}
