//! Extraction configuration loaded from `~/.config/redmark/config.toml`.
//!
//! ```toml
//! question_pattern = "[0-9]+\\."
//! label_alphabet = "αβγδε"
//!
//! [red]
//! red_floor = 150
//! green_ceiling = 100
//! blue_ceiling = 100
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classify::{LineClassifier, DEFAULT_QUESTION_PATTERN, GREEK_LABELS};
use crate::color::RedThreshold;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Regex matched at the start of a line to open a question.
    pub question_pattern: String,
    /// Characters accepted as option labels (each followed by `.`).
    pub label_alphabet: String,
    /// Thresholds marking an option's text as "correct".
    pub red: RedThreshold,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            question_pattern: DEFAULT_QUESTION_PATTERN.to_string(),
            label_alphabet: GREEK_LABELS.clone(),
            red: RedThreshold::default(),
        }
    }
}

impl ExtractConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the user config file is
    /// read if present, otherwise defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = default_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> String {
        // Plain strings and integers always serialize.
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Compile the patterns, surfacing bad regexes or an empty alphabet
    /// before any document is read.
    pub fn classifier(&self) -> Result<LineClassifier, ConfigError> {
        LineClassifier::from_config(self)
    }
}

/// Return the path to the user config file.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("redmark")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = ExtractConfig::from_toml("").unwrap();
        assert_eq!(config, ExtractConfig::default());
    }

    #[test]
    fn parse_partial_red_section() {
        let config = ExtractConfig::from_toml(
            r#"
[red]
red_floor = 120
"#,
        )
        .unwrap();
        assert_eq!(config.red.red_floor, 120);
        assert_eq!(config.red.green_ceiling, 100);
        assert_eq!(config.red.blue_ceiling, 100);
        assert_eq!(config.question_pattern, DEFAULT_QUESTION_PATTERN);
    }

    #[test]
    fn parse_full_config() {
        let config = ExtractConfig::from_toml(
            r#"
question_pattern = "Q[0-9]+:"
label_alphabet = "ABCD"

[red]
red_floor = 200
green_ceiling = 50
blue_ceiling = 60
"#,
        )
        .unwrap();
        assert_eq!(config.question_pattern, "Q[0-9]+:");
        assert_eq!(config.label_alphabet, "ABCD");
        assert_eq!(
            config.red,
            RedThreshold {
                red_floor: 200,
                green_ceiling: 50,
                blue_ceiling: 60,
            }
        );
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        assert!(ExtractConfig::from_toml("[red]\nred_floor = 300\n").is_err());
    }

    #[test]
    fn toml_output_parses_back() {
        let config = ExtractConfig::default();
        let parsed = ExtractConfig::from_toml(&config.to_toml()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = ExtractConfig::load(Some(Path::new("/no/such/redmark.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn classifier_validates_patterns() {
        let config = ExtractConfig {
            question_pattern: "[".to_string(),
            ..ExtractConfig::default()
        };
        assert!(config.classifier().is_err());
        assert!(ExtractConfig::default().classifier().is_ok());
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        assert!(default_path().ends_with("redmark/config.toml"));
    }
}
