//! Configuration management for kanon
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. CLI arguments (highest precedence, applied by the caller)
//! 2. Environment variables (`KANON_<SECTION>__<KEY>`)
//! 3. An explicit file (`--config`), which must exist
//! 4. kanon.local.toml (gitignored, local overrides)
//! 5. kanon.toml (git-tracked, project config)
//! 6. ~/.config/kanon/config.toml (user defaults)
//! 7. Built-in defaults (lowest precedence)

use kanon::{EvaluationConfig, Markers};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::{ConfigLoader, read_config_file};
pub use paths::{LOCAL_CONFIG_FILE, PROJECT_CONFIG_FILE, Paths};

/// Main kanon configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanonConfig {
    pub evaluation: EvaluationSection,
    pub markers: MarkerSection,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationSection {
    /// Thresholds to evaluate. Signed so that a bad value is reported per k
    /// by the evaluator rather than rejected while parsing the file.
    pub k_values: Vec<i64>,
    /// Explicit quasi-identifiers; empty means detect automatically.
    pub quasi_identifiers: Vec<String>,
}

impl Default for EvaluationSection {
    fn default() -> Self {
        Self {
            k_values: vec![2, 3, 5],
            quasi_identifiers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSection {
    pub full_suppression: String,
    pub partial_generalization: String,
}

impl Default for MarkerSection {
    fn default() -> Self {
        let markers = Markers::default();
        Self {
            full_suppression: markers.full_suppression,
            partial_generalization: markers.partial_generalization,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Single-character field delimiter.
    pub delimiter: String,
    pub has_header: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            has_header: true,
        }
    }
}

impl InputConfig {
    /// The delimiter as a `char`.
    pub fn delimiter_char(&self) -> Result<char, ConfigError> {
        let mut chars = self.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != '"' && c != '\n' && c != '\r' => Ok(c),
            _ => Err(ConfigError::Delimiter(self.delimiter.clone())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub format: OutputFormat,
    /// Write one result file per evaluated k.
    pub write_results: bool,
    /// File name prefix; files are named `<prefix><k>_anonymity_results.<ext>`.
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("kanon-results"),
            format: OutputFormat::Csv,
            write_results: true,
            file_prefix: "k".to_string(),
        }
    }
}

impl OutputConfig {
    /// Result file path for threshold `k`.
    pub fn result_path(&self, k: u64) -> PathBuf {
        self.directory.join(format!(
            "{}{k}_anonymity_results.{}",
            self.file_prefix,
            self.format.extension()
        ))
    }
}

impl KanonConfig {
    /// Check values the type system cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.input.delimiter_char()?;

        self.markers().validate()?;

        if self.output.directory.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutputDirectory);
        }
        Ok(())
    }

    pub fn markers(&self) -> Markers {
        Markers {
            full_suppression: self.markers.full_suppression.clone(),
            partial_generalization: self.markers.partial_generalization.clone(),
        }
    }

    /// The subset of settings the evaluation core understands.
    pub fn evaluation_config(&self) -> EvaluationConfig {
        let quasi_identifiers = if self.evaluation.quasi_identifiers.is_empty() {
            None
        } else {
            Some(self.evaluation.quasi_identifiers.clone())
        };
        EvaluationConfig {
            quasi_identifiers,
            markers: self.markers(),
        }
    }

    /// Resolve relative paths to absolute
    pub fn resolve_paths(&mut self, base_dir: impl AsRef<Path>) {
        let base = base_dir.as_ref();

        if self.output.directory.is_relative() {
            self.output.directory = base.join(&self.output.directory);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KanonConfig::default();
        assert_eq!(config.evaluation.k_values, vec![2, 3, 5]);
        assert!(config.evaluation.quasi_identifiers.is_empty());
        assert_eq!(config.markers.full_suppression, "*");
        assert_eq!(config.markers.partial_generalization, "**");
        assert_eq!(config.input.delimiter_char().unwrap(), ',');
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_evaluation_config_mapping() {
        let mut config = KanonConfig::default();
        assert_eq!(config.evaluation_config().quasi_identifiers, None);

        config.evaluation.quasi_identifiers = vec!["age".into(), "zip".into()];
        config.markers.full_suppression = "-".into();
        let evaluation = config.evaluation_config();
        assert_eq!(
            evaluation.quasi_identifiers,
            Some(vec!["age".to_string(), "zip".to_string()])
        );
        assert_eq!(evaluation.markers.full_suppression, "-");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = KanonConfig::default();
        config.input.delimiter = ";;".into();
        assert!(config.validate().is_err());

        let mut config = KanonConfig::default();
        config.markers.partial_generalization = "*".into();
        assert!(config.validate().is_err());

        let mut config = KanonConfig::default();
        config.output.directory = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_result_path() {
        let mut config = KanonConfig::default();
        config.output.directory = PathBuf::from("/tmp/out");
        assert_eq!(
            config.output.result_path(3),
            PathBuf::from("/tmp/out/k3_anonymity_results.csv")
        );

        config.output.format = OutputFormat::Json;
        config.output.file_prefix = "run1_k".into();
        assert_eq!(
            config.output.result_path(5),
            PathBuf::from("/tmp/out/run1_k5_anonymity_results.json")
        );
    }

    #[test]
    fn test_path_resolution() {
        let mut config = KanonConfig::default();
        config.resolve_paths("/home/user/project");

        assert_eq!(
            config.output.directory,
            PathBuf::from("/home/user/project/kanon-results")
        );
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }
}
