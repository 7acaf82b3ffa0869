//! CLI command implementations.

pub mod classes;
pub mod classify;
pub mod config;
pub mod evaluate;
pub mod version;

use std::path::PathBuf;

use anyhow::{Context, Result};
use kanon::Dataset;
use kanon_config::{ConfigLoader, KanonConfig};

use crate::input::{ReadOptions, read_dataset};

/// Where and how to read the input table.
pub struct InputOptions {
    pub file: PathBuf,
    pub delimiter: Option<char>,
    pub no_header: bool,
}

/// Where configuration is read from: the project directory plus an
/// optional `--config` file layered on top.
pub struct ConfigSource {
    pub project: PathBuf,
    pub file: Option<PathBuf>,
}

impl ConfigSource {
    pub fn loader(&self) -> ConfigLoader {
        let loader = ConfigLoader::new().with_project_dir(&self.project);
        match &self.file {
            Some(file) => loader.with_config_file(file),
            None => loader,
        }
    }

    /// Loads the merged configuration.
    pub fn load(&self) -> Result<KanonConfig> {
        self.loader().load().with_context(|| {
            format!(
                "Failed to load configuration from {}",
                self.project.display()
            )
        })
    }
}

/// Reads the input table; command-line flags win over `[input]` settings.
pub fn load_dataset(input: &InputOptions, config: &KanonConfig) -> Result<Dataset> {
    let delimiter = match input.delimiter {
        Some(c) => c,
        None => config.input.delimiter_char()?,
    };
    let options = ReadOptions {
        delimiter,
        has_header: config.input.has_header && !input.no_header,
    };
    read_dataset(&input.file, &options)
}

/// Applies a `--qi` override when one was given.
pub fn override_quasi_identifiers(config: &mut KanonConfig, quasi_identifiers: Vec<String>) {
    if !quasi_identifiers.is_empty() {
        config.evaluation.quasi_identifiers = quasi_identifiers;
    }
}
