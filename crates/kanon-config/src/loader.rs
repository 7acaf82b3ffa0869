//! Configuration loader with multi-source merging

use crate::{ConfigError, KanonConfig, Paths};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variables are read as `KANON_<SECTION>__<KEY>`.
const ENV_PREFIX: &str = "KANON";

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    paths: Paths,
    config_file: Option<PathBuf>,
    include_user_config: bool,
}

impl ConfigLoader {
    /// Create a new config loader with default project directory (current dir)
    pub fn new() -> Self {
        Self {
            paths: Paths::new(env::current_dir().unwrap_or_else(|_| PathBuf::from("."))),
            config_file: None,
            include_user_config: true,
        }
    }

    /// Set the project directory
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.paths = Paths::new(dir);
        self
    }

    /// Add an explicit config file, layered above the local override file.
    /// Unlike the discovered files it must exist.
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Skip ~/.config/kanon/config.toml
    pub fn without_user_config(mut self) -> Self {
        self.include_user_config = false;
        self
    }

    /// Every file source that exists, lowest precedence first.
    pub fn sources(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        if self.include_user_config
            && let Ok(user_config) = Paths::user_config()
            && user_config.exists()
        {
            files.push(user_config);
        }

        for file in [self.paths.project_config(), self.paths.local_config()] {
            if file.exists() {
                files.push(file);
            }
        }

        if let Some(file) = &self.config_file {
            files.push(file.clone());
        }

        files
    }

    /// Load configuration from all sources with proper precedence
    pub fn load(self) -> Result<KanonConfig> {
        let mut builder = config::Config::builder();

        // 1. Start with built-in defaults
        let defaults = KanonConfig::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2-4. User, project, local and explicit files
        for file in self.sources() {
            let required = self.config_file.as_ref() == Some(&file);
            builder = builder.add_source(
                config::File::from(file)
                    .required(required)
                    .format(config::FileFormat::Toml),
            );
        }

        // 5. Environment variables (KANON_OUTPUT__FORMAT=json, KANON_EVALUATION__K_VALUES=2,3)
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("evaluation.k_values")
                .with_list_parse_key("evaluation.quasi_identifiers")
                .try_parsing(true),
        );

        // Build and deserialize
        let config = builder.build().context("Failed to build configuration")?;

        let mut kanon_config: KanonConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        kanon_config
            .validate()
            .context("Configuration failed validation")?;

        // Resolve relative paths
        kanon_config.resolve_paths(self.paths.project_dir());

        Ok(kanon_config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a single config file on its own, without layering.
pub fn read_config_file(path: impl AsRef<Path>) -> Result<KanonConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
