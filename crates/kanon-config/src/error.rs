//! Errors raised while reading or checking configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} is not valid TOML: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(
        "Invalid input.delimiter {0:?}: expected one character other than a quote or line break"
    )]
    Delimiter(String),

    #[error("Invalid markers: {0}")]
    Markers(#[from] kanon::KanonError),

    #[error("output.directory must not be empty")]
    EmptyOutputDirectory,

    #[error("Unknown output format '{0}'. Use 'csv' or 'json'")]
    UnknownFormat(String),

    #[error("Cannot locate the user configuration directory")]
    NoUserConfigDir,
}
