//! Where configuration files live.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::ConfigError;

/// Git-tracked project settings.
pub const PROJECT_CONFIG_FILE: &str = "kanon.toml";
/// Untracked per-checkout overrides.
pub const LOCAL_CONFIG_FILE: &str = "kanon.local.toml";

/// Config file locations for one project directory.
#[derive(Debug, Clone)]
pub struct Paths {
    project_dir: PathBuf,
}

impl Paths {
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            project_dir: project_dir.as_ref().to_path_buf(),
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn project_config(&self) -> PathBuf {
        self.project_dir.join(PROJECT_CONFIG_FILE)
    }

    pub fn local_config(&self) -> PathBuf {
        self.project_dir.join(LOCAL_CONFIG_FILE)
    }

    pub fn has_project_config(&self) -> bool {
        self.project_config().is_file()
    }

    /// Per-user defaults, e.g. `~/.config/kanon/config.toml` on Linux.
    pub fn user_config() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("org", "kanon", "kanon")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(ConfigError::NoUserConfigDir)
    }
}
