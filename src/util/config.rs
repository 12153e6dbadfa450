//! Configuration file support for Sail.
//!
//! Sail supports two configuration file locations:
//! - Global: `~/.sail/config.toml` - User-wide defaults
//! - Project: `.sail/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Minimum CMake version written into generated descriptors.
pub const CMAKE_MINIMUM_VERSION: &str = "3.15";

/// CPM.cmake release downloaded by the bootstrap script.
pub const DEFAULT_CPM_VERSION: &str = "0.38.1";

/// C++ standard used when nothing is configured.
pub const DEFAULT_CXX_STANDARD: u32 = 20;

/// Sail configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,

    /// CPM bootstrap settings
    pub cpm: CpmConfig,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// C++ standard (CMAKE_CXX_STANDARD)
    pub cxx_standard: Option<u32>,

    /// Parallel jobs for `cmake --build` (None = let CMake decide)
    pub jobs: Option<usize>,

    /// CMake generator (e.g. "Ninja")
    pub generator: Option<String>,

    /// Explicit path to the cmake executable
    pub cmake: Option<PathBuf>,
}

/// CPM-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CpmConfig {
    /// CPM.cmake release to download
    pub version: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.build.cxx_standard.is_some() {
            self.build.cxx_standard = other.build.cxx_standard;
        }
        if other.build.jobs.is_some() {
            self.build.jobs = other.build.jobs;
        }
        if other.build.generator.is_some() {
            self.build.generator = other.build.generator;
        }
        if other.build.cmake.is_some() {
            self.build.cmake = other.build.cmake;
        }

        if other.cpm.version.is_some() {
            self.cpm.version = other.cpm.version;
        }
    }

    /// Effective C++ standard.
    pub fn cxx_standard(&self) -> u32 {
        self.build.cxx_standard.unwrap_or(DEFAULT_CXX_STANDARD)
    }

    /// Effective CPM.cmake version.
    pub fn cpm_version(&self) -> &str {
        self.cpm.version.as_deref().unwrap_or(DEFAULT_CPM_VERSION)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.sail/config.toml)
/// 2. Global config (~/.sail/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the project config path (.sail/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".sail").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cxx_standard(), 20);
        assert_eq!(config.cpm_version(), "0.38.1");
        assert!(config.build.jobs.is_none());
        assert!(config.build.generator.is_none());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
[build]
cxx_standard = 17
jobs = 8
generator = "Ninja"

[cpm]
version = "0.40.2"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.cxx_standard(), 17);
        assert_eq!(config.build.jobs, Some(8));
        assert_eq!(config.build.generator.as_deref(), Some("Ninja"));
        assert_eq!(config.cpm_version(), "0.40.2");
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.build.cxx_standard = Some(17);
        base.build.jobs = Some(4);

        let mut override_cfg = Config::default();
        override_cfg.build.cxx_standard = Some(23);

        base.merge(override_cfg);

        assert_eq!(base.cxx_standard(), 23);
        assert_eq!(base.build.jobs, Some(4)); // Not overridden
    }

    #[test]
    fn test_load_config_project_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = project_config_path(tmp.path());
        std::fs::write(&global, "[build]\njobs = 2\ncxx_standard = 17\n").unwrap();
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();
        std::fs::write(&project, "[build]\njobs = 16\n").unwrap();

        let config = load_config(&global, &project);
        assert_eq!(config.build.jobs, Some(16));
        assert_eq!(config.cxx_standard(), 17);
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[build\njobs = ").unwrap();

        let config = Config::load_or_default(&path);
        assert!(config.build.jobs.is_none());
    }
}
