//! Global context for Sail operations.
//!
//! Provides centralized access to the working directory and the user-wide
//! Sail home (`~/.sail`). Nothing here is process-global state: a context is
//! created once per invocation and passed down explicitly.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;

use crate::core::workspace::{find_manifest, ManifestError};

/// Global context containing paths and environment.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global Sail data (~/.sail/)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let home = BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".sail"))
            .unwrap_or_else(|| PathBuf::from(".sail"));

        GlobalContext { cwd, home }
    }

    /// Override the Sail home directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the Sail home directory (~/.sail/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Find `Sail.toml` starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestError> {
        find_manifest(&self.cwd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_paths() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf())
            .with_home(tmp.path().join("home"));

        assert_eq!(ctx.cwd(), tmp.path());
        assert_eq!(ctx.config_path(), tmp.path().join("home").join("config.toml"));
    }

    #[test]
    fn test_default_home_is_dot_sail() {
        let ctx = GlobalContext::new().unwrap();
        assert!(ctx.cwd().is_absolute());
        assert!(ctx.home().ends_with(".sail"));
    }

    #[test]
    fn test_find_manifest_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join("Sail.toml");
        std::fs::write(&manifest, "[package]\nname = \"test\"\n").unwrap();
        let nested = tmp.path().join("src").join("nested");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = GlobalContext::with_cwd(nested);
        assert_eq!(ctx.find_manifest().unwrap(), manifest);
    }
}
