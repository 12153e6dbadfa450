//! Workspace - the explicit project context.
//!
//! A Workspace is built once per command from the discovered manifest and is
//! passed to every operation that needs the project root, instead of any
//! process-wide "current project" state.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use thiserror::Error;

use crate::core::manifest::{ManifestStore, PackageMetadata, MANIFEST_NAME};
use crate::util::config::{load_config, project_config_path, Config};
use crate::util::GlobalContext;

/// Errors locating or reading the manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error(
        "could not find `Sail.toml` in `{}` or any parent directory\n\
         \n\
         help: run `sail init` to create a new project",
        .dir.display()
    )]
    NotFound { dir: PathBuf },

    #[error("could not read `{}`", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`Sail.toml` already exists in `{}`", .dir.display())]
    AlreadyExists { dir: PathBuf },
}

/// Walk from `start` through its ancestors and return the first `Sail.toml`.
pub fn find_manifest(start: &Path) -> Result<PathBuf, ManifestError> {
    start
        .ancestors()
        .map(|dir| dir.join(MANIFEST_NAME))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| ManifestError::NotFound {
            dir: start.to_path_buf(),
        })
}

/// A project rooted at the directory containing `Sail.toml`.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Directory containing the manifest
    root: PathBuf,

    /// Manifest access
    store: ManifestStore,

    /// Package name and version
    package: PackageMetadata,

    /// Merged global and project configuration
    config: Config,
}

impl Workspace {
    /// Create a workspace from a manifest path.
    pub fn new(manifest_path: &Path, ctx: &GlobalContext) -> Result<Self> {
        let root = manifest_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf();
        let store = ManifestStore::new(manifest_path);

        let text = store.load()?;
        let package = PackageMetadata::from_manifest(&text, &dir_name(&root));
        let config = load_config(&ctx.config_path(), &project_config_path(&root));

        tracing::debug!("workspace root: {}", root.display());

        Ok(Workspace {
            root,
            store,
            package,
            config,
        })
    }

    /// Discover the manifest from the context's cwd and open its workspace.
    pub fn discover(ctx: &GlobalContext) -> Result<Self> {
        let manifest_path = ctx.find_manifest()?;
        Self::new(&manifest_path, ctx)
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Get the workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the manifest store.
    pub fn manifest(&self) -> &ManifestStore {
        &self.store
    }

    /// Get the manifest path.
    pub fn manifest_path(&self) -> &Path {
        self.store.path()
    }

    pub fn package(&self) -> &PackageMetadata {
        &self.package
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the target directory (`target/`).
    pub fn target_dir(&self) -> PathBuf {
        self.root.join("target")
    }

    /// Directory holding the generated CMake project (`target/cmake/`).
    pub fn cmake_dir(&self) -> PathBuf {
        self.target_dir().join("cmake")
    }

    /// CMake binary directory (`target/cmake/build/`).
    pub fn build_dir(&self) -> PathBuf {
        self.cmake_dir().join("build")
    }

    /// Path of the generated CMakeLists.txt.
    pub fn descriptor_path(&self) -> PathBuf {
        self.cmake_dir().join("CMakeLists.txt")
    }

    /// Path of the CPM bootstrap script.
    pub fn cpm_script_path(&self) -> PathBuf {
        self.cmake_dir().join("cmake").join("CPM.cmake")
    }

    /// Path of the built executable.
    pub fn executable_path(&self) -> PathBuf {
        self.build_dir().join(format!(
            "{}{}",
            self.package.name,
            std::env::consts::EXE_SUFFIX
        ))
    }
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_workspace(dir: &Path) -> PathBuf {
        let manifest_path = dir.join(MANIFEST_NAME);
        std::fs::write(
            &manifest_path,
            r#"[package]
name = "testws"
version = "1.2.0"

[dependencies]
fmt = "10.1.1"
"#,
        )
        .unwrap();
        manifest_path
    }

    fn test_ctx(dir: &Path) -> GlobalContext {
        GlobalContext::with_cwd(dir.to_path_buf()).with_home(dir.join(".home"))
    }

    #[test]
    fn test_workspace_creation() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = create_test_workspace(tmp.path());

        let ws = Workspace::new(&manifest_path, &test_ctx(tmp.path())).unwrap();
        assert_eq!(ws.package().name, "testws");
        assert_eq!(ws.package().version, "1.2.0");
        assert_eq!(ws.root(), tmp.path());
        assert_eq!(ws.manifest_path(), manifest_path);
    }

    #[test]
    fn test_workspace_paths() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = create_test_workspace(tmp.path());
        let ws = Workspace::new(&manifest_path, &test_ctx(tmp.path())).unwrap();

        assert_eq!(ws.target_dir(), tmp.path().join("target"));
        assert!(ws.descriptor_path().ends_with("target/cmake/CMakeLists.txt"));
        assert!(ws.cpm_script_path().ends_with("target/cmake/cmake/CPM.cmake"));
        assert!(ws.build_dir().ends_with("target/cmake/build"));
        assert!(ws
            .executable_path()
            .to_string_lossy()
            .contains("testws"));
    }

    #[test]
    fn test_workspace_reads_project_config() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = create_test_workspace(tmp.path());
        let config_path = project_config_path(tmp.path());
        std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        std::fs::write(&config_path, "[build]\ncxx_standard = 17\n").unwrap();

        let ws = Workspace::new(&manifest_path, &test_ctx(tmp.path())).unwrap();
        assert_eq!(ws.config().cxx_standard(), 17);
    }

    #[test]
    fn test_find_manifest_walks_up() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = create_test_workspace(tmp.path());
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_manifest(&nested).unwrap(), manifest_path);
    }

    #[test]
    fn test_find_manifest_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = find_manifest(tmp.path()).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
        assert!(err.to_string().contains("sail init"));
    }
}
