//! Implementation of `sail build` and the executable launch behind `sail run`.

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::builder::cmake::CMakeBuilder;
use crate::builder::descriptor::{
    render_cmakelists, render_cpm_bootstrap, DescriptorGenerator, DescriptorSettings,
};
use crate::core::catalog::DependencyCatalog;
use crate::core::manifest::parse_dependencies;
use crate::core::Workspace;
use crate::util::fs::write_string;
use crate::util::process::ProcessBuilder;

/// Files written by [`generate`].
#[derive(Debug, Clone)]
pub struct GeneratedProject {
    /// `target/cmake/CMakeLists.txt`
    pub descriptor: PathBuf,

    /// `target/cmake/cmake/CPM.cmake`
    pub cpm_script: PathBuf,

    /// Number of dependencies rendered
    pub dependencies: usize,
}

/// Regenerate the CMake project for `ws`.
///
/// The manifest is re-read every time; the previous descriptor is overwritten
/// unconditionally.
pub fn generate(ws: &Workspace, catalog: &DependencyCatalog) -> Result<GeneratedProject> {
    let text = ws.manifest().load()?;
    let dependencies = parse_dependencies(&text);

    let blocks = DescriptorGenerator::new(*catalog).generate(&dependencies);
    let settings = DescriptorSettings::from_config(ws.config());

    let descriptor = ws.descriptor_path();
    write_string(&descriptor, &render_cmakelists(&blocks, &settings))?;
    tracing::debug!("wrote {}", descriptor.display());

    let cpm_script = ws.cpm_script_path();
    write_string(&cpm_script, &render_cpm_bootstrap(ws.config().cpm_version()))?;
    tracing::debug!("wrote {}", cpm_script.display());

    Ok(GeneratedProject {
        descriptor,
        cpm_script,
        dependencies: dependencies.len(),
    })
}

/// Generate the CMake project, then configure and build it.
pub fn build(ws: &Workspace, catalog: &DependencyCatalog) -> Result<GeneratedProject> {
    let generated = generate(ws, catalog)?;
    CMakeBuilder::new(ws)?.build()?;
    tracing::debug!("build completed");
    Ok(generated)
}

/// Run the already built executable from the workspace root.
///
/// A non-zero exit surfaces as [`ProcessError::Failed`](crate::util::ProcessError)
/// carrying the program's exit code.
pub fn run_executable(ws: &Workspace, args: &[String]) -> Result<()> {
    let executable = ws.executable_path();
    if !executable.exists() {
        bail!(
            "executable not found at {}; the build may have failed",
            executable.display()
        );
    }

    tracing::debug!("running {}", executable.display());
    ProcessBuilder::new(&executable)
        .args(args)
        .cwd(ws.root())
        .exec_and_check()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::GlobalContext;
    use std::path::Path;
    use tempfile::TempDir;

    fn workspace(dir: &Path, manifest: &str) -> Workspace {
        let path = dir.join("Sail.toml");
        std::fs::write(&path, manifest).unwrap();
        let ctx = GlobalContext::with_cwd(dir.to_path_buf()).with_home(dir.join(".home"));
        Workspace::new(&path, &ctx).unwrap()
    }

    #[test]
    fn test_generate_writes_descriptor_and_cpm() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(
            tmp.path(),
            "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n\n[dependencies]\nfmt = \"10.1.1\"\nzlib = \"system\"\n",
        );

        let generated = generate(&ws, &DependencyCatalog::builtin()).unwrap();
        assert_eq!(generated.dependencies, 2);

        let cmake = std::fs::read_to_string(&generated.descriptor).unwrap();
        assert!(cmake.contains("find_package(ZLIB REQUIRED)"));
        assert!(cmake.contains("CPMAddPackage(\"gh:fmtlib/fmt#10.1.1\")"));
        assert!(cmake.contains("target_link_libraries(${PROJECT_NAME} PRIVATE fmt::fmt)"));
        assert!(cmake.contains("set(CMAKE_CXX_STANDARD 20)"));

        let cpm = std::fs::read_to_string(&generated.cpm_script).unwrap();
        assert!(cpm.contains("set(CPM_DOWNLOAD_VERSION 0.38.1)"));
    }

    #[test]
    fn test_generate_replaces_previous_descriptor() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(tmp.path(), "[dependencies]\nspdlog = \"1.12.0\"\n");
        let catalog = DependencyCatalog::builtin();

        generate(&ws, &catalog).unwrap();
        std::fs::write(ws.manifest_path(), "[dependencies]\ncli11 = \"2.3.2\"\n").unwrap();
        let generated = generate(&ws, &catalog).unwrap();

        let cmake = std::fs::read_to_string(&generated.descriptor).unwrap();
        assert!(cmake.contains("CLI11::CLI11"));
        assert!(!cmake.contains("spdlog"));
    }

    #[test]
    fn test_generate_is_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(
            tmp.path(),
            "[dependencies]\nqt6 = \"6.5\"\nmystery = \"1.0\"\ncatch2 = \"3.4.0\"\n",
        );
        let catalog = DependencyCatalog::builtin();

        let first = std::fs::read(generate(&ws, &catalog).unwrap().descriptor).unwrap();
        let second = std::fs::read(generate(&ws, &catalog).unwrap().descriptor).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_hash_prefixed_key_gets_placeholder_fetch() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(tmp.path(), "[dependencies]\n#fmt = \"1\"\n");

        let generated = generate(&ws, &DependencyCatalog::builtin()).unwrap();
        assert_eq!(generated.dependencies, 1);

        let cmake = std::fs::read_to_string(&generated.descriptor).unwrap();
        assert!(cmake.contains("# CPMAddPackage(\"#fmt version 1\")"));
        assert!(!cmake.contains("fmt::fmt"));
    }

    #[test]
    fn test_run_executable_requires_build() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(tmp.path(), "[package]\nname = \"demo\"\n");

        let err = run_executable(&ws, &[]).unwrap_err();
        assert!(err.to_string().contains("executable not found"));
    }

    #[test]
    fn test_generate_fails_when_manifest_removed() {
        let tmp = TempDir::new().unwrap();
        let ws = workspace(tmp.path(), "[dependencies]\n");
        std::fs::remove_file(ws.manifest_path()).unwrap();

        assert!(generate(&ws, &DependencyCatalog::builtin()).is_err());
        assert!(!ws.descriptor_path().exists());
    }
}
