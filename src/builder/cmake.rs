//! CMake driver for the generated project.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::Workspace;
use crate::util::fs::ensure_dir;
use crate::util::process::{find_cmake, find_ctest, ProcessBuilder};

/// Runs configure, build and test steps for a workspace's generated project.
pub struct CMakeBuilder<'a> {
    ws: &'a Workspace,
    cmake: PathBuf,
}

impl<'a> CMakeBuilder<'a> {
    /// Create a new CMake builder, locating the cmake executable.
    pub fn new(ws: &'a Workspace) -> Result<Self> {
        let cmake = find_cmake(ws.config().build.cmake.as_deref())?;
        tracing::debug!("using cmake at {}", cmake.display());
        Ok(CMakeBuilder { ws, cmake })
    }

    /// The configure command: `cmake -S target/cmake -B target/cmake/build`.
    pub fn configure_command(&self) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.cmake)
            .arg("-S")
            .arg(self.ws.cmake_dir())
            .arg("-B")
            .arg(self.ws.build_dir());

        if let Some(ref generator) = self.ws.config().build.generator {
            cmd = cmd.arg("-G").arg(generator);
        }
        cmd.cwd(self.ws.build_dir())
    }

    /// The build command: `cmake --build target/cmake/build [--parallel N]`.
    pub fn build_command(&self) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(&self.cmake)
            .arg("--build")
            .arg(self.ws.build_dir());

        if let Some(jobs) = self.ws.config().build.jobs {
            cmd = cmd.arg("--parallel").arg(jobs.to_string());
        }
        cmd.cwd(self.ws.build_dir())
    }

    /// Configure and build.
    pub fn build(&self) -> Result<()> {
        ensure_dir(&self.ws.build_dir())?;

        tracing::info!("Configuring CMake project");
        self.configure_command().exec_and_check()?;

        tracing::info!("Building CMake project");
        self.build_command().exec_and_check()?;

        Ok(())
    }

    /// Run the project's tests with CTest.
    pub fn test(&self) -> Result<()> {
        let ctest = find_ctest(&self.cmake)?;
        ProcessBuilder::new(ctest)
            .arg("--output-on-failure")
            .cwd(self.ws.build_dir())
            .exec_and_check()
    }
}
