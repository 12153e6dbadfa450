//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};
use thiserror::Error;

/// Failure of an external program.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The program ran but exited unsuccessfully.
    #[error("`{command}` failed with exit code {code}")]
    Failed { command: String, code: i32 },

    /// The program was terminated without an exit code (e.g. by a signal).
    #[error("`{command}` was terminated")]
    Terminated { command: String },

    /// A required program is not installed.
    #[error("{program} not found\n\nhelp: install {program} and ensure it is in your PATH")]
    NotFound { program: String },
}

impl ProcessError {
    /// Exit code to report to the calling shell.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProcessError::Failed { code, .. } => *code,
            ProcessError::Terminated { .. } | ProcessError::NotFound { .. } => 1,
        }
    }
}

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }

    /// Run with inherited stdio and return the exit status.
    pub fn status(&self) -> Result<ExitStatus> {
        tracing::debug!("running `{}`", self.display_command());
        let mut cmd = self.build_command();
        let status = cmd
            .status()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))?;
        Ok(status)
    }

    /// Run with inherited stdio and require success.
    ///
    /// A non-zero exit becomes [`ProcessError::Failed`] carrying the child's
    /// exit code.
    pub fn exec_and_check(&self) -> Result<()> {
        let status = self.status()?;
        if status.success() {
            return Ok(());
        }
        let command = self.display_command();
        match status.code() {
            Some(code) => Err(ProcessError::Failed { command, code }.into()),
            None => Err(ProcessError::Terminated { command }.into()),
        }
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Find CMake, honoring an explicit override.
pub fn find_cmake(explicit: Option<&Path>) -> Result<PathBuf, ProcessError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    find_executable("cmake").ok_or_else(|| ProcessError::NotFound {
        program: "CMake".to_string(),
    })
}

/// Find CTest, preferring the one installed next to `cmake`.
pub fn find_ctest(cmake: &Path) -> Result<PathBuf, ProcessError> {
    let sibling = cmake.with_file_name(format!("ctest{}", std::env::consts::EXE_SUFFIX));
    if sibling.is_file() {
        return Ok(sibling);
    }
    find_executable("ctest").ok_or_else(|| ProcessError::NotFound {
        program: "CTest".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("cmake").args(["--build", ".", "--parallel", "4"]);

        assert_eq!(pb.display_command(), "cmake --build . --parallel 4");
    }

    #[test]
    fn test_explicit_cmake_wins() {
        let path = find_cmake(Some(Path::new("/opt/cmake/bin/cmake"))).unwrap();
        assert_eq!(path, PathBuf::from("/opt/cmake/bin/cmake"));
    }

    #[test]
    fn test_failed_exit_code() {
        let err = ProcessError::Failed {
            command: "cmake ..".to_string(),
            code: 2,
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("exit code 2"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_and_check_propagates_code() {
        let err = ProcessBuilder::new("sh")
            .args(["-c", "exit 3"])
            .exec_and_check()
            .unwrap_err();

        let process_err = err.downcast_ref::<ProcessError>().unwrap();
        assert_eq!(process_err.exit_code(), 3);
    }
}
