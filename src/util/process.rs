//! External tool invocation for the build driver.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use anyhow::{bail, Context, Result};

/// A command line for an external tool, run with inherited stdio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    pub fn args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        args.into_iter().fold(self, |cmd, arg| cmd.arg(arg))
    }

    /// Directory the command runs in.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn cwd_path(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Run to completion and fail on a non-zero exit.
    pub fn status_and_check(&self) -> Result<()> {
        tracing::debug!("running `{}`", self.display_command());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let status = cmd
            .status()
            .with_context(|| format!("failed to execute `{}`", self.program.display()))?;
        if status.success() {
            return Ok(());
        }

        match &self.cwd {
            Some(dir) => bail!(
                "`{}` failed in {} with exit code {}",
                self.display_command(),
                dir.display(),
                exit_code(status)
            ),
            None => bail!(
                "`{}` failed with exit code {}",
                self.display_command(),
                exit_code(status)
            ),
        }
    }

    /// The command line as a user would type it.
    pub fn display_command(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(char::is_whitespace) {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

fn exit_code(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => code.to_string(),
        None => "(terminated by signal)".to_string(),
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

pub fn find_cmake() -> Option<PathBuf> {
    find_executable("cmake")
}

/// Find the make program: the configured name, then `MAKE`, then `make` or
/// `gmake`.
pub fn find_make(configured: Option<&str>) -> Option<PathBuf> {
    if let Some(name) = configured {
        return find_executable(name);
    }

    std::env::var("MAKE")
        .ok()
        .and_then(|make| find_executable(&make))
        .or_else(|| ["make", "gmake"].into_iter().find_map(find_executable))
}
