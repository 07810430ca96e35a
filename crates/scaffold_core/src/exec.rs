//! Shell command execution with captured output.
//!
//! Every command is a shell command line run through `sh -c` in an explicit
//! working directory. Three flavors are provided:
//! - [`run`] blocks and returns stdout, failing on a non-zero exit unless
//!   errors are silenced
//! - [`run_stripped`] is [`run`] followed by ANSI escape removal
//! - [`run_async`] runs on tokio and returns both streams
//!
//! [`run_lenient`] never fails on exit status and is meant for commands whose
//! failure output is itself the thing under test.

use crate::ansi::strip_ansi;
use crate::error::{Result, ScaffoldError};
use std::path::Path;
use std::process::{Command, ExitStatus, Output, Stdio};
use tracing::{debug, error};

/// How a failing command is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Return captured output instead of an error on a non-zero exit.
    pub silence_error: bool,
}

impl RunOptions {
    /// Options that turn a non-zero exit into captured output.
    pub fn silenced() -> Self {
        Self {
            silence_error: true,
        }
    }
}

/// Both output streams of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

fn shell(command: &str, cwd: &Path) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(command)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

fn failure(command: &str, status: ExitStatus, captured: CommandOutput) -> ScaffoldError {
    ScaffoldError::CommandFailed {
        command: command.to_string(),
        code: status.code(),
        stdout: captured.stdout,
        stderr: captured.stderr,
    }
}

/// Runs `command` in `cwd` to completion and returns its exit status with
/// both streams, failing only when the process cannot be started.
pub(crate) fn capture(command: &str, cwd: &Path) -> Result<(ExitStatus, CommandOutput)> {
    debug!(command, cwd = %cwd.display(), "running command");
    let output = shell(command, cwd)
        .output()
        .map_err(|source| ScaffoldError::Spawn {
            command: command.to_string(),
            source,
        })?;
    let captured = CommandOutput::from_output(&output);
    debug!(command, code = ?output.status.code(), "command finished");
    Ok((output.status, captured))
}

/// Runs `command` in `cwd` and returns its standard output.
///
/// # Errors
///
/// Returns [`ScaffoldError::CommandFailed`] carrying both captured streams
/// when the command exits non-zero and `opts.silence_error` is false. With
/// errors silenced the captured stdout is returned instead.
pub fn run(command: &str, cwd: &Path, opts: RunOptions) -> Result<String> {
    let (status, captured) = capture(command, cwd)?;
    if status.success() {
        return Ok(captured.stdout);
    }
    if opts.silence_error {
        debug!(command, "ignoring non-zero exit");
        return Ok(captured.stdout);
    }
    error!(
        command,
        stdout = %captured.stdout,
        stderr = %captured.stderr,
        "command failed"
    );
    Err(failure(command, status, captured))
}

/// Like [`run`], with terminal escape sequences removed from the returned
/// text.
pub fn run_stripped(command: &str, cwd: &Path, opts: RunOptions) -> Result<String> {
    run(command, cwd, opts).map(|stdout| strip_ansi(&stdout))
}

/// Runs `command` in `cwd` and returns stdout on success, or stdout followed
/// by stderr on a non-zero exit.
pub fn run_lenient(command: &str, cwd: &Path) -> Result<String> {
    let (status, captured) = capture(command, cwd)?;
    if status.success() {
        Ok(captured.stdout)
    } else {
        Ok(captured.stdout + &captured.stderr)
    }
}

/// Runs `command` in `cwd` without blocking the caller's runtime thread.
///
/// # Errors
///
/// Same contract as [`run`], except that a silenced failure yields both
/// captured streams.
pub async fn run_async(command: &str, cwd: &Path, opts: RunOptions) -> Result<CommandOutput> {
    debug!(command, cwd = %cwd.display(), "running command asynchronously");
    let output = tokio::process::Command::from(shell(command, cwd))
        .output()
        .await
        .map_err(|source| ScaffoldError::Spawn {
            command: command.to_string(),
            source,
        })?;
    let captured = CommandOutput::from_output(&output);
    if output.status.success() || opts.silence_error {
        return Ok(captured);
    }
    Err(failure(command, output.status, captured))
}
