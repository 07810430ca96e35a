//! The external project generator and how its outcome is judged.

use crate::error::{Result, ScaffoldError};
use crate::exec::{self, RunOptions};
use std::path::Path;
use tracing::warn;

/// Something that can scaffold a new workspace directory.
///
/// Implemented by [`CliGenerator`] for the real command-line tool; tests
/// substitute their own to count invocations or simulate failures.
pub trait Generator {
    /// Creates `<cwd>/<name>` by running the generator's `new` command with
    /// the given extra flags. Returns the generator's standard output.
    fn generate(&self, cwd: &Path, name: &str, flags: &[String]) -> Result<String>;
}

/// Runs `<binary> new <name> --no-interactive [flags]` through the shell.
#[derive(Debug, Clone)]
pub struct CliGenerator {
    binary: String,
}

impl CliGenerator {
    /// Generator invoking `binary`, interpreted relative to the working
    /// directory it is run in.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// The command line for a `new` invocation.
    pub fn command_line(&self, name: &str, flags: &[String]) -> String {
        let mut line = format!("{} new {} --no-interactive", self.binary, name);
        for flag in flags {
            line.push(' ');
            line.push_str(flag);
        }
        line
    }
}

impl Generator for CliGenerator {
    fn generate(&self, cwd: &Path, name: &str, flags: &[String]) -> Result<String> {
        exec::run(&self.command_line(name, flags), cwd, RunOptions::default())
    }
}

/// How a first-time generator run ended.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// The generator exited cleanly.
    Succeeded,
    /// The generator reported a failure but left a workspace behind. The
    /// generator is known to exit non-zero on otherwise successful runs.
    Ignored(ScaffoldError),
    /// No workspace exists afterwards, whatever the generator reported.
    Fatal(ScaffoldError),
}

impl GenerationOutcome {
    /// Classifies a generator result given whether the expected workspace
    /// directory exists afterwards. A missing workspace is fatal even when
    /// the generator exited cleanly.
    pub fn classify(result: Result<String>, workspace: &Path) -> Self {
        if !workspace.is_dir() {
            let source = match result {
                Ok(_) => ScaffoldError::MissingFile(workspace.to_path_buf()),
                Err(e) => e,
            };
            return Self::Fatal(ScaffoldError::GeneratorFailed {
                path: workspace.to_path_buf(),
                source: Box::new(source),
            });
        }
        match result {
            Ok(_) => Self::Succeeded,
            Err(e) => Self::Ignored(e),
        }
    }

    /// Logs an ignored failure and turns a fatal one into an error.
    pub fn into_result(self) -> Result<()> {
        match self {
            Self::Succeeded => Ok(()),
            Self::Ignored(e) => {
                // Every generator error is tolerated here, including ones
                // that are not the known benign exit.
                warn!(error = %e, "ignoring generator failure; workspace was created");
                Ok(())
            }
            Self::Fatal(e) => Err(e),
        }
    }
}
