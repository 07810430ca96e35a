//! Error types for scaffold_core operations.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for fixture provisioning.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// A command ran to completion but exited with a non-zero status.
    #[error("command `{command}` exited with {}", describe_code(code))]
    CommandFailed {
        /// The shell command line that was executed
        command: String,
        /// Exit code, or None when the process was killed by a signal
        code: Option<i32>,
        /// Captured standard output
        stdout: String,
        /// Captured standard error
        stderr: String,
    },

    /// A command could not be started at all.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        /// The shell command line that was attempted
        command: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The generator failed and left no workspace behind.
    #[error("generator produced no workspace at {}: {source}", path.display())]
    GeneratorFailed {
        /// Where the workspace was expected
        path: PathBuf,
        /// The failure reported by the generator
        #[source]
        source: Box<ScaffoldError>,
    },

    /// An expected file or directory does not exist.
    #[error("File '{}' does not exist", .0.display())]
    MissingFile(PathBuf),

    /// No variant with the given name is configured.
    #[error("unknown variant: {0}")]
    UnknownVariant(String),

    /// A filesystem operation on a workspace, snapshot or overlay failed.
    #[error("failed to {op} {}: {source}", path.display())]
    Fs {
        /// Short verb describing the operation (copy, remove, rename, ...)
        op: &'static str,
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A workspace file did not contain valid JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        /// File that failed to parse
        path: PathBuf,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error (loading, parsing, invalid values).
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl ScaffoldError {
    /// Builds an [`ScaffoldError::Fs`] error.
    pub(crate) fn fs(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Fs {
            op,
            path: path.into(),
            source,
        }
    }

    /// Captured output of a failed command, as `(stdout, stderr)`.
    pub fn captured_output(&self) -> Option<(&str, &str)> {
        match self {
            Self::CommandFailed { stdout, stderr, .. } => Some((stdout.as_str(), stderr.as_str())),
            Self::GeneratorFailed { source, .. } => source.captured_output(),
            _ => None,
        }
    }

    /// Returns a user-friendly recovery suggestion for the error, if available.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Spawn { .. } => Some("Check that the binary exists and that `sh` is on PATH."),
            Self::GeneratorFailed { .. } => {
                Some("Run the generator by hand in the scratch root to see its full output.")
            }
            Self::UnknownVariant(_) => {
                Some("Declare the variant under [[variants]] in the configuration file.")
            }
            Self::Fs { op: "rename", .. } => {
                Some("A stale snapshot may be in the way. Run 'scaffold purge' and provision again.")
            }
            Self::Fs { op: "copy", .. } => {
                Some("Check that the package store contains every overlay entry.")
            }
            _ => None,
        }
    }
}

/// Convenience Result type for scaffold_core operations.
pub type Result<T> = std::result::Result<T, ScaffoldError>;
