//! File access inside a live workspace.

use crate::error::{Result, ScaffoldError};
use crate::fsutil;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Handle on a workspace directory.
///
/// Relative paths given to its methods resolve against the workspace root;
/// absolute paths are used unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Wraps an existing or future workspace directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Workspace root.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolves `path` against the workspace root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Reads a file as UTF-8 text.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let full_path = self.resolve(path);
        fs::read_to_string(&full_path).map_err(|e| ScaffoldError::fs("read", full_path, e))
    }

    /// Reads and parses a JSON file. Use `serde_json::Value` for untyped
    /// access.
    pub fn read_json<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> Result<T> {
        let full_path = self.resolve(path);
        let content = fs::read_to_string(&full_path)
            .map_err(|e| ScaffoldError::fs("read", &full_path, e))?;
        serde_json::from_str(&content).map_err(|source| ScaffoldError::Json {
            path: full_path,
            source,
        })
    }

    /// Writes `content` to a file, creating parent directories as needed.
    pub fn update_file(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ScaffoldError::fs("create", parent, e))?;
        }

        fs::write(&full_path, content).map_err(|e| ScaffoldError::fs("write", full_path, e))
    }

    /// Fails with [`ScaffoldError::MissingFile`] naming the first path that
    /// is neither a file nor a directory.
    pub fn check_files_exist<P: AsRef<Path>>(&self, paths: &[P]) -> Result<()> {
        for path in paths {
            let full_path = self.resolve(path);
            if !fsutil::exists(&full_path) {
                return Err(ScaffoldError::MissingFile(full_path));
            }
        }
        Ok(())
    }

    /// Size of a file in bytes.
    pub fn file_size(&self, path: impl AsRef<Path>) -> Result<u64> {
        fsutil::file_size(&self.resolve(path))
    }

    /// True when `path` is a file or directory.
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        fsutil::exists(&self.resolve(path))
    }
}
