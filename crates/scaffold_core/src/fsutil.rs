//! Filesystem primitives used by the snapshot and overlay code.
//!
//! Copies behave like `cp -a`: directories are walked recursively, symbolic
//! links are recreated rather than followed, and permissions and
//! modification times are carried over.

use crate::error::{Result, ScaffoldError};
use filetime::FileTime;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Removes a file, symlink or directory tree. A missing path is not an error.
pub fn remove_if_exists(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(ScaffoldError::fs("inspect", path, e)),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ScaffoldError::fs("remove", path, e)),
    }
}

/// Copies `src` to `dst`, recursing into directories. `dst` must not exist;
/// its parent directories are created.
pub fn copy_recursive(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|e| ScaffoldError::fs("create", parent, e))?;
    }
    copy_entry(src, dst)
}

fn copy_entry(src: &Path, dst: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(src).map_err(|e| ScaffoldError::fs("copy", src, e))?;
    let file_type = metadata.file_type();

    if file_type.is_symlink() {
        copy_symlink(src, dst)?;
        return Ok(());
    }

    if file_type.is_dir() {
        fs::create_dir(dst).map_err(|e| ScaffoldError::fs("create", dst, e))?;
        for entry in fs::read_dir(src).map_err(|e| ScaffoldError::fs("read", src, e))? {
            let entry = entry.map_err(|e| ScaffoldError::fs("read", src, e))?;
            copy_entry(&entry.path(), &dst.join(entry.file_name()))?;
        }
        // Permissions last so read-only directories can still be filled.
        fs::set_permissions(dst, metadata.permissions())
            .map_err(|e| ScaffoldError::fs("chmod", dst, e))?;
    } else {
        // fs::copy carries the permission bits.
        fs::copy(src, dst).map_err(|e| ScaffoldError::fs("copy", src, e))?;
    }

    let mtime = FileTime::from_last_modification_time(&metadata);
    let atime = FileTime::from_last_access_time(&metadata);
    filetime::set_file_times(dst, atime, mtime).map_err(|e| ScaffoldError::fs("touch", dst, e))?;
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let target = fs::read_link(src).map_err(|e| ScaffoldError::fs("read link", src, e))?;
    std::os::unix::fs::symlink(&target, dst).map_err(|e| ScaffoldError::fs("link", dst, e))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    // Without portable symlink creation, copy what the link points at.
    if src.is_dir() {
        copy_dir_contents(src, dst)
    } else {
        fs::copy(src, dst)
            .map(|_| ())
            .map_err(|e| ScaffoldError::fs("copy", src, e))
    }
}

#[cfg(not(unix))]
fn copy_dir_contents(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).map_err(|e| ScaffoldError::fs("create", dst, e))?;
    for entry in fs::read_dir(src).map_err(|e| ScaffoldError::fs("read", src, e))? {
        let entry = entry.map_err(|e| ScaffoldError::fs("read", src, e))?;
        copy_entry(&entry.path(), &dst.join(entry.file_name()))?;
    }
    Ok(())
}

/// Moves a directory to a new location on the same filesystem.
pub fn rename(src: &Path, dst: &Path) -> Result<()> {
    fs::rename(src, dst).map_err(|e| ScaffoldError::fs("rename", src, e))
}

/// True when `path` is a directory. Never fails.
pub fn directory_exists(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// True when `path` is a regular file. Never fails.
pub fn file_exists(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

/// True when `path` is a file or a directory.
pub fn exists(path: &Path) -> bool {
    directory_exists(path) || file_exists(path)
}

/// Size of `path` in bytes.
pub fn file_size(path: &Path) -> Result<u64> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| ScaffoldError::fs("stat", path, e))
}
