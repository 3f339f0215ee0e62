use std::fs;
use std::io;
use std::path::Path;

use crate::fs_op::error::{FsError, Result};
use crate::fs_op::FileInfo;

/// Return `true` unless a metadata query on `path` fails with "not found".
///
/// Any other failure (permission denied, not-a-directory in a parent,
/// ...) still counts as existing: something is there even if it cannot be
/// inspected.
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    match fs::metadata(path.as_ref()) {
        Ok(_) => true,
        Err(e) => e.kind() != io::ErrorKind::NotFound,
    }
}

/// Return `true` if `path` (following symlinks) is anything but a directory.
pub fn is_file<P: AsRef<Path>>(path: P) -> bool {
    fs::metadata(path.as_ref()).is_ok_and(|m| !m.is_dir())
}

/// Return `true` if `path` (following symlinks) is a directory.
pub fn is_dir<P: AsRef<Path>>(path: P) -> bool {
    fs::metadata(path.as_ref()).is_ok_and(|m| m.is_dir())
}

/// Return `true` when `path` itself is a symbolic link.
pub fn is_symlink<P: AsRef<Path>>(path: P) -> bool {
    fs::symlink_metadata(path.as_ref()).is_ok_and(|m| m.file_type().is_symlink())
}

/// Metadata for `path`, following symlinks.
pub fn stat<P: AsRef<Path>>(path: P) -> Result<FileInfo> {
    let p = path.as_ref();
    fs::metadata(p).map_err(|e| FsError::at(p, e))
}

/// Metadata for `path` itself; a symlink is described, not followed.
pub fn lstat<P: AsRef<Path>>(path: P) -> Result<FileInfo> {
    let p = path.as_ref();
    fs::symlink_metadata(p).map_err(|e| FsError::at(p, e))
}
