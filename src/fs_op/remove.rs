use std::fs;
use std::io;
use std::path::Path;

use crate::fs_op::error::{FsError, Result};

/// Remove the file, symlink or empty directory at `path`.
///
/// A missing path is an error; a directory with children fails with
/// [`FsError::DirectoryNotEmpty`].
pub fn remove<P: AsRef<Path>>(path: P) -> Result<()> {
    let p = path.as_ref();
    let meta = fs::symlink_metadata(p).map_err(|e| FsError::at(p, e))?;
    let res = if meta.is_dir() {
        fs::remove_dir(p)
    } else {
        remove_non_dir(p)
    };
    res.map_err(|e| FsError::at(p, e))
}

#[cfg(windows)]
fn remove_non_dir(p: &Path) -> io::Result<()> {
    // Directory symlinks on Windows are removed with `remove_dir`.
    fs::remove_file(p).or_else(|e| fs::remove_dir(p).map_err(|_| e))
}

#[cfg(not(windows))]
fn remove_non_dir(p: &Path) -> io::Result<()> {
    fs::remove_file(p)
}

/// Remove `path` and everything below it.
///
/// A missing path is success. Symlinks are removed, never followed. The
/// first failure stops the removal and is returned; entries already removed
/// stay removed.
pub fn remove_all<P: AsRef<Path>>(path: P) -> Result<()> {
    let p = path.as_ref();
    let meta = match fs::symlink_metadata(p) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(FsError::at(p, e)),
    };

    let res = if meta.is_dir() {
        fs::remove_dir_all(p)
    } else {
        remove_non_dir(p)
    };
    match res {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other.map_err(|e| FsError::at(p, e)),
    }
}
