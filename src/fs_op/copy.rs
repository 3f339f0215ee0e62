//! File and directory copies that carry the source's permission bits.
//!
//! Symlinks in a copied tree are followed: a link is copied as the content
//! of its target and a link to a directory is descended like a directory.
//! Nothing is rolled back on failure; entries copied before the error stay.

use std::fs::{self, File, Metadata};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use walkdir::WalkDir;

use crate::fs_op::create::ensure_dir;
use crate::fs_op::error::{FsError, Result};
use crate::fs_op::metadata::mode_from;
use crate::fs_op::stat::{exists, stat};
use crate::settings::settings;

/// Copy `src` to `dst`, recursing when `src` (after following symlinks) is
/// a directory.
pub fn copy<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q, overwrite: bool) -> Result<()> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    if stat(src)?.is_dir() {
        copy_dir(src, dst, overwrite)
    } else {
        copy_file(src, dst, overwrite)
    }
}

/// Copy the contents of file `src` to `dst` and give `dst` the mode of `src`.
///
/// When `dst` exists and `overwrite` is false nothing is touched and the
/// call succeeds. Copying a file onto itself (including through a hard or
/// symbolic link) is refused, since it would truncate the source.
pub fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q, overwrite: bool) -> Result<()> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    let info = stat(src)?;
    copy_contents(src, dst, &info, overwrite)
}

/// Recursively copy directory `src` into `dst`, preserving relative paths,
/// empty directories and permission bits. Entries are processed in lexical
/// order and the first failure aborts the copy.
pub fn copy_dir<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q, overwrite: bool) -> Result<()> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    tracing::debug!("copy_dir: {} -> {}", src.display(), dst.display());

    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(FsError::from_walk)?;
        let rel = entry.path().strip_prefix(src).map_err(|e| FsError::Walk {
            path: entry.path().to_path_buf(),
            msg: e.to_string(),
        })?;
        let target = if rel.as_os_str().is_empty() {
            dst.to_path_buf()
        } else {
            dst.join(rel)
        };

        let info = entry.metadata().map_err(FsError::from_walk)?;
        if info.is_dir() {
            ensure_dir(&target, mode_from(&info))?;
        } else {
            copy_contents(entry.path(), &target, &info, overwrite)?;
        }
    }
    Ok(())
}

// Both handles are closed before the mode is applied, on every path.
fn copy_contents(src: &Path, dst: &Path, info: &Metadata, overwrite: bool) -> Result<()> {
    if !overwrite && exists(dst) {
        tracing::debug!("copy: {} exists, not overwriting", dst.display());
        return Ok(());
    }
    if same_file(src, info, dst) {
        return Err(FsError::between(
            src,
            dst,
            io::Error::new(io::ErrorKind::InvalidInput, "source and destination are the same file"),
        ));
    }

    {
        let mut reader = File::open(src).map_err(|e| FsError::at(src, e))?;
        let file = File::create(dst).map_err(|e| FsError::at(dst, e))?;
        let mut writer = BufWriter::with_capacity(settings().copy_buffer_size, file);
        let n = io::copy(&mut reader, &mut writer)
            .and_then(|n| writer.flush().map(|()| n))
            .map_err(|e| FsError::between(src, dst, e))?;
        tracing::debug!("copy: {} -> {} ({n} bytes)", src.display(), dst.display());
    }

    fs::set_permissions(dst, info.permissions()).map_err(|e| FsError::at(dst, e))
}

#[cfg(unix)]
fn same_file(_src: &Path, info: &Metadata, dst: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    fs::metadata(dst).is_ok_and(|d| d.dev() == info.dev() && d.ino() == info.ino())
}

// Hard links are not detected here.
#[cfg(not(unix))]
fn same_file(src: &Path, _info: &Metadata, dst: &Path) -> bool {
    match (fs::canonicalize(src), fs::canonicalize(dst)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
