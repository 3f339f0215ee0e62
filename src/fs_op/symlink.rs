//! Hard and symbolic link creation.
//!
//! Both helpers return the host error untouched apart from attaching the two
//! paths involved, so callers can decide whether to fall back to copying.

use std::fs;
use std::path::{Path, PathBuf};

use crate::fs_op::error::{FsError, Result};

/// Create `link` as a hard link to the existing file `original`.
pub fn link<P: AsRef<Path>, Q: AsRef<Path>>(original: P, link: Q) -> Result<()> {
    let (src, dst) = (original.as_ref(), link.as_ref());
    fs::hard_link(src, dst).map_err(|e| FsError::between(src, dst, e))
}

/// Create `link` as a symbolic link pointing at `original`.
///
/// `original` is stored as given; a relative target is interpreted relative
/// to the link's directory when followed. On Windows the link kind is picked
/// from the target: a directory link when `original` is an existing
/// directory, a file link otherwise (including dangling targets).
pub fn symlink<P: AsRef<Path>, Q: AsRef<Path>>(original: P, link: Q) -> Result<()> {
    let (src, dst) = (original.as_ref(), link.as_ref());

    #[cfg(unix)]
    let res = std::os::unix::fs::symlink(src, dst);

    #[cfg(windows)]
    let res = {
        use std::os::windows::fs::{symlink_dir, symlink_file};
        let target = dst.parent().map_or_else(|| src.to_path_buf(), |p| p.join(src));
        if target.metadata().map(|m| m.is_dir()).unwrap_or(false) {
            symlink_dir(src, dst)
        } else {
            symlink_file(src, dst)
        }
    };

    res.map_err(|e| FsError::between(src, dst, e))
}

/// Read the target stored in the symbolic link at `path`.
pub fn read_link<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let p = path.as_ref();
    fs::read_link(p).map_err(|e| FsError::at(p, e))
}
