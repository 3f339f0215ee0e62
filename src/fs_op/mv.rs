use std::fs;
use std::path::Path;

use crate::fs_op::error::{FsError, Result};

/// Rename (move) `old` to `new`, replacing `new` if it is an existing file.
///
/// This is a single host call with no copy fallback: moving across devices
/// fails. Atomicity is only what the host gives a same-filesystem rename.
pub fn rename<P: AsRef<Path>, Q: AsRef<Path>>(old: P, new: Q) -> Result<()> {
    let (src, dst) = (old.as_ref(), new.as_ref());
    fs::rename(src, dst).map_err(|e| FsError::between(src, dst, e))
}
