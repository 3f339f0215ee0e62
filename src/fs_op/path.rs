use std::path::{Path, PathBuf};

use directories_next::BaseDirs;

use crate::fs_op::error::{FsError, Result};
use crate::fs_op::helpers::clean;

/// Resolve `relative` to an absolute, lexically normalised path.
///
/// Behaviour:
/// - Absolute input is returned unchanged and `base` is ignored.
/// - A missing or empty `base` means the current working directory.
/// - `~` on its own, or followed by `/` or `\`, is anchored at the user's
///   home directory and `base` is ignored. `~name` is not expanded.
/// - `.` on its own, or followed by `/` or `\`, is anchored at `base`.
/// - Anything else (including an empty string) is joined onto `base`.
pub fn resolve(relative: &str, base: Option<&Path>) -> Result<PathBuf> {
    let rel = Path::new(relative);
    if rel.is_absolute() {
        return Ok(rel.to_path_buf());
    }

    let joined = if let Some(rest) = strip_anchor(relative, '~') {
        home_dir()?.join(rest)
    } else {
        let base = match base {
            Some(b) if !b.as_os_str().is_empty() => b.to_path_buf(),
            _ => std::env::current_dir().map_err(|source| FsError::Resolve {
                path: relative.to_string(),
                source,
            })?,
        };
        match strip_anchor(relative, '.') {
            Some(rest) => base.join(rest),
            None => base.join(relative),
        }
    };

    let abs = std::path::absolute(&joined).map_err(|source| FsError::Resolve {
        path: relative.to_string(),
        source,
    })?;
    Ok(clean(&abs))
}

// Return the remainder after `anchor` when `s` is exactly the anchor or the
// anchor followed by a separator.
fn strip_anchor(s: &str, anchor: char) -> Option<&str> {
    let rest = s.strip_prefix(anchor)?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix(['/', '\\'])
}

fn home_dir() -> Result<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(FsError::HomeNotFound)
}

/// The process's current working directory.
pub fn cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| FsError::at(".", e))
}

/// Change the process's current working directory to `dir`.
pub fn chdir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    std::env::set_current_dir(dir).map_err(|e| FsError::at(dir, e))
}
