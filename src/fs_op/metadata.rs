//! Permission and ownership changes.
//!
//! Both functions are single pass-through calls. Mode bits are handed to
//! the host unmodified; ownership changes exist only on Unix.

use std::fs;
use std::path::Path;

use crate::fs_op::error::{FsError, Result};
use crate::fs_op::Mode;

/// Set the mode of `path` (following symlinks).
///
/// On Unix the permission bits plus setuid, setgid and sticky are applied.
/// Elsewhere only the owner-write bit (`0o200`) is honoured: clearing it
/// marks the file read-only.
pub fn chmod<P: AsRef<Path>>(path: P, mode: Mode) -> Result<()> {
    let p = path.as_ref();

    #[cfg(unix)]
    let perms = {
        use std::os::unix::fs::PermissionsExt;
        fs::Permissions::from_mode(mode)
    };

    #[cfg(not(unix))]
    let perms = {
        let mut perms = fs::metadata(p).map_err(|e| FsError::at(p, e))?.permissions();
        perms.set_readonly(mode & 0o200 == 0);
        perms
    };

    fs::set_permissions(p, perms).map_err(|e| FsError::at(p, e))
}

/// Mode bits of `path` as reported by the host (following symlinks).
pub fn mode_of<P: AsRef<Path>>(path: P) -> Result<Mode> {
    let p = path.as_ref();
    let meta = fs::metadata(p).map_err(|e| FsError::at(p, e))?;
    Ok(mode_from(&meta))
}

/// Permission bits carried by `meta`. Off Unix only read-only is known.
pub(crate) fn mode_from(meta: &fs::Metadata) -> Mode {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o7777
    }

    #[cfg(not(unix))]
    {
        if meta.permissions().readonly() {
            0o444
        } else {
            0o666
        }
    }
}

/// Change the numeric owner and group of `path`, following symlinks.
/// `None` leaves that id unchanged.
///
/// Returns [`FsError::Unsupported`] on hosts without Unix ownership.
#[cfg(unix)]
pub fn chown<P: AsRef<Path>>(path: P, uid: Option<u32>, gid: Option<u32>) -> Result<()> {
    use nix::unistd::{chown as nix_chown, Gid, Uid};

    let p = path.as_ref();
    nix_chown(p, uid.map(Uid::from_raw), gid.map(Gid::from_raw))
        .map_err(|errno| FsError::at(p, std::io::Error::from(errno)))
}

#[cfg(not(unix))]
pub fn chown<P: AsRef<Path>>(_path: P, _uid: Option<u32>, _gid: Option<u32>) -> Result<()> {
    Err(FsError::Unsupported { op: "chown" })
}
