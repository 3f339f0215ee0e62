use std::fs::{DirBuilder, File, OpenOptions};
use std::io;
use std::ops::{BitOr, BitOrAssign};
use std::path::{Path, PathBuf};

use crate::fs_op::error::{FsError, Result};
use crate::fs_op::helpers::with_create_mode;
use crate::fs_op::metadata::chmod;
use crate::fs_op::stat::exists;
use crate::fs_op::Mode;
use crate::settings::settings;

/// Mode given to files created by [`create`], before umask.
const CREATE_MODE: Mode = 0o666;

/// Bitmask of open flags accepted by [`open_file`].
///
/// Without `READ`, `WRITE` or `APPEND` the file is opened read-only.
/// `CREATE` and `TRUNC` are honoured even then; off Unix they imply `WRITE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenFlags(u32);

impl OpenFlags {
    pub const READ: Self = Self(1);
    pub const WRITE: Self = Self(1 << 1);
    pub const APPEND: Self = Self(1 << 2);
    pub const CREATE: Self = Self(1 << 3);
    /// With `CREATE`: fail if the file already exists.
    pub const EXCL: Self = Self(1 << 4);
    pub const TRUNC: Self = Self(1 << 5);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    fn to_options(self, perm: Mode) -> OpenOptions {
        let writes = self.contains(Self::WRITE) || self.contains(Self::APPEND);
        let mut options = OpenOptions::new();
        options
            .read(self.contains(Self::READ) || !writes)
            .write(self.contains(Self::WRITE))
            .append(self.contains(Self::APPEND));
        if writes {
            options.truncate(self.contains(Self::TRUNC));
            if self.contains(Self::CREATE) && self.contains(Self::EXCL) {
                options.create_new(true);
            } else {
                options.create(self.contains(Self::CREATE));
            }
        } else {
            self.read_only_creation(&mut options);
        }
        with_create_mode(&mut options, perm);
        options
    }

    // std refuses to create or truncate without write access, so these
    // flags go to the host as raw open flags.
    #[cfg(unix)]
    fn read_only_creation(self, options: &mut OpenOptions) {
        use std::os::unix::fs::OpenOptionsExt;
        let mut raw = 0;
        if self.contains(Self::CREATE) {
            raw |= libc::O_CREAT;
            if self.contains(Self::EXCL) {
                raw |= libc::O_EXCL;
            }
        }
        if self.contains(Self::TRUNC) {
            raw |= libc::O_TRUNC;
        }
        options.custom_flags(raw);
    }

    // Without raw flags, creating or truncating needs write access.
    #[cfg(not(unix))]
    fn read_only_creation(self, options: &mut OpenOptions) {
        let creates = self.contains(Self::CREATE);
        let truncates = self.contains(Self::TRUNC);
        if !(creates || truncates) {
            return;
        }
        options.write(true).truncate(truncates);
        if creates && self.contains(Self::EXCL) {
            options.create_new(true);
        } else {
            options.create(creates);
        }
    }
}

impl BitOr for OpenFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for OpenFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Create or truncate `path` and open it for reading and writing.
pub fn create<P: AsRef<Path>>(path: P) -> Result<File> {
    open_file(
        path,
        OpenFlags::READ | OpenFlags::WRITE | OpenFlags::CREATE | OpenFlags::TRUNC,
        CREATE_MODE,
    )
}

/// Open `path` read-only.
pub fn open<P: AsRef<Path>>(path: P) -> Result<File> {
    let p = path.as_ref();
    File::open(p).map_err(|e| FsError::at(p, e))
}

/// Generalised open. `perm` applies only if the call creates the file.
pub fn open_file<P: AsRef<Path>>(path: P, flags: OpenFlags, perm: Mode) -> Result<File> {
    let p = path.as_ref();
    flags.to_options(perm).open(p).map_err(|e| FsError::at(p, e))
}

/// Create a new uniquely named file in `dir` and open it for reading and
/// writing. An empty `dir` means the system temp directory.
///
/// The last `*` in `pattern` marks where the random part goes; without one
/// the random part is appended. The file is not removed automatically.
pub fn create_temp<P: AsRef<Path>>(dir: P, pattern: &str) -> Result<(File, PathBuf)> {
    let dir = dir.as_ref();
    let dir = if dir.as_os_str().is_empty() {
        std::env::temp_dir()
    } else {
        dir.to_path_buf()
    };

    let (prefix, suffix) = match pattern.rfind('*') {
        Some(i) => (&pattern[..i], &pattern[i + 1..]),
        None => (pattern, ""),
    };
    if pattern.chars().any(std::path::is_separator) {
        return Err(FsError::at(
            &dir,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("pattern `{pattern}` contains a path separator"),
            ),
        ));
    }

    let tmp = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempfile_in(&dir)
        .map_err(|e| FsError::at(&dir, e))?;
    tmp.keep().map_err(|e| FsError::at(&dir, e.error))
}

/// Create a single directory; its parent must already exist.
pub fn mkdir<P: AsRef<Path>>(dir: P, perm: Mode) -> Result<()> {
    build_dir(dir.as_ref(), perm, false)
}

pub fn mkdir_default<P: AsRef<Path>>(dir: P) -> Result<()> {
    mkdir(dir, settings().dir_mode)
}

/// Create `dir` and any missing parents. Succeeds if `dir` is already a
/// directory.
pub fn mkdir_all<P: AsRef<Path>>(dir: P, perm: Mode) -> Result<()> {
    build_dir(dir.as_ref(), perm, true)
}

pub fn mkdir_all_default<P: AsRef<Path>>(dir: P) -> Result<()> {
    mkdir_all(dir, settings().dir_mode)
}

fn build_dir(dir: &Path, perm: Mode, recursive: bool) -> Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(recursive);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(perm);
    }
    #[cfg(not(unix))]
    let _ = perm;
    builder.create(dir).map_err(|e| FsError::at(dir, e))
}

/// Create `dir` (and parents) with `perm` unless something already exists
/// at that path. An existing file is not an error.
pub fn ensure_dir<P: AsRef<Path>>(dir: P, perm: Mode) -> Result<()> {
    let dir = dir.as_ref();
    if exists(dir) {
        tracing::debug!("ensure_dir: {} already present", dir.display());
        return Ok(());
    }
    tracing::debug!("ensure_dir: creating {} ({:o})", dir.display(), perm);
    mkdir_all(dir, perm)
}

pub fn ensure_dir_default<P: AsRef<Path>>(dir: P) -> Result<()> {
    ensure_dir(dir, settings().dir_mode)
}

/// Create an empty file at `path` unless something already exists there,
/// then apply `perm` with a separate chmod.
pub fn ensure_file<P: AsRef<Path>>(path: P, perm: Mode) -> Result<()> {
    let p = path.as_ref();
    if exists(p) {
        tracing::debug!("ensure_file: {} already present", p.display());
        return Ok(());
    }
    tracing::debug!("ensure_file: creating {} ({:o})", p.display(), perm);
    drop(File::create(p).map_err(|e| FsError::at(p, e))?);
    chmod(p, perm)
}

pub fn ensure_file_default<P: AsRef<Path>>(path: P) -> Result<()> {
    ensure_file(path, settings().file_mode)
}
