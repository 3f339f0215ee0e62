use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used by every operation in `fs_op`.
pub type Result<T> = std::result::Result<T, FsError>;

/// Errors produced by the filesystem facade.
///
/// Single-path failures are classified from the underlying
/// `io::ErrorKind` so callers can match on the variant; the original
/// `io::Error` is always kept as the source.
#[derive(Error, Debug)]
pub enum FsError {
    #[error("`{}` not found", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("permission denied for `{}`", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{}` already exists", path.display())]
    AlreadyExists {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("directory `{}` is not empty", path.display())]
    DirectoryNotEmpty {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other I/O failure on a single path.
    #[error("I/O error on `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failure of an operation involving a source and a destination.
    #[error("operation failed from `{}` to `{}`: {source}", src.display(), dst.display())]
    Link {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{op} is not supported on this platform")]
    Unsupported { op: &'static str },

    #[error("could not determine home directory")]
    HomeNotFound,

    #[error("could not resolve `{path}`: {source}")]
    Resolve {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Traversal failure that carries no I/O error (e.g. a symlink loop).
    #[error("walk failed at `{}`: {msg}", path.display())]
    Walk { path: PathBuf, msg: String },
}

/// Flat classification of [`FsError`] independent of which operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    AlreadyExists,
    DirectoryNotEmpty,
    Unsupported,
    Resolution,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::NotFound => "not found",
            ErrorKind::PermissionDenied => "permission denied",
            ErrorKind::AlreadyExists => "already exists",
            ErrorKind::DirectoryNotEmpty => "directory not empty",
            ErrorKind::Unsupported => "unsupported",
            ErrorKind::Resolution => "resolution failed",
            ErrorKind::Io => "I/O failure",
        };
        f.write_str(s)
    }
}

impl FsError {
    /// Wrap an `io::Error` raised while acting on `path`.
    pub fn at(path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        match classify(&source) {
            ErrorKind::NotFound => FsError::NotFound { path, source },
            ErrorKind::PermissionDenied => FsError::PermissionDenied { path, source },
            ErrorKind::AlreadyExists => FsError::AlreadyExists { path, source },
            ErrorKind::DirectoryNotEmpty => FsError::DirectoryNotEmpty { path, source },
            _ => FsError::Io { path, source },
        }
    }

    /// Wrap an `io::Error` raised by an operation from `src` to `dst`.
    pub fn between(src: impl AsRef<Path>, dst: impl AsRef<Path>, source: io::Error) -> Self {
        FsError::Link {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            source,
        }
    }

    /// Convert a traversal error, keeping the path it was raised at.
    pub fn from_walk(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        let msg = err.to_string();
        match err.into_io_error() {
            Some(source) => FsError::at(path, source),
            None => FsError::Walk { path, msg },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FsError::NotFound { .. } => ErrorKind::NotFound,
            FsError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            FsError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            FsError::DirectoryNotEmpty { .. } => ErrorKind::DirectoryNotEmpty,
            FsError::Io { .. } | FsError::Walk { .. } => ErrorKind::Io,
            FsError::Link { source, .. } => classify(source),
            FsError::Unsupported { .. } => ErrorKind::Unsupported,
            FsError::HomeNotFound | FsError::Resolve { .. } => ErrorKind::Resolution,
        }
    }

    /// The underlying `io::Error`, when the failure came from the host.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            FsError::NotFound { source, .. }
            | FsError::PermissionDenied { source, .. }
            | FsError::AlreadyExists { source, .. }
            | FsError::DirectoryNotEmpty { source, .. }
            | FsError::Io { source, .. }
            | FsError::Link { source, .. }
            | FsError::Resolve { source, .. } => Some(source),
            FsError::Unsupported { .. } | FsError::HomeNotFound | FsError::Walk { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

fn classify(err: &io::Error) -> ErrorKind {
    match err.kind() {
        io::ErrorKind::NotFound => ErrorKind::NotFound,
        io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
        io::ErrorKind::AlreadyExists => ErrorKind::AlreadyExists,
        io::ErrorKind::DirectoryNotEmpty => ErrorKind::DirectoryNotEmpty,
        io::ErrorKind::Unsupported => ErrorKind::Unsupported,
        _ if is_enotempty(err) => ErrorKind::DirectoryNotEmpty,
        _ => ErrorKind::Io,
    }
}

#[cfg(unix)]
fn is_enotempty(err: &io::Error) -> bool {
    matches!(err.raw_os_error(), Some(code) if code == libc::ENOTEMPTY)
}

#[cfg(not(unix))]
fn is_enotempty(_err: &io::Error) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_io_error_kinds() {
        let e = FsError::at("/x", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(e, FsError::NotFound { .. }));
        assert!(e.is_not_found());

        let e = FsError::at("/x", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(e.kind(), ErrorKind::PermissionDenied);

        let e = FsError::at("/x", io::Error::other("boom"));
        assert!(matches!(e, FsError::Io { .. }));
        assert_eq!(e.kind(), ErrorKind::Io);
    }

    #[cfg(unix)]
    #[test]
    fn enotempty_maps_to_directory_not_empty() {
        let e = FsError::at("/d", io::Error::from_raw_os_error(libc::ENOTEMPTY));
        assert_eq!(e.kind(), ErrorKind::DirectoryNotEmpty);
    }

    #[test]
    fn two_path_errors_keep_both_paths_and_kind() {
        let e = FsError::between("a", "b", io::Error::from(io::ErrorKind::AlreadyExists));
        assert_eq!(e.kind(), ErrorKind::AlreadyExists);
        let msg = e.to_string();
        assert!(msg.contains("`a`") && msg.contains("`b`"), "{msg}");
    }

    #[test]
    fn unsupported_has_no_io_source() {
        let e = FsError::Unsupported { op: "chown" };
        assert_eq!(e.kind(), ErrorKind::Unsupported);
        assert!(e.io_error().is_none());
        assert_eq!(e.to_string(), "chown is not supported on this platform");
    }
}
