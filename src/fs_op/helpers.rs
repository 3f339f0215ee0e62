use std::fs::OpenOptions;
use std::path::{Component, Path, PathBuf};

use crate::fs_op::Mode;

/// Apply `mode` as the creation mode of `options`.
///
/// The mode only takes effect when the open call creates the file; on
/// non-Unix hosts it is ignored.
pub(crate) fn with_create_mode(options: &mut OpenOptions, mode: Mode) -> &mut OpenOptions {
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode)
    }

    #[cfg(not(unix))]
    {
        let _ = mode;
        options
    }
}

/// Lexically normalise `path`: drop `.` components and fold `..` into
/// the preceding normal component. `..` directly under the root is
/// dropped; leading `..` on a relative path is kept.
///
/// No filesystem access is performed, so symlinks are not resolved.
pub(crate) fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(comp),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}
