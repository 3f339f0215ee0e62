//! Flat re-export of every filesystem helper.
//!
//! The implementations live in focused submodules (`create`, `copy`, `io`,
//! `stat`, ...). Importing from here gives the whole facade in one place;
//! the crate root re-exports this module.

/// Path resolution and working directory.
pub use crate::fs_op::path::{chdir, cwd, resolve};

/// Existence, classification and metadata queries.
pub use crate::fs_op::stat::{exists, is_dir, is_file, is_symlink, lstat, stat};

/// Creation, opening and ensure helpers.
pub use crate::fs_op::create::{
    create, create_temp, ensure_dir, ensure_dir_default, ensure_file, ensure_file_default, mkdir,
    mkdir_all, mkdir_all_default, mkdir_default, open, open_file, OpenFlags,
};

/// Copies.
pub use crate::fs_op::copy::{copy, copy_dir, copy_file};

/// Permissions and ownership.
pub use crate::fs_op::metadata::{chmod, chown, mode_of};

/// Links.
pub use crate::fs_op::symlink::{link, read_link, symlink};

/// Removal and rename.
pub use crate::fs_op::mv::rename;
pub use crate::fs_op::remove::{remove, remove_all};

/// Whole-file reads and writes.
pub use crate::fs_op::io::{
    read_file, read_file_lines, read_text_file, write_file, write_file_lines,
    write_file_lines_sep, write_text_file,
};

/// Traversal.
pub use crate::fs_op::walk::{walk_dir, DirEntry, WalkControl};

pub use crate::fs_op::error::{ErrorKind, FsError, Result};
pub use crate::fs_op::{FileInfo, Mode};
