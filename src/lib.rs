//! `fsx`: a thin convenience layer over the host filesystem.
//!
//! The crate root re-exports the full facade from [`fs_op::files`]:
//!
//! ```no_run
//! fsx::ensure_dir_default("out")?;
//! fsx::write_file_lines("out/list.txt", &["a", "b"], 0o644)?;
//! assert_eq!(fsx::read_file_lines("out/list.txt")?, vec!["a", "b"]);
//! fsx::copy("out", "backup", false)?;
//! # Ok::<(), fsx::FsError>(())
//! ```

pub mod fs_op;
pub mod settings;

pub use crate::fs_op::files::*;
pub use crate::settings::{settings, Settings, EOL};
