//! Stateless filesystem helpers.
//!
//! Every function acts on the live filesystem and keeps nothing between
//! calls, so two calls on the same path may observe different states.
//! Submodules are grouped by concern; `files` re-exports the whole surface.

pub mod copy;
pub mod create;
pub mod error;
pub mod files;
pub(crate) mod helpers;
pub mod io;
pub mod metadata;
pub mod mv;
pub mod path;
pub mod remove;
pub mod stat;
pub mod symlink;
pub mod walk;

/// Host permission bits, passed through unmodified.
pub type Mode = u32;

/// Point-in-time metadata snapshot returned by `stat` and `lstat`.
pub type FileInfo = std::fs::Metadata;
