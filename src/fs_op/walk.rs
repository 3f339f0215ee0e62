//! Deterministic directory traversal driven by a caller-supplied visitor.

use std::path::Path;

use walkdir::WalkDir;

use crate::fs_op::error::{FsError, Result};

/// Entry descriptor handed to the visitor.
pub use walkdir::DirEntry;

/// What the visitor wants the walk to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    /// On a directory: do not descend into it. On anything else: skip the
    /// remaining entries of the directory containing it.
    SkipDir,
    /// End the walk successfully without visiting anything else.
    Stop,
}

/// Walk the tree rooted at `root`, calling `visit` for every entry
/// including `root` itself.
///
/// Entries of each directory are visited in lexical order of their file
/// names, so a full listing is read before descending. Symlinks are
/// reported as themselves and never followed, `root` included.
///
/// The visitor receives the entry's path, its descriptor (absent when the
/// entry could not be reached) and the error hit while reaching it. A
/// directory that cannot be listed is visited twice: once normally, then
/// again with the listing error. Returning `Err` aborts the walk with that
/// error; the visitor may instead swallow the error and continue.
pub fn walk_dir<P, F>(root: P, mut visit: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnMut(&Path, Option<&DirEntry>, Option<FsError>) -> Result<WalkControl>,
{
    let root = root.as_ref();
    let mut it = WalkDir::new(root)
        .follow_links(false)
        .follow_root_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(next) = it.next() {
        let control = match next {
            Ok(entry) => {
                tracing::trace!("walk: {}", entry.path().display());
                visit(entry.path(), Some(&entry), None)?
            }
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                tracing::trace!("walk: error at {}: {}", path.display(), err);
                visit(&path, None, Some(FsError::from_walk(err)))?
            }
        };
        match control {
            WalkControl::Continue => {}
            WalkControl::SkipDir => it.skip_current_dir(),
            WalkControl::Stop => return Ok(()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(unix)]
    use crate::fs_op::error::ErrorKind;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn tree() -> tempfile::TempDir {
        let td = tempdir().unwrap();
        let r = td.path();
        fs::create_dir_all(r.join("b/inner")).unwrap();
        fs::create_dir_all(r.join("a")).unwrap();
        fs::write(r.join("c.txt"), b"c").unwrap();
        fs::write(r.join("a/z.txt"), b"z").unwrap();
        fs::write(r.join("a/y.txt"), b"y").unwrap();
        fs::write(r.join("b/inner/deep.txt"), b"d").unwrap();
        td
    }

    fn rel(root: &Path, p: &Path) -> String {
        p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/")
    }

    #[test]
    fn visits_root_and_children_in_lexical_order() {
        let td = tree();
        let mut seen = Vec::new();
        walk_dir(td.path(), |p, entry, err| {
            assert!(err.is_none());
            assert!(entry.is_some());
            seen.push(rel(td.path(), p));
            Ok(WalkControl::Continue)
        })
        .unwrap();
        assert_eq!(
            seen,
            vec!["", "a", "a/y.txt", "a/z.txt", "b", "b/inner", "b/inner/deep.txt", "c.txt"]
        );
    }

    #[test]
    fn skip_dir_prunes_subtree() {
        let td = tree();
        let mut seen = Vec::new();
        walk_dir(td.path(), |p, entry, _| {
            seen.push(rel(td.path(), p));
            if entry.is_some_and(|e| e.file_name() == "b") {
                return Ok(WalkControl::SkipDir);
            }
            Ok(WalkControl::Continue)
        })
        .unwrap();
        assert_eq!(seen, vec!["", "a", "a/y.txt", "a/z.txt", "b", "c.txt"]);
    }

    #[test]
    fn skip_dir_on_file_skips_its_siblings() {
        let td = tree();
        let mut seen = Vec::new();
        walk_dir(td.path(), |p, _, _| {
            let r = rel(td.path(), p);
            let skip = r == "a/y.txt";
            seen.push(r);
            Ok(if skip { WalkControl::SkipDir } else { WalkControl::Continue })
        })
        .unwrap();
        assert_eq!(seen, vec!["", "a", "a/y.txt", "b", "b/inner", "b/inner/deep.txt", "c.txt"]);
    }

    #[test]
    fn stop_ends_walk_successfully() {
        let td = tree();
        let mut count = 0;
        walk_dir(td.path(), |_, _, _| {
            count += 1;
            Ok(if count == 3 { WalkControl::Stop } else { WalkControl::Continue })
        })
        .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn visitor_error_aborts_walk() {
        let td = tree();
        let mut visited = 0;
        let res = walk_dir(td.path(), |p, _, _| {
            visited += 1;
            if p.ends_with("a") {
                return Err(FsError::Walk {
                    path: p.to_path_buf(),
                    msg: "refused".into(),
                });
            }
            Ok(WalkControl::Continue)
        });
        assert!(matches!(res, Err(FsError::Walk { .. })));
        assert_eq!(visited, 2);
    }

    #[test]
    fn missing_root_is_reported_to_visitor() {
        let td = tempdir().unwrap();
        let root = td.path().join("missing");
        let mut errors: Vec<(PathBuf, bool)> = Vec::new();
        walk_dir(&root, |p, entry, err| {
            errors.push((p.to_path_buf(), entry.is_none()));
            match err {
                Some(e) if e.is_not_found() => Ok(WalkControl::Continue),
                Some(e) => Err(e),
                None => Ok(WalkControl::Continue),
            }
        })
        .unwrap();
        assert_eq!(errors, vec![(root, true)]);
    }

    #[test]
    fn propagating_the_error_fails_the_walk() {
        let td = tempdir().unwrap();
        let res = walk_dir(td.path().join("missing"), |_, _, err| match err {
            Some(e) => Err(e),
            None => Ok(WalkControl::Continue),
        });
        assert!(res.unwrap_err().is_not_found());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_visited_not_followed() {
        let td = tree();
        std::os::unix::fs::symlink(td.path().join("b"), td.path().join("d-link")).unwrap();
        let mut seen = Vec::new();
        walk_dir(td.path(), |p, entry, _| {
            if let Some(e) = entry {
                if e.path_is_symlink() {
                    assert!(e.file_type().is_symlink());
                }
            }
            seen.push(rel(td.path(), p));
            Ok(WalkControl::Continue)
        })
        .unwrap();
        assert!(seen.contains(&"d-link".to_string()));
        assert!(!seen.iter().any(|s| s.starts_with("d-link/")));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_root_is_reported_without_descending() {
        let td = tempdir().unwrap();
        let real = td.path().join("real");
        fs::create_dir(&real).unwrap();
        fs::write(real.join("inside.txt"), b"i").unwrap();
        let link = td.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let mut seen = Vec::new();
        walk_dir(&link, |p, entry, err| {
            assert!(err.is_none());
            seen.push((p.to_path_buf(), entry.is_some_and(|e| e.file_type().is_symlink())));
            Ok(WalkControl::Continue)
        })
        .unwrap();
        assert_eq!(seen, vec![(link, true)]);
    }

    #[cfg(unix)]
    fn locked_tree() -> Option<tempfile::TempDir> {
        use std::os::unix::fs::PermissionsExt;
        let td = tempdir().unwrap();
        fs::create_dir(td.path().join("locked")).unwrap();
        fs::write(td.path().join("locked/hidden.txt"), b"h").unwrap();
        fs::write(td.path().join("z.txt"), b"z").unwrap();
        fs::set_permissions(td.path().join("locked"), fs::Permissions::from_mode(0o000)).unwrap();

        // Root can list anything; there is no listing error to observe.
        if fs::read_dir(td.path().join("locked")).is_ok() {
            unlock(td.path());
            return None;
        }
        Some(td)
    }

    #[cfg(unix)]
    fn unlock(root: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_dir_is_visited_again_with_error() {
        let Some(td) = locked_tree() else { return };
        let mut seen = Vec::new();
        walk_dir(td.path(), |p, entry, err| {
            let kind = err.as_ref().map(FsError::kind);
            seen.push((rel(td.path(), p), entry.is_some(), kind));
            Ok(if err.is_some() { WalkControl::SkipDir } else { WalkControl::Continue })
        })
        .unwrap();
        unlock(td.path());

        assert_eq!(
            seen,
            vec![
                (String::new(), true, None),
                ("locked".to_string(), true, None),
                ("locked".to_string(), false, Some(ErrorKind::PermissionDenied)),
                ("z.txt".to_string(), true, None),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn skipping_unreadable_dir_suppresses_its_error() {
        let Some(td) = locked_tree() else { return };
        let mut errors = 0;
        walk_dir(td.path(), |p, _, err| {
            if err.is_some() {
                errors += 1;
            }
            Ok(if p.ends_with("locked") { WalkControl::SkipDir } else { WalkControl::Continue })
        })
        .unwrap();
        unlock(td.path());
        assert_eq!(errors, 0);
    }

    #[cfg(unix)]
    #[test]
    fn returning_listing_error_aborts_walk() {
        let Some(td) = locked_tree() else { return };
        let mut seen = Vec::new();
        let res = walk_dir(td.path(), |p, _, err| {
            seen.push(rel(td.path(), p));
            match err {
                Some(e) => Err(e),
                None => Ok(WalkControl::Continue),
            }
        });
        unlock(td.path());
        assert!(matches!(res, Err(FsError::PermissionDenied { .. })));
        assert!(!seen.contains(&"z.txt".to_string()));
    }
}
