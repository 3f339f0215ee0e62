//! Whole-file reads and writes.
//!
//! Reads buffer the entire file in memory. Writes create the file with the
//! given mode when absent, otherwise truncate it and keep its mode. A write
//! is several host calls, so a failure part way can leave a truncated file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::fs_op::error::{FsError, Result};
use crate::fs_op::helpers::with_create_mode;
use crate::fs_op::Mode;
use crate::settings::settings;

/// Read all bytes of `path`.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let p = path.as_ref();
    fs::read(p).map_err(|e| FsError::at(p, e))
}

/// Read `path` as UTF-8 text. Invalid UTF-8 is an I/O error.
pub fn read_text_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let p = path.as_ref();
    fs::read_to_string(p).map_err(|e| FsError::at(p, e))
}

/// Read `path` as lines with their terminators (`\n` or `\r\n`) stripped.
///
/// A trailing terminator does not produce an empty last line, and an empty
/// file yields no lines. A lone `\r` ending the file is dropped too.
pub fn read_file_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let text = read_text_file(path)?;
    let mut lines: Vec<String> = text.lines().map(str::to_owned).collect();
    if !text.ends_with('\n') {
        if let Some(last) = lines.last_mut() {
            if last.ends_with('\r') {
                last.pop();
            }
        }
    }
    Ok(lines)
}

/// Write `data` to `path`, creating it with `perm` or truncating it.
pub fn write_file<P: AsRef<Path>, D: AsRef<[u8]>>(path: P, data: D, perm: Mode) -> Result<()> {
    let p = path.as_ref();
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    with_create_mode(&mut options, perm);

    let mut file = options.open(p).map_err(|e| FsError::at(p, e))?;
    file.write_all(data.as_ref()).map_err(|e| FsError::at(p, e))
}

pub fn write_text_file<P: AsRef<Path>>(path: P, text: &str, perm: Mode) -> Result<()> {
    write_file(path, text.as_bytes(), perm)
}

/// Write `lines`, each followed by the configured line ending.
pub fn write_file_lines<P, S>(path: P, lines: &[S], perm: Mode) -> Result<()>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    write_file_lines_sep(path, lines, &settings().line_ending, perm)
}

/// Write `lines`, each followed by `sep` (including the last one), in a
/// single whole-file write.
pub fn write_file_lines_sep<P, S>(path: P, lines: &[S], sep: &str, perm: Mode) -> Result<()>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let len = lines.iter().map(|l| l.as_ref().len() + sep.len()).sum();
    let mut text = String::with_capacity(len);
    for line in lines {
        text.push_str(line.as_ref());
        text.push_str(sep);
    }
    write_text_file(path, &text, perm)
}
