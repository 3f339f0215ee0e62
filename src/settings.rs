//! Process-wide defaults used by the `*_default` helpers and the line writers.
//!
//! The table is built once on first access and never mutated afterwards.
//! When `FSX_CONFIG` names a TOML file it is read at that point; keys that
//! are absent keep their built-in value.

use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::fs_op::error::{FsError, Result};
use crate::fs_op::Mode;

/// Environment variable naming an optional TOML file with overrides.
pub const CONFIG_ENV: &str = "FSX_CONFIG";

/// Host line ending.
#[cfg(windows)]
pub const EOL: &str = "\r\n";
#[cfg(not(windows))]
pub const EOL: &str = "\n";

pub const DEFAULT_DIR_MODE: Mode = 0o755;
pub const DEFAULT_FILE_MODE: Mode = 0o644;
pub const DEFAULT_COPY_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Mode for directories created by `ensure_dir_default` and `mkdir*_default`.
    pub dir_mode: Mode,
    /// Mode for files created by `ensure_file_default`.
    pub file_mode: Mode,
    /// Separator appended after every line by `write_file_lines`.
    pub line_ending: String,
    /// Buffer size used when streaming file contents during a copy.
    pub copy_buffer_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dir_mode: DEFAULT_DIR_MODE,
            file_mode: DEFAULT_FILE_MODE,
            line_ending: EOL.to_string(),
            copy_buffer_size: DEFAULT_COPY_BUFFER_SIZE,
        }
    }
}

impl Settings {
    /// Parse a settings table from TOML text.
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, toml::de::Error> {
        let mut settings: Settings = toml::from_str(s)?;
        if settings.copy_buffer_size == 0 {
            settings.copy_buffer_size = DEFAULT_COPY_BUFFER_SIZE;
        }
        Ok(settings)
    }

    /// Read and parse a TOML settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| FsError::at(path, e))?;
        Self::from_toml_str(&text).map_err(|e| {
            FsError::at(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })
    }

    fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(settings) => {
                tracing::debug!("loaded fs defaults from {}", Path::new(&path).display());
                settings
            }
            Err(e) => {
                tracing::warn!("ignoring {CONFIG_ENV}, using built-in defaults: {e}");
                Self::default()
            }
        }
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

/// The process-wide defaults table.
pub fn settings() -> &'static Settings {
    &SETTINGS
}
