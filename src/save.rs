//! Level progress persistence
//!
//! The save file holds exactly one native-endian `i32`: the number of levels
//! cleared. It lives in `$XDG_STATE_HOME/frostline/save`, falling back to
//! `~/.local/state/frostline/save`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::NAME;

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("save file {path} is {len} bytes, expected {expected}")]
    Short {
        path: String,
        len: usize,
        expected: usize,
    },
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Persistent progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveData {
    pub level: i32,
}

/// Per-user state directory, `$XDG_STATE_HOME/frostline` or
/// `~/.local/state/frostline`
pub fn state_dir() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_STATE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs_next::home_dir().map(|h| h.join(".local").join("state")))?;
    Some(base.join(NAME))
}

impl SaveData {
    /// Default save file location
    pub fn default_path() -> Option<PathBuf> {
        state_dir().map(|dir| dir.join("save"))
    }

    /// Read the save file. A missing file is not an error.
    pub fn read(path: &Path) -> Result<Self, SaveError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SaveError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        let expected = std::mem::size_of::<i32>();
        let Some(raw) = bytes.get(..expected) else {
            return Err(SaveError::Short {
                path: path.display().to_string(),
                len: bytes.len(),
                expected,
            });
        };
        let mut buf = [0u8; 4];
        buf.copy_from_slice(raw);
        Ok(Self {
            level: i32::from_ne_bytes(buf),
        })
    }

    /// Read, logging failures and falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(data) => {
                log::info!("Loaded save data: level {}", data.level);
                data
            }
            Err(e) => {
                log::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Write the save file, creating its directory
    pub fn write(&self, path: &Path) -> Result<(), SaveError> {
        let io_err = |source| SaveError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        std::fs::write(path, self.level.to_ne_bytes()).map_err(io_err)?;
        log::info!("Saved progress: level {}", self.level);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("frostline-save-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_save_is_default() {
        let path = scratch("missing").join("save");
        assert_eq!(SaveData::read(&path).unwrap(), SaveData::default());
    }

    #[test]
    fn test_write_creates_directories() {
        let path = scratch("write").join("nested").join("save");
        SaveData { level: 7 }.write(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), 7i32.to_ne_bytes());
        assert_eq!(SaveData::read(&path).unwrap().level, 7);
    }

    #[test]
    fn test_short_file_falls_back() {
        let dir = scratch("short");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("save");
        std::fs::write(&path, [1u8, 2]).unwrap();
        assert!(matches!(
            SaveData::read(&path),
            Err(SaveError::Short { len: 2, .. })
        ));
        assert_eq!(SaveData::load(&path), SaveData::default());
    }
}
