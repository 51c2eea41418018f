//! Log setup
//!
//! The terminal backend owns the screen, so records go to a file in the
//! state directory. Without a writable file only `RUST_LOG` enables output,
//! which then lands on stderr.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};

use crate::save::state_dir;

const LOG_FILE: &str = "frostline.log";

pub fn default_log_path() -> Option<PathBuf> {
    state_dir().map(|dir| dir.join(LOG_FILE))
}

/// Open `path` for appending, creating missing parent directories
pub fn open_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global logger. Returns the file records are written to.
pub fn init(path: Option<&Path>) -> Option<PathBuf> {
    let file = path.and_then(|path| match open_log(path) {
        Ok(file) => Some((path.to_path_buf(), file)),
        Err(e) => {
            eprintln!("Unable to open log file {}: {}", path.display(), e);
            None
        }
    });
    let (mut builder, used) = match file {
        Some((path, file)) => {
            let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
            builder.target(Target::Pipe(Box::new(file)));
            (builder, Some(path))
        }
        None => (Builder::from_env(Env::default().default_filter_or("off")), None),
    };
    if builder.try_init().is_err() {
        return None;
    }
    used
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_open_log_creates_dirs_and_appends() {
        let dir = std::env::temp_dir().join(format!("frostline-log-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("nested").join(LOG_FILE);

        writeln!(open_log(&path).unwrap(), "first").unwrap();
        writeln!(open_log(&path).unwrap(), "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_default_log_path_in_state_dir() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("frostline/frostline.log"));
        }
    }
}
