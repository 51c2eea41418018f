//! User configuration
//!
//! Read from `$XDG_CONFIG_HOME/frostline/config`:
//!
//! ```text
//! split_screen true
//! keys {
//!     up    w 2
//!     shoot e 2
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::NAME;
use crate::consts::MAX_PLAYERS;
use crate::input::{Action, Key, KeyBinding, KeyMap};
use crate::scfg::{self, Block, Directive};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub keymap: KeyMap,
    /// One camera per player instead of a shared camera
    pub split_screen: bool,
    /// Request a fullscreen surface (set from the command line)
    pub fullscreen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keymap: KeyMap::default(),
            split_screen: true,
            fullscreen: false,
        }
    }
}

impl Settings {
    /// Default config file location, if a home directory is known
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|d| d.join(NAME).join("config"))
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match scfg::load_file(path) {
            Ok(block) => {
                log::info!("Loaded config from {}", path.display());
                Self::from_block(&block, &path.display().to_string())
            }
            Err(scfg::ScfgError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{}: {}; using default config", path.display(), e);
                Self::default()
            }
        }
    }

    /// Build settings from a parsed config. Invalid entries are logged and
    /// skipped; with no valid key bindings the default key map is kept.
    pub fn from_block(block: &Block, source: &str) -> Self {
        let mut settings = Self::default();
        let mut bindings = Vec::new();

        for d in &block.directives {
            match d.name.as_str() {
                "keys" => {
                    if !d.params.is_empty() {
                        log::warn!(
                            "{}:{} expected 0 params for keys, got {}",
                            source,
                            d.line,
                            d.params.len()
                        );
                    }
                    for child in &d.children.directives {
                        match parse_binding(child) {
                            Ok(binding) => bindings.push(binding),
                            Err(msg) => log::warn!("{}:{} {}", source, child.line, msg),
                        }
                    }
                }
                "split_screen" => match d.params.first().map(String::as_str) {
                    Some("true" | "yes" | "1") => settings.split_screen = true,
                    Some("false" | "no" | "0") => settings.split_screen = false,
                    _ => log::warn!("{}:{} split_screen expects true or false", source, d.line),
                },
                other => log::warn!("{}:{} unknown directive {}", source, d.line, other),
            }
        }

        if !bindings.is_empty() {
            settings.keymap = KeyMap { bindings };
        }
        settings
    }
}

fn parse_binding(d: &Directive) -> Result<KeyBinding, String> {
    let action = Action::from_config_name(&d.name)
        .ok_or_else(|| format!("invalid action {}", d.name))?;
    let [key, player] = d.params.as_slice() else {
        return Err(format!("expected 2 params, got {}", d.params.len()));
    };
    let key: Key = key.parse().map_err(|e: crate::input::UnknownKey| e.to_string())?;
    let player = match player.parse::<usize>() {
        Ok(n) if (1..=MAX_PLAYERS).contains(&n) => n - 1,
        _ => return Err(format!("invalid player number {}", player)),
    };
    Ok(KeyBinding {
        key,
        action,
        player,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_from(text: &str) -> Settings {
        Settings::from_block(&scfg::parse(text).unwrap(), "config")
    }

    #[test]
    fn test_keys_block_replaces_defaults() {
        let settings = settings_from("keys {\n  up w 2\n  quit Escape 1\n}\n");
        assert_eq!(settings.keymap.bindings.len(), 2);
        assert_eq!(
            settings.keymap.lookup(Key::Char('w')),
            Some((Action::Up, 1))
        );
        assert_eq!(settings.keymap.lookup(Key::Escape), Some((Action::Quit, 0)));
        // Unbound letters no longer map
        assert_eq!(settings.keymap.lookup(Key::Char('h')), None);
    }

    #[test]
    fn test_invalid_bindings_are_skipped() {
        let settings = settings_from(
            "keys {\n  jump w 1\n  up Hyper 1\n  up w 0\n  up w 3\n  up w\n  left a 1\n}\n",
        );
        assert_eq!(
            settings.keymap.bindings,
            vec![KeyBinding {
                key: Key::Char('a'),
                action: Action::Left,
                player: 0,
            }]
        );
    }

    #[test]
    fn test_all_invalid_keeps_default_keymap() {
        let settings = settings_from("keys {\n  select Return 1\n}\n");
        assert_eq!(settings.keymap, KeyMap::default());
    }

    #[test]
    fn test_split_screen_toggle() {
        assert!(!settings_from("split_screen false\n").split_screen);
        assert!(settings_from("split_screen maybe\n").split_screen);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("frostline-no-such-config");
        assert_eq!(Settings::load(&path), Settings::default());
    }
}
