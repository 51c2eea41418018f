//! Abstract input: game actions, per-player key states and key bindings
//!
//! Backends translate their raw key codes into [`Key`] values, look them up
//! in a [`KeyMap`] and record the result in an [`Input`] table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PLAYERS;

/// Game actions, in dispatch order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Pause,
    Quit,
    Shoot,
    /// Not configurable
    Select,
}

pub const ACTION_COUNT: usize = 8;

impl Action {
    pub const ALL: [Action; ACTION_COUNT] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Pause,
        Action::Quit,
        Action::Shoot,
        Action::Select,
    ];

    /// Actions that may be bound in the config file
    pub const CONFIGURABLE: [Action; 7] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Pause,
        Action::Quit,
        Action::Shoot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Pause => "pause",
            Action::Quit => "quit",
            Action::Shoot => "shoot",
            Action::Select => "select",
        }
    }

    /// Parse a configurable action name
    pub fn from_config_name(s: &str) -> Option<Self> {
        Self::CONFIGURABLE.into_iter().find(|a| a.as_str() == s)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Per-frame state of one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyState {
    #[default]
    Unknown,
    /// Went down this frame
    Pressed,
    /// Still held
    PressedRepeat,
    /// Went up this frame
    Released,
}

/// Key-state table consumed by the simulation, one row per player slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Input {
    pub keys: [[KeyState; ACTION_COUNT]; MAX_PLAYERS],
}

impl Input {
    pub fn get(&self, player: usize, action: Action) -> KeyState {
        self.keys[player][action.index()]
    }

    pub fn set(&mut self, player: usize, action: Action, state: KeyState) {
        self.keys[player][action.index()] = state;
    }

    /// Record a key going down. Auto-repeat of a held key keeps it held.
    pub fn press(&mut self, player: usize, action: Action) {
        let slot = &mut self.keys[player][action.index()];
        if !matches!(slot, KeyState::PressedRepeat) {
            *slot = KeyState::Pressed;
        }
    }

    pub fn release(&mut self, player: usize, action: Action) {
        self.keys[player][action.index()] = KeyState::Released;
    }

    /// Age edge states after a frame has consumed them
    pub fn advance(&mut self) {
        for slot in self.keys.iter_mut().flatten() {
            *slot = match *slot {
                KeyState::Pressed => KeyState::PressedRepeat,
                KeyState::Released => KeyState::Unknown,
                other => other,
            };
        }
    }
}

/// Backend-neutral physical key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Escape,
    Return,
    Space,
    Tab,
    Backspace,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name '{0}'")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_alphanumeric() {
                return Ok(Key::Char(c.to_ascii_lowercase()));
            }
        }
        match s.to_lowercase().as_str() {
            "up" => Ok(Key::Up),
            "down" => Ok(Key::Down),
            "left" => Ok(Key::Left),
            "right" => Ok(Key::Right),
            "escape" | "esc" => Ok(Key::Escape),
            "return" | "enter" => Ok(Key::Return),
            "space" => Ok(Key::Space),
            "tab" => Ok(Key::Tab),
            "backspace" => Ok(Key::Backspace),
            _ => Err(UnknownKey(s.to_string())),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::Escape => f.write_str("Escape"),
            Key::Return => f.write_str("Return"),
            Key::Space => f.write_str("space"),
            Key::Tab => f.write_str("Tab"),
            Key::Backspace => f.write_str("BackSpace"),
        }
    }
}

/// One configured binding; `player` is a 0-based slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: Key,
    pub action: Action,
    pub player: usize,
}

/// Ordered key bindings with built-in fallbacks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMap {
    pub bindings: Vec<KeyBinding>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let bind = |c: char, action, player| KeyBinding {
            key: Key::Char(c),
            action,
            player,
        };
        Self {
            bindings: vec![
                bind('q', Action::Quit, 0),
                KeyBinding {
                    key: Key::Escape,
                    action: Action::Pause,
                    player: 0,
                },
                // Player 1
                bind('h', Action::Left, 0),
                bind('j', Action::Down, 0),
                bind('k', Action::Up, 0),
                bind('l', Action::Right, 0),
                bind('u', Action::Shoot, 0),
                // Player 2
                bind('a', Action::Left, 1),
                bind('s', Action::Down, 1),
                bind('w', Action::Up, 1),
                bind('d', Action::Right, 1),
                bind('e', Action::Shoot, 1),
            ],
        }
    }
}

impl KeyMap {
    /// Resolve a key to `(action, player)`. The first matching binding wins;
    /// unbound arrows, `q`, `Escape`, `Return` and `space` act for player 0.
    pub fn lookup(&self, key: Key) -> Option<(Action, usize)> {
        if let Some(b) = self.bindings.iter().find(|b| b.key == key) {
            return Some((b.action, b.player));
        }
        let action = match key {
            Key::Up => Action::Up,
            Key::Down => Action::Down,
            Key::Left => Action::Left,
            Key::Right => Action::Right,
            Key::Char('q') => Action::Quit,
            Key::Escape => Action::Pause,
            Key::Return | Key::Space => Action::Select,
            _ => return None,
        };
        Some((action, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_state_lifecycle() {
        let mut input = Input::default();
        input.press(1, Action::Up);
        assert_eq!(input.get(1, Action::Up), KeyState::Pressed);

        input.advance();
        assert_eq!(input.get(1, Action::Up), KeyState::PressedRepeat);

        // Terminal auto-repeat must not look like a fresh press
        input.press(1, Action::Up);
        assert_eq!(input.get(1, Action::Up), KeyState::PressedRepeat);

        input.release(1, Action::Up);
        assert_eq!(input.get(1, Action::Up), KeyState::Released);
        input.advance();
        assert_eq!(input.get(1, Action::Up), KeyState::Unknown);
        assert_eq!(input.get(0, Action::Up), KeyState::Unknown);
    }

    #[test]
    fn test_key_names() {
        assert_eq!("w".parse::<Key>(), Ok(Key::Char('w')));
        assert_eq!("W".parse::<Key>(), Ok(Key::Char('w')));
        assert_eq!("Escape".parse::<Key>(), Ok(Key::Escape));
        assert_eq!("space".parse::<Key>(), Ok(Key::Space));
        assert!("Hyper_L".parse::<Key>().is_err());
        assert_eq!(Key::Return.to_string().parse::<Key>(), Ok(Key::Return));
    }

    #[test]
    fn test_default_bindings_and_fallbacks() {
        let map = KeyMap::default();
        assert_eq!(map.lookup(Key::Char('w')), Some((Action::Up, 1)));
        assert_eq!(map.lookup(Key::Char('u')), Some((Action::Shoot, 0)));
        assert_eq!(map.lookup(Key::Left), Some((Action::Left, 0)));
        assert_eq!(map.lookup(Key::Return), Some((Action::Select, 0)));
        assert_eq!(map.lookup(Key::Char('z')), None);
    }

    #[test]
    fn test_only_configurable_action_names_parse() {
        assert_eq!(Action::from_config_name("shoot"), Some(Action::Shoot));
        assert_eq!(Action::from_config_name("select"), None);
    }
}
