//! Backend without a display
//!
//! Records draw calls for the current frame and feeds scripted key events.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use glam::Vec2;

use super::{Backend, PlatformError, TextureId};
use crate::consts::{LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::input::{Input, Key, KeyMap};
use crate::{Color, Rect};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Clip(Option<Rect>),
    Fill(Color, Option<Rect>),
    Texture {
        tex: TextureId,
        src: Option<Rect>,
        dst: Rect,
    },
    Line(Color, Vec2, Vec2),
    Text {
        text: String,
        size: f32,
        pos: Vec2,
        color: Color,
    },
}

/// A scripted key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
}

#[derive(Debug, Default)]
pub struct Headless {
    pub width: f32,
    pub height: f32,
    /// Draw calls since the last `present`
    pub calls: Vec<DrawCall>,
    /// Calls of the last presented frame
    pub last_frame: Vec<DrawCall>,
    pub frames: usize,
    /// Paths handed out as textures, indexed by `TextureId`
    pub textures: Vec<PathBuf>,
    /// Successful `load_texture` calls, reloads included
    pub loads: usize,
    /// Paths that fail to load
    pub missing: Vec<PathBuf>,
    /// Key events delivered one batch per poll; polling an empty script
    /// reports a close request
    pub script: VecDeque<Vec<KeyEvent>>,
}

impl Headless {
    pub fn new() -> Self {
        Self {
            width: LOGICAL_WIDTH,
            height: LOGICAL_HEIGHT,
            ..Default::default()
        }
    }

    pub fn texture_path(&self, tex: TextureId) -> Option<&Path> {
        self.textures.get(tex.0).map(PathBuf::as_path)
    }

    /// Text drawn in the last presented frame
    pub fn texts(&self) -> Vec<&str> {
        self.last_frame
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Backend for Headless {
    fn surface_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn load_texture(&mut self, path: &Path) -> Result<TextureId, PlatformError> {
        if self.missing.iter().any(|m| m == path) {
            return Err(PlatformError::MissingTexture(path.to_path_buf()));
        }
        self.loads += 1;
        if let Some(i) = self.textures.iter().position(|t| t == path) {
            return Ok(TextureId(i));
        }
        self.textures.push(path.to_path_buf());
        Ok(TextureId(self.textures.len() - 1))
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.calls.push(DrawCall::Clip(clip));
    }

    fn fill_rect(&mut self, color: Color, rect: Option<Rect>) {
        self.calls.push(DrawCall::Fill(color, rect));
    }

    fn draw_texture(&mut self, tex: TextureId, src: Option<Rect>, dst: Rect) {
        self.calls.push(DrawCall::Texture { tex, src, dst });
    }

    fn draw_line(&mut self, color: Color, from: Vec2, to: Vec2) {
        self.calls.push(DrawCall::Line(color, from, to));
    }

    fn measure_text(&self, text: &str, size: f32) -> (f32, f32) {
        (text.chars().count() as f32 * size * 0.5, size)
    }

    fn draw_text(&mut self, text: &str, size: f32, pos: Vec2, color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            size,
            pos,
            color,
        });
    }

    fn poll_input(&mut self, keymap: &KeyMap, input: &mut Input) -> Result<bool, PlatformError> {
        let Some(events) = self.script.pop_front() else {
            return Ok(false);
        };
        for event in events {
            match event {
                KeyEvent::Down(key) => {
                    if let Some((action, player)) = keymap.lookup(key) {
                        input.press(player, action);
                    }
                }
                KeyEvent::Up(key) => {
                    if let Some((action, player)) = keymap.lookup(key) {
                        input.release(player, action);
                    }
                }
            }
        }
        Ok(true)
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        self.last_frame = std::mem::take(&mut self.calls);
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Action, KeyState};

    #[test]
    fn test_script_feeds_keymap() {
        let mut backend = Headless::new();
        backend.script.push_back(vec![KeyEvent::Down(Key::Char('w'))]);
        backend.script.push_back(vec![KeyEvent::Up(Key::Char('w'))]);
        let keymap = KeyMap::default();
        let mut input = Input::default();

        assert!(backend.poll_input(&keymap, &mut input).unwrap());
        assert_eq!(input.get(1, Action::Up), KeyState::Pressed);
        input.advance();
        assert!(backend.poll_input(&keymap, &mut input).unwrap());
        assert_eq!(input.get(1, Action::Up), KeyState::Released);
        assert!(!backend.poll_input(&keymap, &mut input).unwrap());
    }

    #[test]
    fn test_missing_texture_fails() {
        let mut backend = Headless::new();
        backend.missing.push(PathBuf::from("data/end.png"));
        assert!(backend.load_texture(Path::new("data/end.png")).is_err());
        let tex = backend.load_texture(Path::new("data/tiles/snow.png")).unwrap();
        assert_eq!(backend.texture_path(tex), Some(Path::new("data/tiles/snow.png")));
    }

    #[test]
    fn test_reloaded_path_keeps_its_texture() {
        let mut backend = Headless::new();
        let snow = backend.load_texture(Path::new("data/tiles/snow.png")).unwrap();
        let end = backend.load_texture(Path::new("data/tiles/end.png")).unwrap();
        assert_ne!(snow, end);
        assert_eq!(backend.load_texture(Path::new("data/tiles/snow.png")).unwrap(), snow);
        assert_eq!(backend.textures.len(), 2);
        assert_eq!(backend.loads, 3);
    }
}
