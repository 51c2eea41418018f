//! Platform abstraction layer
//!
//! The renderer and frame loop only talk to a [`Backend`]:
//! - Surface size and drawing primitives
//! - Texture loading
//! - Keyboard input, translated through a [`KeyMap`] into an [`Input`] table

use std::path::{Path, PathBuf};

use glam::Vec2;

use crate::input::{Input, KeyMap};
use crate::{Color, Rect};

pub mod headless;
pub mod terminal;

pub use headless::{DrawCall, Headless};
pub use terminal::TerminalBackend;

/// Handle to a texture owned by a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("terminal io: {0}")]
    Io(#[from] std::io::Error),
    #[error("{path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("{0}: no such texture")]
    MissingTexture(PathBuf),
}

/// Drawing surface and input source
///
/// Coordinates are surface pixels with the origin at the top left. Drawing
/// is restricted to the clip rectangle when one is set.
pub trait Backend {
    fn surface_size(&self) -> (f32, f32);

    fn load_texture(&mut self, path: &Path) -> Result<TextureId, PlatformError>;

    /// Fill the whole surface, ignoring the clip rectangle
    fn clear(&mut self, color: Color);

    fn set_clip(&mut self, clip: Option<Rect>);

    /// Blend `color` over `rect`, or over the clip area when `rect` is None
    fn fill_rect(&mut self, color: Color, rect: Option<Rect>);

    /// Copy `src` (texture pixels, whole texture if None) stretched to `dst`
    fn draw_texture(&mut self, tex: TextureId, src: Option<Rect>, dst: Rect);

    fn draw_line(&mut self, color: Color, from: Vec2, to: Vec2);

    /// Width and height of `text` at `size`
    fn measure_text(&self, text: &str, size: f32) -> (f32, f32);

    /// Draw `text` with its top-left corner at `pos`
    fn draw_text(&mut self, text: &str, size: f32, pos: Vec2, color: Color);

    /// Drain pending events into `input`. Returns false once the user asked
    /// the backend to close.
    fn poll_input(&mut self, keymap: &KeyMap, input: &mut Input) -> Result<bool, PlatformError>;

    fn present(&mut self) -> Result<(), PlatformError>;
}
