//! Frostline - a side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Simulation (player physics, collisions, cameras, game state machine)
//! - `level`: Level store loaded from block-structured level files
//! - `input`: Abstract key-state table and key bindings
//! - `renderer`: Draws a `Game` through any `platform::Backend`
//! - `platform`: Backend capability interface (terminal, headless)
//! - `config` / `save`: User configuration and level progress
//! - `logging`: Log file setup
//! - `app`: Frame loop tying a backend to the simulation and renderer

pub mod app;
pub mod config;
pub mod input;
pub mod level;
pub mod logging;
pub mod platform;
pub mod renderer;
pub mod save;
pub mod scfg;
pub mod sim;

pub use config::Settings;
pub use save::SaveData;

use serde::{Deserialize, Serialize};

/// Game name used for window titles and per-user directories
pub const NAME: &str = "frostline";

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Maximum simultaneous players (split-screen slots)
    pub const MAX_PLAYERS: usize = 2;

    /// Vertical acceleration, applied as `dy += GRAVITY * dt`
    pub const GRAVITY: f32 = 98.0;
    pub const TERMINAL_VELOCITY: f32 = GRAVITY * 1.2;
    /// Upward boost per held jump frame
    pub const JUMP_ACCEL: f32 = 8.0;
    /// Jump boost stops once `dy` drops below this
    pub const MIN_PLAYER_DY: f32 = -JUMP_ACCEL * 2.0;
    pub const SPEED_ACCEL: f32 = 400.0;
    pub const SPEED_MAX: f32 = 800.0;
    pub const FRICTION: f32 = 0.91;

    /// Projectile speed (px/s) on each axis
    pub const PROJ_DX: f32 = 380.0;
    /// Distance from the firing point at which a projectile turns back
    pub const PROJ_RET: f32 = 500.0;
    pub const PROJ_SIZE: f32 = 12.0;
    /// Homing threshold per axis for returning projectiles
    pub const PROJ_EPS: f32 = 4.0;

    pub const TRAIL_NORMALIZER: f32 = 0.001;

    /// Animation frames per player: idle, facing right, facing left
    pub const FRAME_NUM: usize = 3;

    /// Level authoring unit in pixels
    pub const BLOCK_SIZE: f32 = 32.0;
    pub const PLAYER_SIZE: f32 = BLOCK_SIZE;

    pub const LOGICAL_WIDTH: f32 = 900.0;
    pub const LOGICAL_HEIGHT: f32 = 450.0;
    pub const MAX_STAGE_HEIGHT: f32 = LOGICAL_HEIGHT * 4.0;
    pub const MAX_STAGE_LENGTH: f32 = LOGICAL_WIDTH * 10.0;

    /// Camera ignores player drift smaller than this (world units)
    pub const CAMERA_DEAD_ZONE: f32 = 0.9;

    /// Upper bound on sequentially numbered level files
    pub const MAX_LEVEL_FILES: u32 = 400;
}

/// Axis-aligned rectangle in world or screen space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap test; touching edges do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        (self.x < other.x + other.w && self.x + self.w > other.x)
            && (self.y < other.y + other.h && self.y + self.h > other.y)
    }
}

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}
