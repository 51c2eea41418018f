//! Game state and core simulation types
//!
//! All mutable game state lives in [`Game`], which is owned by the frontend
//! and passed by reference into update and draw.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::level::Level;
use crate::{Color, Rect};

/// Top-level mode of the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Menu,
    LevelSelect,
    Play,
    Pause,
    Dead,
    Won,
}

/// Direction the player last moved in; selects the animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Idle,
    Right,
    Left,
}

impl Facing {
    /// Sprite frame index
    pub fn frame(&self) -> usize {
        match self {
            Facing::Idle => 0,
            Facing::Right => 1,
            Facing::Left => 2,
        }
    }
}

/// Boomerang-style projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub active: bool,
    /// Homing back toward the owner
    pub returning: bool,
    pub pos: Vec2,
    pub initial_x: f32,
    pub vel: Vec2,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            active: false,
            returning: false,
            pos: Vec2::new(-1.0, -1.0),
            initial_x: 0.0,
            vel: Vec2::ZERO,
        }
    }
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PROJ_SIZE, PROJ_SIZE)
    }
}

/// Decorative follower that lags behind the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
}

impl Default for Trail {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: Color::rgb(0x11, 0x0F, 0xF0),
        }
    }
}

/// Per-player kinematic state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// `vel.y` is the vertical displacement per tick; `vel.x` is damped into
    /// the horizontal displacement each tick
    pub vel: Vec2,
    pub w: f32,
    pub h: f32,
    pub in_air: bool,
    /// Holding jump keeps boosting while this is set
    pub jump_higher: bool,
    pub facing: Facing,
    pub proj: Projectile,
    pub trail: Trail,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            w: PLAYER_SIZE,
            h: PLAYER_SIZE,
            in_air: false,
            jump_higher: false,
            facing: Facing::Idle,
            proj: Projectile::default(),
            trail: Trail::default(),
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.w / 2.0, self.h / 2.0)
    }

    /// Back to the level start
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A viewport on the output surface and the world offset it shows
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Screen {
    /// Screen-space rectangle
    pub view: Rect,
    /// World-space scroll offset
    pub cam: Vec2,
}

/// Home menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuItem {
    Start,
    ChoosePlayers,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::Start, MenuItem::ChoosePlayers, MenuItem::Exit];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Start => "Start",
            MenuItem::ChoosePlayers => "Choose players",
            MenuItem::Exit => "Exit",
        }
    }
}

/// Entries of the pause, death and victory overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayItem {
    Resume,
    NextLevel,
    Restart,
    Menu,
}

impl OverlayItem {
    pub fn label(&self) -> &'static str {
        match self {
            OverlayItem::Resume => "Resume",
            OverlayItem::NextLevel => "Next level",
            OverlayItem::Restart => "Restart",
            OverlayItem::Menu => "Menu",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub mode: GameMode,
    /// Highlighted menu entry
    pub menu_focus: usize,
    /// Active players, 1..=MAX_PLAYERS
    pub num_players: usize,
    pub split_screen: bool,
    pub levels: Vec<Level>,
    pub cur_level: usize,
    /// Levels cleared, persisted in the save file
    pub progress: i32,
    pub players: [Player; MAX_PLAYERS],
    pub screens: [Screen; MAX_PLAYERS],
    /// Output surface size
    pub width: f32,
    pub height: f32,
    /// Fade-out over the play scene while dead (0-255)
    pub death_alpha: u8,
    pub running: bool,
    /// Player sprites should be reloaded before the next draw
    pub reload_textures: bool,
    /// Unsimulated frame time, consumed in `SIM_DT` steps
    #[serde(skip)]
    pub accumulator: f32,
}

impl Game {
    /// Fresh game at the home menu. `levels` must not be empty.
    pub fn new(levels: Vec<Level>, progress: i32, split_screen: bool) -> Self {
        debug_assert!(!levels.is_empty());
        let mut game = Self {
            mode: GameMode::Menu,
            menu_focus: 0,
            num_players: 1,
            split_screen,
            levels,
            cur_level: 0,
            progress,
            players: Default::default(),
            screens: [Screen::default(); MAX_PLAYERS],
            width: LOGICAL_WIDTH,
            height: LOGICAL_HEIGHT,
            death_alpha: 0,
            running: true,
            reload_textures: false,
            accumulator: 0.0,
        };
        game.resize_screens(LOGICAL_WIDTH, LOGICAL_HEIGHT);
        game
    }

    pub fn level(&self) -> &Level {
        &self.levels[self.cur_level]
    }

    pub fn stage_length(&self) -> f32 {
        self.level().stage_length
    }

    /// World height; falling below it is death
    pub fn stage_height(&self) -> f32 {
        MAX_STAGE_HEIGHT
    }

    /// Whether each player gets a separate viewport
    pub fn uses_split_view(&self) -> bool {
        self.split_screen && self.num_players > 1
    }

    /// Number of viewports currently drawn
    pub fn num_screens(&self) -> usize {
        if self.uses_split_view() {
            self.num_players
        } else {
            1
        }
    }

    /// Lay out viewports for a `width` x `height` surface
    pub fn resize_screens(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        if self.uses_split_view() {
            let w = width / self.num_players as f32;
            for (i, screen) in self.screens.iter_mut().enumerate() {
                screen.view = Rect::new(w * i as f32, 0.0, w, height);
            }
        } else {
            for screen in &mut self.screens {
                screen.view = Rect::new(0.0, 0.0, width, height);
            }
        }
    }

    /// Put every player back at the start of the current level
    pub fn reset_players(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
        for screen in &mut self.screens {
            screen.cam = Vec2::ZERO;
        }
        self.accumulator = 0.0;
        let (w, h) = (self.width, self.height);
        self.resize_screens(w, h);
    }

    pub fn active_players(&self) -> &[Player] {
        &self.players[..self.num_players]
    }

    /// Entries of the current home menu or overlay
    pub fn menu_len(&self) -> usize {
        match self.mode {
            GameMode::Menu => MenuItem::ALL.len(),
            _ => self.overlay_items().len(),
        }
    }

    /// Overlay entries for the current mode; empty outside overlays
    pub fn overlay_items(&self) -> &'static [OverlayItem] {
        match self.mode {
            GameMode::Pause => &[OverlayItem::Resume, OverlayItem::Restart, OverlayItem::Menu],
            GameMode::Dead => &[OverlayItem::Restart, OverlayItem::Menu],
            GameMode::Won => &[OverlayItem::NextLevel, OverlayItem::Restart, OverlayItem::Menu],
            _ => &[],
        }
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;
    use crate::level::{Region, TileKind};

    /// One long platform at y = 96 and an end marker far to the right
    pub fn flat_level() -> Level {
        Level {
            stage_length: 100.0 * BLOCK_SIZE,
            regions: vec![Region {
                tile: TileKind::Snow,
                rect: Rect::new(0.0, 96.0, 100.0 * BLOCK_SIZE, BLOCK_SIZE),
            }],
            end: Vec2::new(90.0 * BLOCK_SIZE, 2.0 * BLOCK_SIZE),
        }
    }

    pub fn game_with(level: Level) -> Game {
        let mut game = Game::new(vec![level], 0, true);
        game.mode = GameMode::Play;
        game
    }
}
