//! Frame loop
//!
//! One frame: poll input, reload sprites if asked, fit the viewports to the
//! surface, update the simulation, draw, present, then age the key states.

use std::time::{Duration, Instant};

use crate::input::{Input, KeyMap};
use crate::platform::{Backend, PlatformError};
use crate::renderer::{self, Assets};
use crate::sim::{self, Game};

/// Target frame period (60 Hz)
pub const FRAME_TIME: Duration = Duration::from_micros(16_667);

pub struct App {
    pub game: Game,
    pub assets: Assets,
    pub input: Input,
    keymap: KeyMap,
}

impl App {
    pub fn new(game: Game, assets: Assets, keymap: KeyMap) -> Self {
        Self {
            game,
            assets,
            input: Input::default(),
            keymap,
        }
    }

    /// Run one frame of `dt` seconds. Returns false when the game should stop.
    pub fn frame(&mut self, backend: &mut dyn Backend, dt: f32) -> Result<bool, PlatformError> {
        if !backend.poll_input(&self.keymap, &mut self.input)? {
            log::info!("Backend requested shutdown");
            return Ok(false);
        }
        if self.game.reload_textures {
            self.assets.reload_players(backend);
            self.game.reload_textures = false;
        }

        let (w, h) = backend.surface_size();
        self.game.resize_screens(w, h);
        sim::update(&mut self.game, &self.input, dt);

        renderer::draw(&self.game, &self.assets, backend);
        backend.present()?;
        self.input.advance();
        Ok(self.game.running)
    }

    /// Run frames until the game exits, pacing to `FRAME_TIME`
    pub fn run(&mut self, backend: &mut dyn Backend) -> Result<(), PlatformError> {
        let mut last = Instant::now();
        loop {
            let start = Instant::now();
            let dt = start.duration_since(last).as_secs_f32();
            last = start;
            if !self.frame(backend, dt)? {
                return Ok(());
            }
            if let Some(rest) = FRAME_TIME.checked_sub(start.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }
}
