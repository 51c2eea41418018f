//! Backend-neutral rendering
//!
//! [`draw`] paints the current mode of a [`Game`] through a [`Backend`].
//! Textures are loaded once into [`Assets`]; anything that fails to load is
//! drawn as a solid placeholder.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::consts::{FRAME_NUM, MAX_PLAYERS};
use crate::level::TileKind;
use crate::platform::{Backend, TextureId};
use crate::sim::{Facing, Game, GameMode};
use crate::{Color, NAME};

mod menu;
mod scene;

pub const BACKGROUND: Color = Color::rgb(0x11, 0x41, 0x61);
pub const TEXT: Color = Color::WHITE;
pub const FOCUSED: Color = Color::rgb(20, 190, 180);
pub const UNFOCUSED: Color = Color::rgb(20, 150, 180);
/// Size of the centred status text
pub const STATUS_TEXT_SIZE: f32 = 40.0;

/// Textures used by the renderer
#[derive(Debug, Clone, Default)]
pub struct Assets {
    data_dir: PathBuf,
    user_dir: Option<PathBuf>,
    tiles: HashMap<TileKind, TextureId>,
    end: Option<TextureId>,
    players: [[Option<TextureId>; FRAME_NUM]; MAX_PLAYERS],
}

impl Assets {
    /// Per-user sprite directory checked before the game data
    pub fn default_user_dir() -> Option<PathBuf> {
        dirs_next::data_dir().map(|d| d.join(NAME))
    }

    /// Load tile textures and player sprites
    pub fn load(backend: &mut dyn Backend, data_dir: &Path, user_dir: Option<&Path>) -> Self {
        let mut assets = Self {
            data_dir: data_dir.to_path_buf(),
            user_dir: user_dir.map(Path::to_path_buf),
            ..Default::default()
        };

        let tile_dir = data_dir.join("tiles");
        for kind in TileKind::ALL {
            let path = tile_dir.join(format!("{}.png", kind.as_str()));
            if let Some(tex) = load_logged(backend, &path) {
                assets.tiles.insert(kind, tex);
            }
        }
        assets.end = load_logged(backend, &tile_dir.join("end.png"));
        assets.reload_players(backend);
        assets
    }

    /// Load `<dir>/<slot>/sprite-<frame>.png`, user directory first
    pub fn reload_players(&mut self, backend: &mut dyn Backend) {
        for (slot, frames) in self.players.iter_mut().enumerate() {
            for (frame, tex) in frames.iter_mut().enumerate() {
                let rel = Path::new(&slot.to_string()).join(format!("sprite-{}.png", frame));
                let user = self
                    .user_dir
                    .as_ref()
                    .and_then(|dir| backend.load_texture(&dir.join(&rel)).ok());
                *tex = user.or_else(|| load_logged(backend, &self.data_dir.join(&rel)));
            }
        }
    }

    pub fn tile(&self, kind: TileKind) -> Option<TextureId> {
        self.tiles.get(&kind).copied()
    }

    pub fn end(&self) -> Option<TextureId> {
        self.end
    }

    pub fn player_frame(&self, slot: usize, facing: Facing) -> Option<TextureId> {
        self.players.get(slot).and_then(|frames| frames[facing.frame()])
    }
}

fn load_logged(backend: &mut dyn Backend, path: &Path) -> Option<TextureId> {
    match backend.load_texture(path) {
        Ok(tex) => Some(tex),
        Err(e) => {
            log::warn!("Unable to load texture: {}", e);
            None
        }
    }
}

/// Draw one frame of `game`
pub fn draw(game: &Game, assets: &Assets, backend: &mut dyn Backend) {
    backend.set_clip(None);
    backend.clear(Color::BLACK);

    match game.mode {
        GameMode::Menu => menu::draw_home(game, backend),
        GameMode::LevelSelect => menu::draw_level_select(game, backend),
        GameMode::Play => scene::draw_scene(game, assets, backend),
        GameMode::Pause => {
            scene::draw_scene(game, assets, backend);
            menu::draw_pause_glyph(game, backend);
            menu::draw_overlay(game, backend);
        }
        GameMode::Dead => {
            if game.death_alpha < 255 {
                scene::draw_scene(game, assets, backend);
                backend.fill_rect(Color::rgba(0, 0, 0, game.death_alpha), None);
            }
            menu::draw_status(game, "You died", backend);
            menu::draw_overlay(game, backend);
        }
        GameMode::Won => {
            menu::draw_status(game, "You won", backend);
            menu::draw_overlay(game, backend);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{DrawCall, Headless};
    use crate::sim::state::test_util::*;
    use crate::Rect;
    use glam::Vec2;

    fn render(game: &Game) -> Headless {
        let mut backend = Headless::new();
        let assets = Assets::load(&mut backend, Path::new("data"), None);
        draw(game, &assets, &mut backend);
        backend
    }

    #[test]
    fn test_assets_prefer_user_sprites() {
        let mut backend = Headless::new();
        backend.missing.push(PathBuf::from("user/1/sprite-2.png"));
        let assets = Assets::load(&mut backend, Path::new("data"), Some(Path::new("user")));

        let tex = assets.player_frame(0, Facing::Idle).unwrap();
        assert_eq!(backend.texture_path(tex), Some(Path::new("user/0/sprite-0.png")));
        let tex = assets.player_frame(1, Facing::Left).unwrap();
        assert_eq!(backend.texture_path(tex), Some(Path::new("data/1/sprite-2.png")));

        let tex = assets.tile(TileKind::Snow).unwrap();
        assert_eq!(backend.texture_path(tex), Some(Path::new("data/tiles/snow.png")));
        let tex = assets.end().unwrap();
        assert_eq!(backend.texture_path(tex), Some(Path::new("data/tiles/end.png")));
    }

    #[test]
    fn test_missing_player_sprite_is_black_box() {
        let mut backend = Headless::new();
        backend.missing.push(PathBuf::from("data/0/sprite-0.png"));
        let assets = Assets::load(&mut backend, Path::new("data"), None);
        assert_eq!(assets.player_frame(0, Facing::Idle), None);

        let mut game = game_with(flat_level());
        game.players[0].pos = Vec2::new(100.0, 64.0);
        draw(&game, &assets, &mut backend);
        backend.present().unwrap();
        assert!(backend.last_frame.contains(&DrawCall::Fill(
            Color::BLACK,
            Some(Rect::new(100.0, 64.0, 32.0, 32.0))
        )));
    }

    #[test]
    fn test_play_draws_background_and_clips() {
        let game = game_with(flat_level());
        let mut backend = render(&game);
        backend.present().unwrap();
        let frame = &backend.last_frame;
        assert!(frame.contains(&DrawCall::Fill(BACKGROUND, None)));
        assert!(frame.contains(&DrawCall::Clip(Some(game.screens[0].view))));
        assert!(!frame.iter().any(|c| matches!(c, DrawCall::Line(..))));
    }

    #[test]
    fn test_split_screen_draws_divider() {
        let mut game = game_with(flat_level());
        game.num_players = 2;
        game.resize_screens(900.0, 450.0);
        let mut backend = render(&game);
        backend.present().unwrap();
        assert!(backend.last_frame.contains(&DrawCall::Line(
            Color::BLACK,
            Vec2::new(450.0, 0.0),
            Vec2::new(450.0, 450.0)
        )));
        assert!(backend.last_frame.contains(&DrawCall::Clip(Some(game.screens[1].view))));
    }

    #[test]
    fn test_status_screens() {
        let mut game = game_with(flat_level());
        game.mode = GameMode::Dead;
        game.death_alpha = 10;
        let mut backend = render(&game);
        backend.present().unwrap();
        assert!(backend.texts().contains(&"You died"));
        assert!(backend.last_frame.contains(&DrawCall::Fill(Color::rgba(0, 0, 0, 10), None)));

        game.death_alpha = 255;
        let mut backend = render(&game);
        backend.present().unwrap();
        assert!(!backend.last_frame.contains(&DrawCall::Fill(BACKGROUND, None)));

        game.mode = GameMode::Won;
        let mut backend = render(&game);
        backend.present().unwrap();
        assert!(backend.texts().contains(&"You won"));
        assert!(backend.texts().contains(&"Next level"));
    }
}
