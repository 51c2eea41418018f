//! Play scene: tiles, end marker and players for each viewport

use glam::Vec2;

use super::{Assets, BACKGROUND};
use crate::consts::BLOCK_SIZE;
use crate::level::{Region, TileKind};
use crate::platform::Backend;
use crate::sim::{Game, Player, Screen};
use crate::{Color, Rect};

const PROJECTILE: Color = Color::rgb(0xC8, 0xD6, 0xFF);
const END_FALLBACK: Color = Color::rgb(0xF0, 0xC0, 0x30);

fn tile_fallback(kind: TileKind) -> Color {
    match kind {
        TileKind::Snow => Color::rgb(0xE8, 0xF0, 0xF8),
    }
}

/// World-to-surface offset of a viewport
fn offset(screen: &Screen) -> Vec2 {
    Vec2::new(screen.view.x - screen.cam.x, screen.view.y - screen.cam.y)
}

fn translate(rect: Rect, by: Vec2) -> Rect {
    Rect::new(rect.x + by.x, rect.y + by.y, rect.w, rect.h)
}

pub fn draw_scene(game: &Game, assets: &Assets, backend: &mut dyn Backend) {
    backend.fill_rect(BACKGROUND, None);

    let screens = &game.screens[..game.num_screens()];
    for (i, screen) in screens.iter().enumerate() {
        backend.set_clip(Some(screen.view));
        let off = offset(screen);

        for region in &game.level().regions {
            draw_region(region, off, screen.view, assets, backend);
        }
        if let Some(end) = game.level().end_rect() {
            let dst = translate(end, off);
            match assets.end() {
                Some(tex) => backend.draw_texture(tex, None, dst),
                None => backend.fill_rect(END_FALLBACK, Some(dst)),
            }
        }

        // The viewport's own player is drawn last so it stays on top
        let own = if game.uses_split_view() { Some(i) } else { None };
        for (slot, player) in game.active_players().iter().enumerate() {
            if Some(slot) != own {
                draw_player(slot, player, off, screen.view, assets, backend);
            }
        }
        if let Some(slot) = own {
            draw_player(slot, &game.players[slot], off, screen.view, assets, backend);
        }
    }
    backend.set_clip(None);

    if game.uses_split_view() {
        let x = game.screens[0].view.right();
        backend.draw_line(
            Color::BLACK,
            Vec2::new(x, game.screens[0].view.y),
            Vec2::new(x, game.screens[0].view.bottom()),
        );
    }
}

/// Tile a region block by block, skipping blocks outside the viewport
fn draw_region(region: &Region, off: Vec2, view: Rect, assets: &Assets, backend: &mut dyn Backend) {
    let rect = translate(region.rect, off);
    if !rect.intersects(&view) {
        return;
    }
    let Some(tex) = assets.tile(region.tile) else {
        backend.fill_rect(tile_fallback(region.tile), Some(rect));
        return;
    };

    let mut y = rect.y;
    while y < rect.bottom() {
        let h = BLOCK_SIZE.min(rect.bottom() - y);
        let mut x = rect.x;
        while x < rect.right() {
            let w = BLOCK_SIZE.min(rect.right() - x);
            let dst = Rect::new(x, y, w, h);
            if dst.intersects(&view) {
                backend.draw_texture(tex, Some(Rect::new(0.0, 0.0, w, h)), dst);
            }
            x += BLOCK_SIZE;
        }
        y += BLOCK_SIZE;
    }
}

fn draw_player(
    slot: usize,
    player: &Player,
    off: Vec2,
    view: Rect,
    assets: &Assets,
    backend: &mut dyn Backend,
) {
    let rect = translate(player.rect(), off);
    if rect.intersects(&view) {
        let center = player.center() + off;
        let trail = player.trail.pos + off;
        let min = center.min(trail);
        let max = center.max(trail);
        let mut color = player.trail.color;
        color.a = 0x80;
        backend.fill_rect(
            color,
            Some(Rect::new(min.x, min.y, (max.x - min.x).max(1.0), (max.y - min.y).max(1.0))),
        );

        match assets.player_frame(slot, player.facing) {
            Some(tex) => backend.draw_texture(tex, None, rect),
            None => backend.fill_rect(Color::BLACK, Some(rect)),
        }
    }

    if player.proj.active {
        let proj = translate(player.proj.rect(), off);
        if proj.intersects(&view) {
            backend.fill_rect(PROJECTILE, Some(proj));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PROJ_SIZE;
    use crate::platform::{DrawCall, Headless};
    use crate::sim::state::test_util::*;
    use std::path::Path;

    #[test]
    fn test_region_tiles_by_block() {
        let mut backend = Headless::new();
        let assets = Assets::load(&mut backend, Path::new("data"), None);
        let region = Region {
            tile: TileKind::Snow,
            rect: Rect::new(0.0, 100.0, 80.0, 32.0),
        };
        draw_region(&region, Vec2::ZERO, Rect::new(0.0, 0.0, 900.0, 450.0), &assets, &mut backend);
        let dsts: Vec<Rect> = backend
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Texture { dst, .. } => Some(*dst),
                _ => None,
            })
            .collect();
        assert_eq!(
            dsts,
            vec![
                Rect::new(0.0, 100.0, 32.0, 32.0),
                Rect::new(32.0, 100.0, 32.0, 32.0),
                Rect::new(64.0, 100.0, 16.0, 32.0),
            ]
        );
    }

    #[test]
    fn test_camera_offsets_world() {
        let mut backend = Headless::new();
        let assets = Assets::load(&mut backend, Path::new("data"), None);
        let mut game = game_with(flat_level());
        game.screens[0].cam = Vec2::new(1000.0, 0.0);
        game.players[0].pos = Vec2::new(1100.0, 64.0);
        game.players[0].proj.active = true;
        game.players[0].proj.pos = Vec2::new(1200.0, 70.0);
        draw_scene(&game, &assets, &mut backend);

        let sprite = assets.player_frame(0, game.players[0].facing).unwrap();
        assert!(backend.calls.contains(&DrawCall::Texture {
            tex: sprite,
            src: None,
            dst: Rect::new(100.0, 64.0, 32.0, 32.0),
        }));
        assert!(backend.calls.contains(&DrawCall::Fill(
            PROJECTILE,
            Some(Rect::new(200.0, 70.0, PROJ_SIZE, PROJ_SIZE))
        )));
    }

    #[test]
    fn test_end_marker_drawn_centred() {
        let mut backend = Headless::new();
        let assets = Assets::load(&mut backend, Path::new("data"), None);
        let mut level = flat_level();
        level.end = Vec2::new(320.0, 64.0);
        let game = game_with(level);
        draw_scene(&game, &assets, &mut backend);
        assert!(backend.calls.contains(&DrawCall::Texture {
            tex: assets.end().unwrap(),
            src: None,
            dst: Rect::new(304.0, 48.0, 32.0, 32.0),
        }));
    }

    #[test]
    fn test_offscreen_player_skipped() {
        let mut backend = Headless::new();
        let assets = Assets::load(&mut backend, Path::new("data"), None);
        let mut game = game_with(flat_level());
        game.players[0].pos = Vec2::new(2000.0, 64.0);
        draw_scene(&game, &assets, &mut backend);
        let sprite = assets.player_frame(0, game.players[0].facing).unwrap();
        assert!(!backend
            .calls
            .iter()
            .any(|c| matches!(c, DrawCall::Texture { tex, .. } if *tex == sprite)));
    }
}
