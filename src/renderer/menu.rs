//! Home menu, level select and the overlays drawn over the play scene

use glam::Vec2;

use super::{FOCUSED, STATUS_TEXT_SIZE, TEXT, UNFOCUSED};
use crate::consts::{BLOCK_SIZE, LOGICAL_HEIGHT};
use crate::platform::Backend;
use crate::sim::{Game, MenuItem};
use crate::{Color, NAME, Rect};

const LEVEL_CURRENT: Color = Color::rgb(0x44, 0x55, 0xBB);
const LEVEL_OTHER: Color = Color::rgb(0x11, 0x11, 0x66);
const LEVEL_INNER: Color = Color::rgb(0x01, 0x12, 0x44);
const PAUSE_GLYPH: Color = Color::rgb(0x11, 0x11, 0x11);
const LEVEL_PADDING: f32 = 10.0;

/// Draw `text` vertically centred in `rect`, starting at `x`
fn text_in(backend: &mut dyn Backend, text: &str, size: f32, x: f32, rect: Rect) {
    let (_, h) = backend.measure_text(text, size);
    backend.draw_text(text, size, Vec2::new(x, rect.y + (rect.h - h) / 2.0), TEXT);
}

fn text_centered(backend: &mut dyn Backend, text: &str, size: f32, center: Vec2) {
    let (w, h) = backend.measure_text(text, size);
    backend.draw_text(text, size, center - Vec2::new(w, h) / 2.0, TEXT);
}

/// Title band and one full-width box per menu entry
pub fn draw_home(game: &Game, backend: &mut dyn Backend) {
    let (w, h) = (game.width, game.height);
    let gaps = (h / 100.0).floor();
    let section = (h / 4.0).floor();
    let box_w = w - gaps * 2.0;
    let box_h = section - gaps * 2.0;
    let text_size = h * 36.0 / LOGICAL_HEIGHT;

    text_in(backend, NAME, text_size * 2.0, gaps, Rect::new(0.0, gaps, w, box_h));

    for (i, item) in MenuItem::ALL.iter().enumerate() {
        let rect = Rect::new(gaps, gaps + section * (i + 1) as f32, box_w, box_h);
        let color = if i == game.menu_focus { FOCUSED } else { UNFOCUSED };
        backend.fill_rect(color, Some(rect));
        text_in(backend, item.label(), text_size, gaps * 2.0, rect);

        if *item == MenuItem::ChoosePlayers {
            let count = game.num_players.to_string();
            let (cw, _) = backend.measure_text(&count, text_size);
            text_in(backend, &count, text_size, rect.right() - cw - gaps, rect);
        }
    }
}

/// A row of numbered boxes starting one before the current level
pub fn draw_level_select(game: &Game, backend: &mut dyn Backend) {
    let (w, h) = (game.width, game.height);
    let box_w = w * 0.3;
    let box_h = h * 0.4;
    let slots = w / (box_w + LEVEL_PADDING);
    let slot_w = w / slots;

    let first = game.cur_level as i64 - 1;
    for j in 0..slots.ceil() as i64 {
        let level = first + j;
        if level < 0 {
            continue;
        }
        if level as usize >= game.levels.len() {
            break;
        }

        let x = j as f32 * slot_w;
        let rect = Rect::new(x + LEVEL_PADDING, h / 2.0 - box_h / 2.0, box_w, box_h);
        let color = if level as usize == game.cur_level { LEVEL_CURRENT } else { LEVEL_OTHER };
        backend.fill_rect(color, Some(rect));
        let inner = Rect::new(
            rect.x + LEVEL_PADDING / 2.0,
            h / 2.0 - (box_h - LEVEL_PADDING) / 2.0,
            box_w - LEVEL_PADDING,
            box_h - LEVEL_PADDING,
        );
        backend.fill_rect(LEVEL_INNER, Some(inner));

        let label = (level + 1).to_string();
        text_centered(
            backend,
            &label,
            STATUS_TEXT_SIZE,
            Vec2::new(rect.x + box_w / 2.0, h / 2.0),
        );
    }
}

/// Two vertical bars in the middle of the surface
pub fn draw_pause_glyph(game: &Game, backend: &mut dyn Backend) {
    let (cx, cy) = (game.width / 2.0, game.height / 2.0);
    for x in [cx - BLOCK_SIZE, cx + BLOCK_SIZE] {
        let bar = Rect::new(x, cy - 2.0 * BLOCK_SIZE, BLOCK_SIZE, BLOCK_SIZE * 4.0);
        backend.fill_rect(PAUSE_GLYPH, Some(bar));
    }
}

pub fn draw_status(game: &Game, text: &str, backend: &mut dyn Backend) {
    text_centered(
        backend,
        text,
        STATUS_TEXT_SIZE,
        Vec2::new(game.width / 2.0, game.height / 2.0),
    );
}

/// Overlay entries stacked along the bottom of the surface
pub fn draw_overlay(game: &Game, backend: &mut dyn Backend) {
    let items = game.overlay_items();
    let (w, h) = (game.width, game.height);
    let gaps = (h / 100.0).floor();
    let item_h = h / 12.0;
    let item_w = w / 3.0;
    let text_size = h * 24.0 / LOGICAL_HEIGHT;
    let top = h - gaps * 4.0 - items.len() as f32 * (item_h + gaps);

    for (i, item) in items.iter().enumerate() {
        let rect = Rect::new(
            (w - item_w) / 2.0,
            top + i as f32 * (item_h + gaps),
            item_w,
            item_h,
        );
        let color = if i == game.menu_focus { FOCUSED } else { UNFOCUSED };
        backend.fill_rect(color, Some(rect));
        text_in(backend, item.label(), text_size, rect.x + gaps * 2.0, rect);
    }
}
