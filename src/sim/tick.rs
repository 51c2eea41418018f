//! Frame update: key dispatch, mode transitions and fixed-step physics
//!
//! Each frame the input table is scanned player by player, action by action.
//! Fresh presses go through the mode state machine; in play, held keys drive
//! the player controls. Physics then runs in `SIM_DT` steps.

use super::physics::{Outcome, move_players};
use super::state::{Game, GameMode, MenuItem, OverlayItem};
use crate::consts::*;
use crate::input::{Action, Input, KeyState};

/// Frame times above this are treated as a stall, not simulated
const MAX_FRAME_DT: f32 = 0.1;

/// Advance the game by one rendered frame
///
/// Mode transitions and releases are handled once per frame. Held keys drive
/// the player controls once per simulation step, so movement does not depend
/// on the frame rate.
pub fn update(game: &mut Game, input: &Input, frame_dt: f32) {
    for player in 0..MAX_PLAYERS {
        for action in Action::ALL {
            match input.get(player, action) {
                KeyState::Pressed => handle_key(game, action),
                KeyState::Released => handle_key_release(game, action, player),
                KeyState::Unknown | KeyState::PressedRepeat => {}
            }
        }
    }

    if game.mode == GameMode::Play {
        game.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        let mut substeps = 0;
        while game.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            game.accumulator -= SIM_DT;
            substeps += 1;
            apply_held_keys(game, input);
            match move_players(game, SIM_DT) {
                Some(Outcome::Won) => {
                    win(game);
                    break;
                }
                Some(Outcome::Dead) => {
                    enter_overlay(game, GameMode::Dead);
                    log::info!("Died on level {}", game.cur_level + 1);
                    break;
                }
                None => {}
            }
        }
    }

    if game.mode == GameMode::Dead {
        game.death_alpha = game.death_alpha.saturating_add(2);
    } else {
        game.death_alpha = 0;
    }
}

fn apply_held_keys(game: &mut Game, input: &Input) {
    for player in 0..MAX_PLAYERS {
        for action in Action::ALL {
            if matches!(
                input.get(player, action),
                KeyState::Pressed | KeyState::PressedRepeat
            ) {
                handle_key_repeat(game, action, player);
            }
        }
    }
}

/// Mode transitions on a fresh key press
pub fn handle_key(game: &mut Game, action: Action) {
    match game.mode {
        GameMode::Play => {
            if matches!(action, Action::Pause | Action::Quit) {
                enter_overlay(game, GameMode::Pause);
            }
        }
        GameMode::Menu => match action {
            Action::Select => select_menu_item(game),
            Action::Quit => game.running = false,
            _ => change_focus(game, action),
        },
        GameMode::LevelSelect => match action {
            Action::Left => game.cur_level = game.cur_level.saturating_sub(1),
            Action::Right => {
                if game.cur_level + 1 < game.levels.len() {
                    game.cur_level += 1;
                }
            }
            Action::Select => start_level(game),
            Action::Quit => enter_menu(game),
            _ => {}
        },
        GameMode::Pause | GameMode::Dead | GameMode::Won => match action {
            Action::Pause => {
                if game.mode == GameMode::Pause {
                    game.mode = GameMode::Play;
                }
            }
            Action::Quit => enter_menu(game),
            Action::Select => select_overlay_item(game),
            _ => change_focus(game, action),
        },
    }
}

/// Player controls for a held key; only acts in play
pub fn handle_key_repeat(game: &mut Game, action: Action, player: usize) {
    if game.mode != GameMode::Play {
        return;
    }
    let stage_length = game.stage_length();
    let player = &mut game.players[clamp_player(game.num_players, player)];
    match action {
        Action::Up => player.jump(false),
        Action::Left => player.move_left(),
        Action::Right => player.move_right(stage_length),
        Action::Shoot => player.shoot(),
        Action::Down | Action::Pause | Action::Quit | Action::Select => {}
    }
}

/// Releasing jump ends the boost
pub fn handle_key_release(game: &mut Game, action: Action, player: usize) {
    if game.mode != GameMode::Play {
        return;
    }
    let player = clamp_player(game.num_players, player);
    if action == Action::Up {
        game.players[player].jump(true);
    }
}

/// Keys bound to an inactive player slot control the first player
fn clamp_player(num_players: usize, player: usize) -> usize {
    if player >= num_players { 0 } else { player }
}

fn change_focus(game: &mut Game, action: Action) {
    let last = game.menu_len().saturating_sub(1);
    match action {
        Action::Up | Action::Left => game.menu_focus = game.menu_focus.saturating_sub(1),
        Action::Down | Action::Right => game.menu_focus = (game.menu_focus + 1).min(last),
        _ => {}
    }
}

fn select_menu_item(game: &mut Game) {
    let Some(item) = MenuItem::ALL.get(game.menu_focus).copied() else {
        return;
    };
    match item {
        MenuItem::Start => {
            game.cur_level = game.progress.clamp(0, game.levels.len() as i32 - 1) as usize;
            game.reset_players();
            game.reload_textures = true;
            game.mode = GameMode::LevelSelect;
        }
        MenuItem::ChoosePlayers => {
            game.num_players = if game.num_players == 1 { MAX_PLAYERS } else { 1 };
            let (w, h) = (game.width, game.height);
            game.resize_screens(w, h);
            log::info!("Players: {}", game.num_players);
        }
        MenuItem::Exit => game.running = false,
    }
}

fn select_overlay_item(game: &mut Game) {
    let Some(item) = game.overlay_items().get(game.menu_focus).copied() else {
        return;
    };
    match item {
        OverlayItem::Resume => game.mode = GameMode::Play,
        OverlayItem::Restart => start_level(game),
        OverlayItem::NextLevel => {
            if game.cur_level + 1 < game.levels.len() {
                game.cur_level += 1;
                start_level(game);
            } else {
                game.mode = GameMode::LevelSelect;
            }
        }
        OverlayItem::Menu => enter_menu(game),
    }
}

fn start_level(game: &mut Game) {
    game.reset_players();
    game.mode = GameMode::Play;
    log::info!("Starting level {}", game.cur_level + 1);
}

fn enter_menu(game: &mut Game) {
    game.mode = GameMode::Menu;
    game.menu_focus = 0;
}

fn enter_overlay(game: &mut Game, mode: GameMode) {
    game.mode = mode;
    game.menu_focus = 0;
}

fn win(game: &mut Game) {
    enter_overlay(game, GameMode::Won);
    let cleared = game.cur_level as i32 + 1;
    if cleared > game.progress {
        game.progress = cleared;
    }
    log::info!("Cleared level {}", cleared);
}
