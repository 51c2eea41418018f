//! Camera tracking
//!
//! Split view gives each active player their own camera. Otherwise one camera
//! follows the mean position of all active players.

use glam::Vec2;

use super::state::{Game, Screen};
use crate::consts::CAMERA_DEAD_ZONE;

pub fn move_cameras(game: &mut Game) {
    let stage_length = game.stage_length();
    let stage_height = game.stage_height();

    if game.uses_split_view() {
        for (screen, player) in game.screens.iter_mut().zip(&game.players[..game.num_players]) {
            follow(screen, player.pos, stage_length, stage_height);
        }
    } else {
        let players = game.active_players();
        let sum: Vec2 = players.iter().map(|p| p.pos).sum();
        let target = sum / players.len() as f32;
        follow(&mut game.screens[0], target, stage_length, stage_height);
    }
}

/// Centre `screen` on `target`, staying inside the stage horizontally
pub fn follow(screen: &mut Screen, target: Vec2, stage_length: f32, stage_height: f32) {
    let half_w = screen.view.w / 2.0;
    let x = target.x.clamp(half_w, (stage_length - half_w).max(half_w));
    if (x - (screen.cam.x + half_w)).abs() > CAMERA_DEAD_ZONE {
        screen.cam.x = x - half_w;
    }

    screen.cam.y = target.y - screen.view.h / 2.0;
    // Bounded by the viewport width, not its height
    let max_y = stage_height - screen.view.w;
    if screen.cam.y > max_y {
        screen.cam.y = max_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;
    use crate::consts::*;
    use crate::sim::state::test_util::*;
    use proptest::prelude::*;

    fn screen(w: f32, h: f32) -> Screen {
        Screen {
            view: Rect::new(0.0, 0.0, w, h),
            cam: Vec2::ZERO,
        }
    }

    #[test]
    fn test_camera_stays_at_stage_start() {
        let mut s = screen(900.0, 450.0);
        follow(&mut s, Vec2::new(10.0, 64.0), 3200.0, MAX_STAGE_HEIGHT);
        assert_eq!(s.cam.x, 0.0);
        assert_eq!(s.cam.y, 64.0 - 225.0);
    }

    #[test]
    fn test_camera_centres_and_clamps_to_stage_end() {
        let mut s = screen(900.0, 450.0);
        follow(&mut s, Vec2::new(1000.0, 0.0), 3200.0, MAX_STAGE_HEIGHT);
        assert_eq!(s.cam.x, 550.0);

        follow(&mut s, Vec2::new(3150.0, 0.0), 3200.0, MAX_STAGE_HEIGHT);
        assert_eq!(s.cam.x, 3200.0 - 900.0);
    }

    #[test]
    fn test_vertical_clamp_uses_viewport_width() {
        let mut s = screen(900.0, 450.0);
        follow(&mut s, Vec2::new(0.0, 1700.0), 3200.0, MAX_STAGE_HEIGHT);
        assert_eq!(s.cam.y, MAX_STAGE_HEIGHT - 900.0);
    }

    #[test]
    fn test_short_stage_pins_camera() {
        let mut s = screen(900.0, 450.0);
        follow(&mut s, Vec2::new(300.0, 0.0), 600.0, MAX_STAGE_HEIGHT);
        assert_eq!(s.cam.x, 0.0);
    }

    #[test]
    fn test_shared_camera_follows_mean() {
        let mut game = game_with(flat_level());
        game.num_players = 2;
        game.split_screen = false;
        game.resize_screens(900.0, 450.0);
        game.players[0].pos = Vec2::new(1000.0, 64.0);
        game.players[1].pos = Vec2::new(2000.0, 64.0);
        move_cameras(&mut game);
        assert_eq!(game.screens[0].cam.x, 1500.0 - 450.0);
        // Second screen untouched in shared mode
        assert_eq!(game.screens[1].cam, Vec2::ZERO);
    }

    #[test]
    fn test_split_cameras_are_independent() {
        let mut game = game_with(flat_level());
        game.num_players = 2;
        game.resize_screens(900.0, 450.0);
        game.players[0].pos = Vec2::new(1000.0, 64.0);
        game.players[1].pos = Vec2::new(2000.0, 64.0);
        move_cameras(&mut game);
        assert_eq!(game.screens[0].cam.x, 1000.0 - 225.0);
        assert_eq!(game.screens[1].cam.x, 2000.0 - 225.0);
    }

    proptest! {
        #[test]
        fn prop_dead_zone_holds_camera(start in 500.0f32..2500.0, drift in -0.89f32..0.89) {
            let mut s = screen(900.0, 450.0);
            follow(&mut s, Vec2::new(start, 0.0), 3200.0, MAX_STAGE_HEIGHT);
            let cam_x = s.cam.x;
            follow(&mut s, Vec2::new(start + drift, 0.0), 3200.0, MAX_STAGE_HEIGHT);
            prop_assert_eq!(s.cam.x, cam_x);
        }

        #[test]
        fn prop_camera_inside_stage(x in -100.0f32..3300.0) {
            let mut s = screen(900.0, 450.0);
            follow(&mut s, Vec2::new(x, 0.0), 3200.0, MAX_STAGE_HEIGHT);
            prop_assert!(s.cam.x >= 0.0);
            prop_assert!(s.cam.x + 900.0 <= 3200.0 + 1e-3);
        }
    }
}
