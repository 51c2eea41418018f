//! Player movement integration
//!
//! Player controls (`jump`, `move_left`, `move_right`, `shoot`) adjust
//! velocities from key events. [`move_players`] advances every active player
//! by one fixed step against the current level.

use glam::Vec2;

use super::camera::move_cameras;
use super::collision::{resolve_horizontal, resolve_vertical};
use super::state::{Facing, Game, Player};
use crate::consts::*;
use crate::level::Region;
use crate::Rect;

/// A tick that ended the level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A player touched the end marker
    Won,
    /// A player fell below the stage
    Dead,
}

impl Player {
    /// Variable-height jump. Holding the key keeps boosting while the latch
    /// is set; releasing or reaching `MIN_PLAYER_DY` clears it.
    pub fn jump(&mut self, released: bool) {
        if released || self.vel.y < MIN_PLAYER_DY {
            self.jump_higher = false;
            return;
        }
        if !self.jump_higher && !self.in_air {
            self.jump_higher = true;
        }
        if self.jump_higher {
            self.vel.y -= JUMP_ACCEL;
            self.in_air = true;
        }
    }

    pub fn move_right(&mut self, stage_length: f32) {
        if self.pos.x + self.w >= stage_length {
            return;
        }
        self.vel.x = (self.vel.x + SPEED_ACCEL).min(SPEED_MAX);
        self.facing = Facing::Right;
    }

    pub fn move_left(&mut self) {
        if self.pos.x <= 0.0 {
            return;
        }
        self.vel.x = (self.vel.x - SPEED_ACCEL).max(-SPEED_MAX);
        self.facing = Facing::Left;
    }

    /// Fire the projectile in the facing direction; ignored while one is out
    pub fn shoot(&mut self) {
        if self.proj.active {
            return;
        }
        let origin = self.center();
        self.proj.pos = origin;
        self.proj.initial_x = origin.x;
        self.proj.active = true;
        self.proj.returning = false;
        let dir = if self.facing == Facing::Left { -1.0 } else { 1.0 };
        self.proj.vel = Vec2::new(dir * PROJ_DX, 0.0);
    }

    /// Returns true if the player fell below `stage_height`
    pub fn move_vertical(&mut self, regions: &[Region], stage_height: f32, dt: f32) -> bool {
        let dy = self.vel.y.min(TERMINAL_VELOCITY);
        self.vel.y = dy;

        let result = resolve_vertical(regions, self.rect(), dy);
        if result.hit {
            self.vel.y = 0.0;
            if dy > 0.0 {
                self.in_air = false;
            }
        } else if dy > 0.0 {
            self.in_air = true;
        }
        self.pos.y = result.pos;
        self.vel.y = (self.vel.y + GRAVITY * dt).min(TERMINAL_VELOCITY);

        self.pos.y > stage_height
    }

    pub fn move_horizontal(&mut self, regions: &[Region], stage_length: f32, dt: f32) {
        let max_x = (stage_length - self.w).max(0.0);
        let mut dx = self.vel.x.clamp(-SPEED_MAX, SPEED_MAX);
        if (self.pos.x <= 0.0 && dx < 0.0) || (self.pos.x >= max_x && dx > 0.0) {
            dx = 0.0;
        }

        // The damped velocity doubles as this tick's displacement
        dx *= FRICTION * dt;
        let result = resolve_horizontal(regions, self.rect(), dx);
        self.vel.x = if result.hit { 0.0 } else { dx };
        self.pos.x = result.pos.clamp(0.0, max_x);

        if self.pos.x <= 0.0 || self.pos.x >= max_x {
            self.vel.x = 0.0;
        }
    }

    pub fn move_projectile(&mut self, dt: f32) {
        if !self.proj.active {
            return;
        }
        if self.proj.returning {
            if self.rect().intersects(&self.proj.rect()) {
                self.proj.active = false;
                self.proj.returning = false;
                return;
            }
            let proj_center = self.proj.pos + Vec2::splat(PROJ_SIZE / 2.0);
            let offset = self.center() - proj_center;
            self.proj.vel = Vec2::new(home(offset.x), home(offset.y));
        } else if (self.proj.pos.x - self.proj.initial_x).abs() > PROJ_RET {
            self.proj.returning = true;
        }
        self.proj.pos += self.proj.vel * dt;
    }

    pub fn move_trail(&mut self, dt: f32) {
        let trail = &mut self.trail;
        let marker = Rect::new(trail.pos.x, trail.pos.y, 1.0, 1.0);
        let player = Rect::new(self.pos.x, self.pos.y, self.w, self.h);
        if player.intersects(&marker) {
            trail.vel = Vec2::ZERO;
            return;
        }
        let target = self.pos + Vec2::new(self.w / 2.0, self.h / 2.0);
        let d = target - trail.pos;
        trail.vel = TRAIL_NORMALIZER * d * d * d;
        // Never step past the target
        let step = trail.vel * dt;
        let step = Vec2::new(
            step.x.clamp(-d.x.abs(), d.x.abs()),
            step.y.clamp(-d.y.abs(), d.y.abs()),
        );
        trail.pos += step;
    }
}

/// Axis-independent homing speed toward an offset
fn home(offset: f32) -> f32 {
    if offset > PROJ_EPS {
        PROJ_DX
    } else if offset < -PROJ_EPS {
        -PROJ_DX
    } else {
        0.0
    }
}

/// Advance all active players one step, then the cameras. Touching the end
/// marker is checked before any movement and ends the tick immediately.
pub fn move_players(game: &mut Game, dt: f32) -> Option<Outcome> {
    let stage_height = game.stage_height();
    let level = &game.levels[game.cur_level];
    let end = level.end_rect();
    let mut outcome = None;

    for player in &mut game.players[..game.num_players] {
        if end.is_some_and(|end| player.rect().intersects(&end)) {
            return Some(Outcome::Won);
        }

        if player.move_vertical(&level.regions, stage_height, dt) {
            outcome = Some(Outcome::Dead);
        }
        player.move_horizontal(&level.regions, level.stage_length, dt);
        player.move_projectile(dt);
        player.move_trail(dt);
    }

    move_cameras(game);
    outcome
}
