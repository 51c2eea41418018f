//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (players by slot, regions by storage order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod physics;
pub mod state;
pub mod tick;

pub use camera::{follow, move_cameras};
pub use collision::{AxisResult, resolve_horizontal, resolve_vertical};
pub use physics::{Outcome, move_players};
pub use state::{
    Facing, Game, GameMode, MenuItem, OverlayItem, Player, Projectile, Screen, Trail,
};
pub use tick::{handle_key, handle_key_release, handle_key_repeat, update};
