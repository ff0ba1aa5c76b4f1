//! Physics tuning constants
//!
//! One immutable [`GameConfig`] is shared by an engine instance for its
//! whole lifetime. Rates are authored in tile units; the engine scales by
//! `tile_size` into pixel space when integrating.

use serde::{Deserialize, Serialize};

/// Immutable physics constants for one engine instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Downward acceleration applied every tick
    pub gravity: f32,
    /// Multiplicative horizontal damping applied every tick
    pub friction: f32,
    /// Horizontal acceleration from directional input
    pub move_speed: f32,
    /// Horizontal speed cap
    pub max_speed: f32,
    /// Jump impulse (negative is up)
    pub jump_force: f32,
    /// Upward kick after stomping an enemy (negative is up)
    pub bounce_force: f32,
    /// Maximum fall speed
    pub terminal_velocity: f32,
    /// Square tile edge in pixels
    pub tile_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            friction: 0.85,
            move_speed: 0.35,
            max_speed: 4.0,
            jump_force: -14.5,
            bounce_force: -9.0,
            terminal_velocity: 12.0,
            tile_size: 40.0,
        }
    }
}
