//! Tile Quest - a deterministic tile-based platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collision, the tick step)
//! - `levels`: Declarative level data and lore content
//! - `session`: Host-side playthrough state consuming tick events
//!
//! The embedding shell (rendering, input sampling, audio) lives outside this
//! crate; it drives the simulation through [`session::GameSession`] or the
//! lower-level [`sim::GameEngine::step`].

pub mod levels;
pub mod session;
pub mod sim;

pub use session::{GameSession, GameState, GameStatus};
pub use sim::{GameConfig, GameEngine, GameEvent, InputState, TickOutcome};

/// Fixed gameplay constants (everything that is not physics tuning)
pub mod consts {
    /// Spawn point in tile units, applied at level start and after every death
    pub const SPAWN_TILE_X: f32 = 2.0;
    pub const SPAWN_TILE_Y: f32 = 10.0;

    /// Falling past this many tile-heights kills the player within the tick
    pub const WORLD_BOTTOM_TILES: f32 = 20.0;

    /// Player AABB as a fraction of a tile
    pub const PLAYER_WIDTH_TILES: f32 = 0.8;
    pub const PLAYER_HEIGHT_TILES: f32 = 0.9;

    /// Coin AABB as a fraction of a tile
    pub const COIN_SIZE_TILES: f32 = 0.8;

    /// Points awarded per collected coin
    pub const COIN_SCORE: u32 = 100;

    /// Horizontal shuttle rate for patrolling enemies, tiles per second
    pub const PATROL_TILES_PER_SEC: f32 = 1.5;
}
