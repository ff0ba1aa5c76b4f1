//! Deterministic simulation module
//!
//! All gameplay physics lives here. This module must stay pure and
//! deterministic:
//! - Timestep supplied by the host, never sampled internally
//! - Stable iteration order (entity-collection order)
//! - No rendering, I/O, or platform dependencies

pub mod collision;
pub mod config;
pub mod state;
pub mod tick;

pub use collision::{overlaps, resolve_horizontal, resolve_vertical};
pub use config::GameConfig;
pub use state::{Entity, EntityKind, Patrol, PlayerState};
pub use tick::{GameEngine, GameEvent, InputState, TickOutcome};
