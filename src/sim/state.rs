//! Simulation value types
//!
//! Per-tick snapshots and level entities. The engine produces a fresh
//! [`PlayerState`] every tick; entities live in the host-owned level
//! collection and are only ever removed (never mutated) by the step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What an entity is, which decides how the interaction pass treats it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Solid geometry for both collision passes
    Platform,
    /// Collectible; removed on contact
    Coin,
    /// Lore trigger; persists and re-fires while overlapped
    Info,
    /// Lethal unless stomped from above
    Enemy,
    /// Level goal; persists and re-fires while overlapped
    Flag,
}

/// Horizontal patrol range for an enemy.
///
/// Never read by the physics step; the host session shuttles the enemy
/// between `start` and `end` before stepping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Patrol {
    pub start: f32,
    pub end: f32,
    /// +1.0 moving toward `end`, -1.0 toward `start`
    pub dir: f32,
}

/// A level entity: an axis-aligned rectangle plus interaction metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique within one live level collection
    pub id: String,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// HUD label carried by coins, enemies, and the flag
    #[serde(default)]
    pub label: Option<String>,
    /// Lore record key for Info blocks
    #[serde(default)]
    pub content_id: Option<String>,
    #[serde(default)]
    pub patrol: Option<Patrol>,
}

/// Player snapshot. A new instance is produced by every step; `size` is
/// constant for the session lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Supported by a platform, the sole gate for jump eligibility
    pub on_ground: bool,
}
