//! The per-tick physics step
//!
//! [`GameEngine::step`] advances the player by one host tick: integrate
//! velocities, resolve collisions one axis at a time, run the entity
//! interaction pass, then the world-bottom check. The engine holds no state
//! besides its config; the only side effects are removing collected coins
//! and stomped enemies from the supplied collection and reporting events.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{
    PLAYER_HEIGHT_TILES, PLAYER_WIDTH_TILES, SPAWN_TILE_X, SPAWN_TILE_Y, WORLD_BOTTOM_TILES,
};

use super::collision::{overlaps, resolve_horizontal, resolve_vertical};
use super::config::GameConfig;
use super::state::{Entity, EntityKind, PlayerState};

/// Input sample for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    /// -1 left, 0 idle, +1 right
    pub move_dir: i8,
    /// Jump requested this tick
    pub jump: bool,
}

/// Gameplay events reported by a step, in encounter order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { label: Option<String> },
    InfoHit { content_id: String },
    LevelComplete,
    Death,
}

/// Aggregated result of one step: the next player snapshot plus the events
/// the host must react to. Draining this after the call keeps the step a
/// plain function, with no callbacks threaded through the physics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickOutcome {
    pub player: PlayerState,
    pub events: Vec<GameEvent>,
}

/// The physics/collision step. One instance per session; holds only the
/// immutable tuning constants and never keeps state across calls.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Player snapshot at the spawn point; also the respawn policy applied
    /// after every death.
    pub fn spawn_player(&self) -> PlayerState {
        let tile = self.config.tile_size;
        PlayerState {
            pos: Vec2::new(SPAWN_TILE_X * tile, SPAWN_TILE_Y * tile),
            size: Vec2::new(PLAYER_WIDTH_TILES * tile, PLAYER_HEIGHT_TILES * tile),
            vel: Vec2::ZERO,
            on_ground: false,
        }
    }

    /// Advance the player by one tick.
    ///
    /// Pure in everything except the explicit removal of collected coins and
    /// stomped enemies from `entities`. A non-positive `dt` is a no-op:
    /// identical snapshot back, no events, no removals.
    pub fn step(
        &self,
        player: &PlayerState,
        input: &InputState,
        dt: f32,
        entities: &mut Vec<Entity>,
    ) -> TickOutcome {
        if dt <= 0.0 {
            return TickOutcome {
                player: *player,
                events: Vec::new(),
            };
        }

        let cfg = &self.config;
        let tile = cfg.tile_size;
        let size = player.size;

        // Horizontal integration: accelerate, damp, clamp.
        let mut vx = player.vel.x + input.move_dir as f32 * cfg.move_speed * tile * dt;
        vx *= cfg.friction;
        vx = vx.clamp(-cfg.max_speed * tile, cfg.max_speed * tile);

        // Vertical integration: gravity, capped at terminal fall speed.
        let mut vy = player.vel.y + cfg.gravity * tile * dt;
        vy = vy.min(cfg.terminal_velocity * tile);

        // Jump only from the ground. The dt factor makes jump height
        // frame-rate dependent; the shipped tuning relies on it.
        if input.jump && player.on_ground {
            vy = cfg.jump_force * tile * dt;
        }

        let future_x = player.pos.x + vx * dt;
        let (resolved_x, vx) = resolve_horizontal(future_x, player.pos.y, size, vx, entities);

        let future_y = player.pos.y + vy * dt;
        let (resolved_y, mut vy, grounded) =
            resolve_vertical(resolved_x, future_y, size, vy, entities);

        let resolved = Vec2::new(resolved_x, resolved_y);

        // Interaction pass at the fully resolved position. Removals are
        // collected by index and compacted after the pass, so sibling visits
        // are never skipped or duplicated mid-iteration.
        let mut events = Vec::new();
        let mut removed: Vec<usize> = Vec::new();
        for idx in 0..entities.len() {
            let entity = &entities[idx];
            if !overlaps(resolved, size, entity) {
                continue;
            }
            match entity.kind {
                EntityKind::Platform => {}
                EntityKind::Coin => {
                    removed.push(idx);
                    events.push(GameEvent::CoinCollected {
                        label: entity.label.clone(),
                    });
                }
                EntityKind::Info => {
                    if let Some(content_id) = &entity.content_id {
                        events.push(GameEvent::InfoHit {
                            content_id: content_id.clone(),
                        });
                    }
                }
                EntityKind::Enemy => {
                    let stomp =
                        vy > 0.0 && resolved.y + size.y <= entity.pos.y + entity.size.y / 2.0;
                    if stomp {
                        removed.push(idx);
                        vy = cfg.bounce_force * tile * dt;
                    } else {
                        // Lethal contact ends the pass: entities after this
                        // one are not visited this tick.
                        events.push(GameEvent::Death);
                        compact(entities, &removed);
                        return TickOutcome {
                            player: self.spawn_player(),
                            events,
                        };
                    }
                }
                EntityKind::Flag => events.push(GameEvent::LevelComplete),
            }
        }
        compact(entities, &removed);

        if resolved.y > WORLD_BOTTOM_TILES * tile {
            events.push(GameEvent::Death);
            return TickOutcome {
                player: self.spawn_player(),
                events,
            };
        }

        TickOutcome {
            player: PlayerState {
                pos: resolved,
                size,
                vel: Vec2::new(vx, vy),
                on_ground: grounded,
            },
            events,
        }
    }
}

/// Remove the marked indices back-to-front so earlier indices stay valid.
fn compact(entities: &mut Vec<Entity>, removed: &[usize]) {
    for &idx in removed.iter().rev() {
        entities.remove(idx);
    }
}
