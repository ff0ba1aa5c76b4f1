//! AABB collision detection and per-axis resolution
//!
//! The player is resolved against platforms one axis at a time: horizontal
//! first at the old y, then vertical at the resolved x. Overlap is strict on
//! both axes; touching edges do not collide.

use glam::Vec2;

use super::state::{Entity, EntityKind};

/// Strict AABB overlap between the player rectangle and an entity.
/// Equality on any edge counts as no overlap.
pub fn overlaps(pos: Vec2, size: Vec2, entity: &Entity) -> bool {
    pos.x < entity.pos.x + entity.size.x
        && pos.x + size.x > entity.pos.x
        && pos.y < entity.pos.y + entity.size.y
        && pos.y + size.y > entity.pos.y
}

/// Horizontal pass: clamp the tentative x to the near edge of any platform
/// overlapped at the old y, on the side of travel. Every platform is tested
/// against the tentative position, so the last overlapping one wins; there
/// is no distance tie-break. Returns the resolved x and velocity.
pub fn resolve_horizontal(
    future_x: f32,
    y: f32,
    size: Vec2,
    vx: f32,
    entities: &[Entity],
) -> (f32, f32) {
    let mut resolved = future_x;
    let mut out_vx = vx;
    let probe = Vec2::new(future_x, y);

    for entity in entities {
        if entity.kind != EntityKind::Platform || !overlaps(probe, size, entity) {
            continue;
        }
        if vx > 0.0 {
            resolved = entity.pos.x - size.x;
        } else if vx < 0.0 {
            resolved = entity.pos.x + entity.size.x;
        }
        out_vx = 0.0;
    }

    (resolved, out_vx)
}

/// Vertical pass at the resolved x: land on platform tops when falling, bump
/// the player's head on platform bottoms when rising. Returns the resolved
/// y, the velocity, and whether the player ended the pass grounded.
pub fn resolve_vertical(
    resolved_x: f32,
    future_y: f32,
    size: Vec2,
    vy: f32,
    entities: &[Entity],
) -> (f32, f32, bool) {
    let mut resolved = future_y;
    let mut out_vy = vy;
    let mut grounded = false;
    let probe = Vec2::new(resolved_x, future_y);

    for entity in entities {
        if entity.kind != EntityKind::Platform || !overlaps(probe, size, entity) {
            continue;
        }
        if vy > 0.0 {
            resolved = entity.pos.y - size.y;
            grounded = true;
        } else if vy < 0.0 {
            resolved = entity.pos.y + entity.size.y;
        }
        out_vy = 0.0;
    }

    (resolved, out_vy, grounded)
}
