//! Declarative level data
//!
//! Levels are authored in tile units and converted to pixel geometry once,
//! at construction time. Nothing here runs per tick; the engine consumes the
//! produced entity lists and never calls back in. Levels can also arrive as
//! externally supplied JSON through [`from_json`].

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::COIN_SIZE_TILES;
use crate::sim::{Entity, EntityKind, GameConfig, Patrol};

/// Render hints (packed 0xRRGGBB), opaque to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTheme {
    pub background: u32,
    pub platform: u32,
    pub accent: u32,
}

/// A lore record shown when the player bumps an info block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelContent {
    pub id: String,
    pub title: String,
    pub short_text: String,
    pub full_text: String,
}

/// Immutable level template. A session clones `entities` into its live
/// collection at level start; the template itself is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub theme: LevelTheme,
    pub entities: Vec<Entity>,
    pub content: HashMap<String, LevelContent>,
}

impl LevelConfig {
    /// Drop malformed entities and duplicate ids so they never reach the
    /// per-tick hot path.
    pub fn sanitize(&mut self) {
        let level_id = self.id;
        let mut seen: HashSet<String> = HashSet::new();
        self.entities.retain(|e| {
            if e.size.x <= 0.0 || e.size.y <= 0.0 {
                log::warn!(
                    "level {}: dropping entity '{}' with degenerate size {}x{}",
                    level_id,
                    e.id,
                    e.size.x,
                    e.size.y
                );
                return false;
            }
            if !seen.insert(e.id.clone()) {
                log::warn!(
                    "level {}: dropping entity with duplicate id '{}'",
                    level_id,
                    e.id
                );
                return false;
            }
            true
        });
    }

    pub fn lore(&self, content_id: &str) -> Option<&LevelContent> {
        self.content.get(content_id)
    }
}

/// Parse levels from externally supplied JSON and sanitize them.
pub fn from_json(json: &str) -> Result<Vec<LevelConfig>, serde_json::Error> {
    let mut levels: Vec<LevelConfig> = serde_json::from_str(json)?;
    for level in &mut levels {
        level.sanitize();
    }
    Ok(levels)
}

/// Tile-unit entity builder used by the built-in campaign
pub struct LevelBuilder {
    tile: f32,
    entities: Vec<Entity>,
}

impl LevelBuilder {
    pub fn new(tile: f32) -> Self {
        Self {
            tile,
            entities: Vec::new(),
        }
    }

    fn entity(&self, id: &str, kind: EntityKind, tx: f32, ty: f32, w: f32, h: f32) -> Entity {
        Entity {
            id: id.to_string(),
            kind,
            pos: Vec2::new(tx * self.tile, ty * self.tile),
            size: Vec2::new(w, h),
            label: None,
            content_id: None,
            patrol: None,
        }
    }

    pub fn platform(&mut self, id: &str, tx: i32, ty: i32, w_tiles: i32, h_tiles: i32) -> &mut Self {
        let (w, h) = (w_tiles as f32 * self.tile, h_tiles as f32 * self.tile);
        let e = self.entity(id, EntityKind::Platform, tx as f32, ty as f32, w, h);
        self.entities.push(e);
        self
    }

    /// Continuous floor strip, one platform tile per column
    pub fn floor(&mut self, from_tx: i32, to_tx: i32, ty: i32) -> &mut Self {
        for tx in from_tx..=to_tx {
            self.platform(&format!("floor-{tx}"), tx, ty, 1, 1);
        }
        self
    }

    pub fn coin(&mut self, id: &str, tx: i32, ty: i32, label: &str) -> &mut Self {
        let side = COIN_SIZE_TILES * self.tile;
        let mut e = self.entity(id, EntityKind::Coin, tx as f32, ty as f32, side, side);
        e.label = Some(label.to_string());
        self.entities.push(e);
        self
    }

    pub fn info(&mut self, id: &str, tx: i32, ty: i32, label: &str, content_id: &str) -> &mut Self {
        let tile = self.tile;
        let mut e = self.entity(id, EntityKind::Info, tx as f32, ty as f32, tile, tile);
        e.label = Some(label.to_string());
        e.content_id = Some(content_id.to_string());
        self.entities.push(e);
        self
    }

    /// Enemy with a horizontal patrol range, both bounds in tile units
    pub fn enemy(&mut self, id: &str, tx: i32, ty: i32, patrol_from: i32, patrol_to: i32) -> &mut Self {
        let tile = self.tile;
        let mut e = self.entity(id, EntityKind::Enemy, tx as f32, ty as f32, tile, tile);
        e.label = Some("WATCHER".to_string());
        e.patrol = Some(Patrol {
            start: patrol_from as f32 * tile,
            end: patrol_to as f32 * tile,
            dir: 1.0,
        });
        self.entities.push(e);
        self
    }

    /// Goal flag, one tile wide and four tall so it is hard to walk past
    pub fn flag(&mut self, tx: i32, ty: i32) -> &mut Self {
        let tile = self.tile;
        let mut e = self.entity("flag", EntityKind::Flag, tx as f32, ty as f32, tile, tile * 4.0);
        e.label = Some("BEACON".to_string());
        self.entities.push(e);
        self
    }

    pub fn build(self) -> Vec<Entity> {
        self.entities
    }
}

fn lore(id: &str, title: &str, short_text: &str, full_text: &str) -> (String, LevelContent) {
    (
        id.to_string(),
        LevelContent {
            id: id.to_string(),
            title: title.to_string(),
            short_text: short_text.to_string(),
            full_text: full_text.to_string(),
        },
    )
}

fn starfall_road(tile: f32) -> LevelConfig {
    let mut b = LevelBuilder::new(tile);
    b.floor(-5, 95, 13)
        .platform("wall-west", -1, 0, 1, 20)
        .platform("wall-east", 90, 0, 1, 20)
        // Waymark stretch
        .coin("coin-1", 12, 12, "SPARK")
        .coin("coin-2", 18, 12, "EMBER")
        .info("info-1", 22, 12, "WAY", "waymark")
        // The broken bridge
        .platform("ledge-1", 26, 10, 3, 1)
        .enemy("watcher-1", 27, 9, 26, 28)
        .coin("coin-3", 27, 8, "GUST")
        .info("info-2", 32, 9, "SPAN", "bridge")
        // The hollow
        .platform("ledge-2", 48, 8, 3, 1)
        .coin("coin-4", 49, 6, "FROST")
        .info("info-3", 55, 9, "DEEP", "hollow")
        // Final climb
        .platform("ledge-3", 62, 7, 4, 1)
        .enemy("watcher-2", 63, 6, 62, 65)
        .coin("coin-5", 63, 5, "STAR")
        .info("info-4", 78, 9, "PEAK", "summit")
        .flag(85, 9);

    LevelConfig {
        id: 1,
        name: "Starfall Road".to_string(),
        description: "Follow the waymarks east to the first beacon.".to_string(),
        theme: LevelTheme {
            background: 0x0F172A,
            platform: 0x334155,
            accent: 0x3B82F6,
        },
        entities: b.build(),
        content: HashMap::from([
            lore(
                "waymark",
                "The Waymarks",
                "Stones that remember the road",
                "Travellers raised these stones long before the beacons went dark. \
                 Each one points east, toward the next light. Follow them and the \
                 road cannot lose you.",
            ),
            lore(
                "bridge",
                "The Broken Span",
                "What the flood left behind",
                "A bridge crossed the ravine here once. The spring flood took the \
                 middle of it and nobody came back to rebuild. The ledges that \
                 remain will hold your weight, barely.",
            ),
            lore(
                "hollow",
                "The Hollow",
                "Where the watchers nest",
                "The hollow stays cold all summer. Watchers drift along its rim in \
                 slow circuits, and the old road runs straight beneath them. Keep \
                 low, keep moving.",
            ),
            lore(
                "summit",
                "The First Beacon",
                "Light it and be seen",
                "From the summit cairn you can see the whole road you walked. The \
                 beacon answers to anyone who reaches it; lighting it tells the \
                 valley that the road is open again.",
            ),
        ]),
    }
}

fn the_ascent(tile: f32) -> LevelConfig {
    let mut b = LevelBuilder::new(tile);
    // The floor breaks over the chasm at tiles 41-45
    b.floor(-5, 40, 13)
        .floor(46, 75, 13)
        .platform("wall-west", -1, 0, 1, 20)
        .platform("wall-east", 78, 0, 1, 20)
        .coin("coin-1", 8, 12, "DUSK")
        .info("info-1", 12, 12, "GATE", "gate")
        .enemy("sentry-1", 20, 12, 18, 24)
        .platform("ledge-1", 28, 9, 3, 1)
        .coin("coin-2", 29, 7, "RIME")
        .platform("ledge-2", 42, 10, 2, 1)
        .coin("coin-3", 50, 12, "GLOW")
        .info("info-2", 52, 9, "FORD", "crossing")
        .enemy("sentry-2", 60, 12, 58, 64)
        .flag(70, 9);

    LevelConfig {
        id: 2,
        name: "The Ascent".to_string(),
        description: "Cross the chasm and light the high beacon.".to_string(),
        theme: LevelTheme {
            background: 0x1E1B4B,
            platform: 0x4C1D95,
            accent: 0xF59E0B,
        },
        entities: b.build(),
        content: HashMap::from([
            lore(
                "gate",
                "The Mountain Gate",
                "The last easy ground",
                "Past this gate the road climbs and never apologizes for it. \
                 Sentries walk the flat stretches; the chasm swallows whatever \
                 they miss.",
            ),
            lore(
                "crossing",
                "The Crossing",
                "One ledge over the dark",
                "There is exactly one ledge over the chasm, set there by someone \
                 with more nerve than sense. It has held everyone who trusted it \
                 so far.",
            ),
        ]),
    }
}

/// The built-in campaign, constructed in pixel space for the given config
pub fn campaign(config: &GameConfig) -> Vec<LevelConfig> {
    let mut levels = vec![starfall_road(config.tile_size), the_ascent(config.tile_size)];
    for level in &mut levels {
        level.sanitize();
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_survives_sanitize_intact() {
        let levels = campaign(&GameConfig::default());
        assert_eq!(levels.len(), 2);
        for level in &levels {
            let before = level.entities.len();
            let mut copy = level.clone();
            copy.sanitize();
            assert_eq!(copy.entities.len(), before, "level {}", level.id);
        }
    }

    #[test]
    fn test_campaign_ids_unique() {
        for level in campaign(&GameConfig::default()) {
            let mut seen = std::collections::HashSet::new();
            for entity in &level.entities {
                assert!(seen.insert(entity.id.clone()), "duplicate id {}", entity.id);
            }
        }
    }

    #[test]
    fn test_builder_converts_tiles_to_pixels() {
        let mut b = LevelBuilder::new(40.0);
        b.platform("p", 26, 10, 3, 1);
        let entities = b.build();
        assert_eq!(entities[0].pos, Vec2::new(1040.0, 400.0));
        assert_eq!(entities[0].size, Vec2::new(120.0, 40.0));
    }

    #[test]
    fn test_info_blocks_reference_known_lore() {
        for level in campaign(&GameConfig::default()) {
            for entity in &level.entities {
                if let Some(content_id) = &entity.content_id {
                    assert!(
                        level.lore(content_id).is_some(),
                        "level {} references unknown lore '{}'",
                        level.id,
                        content_id
                    );
                }
            }
        }
    }

    #[test]
    fn test_sanitize_drops_degenerate_and_duplicates() {
        let mut b = LevelBuilder::new(40.0);
        b.platform("keep", 0, 0, 1, 1).platform("keep", 1, 0, 1, 1);
        let mut entities = b.build();
        entities.push(Entity {
            id: "flat".to_string(),
            kind: EntityKind::Platform,
            pos: Vec2::new(0.0, 0.0),
            size: Vec2::new(40.0, 0.0),
            label: None,
            content_id: None,
            patrol: None,
        });

        let mut level = LevelConfig {
            id: 99,
            name: "test".to_string(),
            description: String::new(),
            theme: LevelTheme {
                background: 0,
                platform: 0,
                accent: 0,
            },
            entities,
            content: HashMap::new(),
        };
        level.sanitize();
        assert_eq!(level.entities.len(), 1);
        assert_eq!(level.entities[0].id, "keep");
    }

    #[test]
    fn test_from_json_parses_and_sanitizes() {
        let json = r#"[{
            "id": 7,
            "name": "Imported",
            "description": "externally supplied",
            "theme": { "background": 987674, "platform": 3362133, "accent": 3900150 },
            "entities": [
                { "id": "floor", "kind": "Platform", "pos": [0.0, 520.0], "size": [400.0, 40.0] },
                { "id": "bad", "kind": "Coin", "pos": [80.0, 480.0], "size": [0.0, 32.0] },
                { "id": "coin-1", "kind": "Coin", "pos": [120.0, 480.0], "size": [32.0, 32.0],
                  "label": "SPARK" },
                { "id": "guard", "kind": "Enemy", "pos": [200.0, 480.0], "size": [40.0, 40.0],
                  "patrol": { "start": 160.0, "end": 280.0, "dir": 1.0 } }
            ],
            "content": {
                "waymark": { "id": "waymark", "title": "T", "short_text": "s", "full_text": "f" }
            }
        }]"#;

        let levels = from_json(json).expect("valid level JSON");
        assert_eq!(levels.len(), 1);
        let level = &levels[0];
        assert_eq!(level.id, 7);
        // The zero-width coin is gone, the rest survive
        let ids: Vec<&str> = level.entities.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["floor", "coin-1", "guard"]);
        assert_eq!(
            level.entities[2].patrol,
            Some(Patrol {
                start: 160.0,
                end: 280.0,
                dir: 1.0
            })
        );
        assert!(level.lore("waymark").is_some());
    }
}
