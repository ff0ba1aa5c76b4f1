//! Host-side game session
//!
//! The engine only reports events; everything stateful about a playthrough
//! lives here: the status machine, score, lore display, patrol movement, and
//! level switching. The engine never reads or writes any of it.

use serde::{Deserialize, Serialize};

use crate::consts::{COIN_SCORE, PATROL_TILES_PER_SEC};
use crate::levels::LevelConfig;
use crate::sim::{
    Entity, EntityKind, GameConfig, GameEngine, GameEvent, InputState, PlayerState, TickOutcome,
};

/// Where the playthrough currently is. Transitions are driven entirely by
/// host calls and engine events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Menu,
    Playing,
    /// A lore panel is open; the simulation is not stepped
    Reading,
    /// Terminal for the level; `advance_level` moves on
    LevelComplete,
    Paused,
}

/// Aggregated playthrough state: engine output merged with host bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    pub level_index: usize,
    pub player: PlayerState,
    pub score: u32,
    pub story_message: Option<String>,
}

/// One playthrough over a list of levels
#[derive(Debug, Clone)]
pub struct GameSession {
    engine: GameEngine,
    levels: Vec<LevelConfig>,
    entities: Vec<Entity>,
    state: GameState,
}

impl GameSession {
    pub fn new(config: GameConfig, levels: Vec<LevelConfig>) -> Self {
        let engine = GameEngine::new(config);
        let player = engine.spawn_player();
        Self {
            engine,
            levels,
            entities: Vec::new(),
            state: GameState {
                status: GameStatus::Menu,
                level_index: 0,
                player,
                score: 0,
                story_message: None,
            },
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The live entity collection, for the rendering layer
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn current_level(&self) -> Option<&LevelConfig> {
        self.levels.get(self.state.level_index)
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Menu -> Playing. Loads the first level and zeroes the score.
    pub fn start(&mut self) {
        if self.state.status != GameStatus::Menu || self.levels.is_empty() {
            return;
        }
        self.state.score = 0;
        self.load_level(0);
        self.state.status = GameStatus::Playing;
    }

    fn load_level(&mut self, index: usize) {
        let level = &self.levels[index];
        self.entities = level.entities.clone();
        self.state.level_index = index;
        self.state.player = self.engine.spawn_player();
        self.state.story_message = None;
        log::info!(
            "level {} '{}' loaded ({} entities)",
            level.id,
            level.name,
            self.entities.len()
        );
    }

    /// Advance the world by one host tick. Does nothing unless Playing —
    /// which is exactly how the simulation pauses during Reading and Paused.
    pub fn tick(&mut self, input: &InputState, dt: f32) -> Vec<GameEvent> {
        if self.state.status != GameStatus::Playing {
            return Vec::new();
        }
        self.advance_patrols(dt);
        let TickOutcome { player, events } =
            self.engine
                .step(&self.state.player, input, dt, &mut self.entities);
        self.state.player = player;
        for event in &events {
            self.apply(event);
        }
        events
    }

    fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::CoinCollected { label } => {
                self.state.score += COIN_SCORE;
                if let Some(label) = label {
                    log::info!("coin '{}' collected, score {}", label, self.state.score);
                }
            }
            GameEvent::InfoHit { content_id } => {
                if self.state.status != GameStatus::Playing {
                    return;
                }
                // Opening the panel stops the tick loop, which is also the
                // debounce: the block only re-fires after dismissal.
                let lore = self
                    .levels
                    .get(self.state.level_index)
                    .and_then(|level| level.lore(content_id));
                match lore {
                    Some(content) => {
                        self.state.story_message = Some(content.full_text.clone());
                        self.state.status = GameStatus::Reading;
                    }
                    None => {
                        log::warn!("info block references unknown content '{}'", content_id)
                    }
                }
            }
            GameEvent::LevelComplete => {
                if self.state.status == GameStatus::Playing {
                    log::info!("level complete, score {}", self.state.score);
                    self.state.status = GameStatus::LevelComplete;
                }
            }
            GameEvent::Death => {
                // The engine already reset the player; score is preserved.
                log::info!("player died, respawning");
            }
        }
    }

    /// Reading -> Playing
    pub fn dismiss_story(&mut self) {
        if self.state.status == GameStatus::Reading {
            self.state.story_message = None;
            self.state.status = GameStatus::Playing;
        }
    }

    /// Playing -> Paused
    pub fn pause(&mut self) {
        if self.state.status == GameStatus::Playing {
            self.state.status = GameStatus::Paused;
        }
    }

    /// Paused -> Playing
    pub fn resume(&mut self) {
        if self.state.status == GameStatus::Paused {
            self.state.status = GameStatus::Playing;
        }
    }

    /// After LevelComplete: load the next level, or return to the menu when
    /// the campaign is exhausted. Returns true when another level started.
    pub fn advance_level(&mut self) -> bool {
        if self.state.status != GameStatus::LevelComplete {
            return false;
        }
        let next = self.state.level_index + 1;
        if next < self.levels.len() {
            self.load_level(next);
            self.state.status = GameStatus::Playing;
            true
        } else {
            log::info!("campaign finished with score {}", self.state.score);
            self.state.status = GameStatus::Menu;
            false
        }
    }

    /// Reload the current level template and zero the score
    pub fn restart_level(&mut self) {
        if self.state.status == GameStatus::Menu {
            return;
        }
        self.state.score = 0;
        self.load_level(self.state.level_index);
        self.state.status = GameStatus::Playing;
    }

    /// Host-side enemy movement: shuttle each patrolling enemy between its
    /// range bounds. The physics step itself never reads patrol data.
    fn advance_patrols(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let speed = PATROL_TILES_PER_SEC * self.engine.config().tile_size;
        for entity in &mut self.entities {
            if entity.kind != EntityKind::Enemy {
                continue;
            }
            let Some(patrol) = &mut entity.patrol else {
                continue;
            };
            entity.pos.x += patrol.dir * speed * dt;
            if entity.pos.x >= patrol.end {
                entity.pos.x = patrol.end;
                patrol.dir = -1.0;
            } else if entity.pos.x <= patrol.start {
                entity.pos.x = patrol.start;
                patrol.dir = 1.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::{LevelContent, LevelTheme};
    use crate::sim::Patrol;
    use glam::Vec2;
    use std::collections::HashMap;

    const DT: f32 = 1.0 / 60.0;

    fn entity(id: &str, kind: EntityKind, x: f32, y: f32, w: f32, h: f32) -> Entity {
        Entity {
            id: id.to_string(),
            kind,
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            label: None,
            content_id: None,
            patrol: None,
        }
    }

    fn level(id: u32, entities: Vec<Entity>) -> LevelConfig {
        LevelConfig {
            id,
            name: format!("test-{id}"),
            description: String::new(),
            theme: LevelTheme {
                background: 0,
                platform: 0,
                accent: 0,
            },
            entities,
            content: HashMap::from([(
                "waymark".to_string(),
                LevelContent {
                    id: "waymark".to_string(),
                    title: "The Waymarks".to_string(),
                    short_text: "short".to_string(),
                    full_text: "full".to_string(),
                },
            )]),
        }
    }

    fn session(levels: Vec<LevelConfig>) -> GameSession {
        GameSession::new(GameConfig::default(), levels)
    }

    #[test]
    fn test_start_loads_first_level() {
        let mut s = session(vec![level(1, vec![entity("p", EntityKind::Platform, 0.0, 520.0, 400.0, 40.0)])]);
        assert_eq!(s.state().status, GameStatus::Menu);

        s.start();
        assert_eq!(s.state().status, GameStatus::Playing);
        assert_eq!(s.entities().len(), 1);
        assert_eq!(s.state().score, 0);
        assert_eq!(s.state().player.pos, Vec2::new(80.0, 400.0));
    }

    #[test]
    fn test_tick_is_noop_outside_playing() {
        let mut s = session(vec![level(1, Vec::new())]);
        let before = s.state().clone();
        let events = s.tick(&InputState::default(), DT);
        assert!(events.is_empty());
        assert_eq!(*s.state(), before);
    }

    #[test]
    fn test_coin_increments_score() {
        let mut coin = entity("c", EntityKind::Coin, 80.0, 400.0, 32.0, 32.0);
        coin.label = Some("SPARK".to_string());
        let mut s = session(vec![level(1, vec![coin])]);
        s.start();

        s.tick(&InputState::default(), DT);
        assert_eq!(s.state().score, 100);
    }

    #[test]
    fn test_info_opens_reading_and_dismisses() {
        let mut info = entity("i", EntityKind::Info, 80.0, 400.0, 40.0, 40.0);
        info.content_id = Some("waymark".to_string());
        let mut s = session(vec![level(1, vec![info])]);
        s.start();

        s.tick(&InputState::default(), DT);
        assert_eq!(s.state().status, GameStatus::Reading);
        assert_eq!(s.state().story_message.as_deref(), Some("full"));

        // Reading halts the simulation entirely
        assert!(s.tick(&InputState::default(), DT).is_empty());

        s.dismiss_story();
        assert_eq!(s.state().status, GameStatus::Playing);
        assert!(s.state().story_message.is_none());
    }

    #[test]
    fn test_unknown_lore_keeps_playing() {
        let mut info = entity("i", EntityKind::Info, 80.0, 400.0, 40.0, 40.0);
        info.content_id = Some("nope".to_string());
        let mut s = session(vec![level(1, vec![info])]);
        s.start();

        s.tick(&InputState::default(), DT);
        assert_eq!(s.state().status, GameStatus::Playing);
        assert!(s.state().story_message.is_none());
    }

    #[test]
    fn test_flag_completes_and_advances() {
        let flag = entity("f", EntityKind::Flag, 80.0, 320.0, 40.0, 160.0);
        let mut s = session(vec![level(1, vec![flag.clone()]), level(2, vec![flag])]);
        s.start();

        s.tick(&InputState::default(), DT);
        assert_eq!(s.state().status, GameStatus::LevelComplete);

        assert!(s.advance_level());
        assert_eq!(s.state().status, GameStatus::Playing);
        assert_eq!(s.state().level_index, 1);

        // Finish the second (last) level: back to the menu
        s.tick(&InputState::default(), DT);
        assert!(!s.advance_level());
        assert_eq!(s.state().status, GameStatus::Menu);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut s = session(vec![level(1, Vec::new())]);
        s.start();

        s.pause();
        assert_eq!(s.state().status, GameStatus::Paused);
        assert!(s.tick(&InputState::default(), DT).is_empty());

        s.resume();
        assert_eq!(s.state().status, GameStatus::Playing);
    }

    #[test]
    fn test_death_preserves_score() {
        let mut coin = entity("c", EntityKind::Coin, 80.0, 400.0, 32.0, 32.0);
        coin.label = Some("SPARK".to_string());
        // No floor: the player collects the coin, then falls out of the world
        let mut s = session(vec![level(1, vec![coin])]);
        s.start();

        let mut died = false;
        for _ in 0..2000 {
            let events = s.tick(&InputState::default(), DT);
            if events.contains(&GameEvent::Death) {
                died = true;
                break;
            }
        }
        assert!(died);
        assert_eq!(s.state().score, 100);
        assert_eq!(s.state().player.pos, Vec2::new(80.0, 400.0));
    }

    #[test]
    fn test_patrol_reverses_at_bounds() {
        let mut enemy = entity("e", EntityKind::Enemy, 1180.0, 480.0, 40.0, 40.0);
        enemy.patrol = Some(Patrol {
            start: 1120.0,
            end: 1200.0,
            dir: 1.0,
        });
        // Keep the enemy far from the spawn so the player never touches it
        let mut s = session(vec![level(1, vec![enemy])]);
        s.start();

        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;
        let mut saw_leftward = false;
        for _ in 0..240 {
            s.tick(&InputState::default(), DT);
            if s.state().status != GameStatus::Playing {
                break;
            }
            let e = &s.entities()[0];
            min_x = min_x.min(e.pos.x);
            max_x = max_x.max(e.pos.x);
            if let Some(p) = &e.patrol {
                if p.dir < 0.0 {
                    saw_leftward = true;
                }
            }
        }
        assert!(saw_leftward);
        assert!(min_x >= 1120.0);
        assert!(max_x <= 1200.0);
    }
}
