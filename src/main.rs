//! Tile Quest headless demo
//!
//! Drives the built-in campaign at a fixed 60 Hz with scripted input and
//! logs the events a UI layer would react to. Rendering and real input
//! belong to the embedding shell, not this crate.

use tile_quest::levels;
use tile_quest::session::{GameSession, GameStatus};
use tile_quest::sim::{GameConfig, GameEvent, InputState};

const DT: f32 = 1.0 / 60.0;
const MAX_TICKS: u32 = 60 * 60; // one minute of simulated time

fn main() {
    env_logger::init();

    let config = GameConfig::default();
    let mut session = GameSession::new(config, levels::campaign(&config));
    session.start();
    log::info!("campaign started");

    // Scripted input: hold right, hop whenever grounded.
    let mut deaths = 0u32;
    let mut max_x = 0.0f32;
    let mut ticks = 0u32;
    while ticks < MAX_TICKS {
        match session.state().status {
            GameStatus::Playing => {
                let input = InputState {
                    move_dir: 1,
                    jump: session.state().player.on_ground,
                };
                let events = session.tick(&input, DT);
                deaths += events.iter().filter(|e| **e == GameEvent::Death).count() as u32;
                max_x = max_x.max(session.state().player.pos.x);
                ticks += 1;
            }
            GameStatus::Reading => session.dismiss_story(),
            GameStatus::LevelComplete => {
                if !session.advance_level() {
                    break;
                }
            }
            GameStatus::Menu | GameStatus::Paused => break,
        }
    }

    let state = session.state();
    println!(
        "simulated {:.1}s: status {:?}, level index {}, score {}, deaths {}, farthest x {:.0}",
        ticks as f32 * DT,
        state.status,
        state.level_index,
        state.score,
        deaths,
        max_x
    );
}
