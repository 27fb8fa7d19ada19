//! Starfall: dodge falling asteroids in a third-person orbit view.
//!
//! This binary runs the full simulation headlessly with a scripted pilot —
//! a stand-in for the platform/render collaborator that would normally own
//! the window, the real keyboard, and the GPU.

mod config;
mod game;
mod game_loop;
mod objects;

use star_engine::prelude::*;

use crate::config::GameConfig;
use crate::game::Game;
use crate::game_loop::GameLoop;

/// Demo session length in frames (the scripted pilot quits afterwards)
const DEMO_FRAMES: u64 = 600;

fn main() {
    star_engine::foundation::logging::init();

    let config = match GameConfig::load_or_default("starfall.toml") {
        Ok(config) => config,
        Err(error) => {
            log::error!("could not load configuration: {error}");
            std::process::exit(1);
        }
    };

    let mut backend = HeadlessBackend::new();
    let game = Game::new(config, &mut backend);
    let mut game_loop = GameLoop::new(game, backend);
    game_loop.on_resize(1280, 720);

    // Scripted pilot: strafe one way, then the other, then call it a run
    game_loop.run(|frame| {
        let mut input = InputState::new();
        match frame {
            0..=199 => input.press(Key::Right),
            200..=399 => {
                input.press(Key::Left);
                input.press(Key::Forward);
            }
            400..=DEMO_FRAMES => input.press(Key::Back),
            _ => input.press(Key::Quit),
        }
        input.set_pointer(frame as f32 * 0.5, 360.0);
        input
    });

    let game = game_loop.game();
    if game.is_game_over() {
        log::info!("session ended in a collision at {:?}", game.ship_position());
    } else {
        log::info!(
            "session ended by request with {} asteroids in flight ({} frames presented)",
            game.asteroid_count(),
            game_loop.backend().frames_presented()
        );
    }
}
