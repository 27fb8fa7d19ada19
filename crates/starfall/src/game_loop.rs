//! Session driver
//!
//! Owns the game, the frame clock, and the render backend, and wires them
//! together through the update/render/resize contract. The platform side
//! supplies input snapshots per tick; the driver never reaches around the
//! game into simulation state.

use star_engine::prelude::*;

use crate::game::Game;

/// Composition-based game loop: one update phase then one render phase per
/// frame, until the session ends
pub struct GameLoop<B: RenderBackend> {
    game: Game,
    backend: B,
    timer: Timer,
}

impl<B: RenderBackend> GameLoop<B> {
    /// Build a driver around an already-created game and backend
    pub fn new(game: Game, backend: B) -> Self {
        Self {
            game,
            backend,
            timer: Timer::new(),
        }
    }

    /// Run frames until the player quits or the session ends in a collision.
    ///
    /// `input_source` is polled once per frame with the frame number; a real
    /// platform binding would snapshot the keyboard and pointer here. The
    /// final game-over frame is still presented before the loop exits.
    pub fn run<F>(&mut self, mut input_source: F)
    where
        F: FnMut(u64) -> InputState,
    {
        log::info!("starting main loop");

        loop {
            self.timer.update();
            let input = input_source(self.timer.frame_count());

            self.game
                .update(self.timer.delta_time(), &input, &mut self.backend);
            let frame = self.game.render();
            self.backend.present(&frame);

            if self.game.quit_requested() || self.game.is_game_over() {
                break;
            }
        }

        self.game.shutdown(&mut self.backend);
        log::info!(
            "loop finished after {} frames ({:.1} avg fps)",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
    }

    /// Forward a viewport resize to the camera
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.game.on_resize(width, height);
    }

    /// The driven game
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The owned backend
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
