//! Core simulation: ship input, asteroid spawning, collision, session state
//!
//! One `update` advances the simulation a single tick; one `render`
//! assembles the frame's draw list from already-computed transforms. All
//! pool mutation happens inside `update`, so the render path only ever
//! reads settled state.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use star_engine::foundation::math::utils;
use star_engine::prelude::*;

use crate::config::GameConfig;
use crate::objects::GameObject;

/// Clear color while the session is live
const PLAYING_CLEAR: [f32; 4] = [0.1, 0.1, 0.2, 1.0];

/// Clear color after a collision
const GAME_OVER_CLEAR: [f32; 4] = [0.5, 0.1, 0.1, 1.0];

/// Session lifecycle. `GameOver` is terminal: no simulation state mutates
/// after the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Simulation running
    Playing,
    /// A collision ended the session
    GameOver,
}

/// The whole game state for one session
pub struct Game {
    config: GameConfig,
    state: SessionState,
    quit_requested: bool,

    ship: GameObject,
    walls: Vec<GameObject>,
    asteroids: Vec<GameObject>,
    asteroid_mesh: Mesh,

    camera: OrbitCamera,
    spawn_timer: f32,
    rng: StdRng,
}

impl Game {
    /// Create a session with an entropy-seeded spawner
    pub fn new(config: GameConfig, backend: &mut dyn RenderBackend) -> Self {
        Self::with_rng(config, backend, StdRng::from_entropy())
    }

    /// Create a session with a caller-provided RNG (deterministic in tests)
    pub fn with_rng(config: GameConfig, backend: &mut dyn RenderBackend, rng: StdRng) -> Self {
        let ship_mesh = match ObjLoader::load_obj(&config.ship.model_path) {
            Ok(mesh) => mesh,
            Err(error) => {
                log::error!("failed to load ship model: {error}");
                Mesh::default()
            }
        };
        let ship_visual =
            backend.create_visual(&ship_mesh, Some(Path::new(&config.ship.texture_path)));
        let ship = GameObject::new(
            SpatialObject::new(
                Vec3::zeros(),
                Vec3::new(
                    utils::deg_to_rad(config.ship.initial_pitch_degrees),
                    utils::deg_to_rad(config.ship.initial_yaw_degrees),
                    0.0,
                ),
                Vec3::new(config.ship.scale, config.ship.scale, config.ship.scale),
            ),
            ship_visual,
        );

        let walls = Self::build_skybox(&config, backend);

        let camera = OrbitCamera::new(
            OrbitParams {
                distance: config.camera.distance,
                height_offset: config.camera.height_offset,
                initial_pitch_degrees: config.camera.initial_pitch_degrees,
                pitch_sensitivity: config.camera.pitch_sensitivity,
                yaw_sensitivity: config.camera.yaw_sensitivity,
                fov_degrees: config.camera.fov_degrees,
                near: config.camera.near,
                far: config.camera.far,
            },
            config.window.width,
            config.window.height,
        );

        log::info!("session started");
        Self {
            config,
            state: SessionState::Playing,
            quit_requested: false,
            ship,
            walls,
            asteroids: Vec::new(),
            asteroid_mesh: Mesh::cube(),
            camera,
            spawn_timer: 0.0,
            rng,
        }
    }

    /// Six quad walls forming a cubic room around the play area
    fn build_skybox(config: &GameConfig, backend: &mut dyn RenderBackend) -> Vec<GameObject> {
        let size = config.world.skybox_size;
        let half = size / 2.0;
        let quad = Mesh::quad();
        let texture = Path::new(&config.world.skybox_texture_path);
        let wall_scale = Vec3::new(size, size, 1.0);

        // (position, rotation in degrees) per wall, each facing inward
        let placements: [(Vec3, Vec3); 6] = [
            (Vec3::new(0.0, 0.0, -half), Vec3::new(0.0, 0.0, 0.0)),
            (Vec3::new(0.0, 0.0, half), Vec3::new(0.0, 180.0, 0.0)),
            (Vec3::new(-half, 0.0, 0.0), Vec3::new(0.0, 90.0, 0.0)),
            (Vec3::new(half, 0.0, 0.0), Vec3::new(0.0, -90.0, 0.0)),
            (Vec3::new(0.0, half, 0.0), Vec3::new(-90.0, 0.0, 0.0)),
            (Vec3::new(0.0, -half, 0.0), Vec3::new(90.0, 0.0, 0.0)),
        ];

        placements
            .into_iter()
            .map(|(position, rotation_degrees)| {
                let rotation = rotation_degrees.map(utils::deg_to_rad);
                let visual = backend.create_visual(&quad, Some(texture));
                GameObject::new(SpatialObject::new(position, rotation, wall_scale), visual)
            })
            .collect()
    }

    /// Advance the simulation one tick.
    ///
    /// Frame order: quit check, ship input integration, camera follow,
    /// spawn-timer catch-up, per-asteroid motion/despawn/collision. Once the
    /// session is over this is a no-op.
    pub fn update(&mut self, delta_time: f32, input: &InputState, backend: &mut dyn RenderBackend) {
        if self.state == SessionState::GameOver {
            return;
        }

        if input.is_down(Key::Quit) {
            log::info!("quit requested");
            self.quit_requested = true;
            return;
        }

        self.integrate_ship(delta_time, input);

        let (pointer_x, pointer_y) = input.pointer();
        self.camera.on_pointer_move(pointer_x, pointer_y);
        self.camera.update(Some(&self.ship.spatial));

        self.spawn_timer += delta_time;
        while self.spawn_timer >= self.config.asteroids.spawn_interval {
            self.spawn_timer -= self.config.asteroids.spawn_interval;
            self.spawn_asteroid(backend);
        }

        self.advance_asteroids(delta_time, backend);
    }

    /// Move the ship along its basis vectors, each axis gated by a pre-move
    /// bound check. Checking before the move means the ship can overshoot
    /// the bound by one frame's step; the next frame's check then blocks it.
    fn integrate_ship(&mut self, delta_time: f32, input: &InputState) {
        let bound = self.config.ship.bound;
        let step = self.config.ship.move_speed * delta_time;
        let up = self.ship.spatial.up();
        let right = self.ship.spatial.right();
        let position = &mut self.ship.spatial.position;

        if input.is_down(Key::Forward) && position.z >= -bound {
            *position -= up * step;
        }
        if input.is_down(Key::Back) && position.z <= bound {
            *position += up * step;
        }
        if input.is_down(Key::Left) && position.x >= -bound {
            *position -= right * step;
        }
        if input.is_down(Key::Right) && position.x <= bound {
            *position += right * step;
        }
    }

    /// Spawn one asteroid at a random position above the play area
    fn spawn_asteroid(&mut self, backend: &mut dyn RenderBackend) {
        let cfg = &self.config.asteroids;

        let x = (self.rng.gen::<f32>() * 2.0 - 1.0) * cfg.spawn_range_x;
        let z = (self.rng.gen::<f32>() * 2.0 - 1.0) * cfg.spawn_range_z;
        let position = Vec3::new(x, cfg.spawn_height, z);

        let rotation = Vec3::new(
            self.rng.gen::<f32>() * std::f32::consts::TAU,
            self.rng.gen::<f32>() * std::f32::consts::TAU,
            self.rng.gen::<f32>() * std::f32::consts::TAU,
        );

        let scale_factor = cfg.min_scale + self.rng.gen::<f32>() * (cfg.max_scale - cfg.min_scale);
        let scale = Vec3::new(scale_factor, scale_factor, scale_factor);

        let visual = backend.create_visual(&self.asteroid_mesh, Some(Path::new(&cfg.texture_path)));
        self.asteroids.push(GameObject::new(
            SpatialObject::new(position, rotation, scale),
            visual,
        ));
        log::debug!("spawned asteroid at {position:?}, {} active", self.asteroids.len());
    }

    /// Per-asteroid motion, despawn culling, and collision detection.
    ///
    /// Fall speed is re-sampled per asteroid per frame, giving the speed
    /// jitter the game tuned around. Iteration runs back to front so removal
    /// is safe in place; the first collision ends the session and stops
    /// further processing.
    fn advance_asteroids(&mut self, delta_time: f32, backend: &mut dyn RenderBackend) {
        let cfg = &self.config.asteroids;
        let tumble = Vec3::new(
            utils::deg_to_rad(cfg.rotate_speed_degrees[0]),
            utils::deg_to_rad(cfg.rotate_speed_degrees[1]),
            utils::deg_to_rad(cfg.rotate_speed_degrees[2]),
        );
        let radii_sum = self.config.ship.bounding_radius + cfg.bounding_radius;
        let radii_sum_sq = radii_sum * radii_sum;
        let ship_position = self.ship.spatial.position;

        for i in (0..self.asteroids.len()).rev() {
            let fall_speed = (self.rng.gen::<f32>() + 0.5) * cfg.fall_speed_scale;
            let asteroid = &mut self.asteroids[i];
            asteroid.spatial.position.y -= fall_speed * delta_time;
            asteroid.spatial.rotation += tumble * delta_time;

            if asteroid.spatial.position.y < cfg.despawn_height {
                let mut culled = self.asteroids.remove(i);
                culled.release(backend);
                continue;
            }

            let distance_sq = (ship_position - asteroid.spatial.position).norm_squared();
            if distance_sq < radii_sum_sq {
                log::info!(
                    "collision at distance {:.2}, session over",
                    distance_sq.sqrt()
                );
                self.state = SessionState::GameOver;
                break;
            }
        }
    }

    /// Assemble the frame: scene objects first, background walls last. After
    /// game over only the failure clear color is presented.
    pub fn render(&self) -> FrameData {
        let view = self.camera.view_matrix();
        let projection = self.camera.projection_matrix();

        if self.state == SessionState::GameOver {
            return FrameData {
                clear_color: GAME_OVER_CLEAR,
                view,
                projection,
                draws: Vec::new(),
            };
        }

        let mut draws = Vec::with_capacity(1 + self.asteroids.len() + self.walls.len());
        draws.extend(self.ship.draw_command(false));
        draws.extend(
            self.asteroids
                .iter()
                .filter_map(|asteroid| asteroid.draw_command(false)),
        );
        draws.extend(self.walls.iter().filter_map(|wall| wall.draw_command(true)));

        FrameData {
            clear_color: PLAYING_CLEAR,
            view,
            projection,
            draws,
        }
    }

    /// Update the camera aspect ratio from new viewport dimensions
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.camera
            .set_aspect_ratio(width as f32 / height.max(1) as f32);
    }

    /// Whether a collision has ended the session
    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    /// Whether the player asked to quit
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Number of live asteroids
    pub fn asteroid_count(&self) -> usize {
        self.asteroids.len()
    }

    /// Ship world position
    pub fn ship_position(&self) -> Vec3 {
        self.ship.spatial.position
    }

    /// Release all render resources at scene teardown
    pub fn shutdown(&mut self, backend: &mut dyn RenderBackend) {
        self.ship.release(backend);
        for wall in &mut self.walls {
            wall.release(backend);
        }
        for asteroid in &mut self.asteroids {
            asteroid.release(backend);
        }
        self.asteroids.clear();
        log::info!("session resources released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use approx::assert_relative_eq;

    /// Config with spawning and falling disabled so tests can stage the
    /// field precisely
    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.asteroids.spawn_interval = 1_000_000.0;
        config.asteroids.fall_speed_scale = 0.0;
        config.asteroids.rotate_speed_degrees = [0.0, 0.0, 0.0];
        config
    }

    fn game_with(config: GameConfig, backend: &mut HeadlessBackend) -> Game {
        Game::with_rng(config, backend, StdRng::seed_from_u64(7))
    }

    fn place_asteroid(game: &mut Game, backend: &mut HeadlessBackend, position: Vec3) {
        let visual = backend.create_visual(&Mesh::cube(), None);
        game.asteroids.push(GameObject::new(
            SpatialObject::new(position, Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)),
            visual,
        ));
    }

    #[test]
    fn test_spawn_timer_catches_up_after_slow_frame() {
        let mut backend = HeadlessBackend::new();
        let mut config = quiet_config();
        config.asteroids.spawn_interval = 2.0;
        let mut game = game_with(config, &mut backend);

        // One slow frame of 2.5 intervals spawns exactly twice and keeps the
        // remainder
        game.update(5.0, &InputState::new(), &mut backend);
        assert_eq!(game.asteroid_count(), 2);
        assert_relative_eq!(game.spawn_timer, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_collision_inside_radii_sum_ends_session() {
        let mut backend = HeadlessBackend::new();
        let mut config = quiet_config();
        config.ship.bounding_radius = 1.0;
        config.asteroids.bounding_radius = 1.0;
        let mut game = game_with(config, &mut backend);

        place_asteroid(&mut game, &mut backend, Vec3::new(0.0, 0.0, 1.5));
        assert!(!game.is_game_over());

        game.update(0.001, &InputState::new(), &mut backend);
        assert!(game.is_game_over());
    }

    #[test]
    fn test_no_collision_outside_radii_sum() {
        let mut backend = HeadlessBackend::new();
        let mut config = quiet_config();
        config.ship.bounding_radius = 1.0;
        config.asteroids.bounding_radius = 1.0;
        let mut game = game_with(config, &mut backend);

        place_asteroid(&mut game, &mut backend, Vec3::new(0.0, 0.0, 2.5));
        game.update(0.001, &InputState::new(), &mut backend);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_asteroid_below_despawn_height_is_removed() {
        let mut backend = HeadlessBackend::new();
        let mut game = game_with(quiet_config(), &mut backend);

        place_asteroid(&mut game, &mut backend, Vec3::new(50.0, -60.0, 50.0));
        let destroyed_before = backend.destroyed();

        game.update(0.001, &InputState::new(), &mut backend);
        assert_eq!(game.asteroid_count(), 0);
        assert_eq!(backend.destroyed(), destroyed_before + 1);

        // The culled asteroid never reappears in a render list
        let frame = game.render();
        let scene_draws = frame.draws.iter().filter(|d| !d.background).count();
        assert_eq!(scene_draws, 1); // ship only
    }

    #[test]
    fn test_despawned_asteroid_is_not_collision_tested() {
        let mut backend = HeadlessBackend::new();
        let mut config = quiet_config();
        // Despawn threshold above the ship: an asteroid passing both
        // criteria must despawn, not collide
        config.asteroids.despawn_height = 1.0;
        config.ship.bounding_radius = 10.0;
        config.asteroids.bounding_radius = 10.0;
        let mut game = game_with(config, &mut backend);

        place_asteroid(&mut game, &mut backend, Vec3::new(0.0, 0.5, 0.0));
        game.update(0.001, &InputState::new(), &mut backend);
        assert_eq!(game.asteroid_count(), 0);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_ship_moves_right_along_x() {
        let mut backend = HeadlessBackend::new();
        let mut game = game_with(quiet_config(), &mut backend);

        let input = InputState::new().with_key(Key::Right);
        game.update(1.0, &input, &mut backend);
        // move_speed 25 for 1s along the right basis vector, which is +X for
        // the default ship orientation
        assert_relative_eq!(game.ship_position().x, 25.0, epsilon = 1e-3);
    }

    #[test]
    fn test_bound_is_checked_before_the_move() {
        let mut backend = HeadlessBackend::new();
        let mut config = quiet_config();
        config.ship.move_speed = 50.0;
        let mut game = game_with(config, &mut backend);
        game.ship.spatial.position.x = 99.9;

        // Pre-move position is inside the bound, so the step applies even
        // though it overshoots
        let input = InputState::new().with_key(Key::Right);
        game.update(1.0, &input, &mut backend);
        assert!(game.ship_position().x > 100.0);

        // Now the pre-move check blocks further movement
        let blocked_at = game.ship_position().x;
        game.update(1.0, &input, &mut backend);
        assert_relative_eq!(game.ship_position().x, blocked_at, epsilon = 1e-4);
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut backend = HeadlessBackend::new();
        let mut config = quiet_config();
        config.ship.bounding_radius = 1.0;
        config.asteroids.bounding_radius = 1.0;
        let mut game = game_with(config, &mut backend);

        place_asteroid(&mut game, &mut backend, Vec3::new(0.0, 0.0, 1.5));
        game.update(0.001, &InputState::new(), &mut backend);
        assert!(game.is_game_over());

        // Further updates mutate nothing: no spawns, no movement
        let asteroids = game.asteroid_count();
        let ship = game.ship_position();
        let input = InputState::new().with_key(Key::Right);
        game.update(10.0, &input, &mut backend);
        assert_eq!(game.asteroid_count(), asteroids);
        assert_eq!(game.ship_position(), ship);
    }

    #[test]
    fn test_game_over_frame_has_failure_clear_and_no_draws() {
        let mut backend = HeadlessBackend::new();
        let mut config = quiet_config();
        config.ship.bounding_radius = 1.0;
        config.asteroids.bounding_radius = 1.0;
        let mut game = game_with(config, &mut backend);

        let frame = game.render();
        assert_eq!(frame.clear_color, PLAYING_CLEAR);
        // 1 ship + 6 skybox walls
        assert_eq!(frame.draws.len(), 7);

        place_asteroid(&mut game, &mut backend, Vec3::zeros());
        game.update(0.001, &InputState::new(), &mut backend);

        let frame = game.render();
        assert_eq!(frame.clear_color, GAME_OVER_CLEAR);
        assert!(frame.draws.is_empty());
    }

    #[test]
    fn test_quit_request_passes_through() {
        let mut backend = HeadlessBackend::new();
        let mut game = game_with(quiet_config(), &mut backend);

        assert!(!game.quit_requested());
        let input = InputState::new().with_key(Key::Quit);
        game.update(0.016, &input, &mut backend);
        assert!(game.quit_requested());
    }

    #[test]
    fn test_shutdown_releases_every_visual() {
        let mut backend = HeadlessBackend::new();
        let mut game = game_with(quiet_config(), &mut backend);
        place_asteroid(&mut game, &mut backend, Vec3::new(10.0, 10.0, 10.0));

        game.shutdown(&mut backend);
        assert_eq!(backend.live_visuals(), 0);
    }

    #[test]
    fn test_spawned_asteroids_land_in_configured_ranges() {
        let mut backend = HeadlessBackend::new();
        let mut config = quiet_config();
        config.asteroids.spawn_interval = 0.125;
        config.asteroids.spawn_range_x = 200.0;
        config.asteroids.spawn_range_z = 200.0;
        let mut game = game_with(config, &mut backend);

        game.update(2.5, &InputState::new(), &mut backend);
        assert_eq!(game.asteroid_count(), 20);
        for asteroid in &game.asteroids {
            let position = asteroid.spatial.position;
            assert!(position.x.abs() <= 200.0);
            assert!(position.z.abs() <= 200.0);
            assert_eq!(position.y, 300.0);
            let scale = asteroid.spatial.scale.x;
            assert!((1.0..=4.0).contains(&scale));
        }
    }
}
