//! Game configuration
//!
//! Every gameplay constant lives here under a named field instead of being
//! scattered through the simulation. Values load from a TOML file when one
//! is present and fall back to the built-in defaults otherwise.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file existed but could not be read
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The file existed but was not valid TOML for [`GameConfig`]
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level game configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window settings
    pub window: WindowConfig,

    /// Player ship settings
    pub ship: ShipConfig,

    /// Asteroid field settings
    pub asteroids: AsteroidConfig,

    /// Orbit camera settings
    pub camera: CameraConfig,

    /// World/background settings
    pub world: WorldConfig,
}

/// Window settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width in pixels
    pub width: u32,

    /// Window height in pixels
    pub height: u32,
}

/// Player ship settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Path to the ship OBJ model
    pub model_path: String,

    /// Path to the ship texture
    pub texture_path: String,

    /// Movement speed in units per second
    pub move_speed: f32,

    /// Half-width of the play area; movement on X and Z is pre-checked
    /// against this bound
    pub bound: f32,

    /// Sphere radius for collision tests
    pub bounding_radius: f32,

    /// Uniform model scale
    pub scale: f32,

    /// Initial pitch in degrees (model correction for the ship mesh)
    pub initial_pitch_degrees: f32,

    /// Initial yaw in degrees
    pub initial_yaw_degrees: f32,
}

/// Asteroid field settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    /// Path to the asteroid texture
    pub texture_path: String,

    /// Seconds between spawns
    pub spawn_interval: f32,

    /// Y coordinate asteroids appear at
    pub spawn_height: f32,

    /// Half-range of random spawn X
    pub spawn_range_x: f32,

    /// Half-range of random spawn Z
    pub spawn_range_z: f32,

    /// Y coordinate below which an asteroid despawns
    pub despawn_height: f32,

    /// Fall speed scale in units per second; each asteroid's actual speed is
    /// re-sampled every frame in (0.5..1.5) times this value
    pub fall_speed_scale: f32,

    /// Minimum uniform spawn scale
    pub min_scale: f32,

    /// Maximum uniform spawn scale
    pub max_scale: f32,

    /// Sphere radius for collision tests, before scaling is ignored — a
    /// shared gameplay tuning constant, not a tight bound
    pub bounding_radius: f32,

    /// Cosmetic tumble speed in degrees per second per axis
    pub rotate_speed_degrees: [f32; 3],
}

/// Orbit camera settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Orbit radius from the ship
    pub distance: f32,

    /// Vertical look-at offset above the ship
    pub height_offset: f32,

    /// Initial vertical orbit angle in degrees
    pub initial_pitch_degrees: f32,

    /// Vertical orbit sensitivity in radians per pixel
    pub pitch_sensitivity: f32,

    /// Horizontal orbit sensitivity in radians per pixel
    pub yaw_sensitivity: f32,

    /// Vertical field of view in degrees
    pub fov_degrees: f32,

    /// Near clipping plane
    pub near: f32,

    /// Far clipping plane; must exceed the skybox corner distance
    pub far: f32,
}

/// World/background settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Edge length of the cubic skybox room
    pub skybox_size: f32,

    /// Path to the skybox wall texture
    pub skybox_texture_path: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Starfall".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            model_path: "resources/models/ship.obj".to_string(),
            texture_path: "resources/textures/ship.png".to_string(),
            move_speed: 25.0,
            bound: 100.0,
            bounding_radius: 2.0,
            scale: 0.2,
            initial_pitch_degrees: 90.0,
            initial_yaw_degrees: 180.0,
        }
    }
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            texture_path: "resources/textures/asteroid.jpg".to_string(),
            spawn_interval: 0.25,
            spawn_height: 300.0,
            spawn_range_x: 200.0,
            spawn_range_z: 200.0,
            despawn_height: -50.0,
            fall_speed_scale: 100.0,
            min_scale: 1.0,
            max_scale: 4.0,
            bounding_radius: 0.8,
            rotate_speed_degrees: [1500.0, 2500.0, 500.0],
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 3.0,
            height_offset: 0.25,
            initial_pitch_degrees: -50.0,
            pitch_sensitivity: 0.005,
            yaw_sensitivity: 0.005,
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            skybox_size: 1000.0,
            skybox_texture_path: "resources/textures/space.jpg".to_string(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist. A present-but-malformed file is an error
    /// rather than a silent fallback.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = GameConfig::default();
        assert!(config.asteroids.spawn_interval > 0.0);
        assert!(config.asteroids.min_scale <= config.asteroids.max_scale);
        assert!(config.asteroids.spawn_height > config.asteroids.despawn_height);
        assert!(config.camera.near < config.camera.far);
        // Far plane covers the skybox corners
        let half = config.world.skybox_size / 2.0;
        assert!(config.camera.far >= half * 3f32.sqrt());
    }

    #[test]
    fn test_partial_toml_overrides_single_field() {
        let config: GameConfig = toml::from_str(
            "[ship]\nmove_speed = 40.0\n\n[asteroids]\nspawn_interval = 0.5\n",
        )
        .unwrap();
        assert_eq!(config.ship.move_speed, 40.0);
        assert_eq!(config.asteroids.spawn_interval, 0.5);
        // Untouched sections keep their defaults
        assert_eq!(config.ship.bound, 100.0);
        assert_eq!(config.camera.distance, 3.0);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_or_default("no/such/starfall.toml").unwrap();
        assert_eq!(config.window.title, "Starfall");
    }
}
