//! Third-person orbit camera
//!
//! The camera rides a sphere of fixed radius around a followed object. The
//! horizontal orbit angle is the sum of the target's own yaw and a
//! pointer-driven offset, so turning the ship re-orients the default
//! "behind" direction while the player can still look around freely. Pitch
//! is clamped short of the poles to avoid gimbal flip.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec2, Vec3};
use crate::scene::spatial::SpatialObject;

/// Tunable orbit camera parameters
#[derive(Debug, Clone)]
pub struct OrbitParams {
    /// Fixed radius from the target
    pub distance: f32,

    /// Vertical offset applied to the look-at point (not the camera position)
    pub height_offset: f32,

    /// Initial vertical orbit angle in degrees
    pub initial_pitch_degrees: f32,

    /// Vertical orbit sensitivity in radians per pixel
    pub pitch_sensitivity: f32,

    /// Horizontal orbit sensitivity in radians per pixel
    pub yaw_sensitivity: f32,

    /// Vertical field of view in degrees
    pub fov_degrees: f32,

    /// Near clipping plane distance
    pub near: f32,

    /// Far clipping plane distance
    pub far: f32,
}

impl Default for OrbitParams {
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

/// Pitch clamp range in degrees, short of the poles
const PITCH_LIMIT_DEGREES: f32 = 85.0;

/// Snapshot of the followed object taken each update
#[derive(Debug, Clone, Copy)]
struct TargetFrame {
    position: Vec3,
    yaw: f32,
}

/// Third-person orbit camera following a [`SpatialObject`]
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    params: OrbitParams,
    target: Option<TargetFrame>,
    pitch: f32,
    yaw_offset: f32,
    aspect: f32,
    last_pointer: Vec2,
    first_move: bool,
}

impl OrbitCamera {
    /// Create a camera bound to no target yet.
    ///
    /// The camera only produces a meaningful position once [`update`] has
    /// been called with a target; until then it orbits the origin.
    ///
    /// [`update`]: OrbitCamera::update
    pub fn new(params: OrbitParams, width: u32, height: u32) -> Self {
        let pitch = utils::deg_to_rad(params.initial_pitch_degrees);
        Self {
            params,
            target: None,
            pitch,
            yaw_offset: 0.0,
            aspect: width as f32 / height.max(1) as f32,
            last_pointer: Vec2::zeros(),
            first_move: true,
        }
    }

    /// Feed an absolute pointer position in screen coordinates.
    ///
    /// The first sample after construction or [`reset_pointer`] only
    /// establishes the delta baseline and moves nothing; every later sample
    /// adjusts the orbit angles and re-clamps pitch.
    ///
    /// [`reset_pointer`]: OrbitCamera::reset_pointer
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if self.first_move {
            self.last_pointer = Vec2::new(x, y);
            self.first_move = false;
            return;
        }

        let delta_x = x - self.last_pointer.x;
        let delta_y = y - self.last_pointer.y;
        self.last_pointer = Vec2::new(x, y);

        self.yaw_offset -= delta_x * self.params.yaw_sensitivity;
        self.pitch = utils::clamp(
            self.pitch - delta_y * self.params.pitch_sensitivity,
            utils::deg_to_rad(-PITCH_LIMIT_DEGREES),
            utils::deg_to_rad(PITCH_LIMIT_DEGREES),
        );
    }

    /// Discard the pointer baseline, e.g. after the cursor is re-grabbed
    pub fn reset_pointer(&mut self) {
        self.first_move = true;
    }

    /// Follow a target for this frame. A missing target is a no-op: the
    /// camera keeps its previous angles and position, never a fault.
    pub fn update(&mut self, target: Option<&SpatialObject>) {
        if let Some(target) = target {
            self.target = Some(TargetFrame {
                position: target.position,
                yaw: target.rotation.y,
            });
        }
    }

    /// Camera position on the orbit sphere.
    ///
    /// The vertical look-at offset does not participate here; the camera's
    /// own height comes from the pitch term only, so the position is always
    /// exactly `distance` from the target.
    pub fn position(&self) -> Vec3 {
        let (target_position, target_yaw) = match self.target {
            Some(frame) => (frame.position, frame.yaw),
            None => (Vec3::zeros(), 0.0),
        };

        let total_yaw = target_yaw + self.yaw_offset;
        let horizontal = self.params.distance * self.pitch.cos();
        let vertical = self.params.distance * self.pitch.sin();

        Vec3::new(
            target_position.x - horizontal * total_yaw.sin(),
            target_position.y + vertical,
            target_position.z - horizontal * total_yaw.cos(),
        )
    }

    /// View matrix looking from the orbit position toward the target plus
    /// the vertical look-at offset
    pub fn view_matrix(&self) -> Mat4 {
        let target_position = self.target.map_or(Vec3::zeros(), |frame| frame.position);
        let look_at_point = target_position + Vec3::new(0.0, self.params.height_offset, 0.0);
        Mat4::look_at(self.position(), look_at_point, Vec3::y())
    }

    /// Perspective projection matrix for the current viewport
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(
            utils::deg_to_rad(self.params.fov_degrees),
            self.aspect,
            self.params.near,
            self.params.far,
        )
    }

    /// Update the aspect ratio on viewport resize
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Current vertical orbit angle in radians
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current pointer-driven horizontal orbit offset in radians
    pub fn yaw_offset(&self) -> f32 {
        self.yaw_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(OrbitParams::default(), 1280, 720)
    }

    fn ship_at(position: Vec3, yaw: f32) -> SpatialObject {
        SpatialObject::new(position, Vec3::new(0.0, yaw, 0.0), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_first_pointer_sample_is_baseline_only() {
        let mut camera = camera();
        let pitch_before = camera.pitch();
        let yaw_before = camera.yaw_offset();

        // Arbitrary far-away first sample must not move the camera
        camera.on_pointer_move(5000.0, -3000.0);
        assert_eq!(camera.pitch(), pitch_before);
        assert_eq!(camera.yaw_offset(), yaw_before);

        // The second sample moves relative to the first
        camera.on_pointer_move(5010.0, -3000.0);
        assert!(camera.yaw_offset() < yaw_before);
    }

    #[test]
    fn test_pointer_reset_discards_next_sample() {
        let mut camera = camera();
        camera.on_pointer_move(0.0, 0.0);
        camera.on_pointer_move(10.0, 10.0);
        let pitch = camera.pitch();
        let yaw = camera.yaw_offset();

        camera.reset_pointer();
        camera.on_pointer_move(900.0, 900.0);
        assert_eq!(camera.pitch(), pitch);
        assert_eq!(camera.yaw_offset(), yaw);
    }

    #[test]
    fn test_pitch_clamped_to_limit() {
        let mut camera = camera();
        camera.on_pointer_move(0.0, 0.0);

        // Drag far upward: pitch increases until the upper clamp
        camera.on_pointer_move(0.0, -100_000.0);
        assert_relative_eq!(camera.pitch(), utils::deg_to_rad(85.0), epsilon = 1e-6);

        // Drag far downward: pitch decreases until the lower clamp
        camera.on_pointer_move(0.0, 100_000.0);
        assert_relative_eq!(camera.pitch(), utils::deg_to_rad(-85.0), epsilon = 1e-6);
    }

    #[test]
    fn test_position_keeps_fixed_distance_from_target() {
        let mut camera = camera();
        let ship = ship_at(Vec3::new(12.0, -4.0, 7.5), 1.1);
        camera.update(Some(&ship));

        camera.on_pointer_move(0.0, 0.0);
        for (x, y) in [(35.0, 10.0), (-80.0, 44.0), (412.0, -260.0)] {
            camera.on_pointer_move(x, y);
            camera.update(Some(&ship));
            let distance = (camera.position() - ship.position).norm();
            assert_relative_eq!(distance, 3.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_update_without_target_is_noop() {
        let mut camera = camera();
        let ship = ship_at(Vec3::new(1.0, 2.0, 3.0), 0.5);
        camera.update(Some(&ship));
        let position = camera.position();

        camera.update(None);
        assert_eq!(camera.position(), position);
    }

    #[test]
    fn test_target_yaw_re_orients_orbit() {
        let mut camera = camera();

        // Behind a ship facing -Z (yaw 0), the camera sits at negative Z
        let ship = ship_at(Vec3::zeros(), 0.0);
        camera.update(Some(&ship));
        let behind = camera.position();
        assert!(behind.z < 0.0);

        // Turn the ship a half revolution: the camera swings to positive Z
        let ship = ship_at(Vec3::zeros(), std::f32::consts::PI);
        camera.update(Some(&ship));
        let ahead = camera.position();
        assert!(ahead.z > 0.0);
        assert_relative_eq!(behind.y, ahead.y, epsilon = 1e-5);
    }

    #[test]
    fn test_height_offset_moves_look_at_not_position() {
        let mut base_params = OrbitParams::default();
        base_params.height_offset = 0.0;
        let mut flat = OrbitCamera::new(base_params, 1280, 720);

        let mut offset_params = OrbitParams::default();
        offset_params.height_offset = 2.0;
        let mut raised = OrbitCamera::new(offset_params, 1280, 720);

        let ship = ship_at(Vec3::new(0.0, 5.0, 0.0), 0.0);
        flat.update(Some(&ship));
        raised.update(Some(&ship));

        assert_relative_eq!(flat.position(), raised.position(), epsilon = 1e-6);
        assert_ne!(flat.view_matrix(), raised.view_matrix());
    }
}
