//! Spatial object state: position, Euler rotation, scale, and derived basis
//!
//! Every entity in the scene (ship, asteroid, skybox wall) carries a
//! `SpatialObject`. The orientation basis (`front`/`right`/`up`) is derived
//! from the Euler rotation on demand and is only guaranteed consistent with
//! `rotation` immediately after `recompute_basis()` — callers that mutate
//! `rotation` must recompute before reading the basis vectors.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// Position, rotation, and scale of a scene entity, plus its orientation basis.
///
/// `rotation` holds Euler angles in radians as (pitch, yaw, roll) on
/// (x, y, z). Yaw is the only axis gameplay drives. Roll participates in the
/// model matrix but is deliberately not folded into the basis vectors; the
/// basis is a function of pitch and yaw only, matching the movement model
/// this engine was built for.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialObject {
    /// World-space location
    pub position: Vec3,

    /// Euler angles in radians: (pitch, yaw, roll)
    pub rotation: Vec3,

    /// Non-uniform scale factors, never zero
    pub scale: Vec3,

    front: Vec3,
    right: Vec3,
    up: Vec3,
}

impl SpatialObject {
    /// Create a spatial object and compute its initial basis.
    ///
    /// A zero scale vector is coerced to uniform 1.0 so that degenerate
    /// construction never produces an invisible or non-invertible transform.
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        let scale = if scale == Vec3::zeros() {
            Vec3::new(1.0, 1.0, 1.0)
        } else {
            scale
        };

        let mut object = Self {
            position,
            rotation,
            scale,
            front: -Vec3::z(),
            right: Vec3::x(),
            up: Vec3::y(),
        };
        object.recompute_basis();
        object
    }

    /// Recompute `front`/`right`/`up` from the current rotation.
    ///
    /// The basis is orthonormal by construction: `front` from pitch/yaw,
    /// `right` perpendicular to `front` and world up, `up` closing the frame.
    pub fn recompute_basis(&mut self) {
        let pitch = self.rotation.x;
        let yaw = self.rotation.y;

        let front = Vec3::new(
            pitch.cos() * yaw.sin(),
            pitch.sin(),
            -pitch.cos() * yaw.cos(),
        )
        .normalize();

        self.front = front;
        self.right = front.cross(&Vec3::y()).normalize();
        self.up = self.right.cross(&front).normalize();
    }

    /// Forward direction derived from the last basis recomputation
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Right direction derived from the last basis recomputation
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Up direction derived from the last basis recomputation
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Build the model matrix for rendering.
    ///
    /// Applies scale first, then rotation in Y, X, Z order, then translation
    /// (column-vector convention, so the product reads right to left).
    pub fn model_matrix(&self) -> Mat4 {
        let scale = Mat4::new_nonuniform_scaling(&self.scale);
        let rotation = Mat4::rotation_z(self.rotation.z)
            * Mat4::rotation_x(self.rotation.x)
            * Mat4::rotation_y(self.rotation.y);
        let translation = Mat4::new_translation(&self.position);
        translation * rotation * scale
    }
}

impl Default for SpatialObject {
    fn default() -> Self {
        Self::new(Vec3::zeros(), Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))
    }
}
