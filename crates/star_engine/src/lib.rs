//! # Star Engine
//!
//! A small game foundation for real-time 3D arcade games: spatial objects
//! with derived orientation bases, a third-person orbit camera, procedural
//! mesh primitives with an OBJ loader, and a backend-agnostic rendering
//! contract.
//!
//! The engine owns no window and no graphics API. A platform collaborator
//! implements [`render::RenderBackend`], delivers per-frame
//! [`input::InputState`] snapshots and delta times, and presents the
//! [`render::FrameData`] the game hands back.
//!
//! ## Quick Start
//!
//! ```rust
//! use star_engine::prelude::*;
//!
//! let ship = SpatialObject::new(
//!     Vec3::zeros(),
//!     Vec3::zeros(),
//!     Vec3::new(0.2, 0.2, 0.2),
//! );
//!
//! let mut camera = OrbitCamera::new(OrbitParams::default(), 1280, 720);
//! camera.update(Some(&ship));
//! let _view = camera.view_matrix();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{ObjError, ObjLoader},
        foundation::{
            math::{Mat4, Mat4Ext, Vec2, Vec3},
            time::Timer,
        },
        input::{InputState, Key},
        render::{
            DrawCommand, FrameData, HeadlessBackend, Mesh, MeshHandle, RenderBackend,
            TextureHandle, Vertex, Visual,
        },
        scene::{OrbitCamera, OrbitParams, SpatialObject},
    };
}
