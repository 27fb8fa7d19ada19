//! Render backend contract
//!
//! The simulation core never talks to a graphics API. It hands the backend
//! geometry once per object lifetime (spawn/teardown boundaries) and a
//! [`FrameData`] snapshot once per frame; everything else — buffers,
//! textures, swapchains — lives behind this trait.

use std::path::Path;

use crate::foundation::math::Mat4;
use crate::render::mesh::Mesh;

/// Opaque handle to an uploaded mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Opaque handle to a bound texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Visual resources owned by a single drawable object.
///
/// A missing texture is a degraded state, not an error: the object renders
/// untextured.
#[derive(Debug, Clone, Copy)]
pub struct Visual {
    /// Uploaded geometry
    pub mesh: MeshHandle,

    /// Bound texture, if the source file existed and decoded
    pub texture: Option<TextureHandle>,
}

/// One indexed draw for the current frame
#[derive(Debug, Clone)]
pub struct DrawCommand {
    /// Model matrix of the object
    pub model: Mat4,

    /// Geometry to draw
    pub mesh: MeshHandle,

    /// Texture to bind, or none for an untextured draw
    pub texture: Option<TextureHandle>,

    /// Background geometry (skybox walls) drawn after the scene with depth
    /// writes off
    pub background: bool,
}

/// Everything the backend needs to present one frame
#[derive(Debug, Clone)]
pub struct FrameData {
    /// RGBA clear color
    pub clear_color: [f32; 4],

    /// World-to-camera matrix
    pub view: Mat4,

    /// Camera-to-clip matrix
    pub projection: Mat4,

    /// Draw list in submission order
    pub draws: Vec<DrawCommand>,
}

/// Platform/render collaborator contract.
///
/// Resource creation and destruction are invoked by the core only at
/// object-spawn and object-destroy boundaries; `present` is invoked once
/// per frame with already-computed transforms.
pub trait RenderBackend {
    /// Create the visual resources for one drawable object.
    ///
    /// A missing or undecodable texture degrades to `texture: None` rather
    /// than failing.
    fn create_visual(&mut self, mesh: &Mesh, texture: Option<&Path>) -> Visual;

    /// Release the visual resources of one object. Called exactly once per
    /// created visual.
    fn destroy_visual(&mut self, visual: Visual);

    /// Submit a completed frame
    fn present(&mut self, frame: &FrameData);
}

/// Backend that records activity without touching a GPU.
///
/// Backs the test suite and the headless demo binary.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_handle: u64,
    live_visuals: u64,
    created: u64,
    destroyed: u64,
    frames_presented: u64,
    last_draw_count: usize,
}

impl HeadlessBackend {
    /// Create an empty headless backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Visuals created and not yet destroyed
    pub fn live_visuals(&self) -> u64 {
        self.live_visuals
    }

    /// Total visuals created
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Total visuals destroyed
    pub fn destroyed(&self) -> u64 {
        self.destroyed
    }

    /// Frames submitted so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Draw count of the most recent frame
    pub fn last_draw_count(&self) -> usize {
        self.last_draw_count
    }
}

impl RenderBackend for HeadlessBackend {
    fn create_visual(&mut self, mesh: &Mesh, texture: Option<&Path>) -> Visual {
        if mesh.is_empty() {
            log::warn!("creating visual for an empty mesh; nothing will draw");
        }

        self.next_handle += 1;
        let mesh_handle = MeshHandle(self.next_handle);

        let texture_handle = texture.and_then(|path| {
            if path.exists() {
                self.next_handle += 1;
                Some(TextureHandle(self.next_handle))
            } else {
                log::warn!("texture {} not found, rendering untextured", path.display());
                None
            }
        });

        self.created += 1;
        self.live_visuals += 1;
        Visual {
            mesh: mesh_handle,
            texture: texture_handle,
        }
    }

    fn destroy_visual(&mut self, _visual: Visual) {
        self.destroyed += 1;
        self.live_visuals = self.live_visuals.saturating_sub(1);
    }

    fn present(&mut self, frame: &FrameData) {
        self.frames_presented += 1;
        self.last_draw_count = frame.draws.len();
        log::trace!(
            "frame {}: {} draws, clear {:?}",
            self.frames_presented,
            frame.draws.len(),
            frame.clear_color
        );
    }
}
