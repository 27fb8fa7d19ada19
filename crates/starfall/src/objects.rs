//! Drawable game objects
//!
//! Pairs a [`SpatialObject`] with the visual resources the render backend
//! created for it. The visual is owned exclusively by its object and is
//! released exactly once, on despawn or scene teardown.

use star_engine::prelude::*;

/// A scene entity with optional render resources
#[derive(Debug)]
pub struct GameObject {
    /// Position, rotation, scale, and orientation basis
    pub spatial: SpatialObject,

    visual: Option<Visual>,
}

impl GameObject {
    /// Create a game object owning the given visual
    pub fn new(spatial: SpatialObject, visual: Visual) -> Self {
        Self {
            spatial,
            visual: Some(visual),
        }
    }

    /// The visual resources, if still held
    pub fn visual(&self) -> Option<Visual> {
        self.visual
    }

    /// Release the visual resources back to the backend. Safe to call more
    /// than once; only the first call reaches the backend.
    pub fn release(&mut self, backend: &mut dyn RenderBackend) {
        if let Some(visual) = self.visual.take() {
            backend.destroy_visual(visual);
        }
    }

    /// Build this object's draw call for the current frame, or `None` once
    /// its resources are released
    pub fn draw_command(&self, background: bool) -> Option<DrawCommand> {
        self.visual.map(|visual| DrawCommand {
            model: self.spatial.model_matrix(),
            mesh: visual.mesh,
            texture: visual.texture,
            background,
        })
    }
}
