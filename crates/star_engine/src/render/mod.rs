//! Rendering data structures and the backend contract

pub mod backend;
pub mod mesh;

pub use backend::{
    DrawCommand, FrameData, HeadlessBackend, MeshHandle, RenderBackend, TextureHandle, Visual,
};
pub use mesh::{Mesh, Vertex};
