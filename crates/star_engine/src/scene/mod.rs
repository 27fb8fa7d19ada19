//! Scene-level building blocks: spatial objects and the orbit camera

pub mod camera;
pub mod spatial;

pub use camera::{OrbitCamera, OrbitParams};
pub use spatial::SpatialObject;
