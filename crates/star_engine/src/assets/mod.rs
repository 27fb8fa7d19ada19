//! Asset loading, performed once at scene-load time

pub mod obj_loader;

pub use obj_loader::{ObjError, ObjLoader};
