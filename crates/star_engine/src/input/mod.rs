//! Input snapshot types
//!
//! The platform collaborator owns the real keyboard and pointer; the core
//! only ever sees a per-frame snapshot of logical key states and the
//! current pointer position. Binding physical keys to logical ones happens
//! outside the engine.

use std::collections::HashSet;

/// Logical game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move the ship away from the camera
    Forward,
    /// Move the ship toward the camera
    Back,
    /// Strafe left
    Left,
    /// Strafe right
    Right,
    /// End the session
    Quit,
}

/// Per-frame snapshot of keyboard and pointer state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<Key>,
    pointer: (f32, f32),
}

impl InputState {
    /// Create an empty snapshot with no keys down and the pointer at origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a logical key as held
    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    /// Mark a logical key as released
    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    /// Whether a logical key is held this frame
    pub fn is_down(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Record the current pointer position in screen coordinates
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = (x, y);
    }

    /// Current pointer position in screen coordinates
    pub fn pointer(&self) -> (f32, f32) {
        self.pointer
    }

    /// Builder-style helper for tests and scripted input
    pub fn with_key(mut self, key: Key) -> Self {
        self.press(key);
        self
    }
}
