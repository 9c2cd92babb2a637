//! Spatial Primitives
//!
//! Positions and rotations as the clients report them. Plain f64 components;
//! the relay never does math on these, it only stores and forwards them.

use serde::{Serialize, Deserialize};

/// A point in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Position {
    /// Create a position from components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// An orientation in world space (Euler angles, degrees).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    /// Pitch component.
    pub pitch: f64,
    /// Yaw component.
    pub yaw: f64,
    /// Roll component.
    pub roll: f64,
}

impl Rotation {
    /// Create a rotation from components.
    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }
}
