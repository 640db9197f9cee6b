//! Core types shared across the pogo crates

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Opaque identity of a single collider.
///
/// A body may own several colliders; the ground classifier compares these to tell the
/// spring tip apart from the rest of the stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(pub u64);

/// Opaque identity of a surface a body can be carried by (a moving platform or bridge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Gameplay classification attached to level geometry and trigger volumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SurfaceTag {
    #[default]
    Untagged,
    /// Walkable geometry the spring tip can land on
    Ground,
    /// Hazard volume that sends the player back to the respawn point
    Water,
    /// Trigger volume of a surface that carries the player
    MovableSurface,
    /// Checkpoint volume that moves the respawn point
    Checkpoint,
    /// Pad that knocks the player away on contact
    Bouncer,
    /// The player itself
    Player,
}

impl SurfaceTag {
    /// Encode this tag for storage in a collider's user data
    pub fn to_user_data(self) -> u128 {
        match self {
            SurfaceTag::Untagged => 0,
            SurfaceTag::Ground => 1,
            SurfaceTag::Water => 2,
            SurfaceTag::MovableSurface => 3,
            SurfaceTag::Checkpoint => 4,
            SurfaceTag::Bouncer => 5,
            SurfaceTag::Player => 6,
        }
    }

    /// Decode a tag from collider user data; unknown values are untagged
    pub fn from_user_data(data: u128) -> Self {
        match data {
            1 => SurfaceTag::Ground,
            2 => SurfaceTag::Water,
            3 => SurfaceTag::MovableSurface,
            4 => SurfaceTag::Checkpoint,
            5 => SurfaceTag::Bouncer,
            6 => SurfaceTag::Player,
            _ => SurfaceTag::Untagged,
        }
    }

    /// Whether this tag marks a hazard volume
    pub fn is_hazard(self) -> bool {
        matches!(self, SurfaceTag::Water)
    }
}

/// Position and rotation of a body or camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the right direction (positive X in local space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction (positive Y in local space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}
