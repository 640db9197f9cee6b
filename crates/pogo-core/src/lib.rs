//! Pogo Core - Core types and utilities for the pogo platformer
//!
//! This crate provides the foundational types shared by the physics and game crates:
//! - Mathematical primitives (re-exported from glam)
//! - Transform, surface tags and collider/surface identifiers
//! - Fixed-timestep game time
//! - Range remapping used by the charged jump
//! - Common error types

pub mod error;
pub mod math;
pub mod time;
pub mod types;

pub use error::ConfigError;
pub use glam::{Quat, Vec2, Vec3};
pub use math::{map_range, remap_clamped};
pub use time::{GameTime, TimeConfig};
pub use types::{ColliderId, SurfaceId, SurfaceTag, Transform};
