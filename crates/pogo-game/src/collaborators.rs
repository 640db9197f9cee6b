//! Interfaces to the systems the controller depends on but does not own.
//!
//! Each is a narrow capability handed to the controller per call, so tests can
//! substitute scripted doubles.

use glam::{Vec2, Vec3};
use pogo_core::Transform;

use crate::config::PitchRange;

/// Per-tick player intent
pub trait InputSource {
    /// Latest two-axis lean sample, roughly `[-1, 1]` per axis
    fn lean(&self) -> Vec2;

    /// Whether player control is currently granted
    fn input_allowed(&self) -> bool;
}

/// Owner of the current respawn point
pub trait RespawnSource {
    /// `None` until a respawn point has been set
    fn respawn_point(&self) -> Option<Vec3>;
}

/// A fire-and-forget request to play a named sound
#[derive(Debug, Clone, PartialEq)]
pub struct SoundRequest {
    pub name: String,
    pub pitch: Option<PitchRange>,
}

impl SoundRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pitch: None,
        }
    }

    pub fn with_pitch(mut self, pitch: PitchRange) -> Self {
        self.pitch = Some(pitch);
        self
    }
}

/// Receives sound requests
pub trait SoundSink {
    fn play(&mut self, request: SoundRequest);
}

/// Receives spring animation triggers
pub trait AnimationSink {
    /// `true` pushes the spring out, `false` pulls it in
    fn play_spring(&mut self, release: bool);
}

/// Camera axes lean input is expressed against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub right: Vec3,
    pub forward: Vec3,
}

impl CameraFrame {
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            right: transform.right(),
            forward: transform.forward(),
        }
    }
}

impl Default for CameraFrame {
    fn default() -> Self {
        Self::from_transform(&Transform::default())
    }
}
