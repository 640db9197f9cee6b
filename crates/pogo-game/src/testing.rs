//! Recording doubles for the controller's collaborators

use glam::{Quat, Vec2, Vec3};
use pogo_core::SurfaceId;
use pogo_physics::{ForceMode, RigidBodyControl};

use crate::collaborators::{AnimationSink, InputSource, RespawnSource, SoundRequest, SoundSink};

/// Unit-mass body that records every request made of it
#[derive(Debug, Default)]
pub struct RecordingBody {
    pub forces: Vec<(Vec3, ForceMode)>,
    pub torques: Vec<(Vec3, ForceMode)>,
    pub center_of_mass_calls: Vec<Vec3>,
    pub parent_calls: Vec<Option<SurfaceId>>,
    pub teleports: Vec<(Vec3, Quat)>,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub position: Vec3,
    pub rotation: Quat,
}

impl RecordingBody {
    pub fn clear_requests(&mut self) {
        self.forces.clear();
        self.torques.clear();
    }
}

impl RigidBodyControl for RecordingBody {
    fn apply_force(&mut self, force: Vec3, mode: ForceMode) {
        if mode != ForceMode::Force {
            self.linear_velocity += force;
        }
        self.forces.push((force, mode));
    }

    fn apply_torque(&mut self, torque: Vec3, mode: ForceMode) {
        if mode != ForceMode::Force {
            self.angular_velocity += torque;
        }
        self.torques.push((torque, mode));
    }

    fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    fn linear_velocity(&self) -> Vec3 {
        self.linear_velocity
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.linear_velocity = velocity;
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn teleport(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation;
        self.teleports.push((position, rotation));
    }

    fn set_center_of_mass(&mut self, local_offset: Vec3) {
        self.center_of_mass_calls.push(local_offset);
    }

    fn set_parent(&mut self, parent: Option<SurfaceId>) {
        self.parent_calls.push(parent);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScriptedInput {
    pub lean: Vec2,
    pub allowed: bool,
}

impl Default for ScriptedInput {
    fn default() -> Self {
        Self {
            lean: Vec2::ZERO,
            allowed: true,
        }
    }
}

impl InputSource for ScriptedInput {
    fn lean(&self) -> Vec2 {
        self.lean
    }

    fn input_allowed(&self) -> bool {
        self.allowed
    }
}

#[derive(Debug, Default)]
pub struct FixedRespawn(pub Option<Vec3>);

impl RespawnSource for FixedRespawn {
    fn respawn_point(&self) -> Option<Vec3> {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RecordingSound(pub Vec<SoundRequest>);

impl SoundSink for RecordingSound {
    fn play(&mut self, request: SoundRequest) {
        self.0.push(request);
    }
}

#[derive(Debug, Default)]
pub struct RecordingAnimation(pub Vec<bool>);

impl AnimationSink for RecordingAnimation {
    fn play_spring(&mut self, release: bool) {
        self.0.push(release);
    }
}
