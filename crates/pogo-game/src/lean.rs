//! Lean and upright torque policy.
//!
//! Grounded, the stick is damped towards its current orientation and leans gently
//! against the camera axes. Airborne, lean torque is stronger and the stick also
//! drifts sideways. A small body-axis torque is applied in both cases.

use glam::{Quat, Vec2, Vec3};
use pogo_physics::{ForceMode, RigidBodyControl};

use crate::collaborators::CameraFrame;
use crate::config::PogoConfig;

/// Everything the lean policy reads for one tick
#[derive(Debug, Clone, Copy)]
pub struct LeanInputs {
    pub lean: Vec2,
    pub grounded: bool,
    pub input_allowed: bool,
    pub camera: CameraFrame,
    pub dt: f32,
}

pub fn apply_lean(config: &PogoConfig, inputs: LeanInputs, body: &mut dyn RigidBodyControl) {
    let LeanInputs {
        lean,
        grounded,
        input_allowed,
        camera,
        dt,
    } = inputs;

    if grounded {
        let damping = -body.angular_velocity() * (config.upright_rotation_speed * dt);
        if damping != Vec3::ZERO {
            body.apply_torque(damping, ForceMode::Force);
        }
        if input_allowed {
            camera_axis_torque(lean, camera, config.torque_force, body);
        }
    } else {
        camera_axis_torque(lean, camera, config.air_torque_force, body);

        let drift = config.air_torque_force * dt;
        if lean.x != 0.0 {
            body.apply_force(camera.right * (lean.x * drift), ForceMode::VelocityChange);
        }
        if lean.y != 0.0 {
            body.apply_force(camera.forward * (lean.y * drift), ForceMode::VelocityChange);
        }
    }

    body_axis_torque(lean, body.rotation(), config.secondary_torque_gain * dt, body);
}

/// Forward/back tips about the camera's right axis, sideways about its forward axis
fn camera_axis_torque(lean: Vec2, camera: CameraFrame, gain: f32, body: &mut dyn RigidBodyControl) {
    if lean.y > 0.0 {
        body.apply_torque(camera.right * gain, ForceMode::Force);
    } else if lean.y < 0.0 {
        body.apply_torque(-camera.right * gain, ForceMode::Force);
    }

    if lean.x > 0.0 {
        body.apply_torque(-camera.forward * gain, ForceMode::Force);
    } else if lean.x < 0.0 {
        body.apply_torque(camera.forward * gain, ForceMode::Force);
    }
}

fn body_axis_torque(lean: Vec2, rotation: Quat, gain: f32, body: &mut dyn RigidBodyControl) {
    let torque = rotation * Vec3::NEG_Z * (lean.x * gain) + rotation * Vec3::Y * (lean.y * gain);
    if torque != Vec3::ZERO {
        body.apply_torque(torque, ForceMode::VelocityChange);
    }
}
