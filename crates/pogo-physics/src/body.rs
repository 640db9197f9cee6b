//! Rigid body capability interface.
//!
//! The locomotion controller never touches the physics engine directly. It issues
//! requests through [`RigidBodyControl`], which the rapier-backed world implements and
//! tests replace with a recording double.

use glam::{Quat, Vec3};
use pogo_core::SurfaceId;

/// How a force or torque request is applied by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous, mass-dependent; integrated by the engine over the next step
    Force,
    /// Instantaneous momentum change, mass-dependent
    Impulse,
    /// Instantaneous velocity change, ignores mass
    VelocityChange,
}

/// Operations the controller may request from the rigid body it drives.
///
/// Every method is infallible: a body that has disappeared from the engine turns
/// requests into no-ops and queries into neutral values.
pub trait RigidBodyControl {
    /// Apply a linear force in world space
    fn apply_force(&mut self, force: Vec3, mode: ForceMode);

    /// Apply a torque in world space
    fn apply_torque(&mut self, torque: Vec3, mode: ForceMode);

    /// Current angular velocity in world space
    fn angular_velocity(&self) -> Vec3;

    /// Current linear velocity in world space
    fn linear_velocity(&self) -> Vec3;

    /// Overwrite the linear velocity
    fn set_linear_velocity(&mut self, velocity: Vec3);

    /// World-space position of the body origin
    fn position(&self) -> Vec3;

    /// World-space orientation
    fn rotation(&self) -> Quat;

    /// Move the body discontinuously to a new pose
    fn teleport(&mut self, position: Vec3, rotation: Quat);

    /// Move the center of mass, expressed in body-local coordinates
    fn set_center_of_mass(&mut self, local_offset: Vec3);

    /// Attach the body to a carrying surface, or detach it with `None`
    fn set_parent(&mut self, parent: Option<SurfaceId>);

    /// Local up axis expressed in world space
    fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }
}
