//! [`RigidBodyControl`] backed by a body in the rapier world

use glam::{Quat, Vec3};
use pogo_core::SurfaceId;
use rapier3d::prelude::*;
use tracing::{debug, warn};

use crate::convert::{to_glam_quat, to_glam_vec, to_isometry, to_na_point, to_na_vector};
use crate::{ForceMode, PhysicsWorld, RigidBodyControl};

/// A borrowed view of one rigid body in a [`PhysicsWorld`]
pub struct RapierBody<'w> {
    world: &'w mut PhysicsWorld,
    handle: RigidBodyHandle,
}

impl<'w> RapierBody<'w> {
    pub fn new(world: &'w mut PhysicsWorld, handle: RigidBodyHandle) -> Self {
        Self { world, handle }
    }

    pub fn handle(&self) -> RigidBodyHandle {
        self.handle
    }

    fn get(&self) -> Option<&RigidBody> {
        self.world.rigid_body_set.get(self.handle)
    }

    fn get_mut(&mut self) -> Option<&mut RigidBody> {
        let body = self.world.rigid_body_set.get_mut(self.handle);
        if body.is_none() {
            debug!("Ignoring request for removed body {:?}", self.handle);
        }
        body
    }
}

impl RigidBodyControl for RapierBody<'_> {
    fn apply_force(&mut self, force: Vec3, mode: ForceMode) {
        let Some(body) = self.get_mut() else { return };
        let force = to_na_vector(force);
        match mode {
            ForceMode::Force => body.add_force(force, true),
            ForceMode::Impulse => body.apply_impulse(force, true),
            ForceMode::VelocityChange => {
                let linvel = *body.linvel() + force;
                body.set_linvel(linvel, true);
            }
        }
    }

    fn apply_torque(&mut self, torque: Vec3, mode: ForceMode) {
        let Some(body) = self.get_mut() else { return };
        let torque = to_na_vector(torque);
        match mode {
            ForceMode::Force => body.add_torque(torque, true),
            ForceMode::Impulse => body.apply_torque_impulse(torque, true),
            ForceMode::VelocityChange => {
                let angvel = *body.angvel() + torque;
                body.set_angvel(angvel, true);
            }
        }
    }

    fn angular_velocity(&self) -> Vec3 {
        self.get().map(|b| to_glam_vec(b.angvel())).unwrap_or(Vec3::ZERO)
    }

    fn linear_velocity(&self) -> Vec3 {
        self.get().map(|b| to_glam_vec(b.linvel())).unwrap_or(Vec3::ZERO)
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        if let Some(body) = self.get_mut() {
            body.set_linvel(to_na_vector(velocity), true);
        }
    }

    fn position(&self) -> Vec3 {
        self.get().map(|b| to_glam_vec(b.translation())).unwrap_or(Vec3::ZERO)
    }

    fn rotation(&self) -> Quat {
        self.get().map(|b| to_glam_quat(b.rotation())).unwrap_or(Quat::IDENTITY)
    }

    fn teleport(&mut self, position: Vec3, rotation: Quat) {
        if let Some(body) = self.get_mut() {
            body.set_position(to_isometry(position, rotation), true);
        }
    }

    fn set_center_of_mass(&mut self, local_offset: Vec3) {
        let Some(mass) = self.world.masses.get(&self.handle).copied() else {
            warn!("Body {:?} has no driven mass properties", self.handle);
            return;
        };
        let Some(body) = self.get_mut() else { return };
        let inertia = mass.principal_inertia;
        let props = MassProperties::new(
            to_na_point(local_offset),
            mass.mass,
            vector![inertia.x, inertia.y, inertia.z],
        );
        body.set_additional_mass_properties(props, true);
    }

    fn set_parent(&mut self, parent: Option<SurfaceId>) {
        self.world.set_parent(self.handle, parent);
    }
}
