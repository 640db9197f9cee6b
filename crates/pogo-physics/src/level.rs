//! Level geometry builders

use glam::Vec3;
use nalgebra::Unit;
use pogo_core::SurfaceTag;
use rapier3d::prelude::*;
use tracing::debug;

use crate::convert::{surface_id, to_na_point};
use crate::{BodyMass, PhysicsError, PhysicsWorld};

/// Shape and mass of the pogo stick body
#[derive(Debug, Clone)]
pub struct PogoBodyDesc {
    /// Half height of the cylindrical part of the stick capsule
    pub stick_half_height: f32,
    /// Radius of the stick capsule
    pub stick_radius: f32,
    /// Radius of the spring tip sphere at the bottom of the stick
    pub tip_radius: f32,
    /// Total mass in kilograms
    pub mass: f32,
    /// Principal angular inertia around the local axes
    pub principal_inertia: Vec3,
    /// Angular damping applied by the engine
    pub angular_damping: f32,
    /// Friction of the spring tip
    pub tip_friction: f32,
}

impl Default for PogoBodyDesc {
    fn default() -> Self {
        Self {
            stick_half_height: 0.5,
            stick_radius: 0.12,
            tip_radius: 0.1,
            mass: 1.0,
            principal_inertia: Vec3::new(0.12, 0.02, 0.12),
            angular_damping: 0.5,
            tip_friction: 1.0,
        }
    }
}

impl PogoBodyDesc {
    /// Body-local center of the spring tip; it protrudes below the stick
    pub fn tip_offset(&self) -> Vec3 {
        Vec3::new(0.0, -(self.stick_half_height + self.stick_radius + self.tip_radius * 0.5), 0.0)
    }
}

/// Handles of a spawned pogo stick
#[derive(Debug, Clone, Copy)]
pub struct PogoHandles {
    pub body: RigidBodyHandle,
    pub stick: ColliderHandle,
    pub spring_tip: ColliderHandle,
}

/// Handles of a carrying surface
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHandles {
    pub body: RigidBodyHandle,
    /// Solid deck, tagged as ground
    pub solid: ColliderHandle,
    /// Sensor volume above the deck that attaches riders
    pub sensor: ColliderHandle,
}

impl PhysicsWorld {
    /// Create a ground plane collider
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .friction(0.7)
            .restitution(0.0)
            .user_data(SurfaceTag::Ground.to_user_data())
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static box collider
    pub fn create_static_box(
        &mut self,
        half_extents: Vec3,
        position: Vec3,
        tag: SurfaceTag,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .friction(0.7)
            .user_data(tag.to_user_data())
            .build();
        self.add_static_collider(collider)
    }

    /// Create a static sensor volume
    pub fn create_trigger(
        &mut self,
        half_extents: Vec3,
        position: Vec3,
        tag: SurfaceTag,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .sensor(true)
            .user_data(tag.to_user_data())
            .build();
        self.add_static_collider(collider)
    }

    /// Create a kinematic deck with a rider sensor on top
    pub fn create_kinematic_surface(&mut self, half_extents: Vec3, position: Vec3) -> SurfaceHandles {
        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(vector![position.x, position.y, position.z])
            .build();
        let deck = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .friction(0.7)
            .user_data(SurfaceTag::Ground.to_user_data())
            .build();
        let (body, solid) = self.add_body(body, deck);

        let rider_height = 1.0;
        let sensor = ColliderBuilder::cuboid(half_extents.x, rider_height, half_extents.z)
            .translation(vector![0.0, half_extents.y + rider_height, 0.0])
            .sensor(true)
            .user_data(SurfaceTag::MovableSurface.to_user_data())
            .build();
        let sensor = self.add_collider_to(body, sensor);

        SurfaceHandles { body, solid, sensor }
    }

    /// Schedule a kinematic surface to reach `position` at the end of the next step
    pub fn move_surface(&mut self, handle: RigidBodyHandle, position: Vec3) -> Result<(), PhysicsError> {
        let body = self
            .rigid_body_set
            .get_mut(handle)
            .ok_or(PhysicsError::UnknownBody(surface_id(handle)))?;
        if !body.is_kinematic() {
            return Err(PhysicsError::NotKinematic(surface_id(handle)));
        }
        body.set_next_kinematic_translation(vector![position.x, position.y, position.z]);
        Ok(())
    }

    /// Spawn the pogo stick: a capsule stick with a separate spring tip collider.
    ///
    /// Colliders carry no density so the body's mass properties, including the center of
    /// mass, are fully controlled through [`crate::RigidBodyControl::set_center_of_mass`].
    pub fn spawn_pogo(&mut self, desc: &PogoBodyDesc, position: Vec3) -> PogoHandles {
        let inertia = desc.principal_inertia;
        let mass_props = MassProperties::new(
            to_na_point(Vec3::ZERO),
            desc.mass,
            vector![inertia.x, inertia.y, inertia.z],
        );
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y, position.z])
            .additional_mass_properties(mass_props)
            .angular_damping(desc.angular_damping)
            .ccd_enabled(true)
            .build();
        let stick = ColliderBuilder::capsule_y(desc.stick_half_height, desc.stick_radius)
            .density(0.0)
            .friction(0.3)
            .user_data(SurfaceTag::Player.to_user_data())
            .build();
        let (body, stick) = self.add_body(body, stick);

        let tip = desc.tip_offset();
        let spring_tip = ColliderBuilder::ball(desc.tip_radius)
            .translation(vector![tip.x, tip.y, tip.z])
            .density(0.0)
            .friction(desc.tip_friction)
            .restitution(0.0)
            .user_data(SurfaceTag::Player.to_user_data())
            .build();
        let spring_tip = self.add_collider_to(body, spring_tip);
        // Rapier fills in effective mass lazily on the next step; impulses applied
        // before that would be lost.
        if let Some(rb) = self.rigid_body_set.get_mut(body) {
            rb.recompute_mass_properties_from_colliders(&self.collider_set);
        }

        self.masses.insert(
            body,
            BodyMass {
                mass: desc.mass,
                principal_inertia: desc.principal_inertia,
            },
        );
        self.tracked.entry(body).or_default();
        debug!("Spawned pogo stick at {:?}", position);

        PogoHandles {
            body,
            stick,
            spring_tip,
        }
    }
}
