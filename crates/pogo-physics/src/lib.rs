//! Pogo Physics - Physics simulation using rapier3d
//!
//! Provides the rigid body world, the [`RigidBodyControl`] capability interface used by
//! the locomotion controller, contact/trigger event tracking, and surface carrying.

mod body;
pub mod convert;
mod error;
mod events;
mod level;
mod rapier_body;

pub use body::{ForceMode, RigidBodyControl};
pub use error::PhysicsError;
pub use events::{
    ContactEvent, ContactPhase, ContactSample, ContactTracker, TriggerEvent, TriggerPhase,
    TriggerSample,
};
pub use level::{PogoBodyDesc, PogoHandles, SurfaceHandles};
pub use rapier_body::RapierBody;

use std::collections::HashMap;

use glam::Vec3;
use pogo_core::{SurfaceId, SurfaceTag};
use rapier3d::prelude::*;
use tracing::{debug, warn};

use crate::convert::{collider_id, surface_handle, surface_id, to_glam_vec, to_na_vector};

/// Physics world configuration
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -9.81 on Y axis)
    pub gravity: Vec3,
    /// Physics timestep (default: 1/60)
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            timestep: 1.0 / 60.0,
        }
    }
}

/// Events gathered for one tracked body since it was last drained
#[derive(Debug, Default)]
pub struct BodyEvents {
    pub contacts: Vec<ContactEvent>,
    pub triggers: Vec<TriggerEvent>,
}

#[derive(Debug, Default)]
struct TrackedBody {
    tracker: ContactTracker,
    pending: BodyEvents,
}

/// A body riding on a carrying surface
#[derive(Debug, Clone, Copy)]
struct Attachment {
    surface: RigidBodyHandle,
    /// Surface velocity already folded into the rider's velocity
    carried: Vec3,
}

/// Mass and inertia a body keeps when its center of mass moves
#[derive(Debug, Clone, Copy)]
pub(crate) struct BodyMass {
    pub mass: f32,
    pub principal_inertia: Vec3,
}

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Impulse joint storage
    pub impulse_joint_set: ImpulseJointSet,
    /// Multi-body joint storage
    pub multibody_joint_set: MultibodyJointSet,

    /// Integration parameters
    integration_parameters: IntegrationParameters,
    /// Physics pipeline
    physics_pipeline: PhysicsPipeline,
    /// Island manager
    island_manager: IslandManager,
    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,
    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,
    /// Continuous collision detection solver
    ccd_solver: CCDSolver,

    /// Bodies that receive contact and trigger events
    tracked: HashMap<RigidBodyHandle, TrackedBody>,
    /// Rider body -> the surface carrying it
    attachments: HashMap<RigidBodyHandle, Attachment>,
    /// Mass settings for bodies whose center of mass is driven at runtime
    pub(crate) masses: HashMap<RigidBodyHandle, BodyMass>,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            tracked: HashMap::new(),
            attachments: HashMap::new(),
            masses: HashMap::new(),
        }
    }

    /// Fixed timestep the world integrates with
    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Step the physics simulation
    pub fn step(&mut self) {
        let gravity = vector![self.config.gravity.x, self.config.gravity.y, self.config.gravity.z];
        self.carry_attached();

        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        // User forces persist in rapier until cleared; requests are per-step here.
        for (_, body) in self.rigid_body_set.iter_mut() {
            body.reset_forces(false);
            body.reset_torques(false);
        }

        self.collect_events();
    }

    /// Start reporting contact and trigger events for a body
    pub fn track_body(&mut self, handle: RigidBodyHandle) -> Result<(), PhysicsError> {
        if self.rigid_body_set.get(handle).is_none() {
            return Err(PhysicsError::UnknownBody(surface_id(handle)));
        }
        self.tracked.entry(handle).or_default();
        Ok(())
    }

    /// Take the events gathered for a tracked body since the last call
    pub fn drain_events(&mut self, handle: RigidBodyHandle) -> BodyEvents {
        self.tracked
            .get_mut(&handle)
            .map(|tracked| std::mem::take(&mut tracked.pending))
            .unwrap_or_default()
    }

    /// Borrow a body through the controller-facing capability interface
    pub fn body(&mut self, handle: RigidBodyHandle) -> RapierBody<'_> {
        RapierBody::new(self, handle)
    }

    /// Surface currently carrying `child`, if any
    pub fn parent_of(&self, child: RigidBodyHandle) -> Option<SurfaceId> {
        self.attachments
            .get(&child)
            .map(|attachment| surface_id(attachment.surface))
    }

    /// Attach `child` to a carrying surface or detach it.
    ///
    /// Attachment never moves the child. From the next step on, every change in the
    /// surface's motion is passed on to the child, on top of the child's own motion
    /// relative to it. Detaching leaves the child's velocity as it is.
    pub fn set_parent(&mut self, child: RigidBodyHandle, parent: Option<SurfaceId>) {
        match parent {
            Some(surface) => {
                let parent_handle = surface_handle(surface);
                let Some(parent_body) = self.rigid_body_set.get(parent_handle) else {
                    warn!("Cannot attach to missing surface {:?}", surface);
                    return;
                };
                if self
                    .attachments
                    .get(&child)
                    .is_some_and(|attachment| attachment.surface == parent_handle)
                {
                    return;
                }
                // A rider touching the surface already moves with it
                let carried = to_glam_vec(parent_body.linvel());
                debug!("Attaching body to surface {:?}", surface);
                self.attachments.insert(
                    child,
                    Attachment {
                        surface: parent_handle,
                        carried,
                    },
                );
            }
            None => {
                if self.attachments.remove(&child).is_some() {
                    debug!("Detached body from its surface");
                }
            }
        }
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Add a rigid body with a collider
    pub fn add_body(
        &mut self,
        rigid_body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let rb_handle = self.rigid_body_set.insert(rigid_body);
        let col_handle =
            self.collider_set
                .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set);
        (rb_handle, col_handle)
    }

    /// Attach an extra collider to an existing body
    pub fn add_collider_to(&mut self, body: RigidBodyHandle, collider: Collider) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, body, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and its colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
        self.tracked.remove(&handle);
        self.masses.remove(&handle);
        self.attachments.remove(&handle);
        self.attachments
            .retain(|_, attachment| attachment.surface != handle);
    }

    /// Get a rigid body by handle
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Match every rider's velocity to the motion its surface is about to make.
    ///
    /// Kinematic surfaces know their pose at the end of the coming step, so the
    /// surface velocity at the rider is exact for this step. Only the change since
    /// the last step is added; friction with the deck then has no slip to correct.
    fn carry_attached(&mut self) {
        let inv_dt = 1.0 / self.integration_parameters.dt;

        for (child, attachment) in self.attachments.iter_mut() {
            let Some(surface) = self.rigid_body_set.get(attachment.surface) else {
                continue;
            };
            let Some(rider) = self.rigid_body_set.get(*child) else {
                continue;
            };

            let here = Point::from(*rider.translation());
            let there = surface.next_position() * surface.position().inverse() * here;
            let velocity = to_glam_vec(&((there - here) * inv_dt));

            let change = velocity - attachment.carried;
            attachment.carried = velocity;
            if change == Vec3::ZERO {
                continue;
            }
            if let Some(rider) = self.rigid_body_set.get_mut(*child) {
                let linvel = *rider.linvel() + to_na_vector(change);
                rider.set_linvel(linvel, true);
            }
        }
    }

    /// Snapshot contacts and overlaps of every tracked body and turn them into events
    fn collect_events(&mut self) {
        let handles: Vec<RigidBodyHandle> = self.tracked.keys().copied().collect();

        for handle in handles {
            let Some(body) = self.rigid_body_set.get(handle) else {
                continue;
            };
            let own: Vec<ColliderHandle> = body.colliders().to_vec();

            let mut contacts = Vec::new();
            let mut triggers = Vec::new();

            for &collider in &own {
                for pair in self.narrow_phase.contact_pairs_with(collider) {
                    if !pair.has_any_active_contact {
                        continue;
                    }
                    let this_is_first = pair.collider1 == collider;
                    let other = if this_is_first { pair.collider2 } else { pair.collider1 };
                    if own.contains(&other) {
                        continue;
                    }
                    let Some(other_collider) = self.collider_set.get(other) else {
                        continue;
                    };

                    // Manifold normals point from collider1 to collider2.
                    let normal = pair
                        .manifolds
                        .iter()
                        .find(|m| !m.points.is_empty())
                        .map(|m| to_glam_vec(&m.data.normal))
                        .unwrap_or(Vec3::ZERO);
                    let normal = if this_is_first { -normal } else { normal };

                    contacts.push(ContactSample {
                        this_collider: collider_id(collider),
                        other_collider: collider_id(other),
                        other_tag: SurfaceTag::from_user_data(other_collider.user_data),
                        normal,
                    });
                }

                for (a, b, intersecting) in self.narrow_phase.intersection_pairs_with(collider) {
                    if !intersecting {
                        continue;
                    }
                    let other = if a == collider { b } else { a };
                    if own.contains(&other) {
                        continue;
                    }
                    let Some(sensor) = self.collider_set.get(other) else {
                        continue;
                    };
                    if !sensor.is_sensor() {
                        continue;
                    }
                    triggers.push(TriggerSample {
                        sensor: collider_id(other),
                        tag: SurfaceTag::from_user_data(sensor.user_data),
                        surface: sensor.parent().map(surface_id),
                    });
                }
            }

            if let Some(tracked) = self.tracked.get_mut(&handle) {
                tracked
                    .tracker
                    .update_contacts(&contacts, &mut tracked.pending.contacts);
                tracked
                    .tracker
                    .update_triggers(&triggers, &mut tracked.pending.triggers);
            }
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_world_creation() {
        let world = PhysicsWorld::new();
        assert_eq!(world.config.gravity, Vec3::new(0.0, -9.81, 0.0));
        assert!((world.timestep() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_ground_creation() {
        let mut world = PhysicsWorld::new();
        let ground = world.create_ground(0.0);
        let collider = world.get_collider(ground).expect("ground collider");
        assert_eq!(SurfaceTag::from_user_data(collider.user_data), SurfaceTag::Ground);
    }

    #[test]
    fn test_track_unknown_body_fails() {
        let mut world = PhysicsWorld::new();
        let missing = RigidBodyHandle::from_raw_parts(42, 0);
        assert!(matches!(
            world.track_body(missing),
            Err(PhysicsError::UnknownBody(_))
        ));
    }

    #[test]
    fn test_spring_tip_reports_ground_contact() {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        let pogo = world.spawn_pogo(&PogoBodyDesc::default(), Vec3::new(0.0, 1.5, 0.0));

        let mut tip_contacts = 0;
        for _ in 0..180 {
            world.step();
            let events = world.drain_events(pogo.body);
            tip_contacts += events
                .contacts
                .iter()
                .filter(|e| {
                    e.phase == ContactPhase::Enter
                        && e.this_collider == collider_id(pogo.spring_tip)
                        && e.other_tag == SurfaceTag::Ground
                })
                .count();
        }
        assert!(tip_contacts >= 1, "spring tip never touched the ground");
    }

    #[test]
    fn test_sensor_reports_enter_and_exit() {
        let mut world = PhysicsWorld::new();
        let water = world.create_trigger(
            Vec3::new(2.0, 0.5, 2.0),
            Vec3::new(0.0, 3.0, 0.0),
            SurfaceTag::Water,
        );
        let pogo = world.spawn_pogo(&PogoBodyDesc::default(), Vec3::new(0.0, 8.0, 0.0));

        let mut entered = false;
        let mut exited = false;
        for _ in 0..240 {
            world.step();
            for event in world.drain_events(pogo.body).triggers {
                assert_eq!(event.sensor, collider_id(water));
                assert_eq!(event.tag, SurfaceTag::Water);
                match event.phase {
                    TriggerPhase::Enter => entered = true,
                    TriggerPhase::Exit => exited = entered,
                }
            }
        }
        assert!(entered, "falling body never entered the sensor");
        assert!(exited, "falling body never left the sensor");
    }

    #[test]
    fn test_attachment_does_not_move_body() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig {
            gravity: Vec3::ZERO,
            ..Default::default()
        });
        let bridge = world.create_kinematic_surface(Vec3::new(2.0, 0.2, 2.0), Vec3::ZERO);
        let pogo = world.spawn_pogo(&PogoBodyDesc::default(), Vec3::new(0.0, 5.0, 0.0));
        let before = to_glam_vec(world.get_rigid_body(pogo.body).unwrap().translation());

        world.set_parent(pogo.body, Some(surface_id(bridge.body)));
        assert_eq!(world.parent_of(pogo.body), Some(surface_id(bridge.body)));
        world.step();
        world.set_parent(pogo.body, None);
        world.step();

        let after = to_glam_vec(world.get_rigid_body(pogo.body).unwrap().translation());
        assert!(after.abs_diff_eq(before, 1e-4));
        assert_eq!(world.parent_of(pogo.body), None);
    }

    #[test]
    fn test_attached_body_follows_surface() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig {
            gravity: Vec3::ZERO,
            ..Default::default()
        });
        let bridge = world.create_kinematic_surface(Vec3::new(2.0, 0.2, 2.0), Vec3::ZERO);
        let pogo = world.spawn_pogo(&PogoBodyDesc::default(), Vec3::new(0.0, 5.0, 0.0));
        world.set_parent(pogo.body, Some(surface_id(bridge.body)));

        for i in 1..=30 {
            world
                .move_surface(bridge.body, Vec3::new(0.0, 0.0, i as f32 * 0.02))
                .expect("bridge is kinematic");
            world.step();
        }
        let pos = to_glam_vec(world.get_rigid_body(pogo.body).unwrap().translation());
        assert!((pos.z - 0.6).abs() < 1e-3, "body was not carried: {:?}", pos);
        assert!((pos.y - 5.0).abs() < 1e-3);

        // Surface stops, so does the rider
        for _ in 0..10 {
            world.step();
        }
        let rest = to_glam_vec(world.get_rigid_body(pogo.body).unwrap().translation());
        assert!((rest.z - pos.z).abs() < 1e-3, "rider kept drifting: {:?}", rest);
    }

    #[test]
    fn test_rider_on_moving_deck_is_carried_once() {
        let mut world = PhysicsWorld::new();
        let deck = world.create_kinematic_surface(Vec3::new(2.0, 0.2, 2.0), Vec3::ZERO);
        let crate_body = RigidBodyBuilder::dynamic()
            .translation(vector![0.0, 0.5, 0.0])
            .build();
        let crate_shape = ColliderBuilder::cuboid(0.25, 0.25, 0.25).friction(0.7).build();
        let (rider, _) = world.add_body(crate_body, crate_shape);

        for _ in 0..60 {
            world.step();
        }
        let start = to_glam_vec(world.get_rigid_body(rider).unwrap().translation());
        world.set_parent(rider, Some(surface_id(deck.body)));

        for i in 1..=60 {
            world
                .move_surface(deck.body, Vec3::new(i as f32 * 0.02, 0.0, 0.0))
                .expect("deck is kinematic");
            world.step();
        }

        let end = to_glam_vec(world.get_rigid_body(rider).unwrap().translation());
        let moved = end.x - start.x;
        assert!((moved - 1.2).abs() < 0.12, "deck moved 1.2, rider moved {moved}");
        assert!((end.y - start.y).abs() < 0.05, "rider left the deck: {:?}", end);
    }
}
