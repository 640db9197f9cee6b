//! Bounce pads that kick the player away on contact

use std::collections::HashMap;

use pogo_core::{ColliderId, SurfaceTag};
use pogo_physics::{ContactEvent, ContactPhase, ForceMode, RigidBodyControl};
use tracing::debug;

pub const MIN_BOUNCE_FORCE: f32 = 1.0;
pub const MAX_BOUNCE_FORCE: f32 = 10.0;

#[derive(Debug, Default)]
pub struct BouncePads {
    pads: HashMap<ColliderId, f32>,
}

impl BouncePads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pad; force is clamped to `1..=10`
    pub fn register(&mut self, collider: ColliderId, bounce_force: f32) {
        let force = bounce_force.clamp(MIN_BOUNCE_FORCE, MAX_BOUNCE_FORCE);
        self.pads.insert(collider, force);
    }

    /// Apply a bounce impulse if `event` is the player first touching a pad
    pub fn handle_contact(&self, event: &ContactEvent, body: &mut dyn RigidBodyControl) -> bool {
        if event.phase != ContactPhase::Enter || event.other_tag != SurfaceTag::Bouncer {
            return false;
        }
        let Some(&force) = self.pads.get(&event.other_collider) else {
            return false;
        };
        // Normal already points away from the pad
        body.apply_force(event.normal * force, ForceMode::Impulse);
        debug!(force, "Bounced");
        true
    }
}
