//! Ground contact classification.
//!
//! Only the spring tip touching a `Ground` surface counts. Several simultaneous
//! ground contacts make up one grounded span: the body lands on the first and
//! leaves the ground when the last one ends.

use pogo_core::{ColliderId, SurfaceTag};
use pogo_physics::{ContactEvent, ContactPhase};

use crate::state::{GroundTransition, LocomotionState};

#[derive(Debug, Clone, Copy)]
pub struct GroundClassifier {
    spring_tip: ColliderId,
}

impl GroundClassifier {
    pub fn new(spring_tip: ColliderId) -> Self {
        Self { spring_tip }
    }

    fn qualifies(&self, event: &ContactEvent) -> bool {
        event.this_collider == self.spring_tip && event.other_tag == SurfaceTag::Ground
    }

    /// Fold one contact event into `state`, reporting a transition if one happened
    pub fn classify(
        &self,
        state: &mut LocomotionState,
        event: &ContactEvent,
    ) -> Option<GroundTransition> {
        if !self.qualifies(event) {
            return None;
        }

        match event.phase {
            ContactPhase::Enter | ContactPhase::Stay => {
                state.ground_contacts.insert(event.other_collider);
                if state.grounded {
                    return None;
                }
                state.grounded = true;
                state.has_landed_once = true;
                Some(GroundTransition::Landed)
            }
            ContactPhase::Exit => {
                if !state.grounded || !state.ground_contacts.remove(&event.other_collider) {
                    return None;
                }
                if !state.ground_contacts.is_empty() {
                    return None;
                }
                state.grounded = false;
                state.has_landed_once = false;
                Some(GroundTransition::LeftGround)
            }
        }
    }
}
