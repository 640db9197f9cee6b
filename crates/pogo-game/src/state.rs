use std::collections::BTreeSet;

use glam::Vec3;
use pogo_core::{ColliderId, SurfaceId};

/// Which center-of-mass pose the body should hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posture {
    Neutral,
    Grounded,
    Charging,
}

/// A change in ground contact reported by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundTransition {
    Landed,
    LeftGround,
}

/// Locomotion state owned by one controller
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionState {
    pub(crate) grounded: bool,
    pub(crate) has_landed_once: bool,
    pub(crate) charging: bool,
    pub(crate) center_of_mass_offset: Vec3,
    pub(crate) parent_surface: Option<SurfaceId>,
    /// Ground colliders currently touching the spring tip
    pub(crate) ground_contacts: BTreeSet<ColliderId>,
}

impl LocomotionState {
    pub(crate) fn new(center_of_mass_offset: Vec3) -> Self {
        Self {
            grounded: false,
            has_landed_once: false,
            charging: false,
            center_of_mass_offset,
            parent_surface: None,
            ground_contacts: BTreeSet::new(),
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Set on the landing that starts the current grounded span
    pub fn has_landed_once(&self) -> bool {
        self.has_landed_once
    }

    /// A jump is being charged
    pub fn is_charging(&self) -> bool {
        self.charging
    }

    /// Center of mass last handed to the body, body-local
    pub fn center_of_mass_offset(&self) -> Vec3 {
        self.center_of_mass_offset
    }

    /// Surface the body is being carried by
    pub fn parent_surface(&self) -> Option<SurfaceId> {
        self.parent_surface
    }

    /// Charging wins over landing, landing wins over airborne
    pub fn posture(&self) -> Posture {
        if self.charging {
            Posture::Charging
        } else if self.grounded && self.has_landed_once {
            Posture::Grounded
        } else {
            Posture::Neutral
        }
    }
}
