//! The pogo stick locomotion controller.
//!
//! One controller drives one player body. Jump events are queued by the input
//! layer and consumed at the start of each fixed tick, before the lean policy runs.
//! Contact and trigger events from the physics step are fed in separately.

use glam::Vec3;
use pogo_core::{ColliderId, ConfigError};
use pogo_physics::{ContactEvent, RigidBodyControl};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::collaborators::{AnimationSink, CameraFrame, InputSource, SoundSink};
use crate::config::PogoConfig;
use crate::ground::GroundClassifier;
use crate::input::JumpReceiver;
use crate::lean::{apply_lean, LeanInputs};
use crate::state::{GroundTransition, LocomotionState, Posture};

/// Collaborators borrowed for one fixed tick
pub struct TickContext<'a> {
    pub body: &'a mut dyn RigidBodyControl,
    pub input: &'a dyn InputSource,
    pub camera: CameraFrame,
    pub sound: &'a mut dyn SoundSink,
    pub animation: &'a mut dyn AnimationSink,
    /// Fixed timestep in seconds
    pub dt: f32,
}

/// A jump that left the ground this tick
#[derive(Debug, Clone, PartialEq)]
pub struct JumpLaunch {
    /// Remapped charge strength before timestep scaling
    pub force: f32,
    pub impulse: Vec3,
    pub sound: Option<String>,
}

pub struct PogoController {
    pub(crate) config: PogoConfig,
    pub(crate) state: LocomotionState,
    classifier: GroundClassifier,
    jumps: JumpReceiver,
    pub(crate) rng: StdRng,
}

impl PogoController {
    pub fn new(
        config: PogoConfig,
        spring_tip: ColliderId,
        jumps: JumpReceiver,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            state: LocomotionState::new(config.neutral_center_of_mass),
            classifier: GroundClassifier::new(spring_tip),
            config,
            jumps,
            rng,
        })
    }

    pub fn config(&self) -> &PogoConfig {
        &self.config
    }

    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    /// Run one fixed physics tick
    pub fn fixed_update(&mut self, ctx: &mut TickContext<'_>) -> Option<JumpLaunch> {
        let mut launch = None;
        while let Some(event) = self.jumps.try_next() {
            if let Some(jump) = self.handle_jump(event, ctx) {
                launch = Some(jump);
            }
        }

        let inputs = LeanInputs {
            lean: ctx.input.lean(),
            grounded: self.state.grounded,
            input_allowed: ctx.input.input_allowed(),
            camera: ctx.camera,
            dt: ctx.dt,
        };
        apply_lean(&self.config, inputs, &mut *ctx.body);

        launch
    }

    /// Feed one solid contact event from the latest physics step
    pub fn handle_contact(
        &mut self,
        event: &ContactEvent,
        body: &mut dyn RigidBodyControl,
    ) -> Option<GroundTransition> {
        let transition = self.classifier.classify(&mut self.state, event)?;
        match transition {
            GroundTransition::Landed => debug!(surface = event.other_collider.0, "Landed"),
            GroundTransition::LeftGround => debug!("Left the ground"),
        }
        self.sync_posture(body);
        Some(transition)
    }

    fn target_center_of_mass(&self) -> Vec3 {
        match self.state.posture() {
            Posture::Neutral => self.config.neutral_center_of_mass,
            Posture::Grounded => self.config.grounded_center_of_mass,
            Posture::Charging => self.config.charging_center_of_mass,
        }
    }

    /// Hand the body a new center of mass when the posture changed it
    pub(crate) fn sync_posture(&mut self, body: &mut dyn RigidBodyControl) {
        let target = self.target_center_of_mass();
        if target != self.state.center_of_mass_offset {
            self.state.center_of_mass_offset = target;
            body.set_center_of_mass(target);
        }
    }
}
