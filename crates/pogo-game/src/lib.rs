//! Pogo Game - Locomotion and jump control for a pogo stick player
//!
//! This crate provides:
//! - The [`PogoController`], which owns the player's [`LocomotionState`]
//! - Ground contact classification, the lean/torque policy and the charged jump
//! - Surface attachment, hazard respawn and external reset
//! - Collaborator traits for input, respawn, sound and animation
//! - The [`InputManager`] and the jump event channel
//! - Respawn bookkeeping ([`GameSession`]) and bounce pads

mod attachment;
pub mod bouncer;
mod collaborators;
mod config;
mod controller;
mod error;
mod ground;
pub mod input;
mod jump;
pub mod lean;
mod session;
mod state;

#[cfg(test)]
mod testing;

pub use bouncer::BouncePads;
pub use collaborators::{
    AnimationSink, CameraFrame, InputSource, RespawnSource, SoundRequest, SoundSink,
};
pub use config::{PitchRange, PogoConfig};
pub use controller::{JumpLaunch, PogoController, TickContext};
pub use error::LoadError;
pub use ground::GroundClassifier;
pub use input::{jump_channel, InputManager, JumpEvent, JumpReceiver, JumpSender};
pub use jump::jump_force;
pub use session::{GameSession, CHECKPOINT_SOUND};
pub use state::{GroundTransition, LocomotionState, Posture};
