//! Respawn bookkeeping shared between level triggers and the controller

use std::collections::HashMap;

use glam::Vec3;
use pogo_core::{ColliderId, SurfaceTag};
use pogo_physics::{TriggerEvent, TriggerPhase};
use tracing::{debug, info};

use crate::collaborators::{RespawnSource, SoundRequest, SoundSink};
use crate::config::PitchRange;

pub const CHECKPOINT_SOUND: &str = "checkpointActivated";

#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    respawn: Vec3,
    activated: bool,
}

/// Owns the respawn point and the checkpoints that move it
#[derive(Debug, Default)]
pub struct GameSession {
    respawn_point: Option<Vec3>,
    checkpoints: HashMap<ColliderId, Checkpoint>,
    checkpoint_pitch: PitchRange,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the respawn point at the player's spawn position
    pub fn with_respawn_point(point: Vec3) -> Self {
        Self {
            respawn_point: Some(point),
            ..Self::default()
        }
    }

    pub fn set_respawn_point(&mut self, point: Vec3) {
        self.respawn_point = Some(point);
        debug!(x = point.x, y = point.y, z = point.z, "Respawn point set");
    }

    /// Register a checkpoint sensor and where it respawns the player
    pub fn register_checkpoint(&mut self, sensor: ColliderId, respawn: Vec3) {
        self.checkpoints.insert(
            sensor,
            Checkpoint {
                respawn,
                activated: false,
            },
        );
    }

    pub fn activated_checkpoints(&self) -> usize {
        self.checkpoints.values().filter(|c| c.activated).count()
    }

    /// Activate a checkpoint the player entered. Each checkpoint fires only once.
    pub fn handle_trigger(&mut self, event: &TriggerEvent, sound: &mut dyn SoundSink) -> bool {
        if event.tag != SurfaceTag::Checkpoint || event.phase != TriggerPhase::Enter {
            return false;
        }
        let Some(checkpoint) = self.checkpoints.get_mut(&event.sensor) else {
            debug!(sensor = event.sensor.0, "Unregistered checkpoint entered");
            return false;
        };
        if checkpoint.activated {
            return false;
        }
        checkpoint.activated = true;
        let respawn = checkpoint.respawn;

        self.set_respawn_point(respawn);
        sound.play(SoundRequest::new(CHECKPOINT_SOUND).with_pitch(self.checkpoint_pitch));
        info!(sensor = event.sensor.0, "Checkpoint activated");
        true
    }
}

impl RespawnSource for GameSession {
    fn respawn_point(&self) -> Option<Vec3> {
        self.respawn_point
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSound;

    const FLAG: ColliderId = ColliderId(5);

    fn enter(sensor: ColliderId) -> TriggerEvent {
        TriggerEvent {
            phase: TriggerPhase::Enter,
            sensor,
            tag: SurfaceTag::Checkpoint,
            surface: None,
        }
    }

    #[test]
    fn test_new_session_has_no_respawn_point() {
        assert_eq!(GameSession::new().respawn_point(), None);
        assert_eq!(
            GameSession::with_respawn_point(Vec3::Y).respawn_point(),
            Some(Vec3::Y)
        );
    }

    #[test]
    fn test_checkpoint_moves_respawn_point_once() {
        let mut session = GameSession::with_respawn_point(Vec3::ZERO);
        let mut sound = RecordingSound::default();
        session.register_checkpoint(FLAG, Vec3::new(10.0, 1.0, 0.0));

        assert!(session.handle_trigger(&enter(FLAG), &mut sound));
        assert_eq!(session.respawn_point(), Some(Vec3::new(10.0, 1.0, 0.0)));

        session.set_respawn_point(Vec3::ZERO);
        assert!(!session.handle_trigger(&enter(FLAG), &mut sound));
        assert_eq!(session.respawn_point(), Some(Vec3::ZERO));

        assert_eq!(sound.0.len(), 1);
        assert_eq!(sound.0[0].name, CHECKPOINT_SOUND);
        assert_eq!(sound.0[0].pitch, Some(PitchRange::new(0.9, 1.25)));
        assert_eq!(session.activated_checkpoints(), 1);
    }

    #[test]
    fn test_unrelated_triggers_are_ignored() {
        let mut session = GameSession::new();
        let mut sound = RecordingSound::default();
        session.register_checkpoint(FLAG, Vec3::X);

        let water = TriggerEvent {
            tag: SurfaceTag::Water,
            ..enter(FLAG)
        };
        assert!(!session.handle_trigger(&water, &mut sound));
        assert!(!session.handle_trigger(&enter(ColliderId(6)), &mut sound));
        assert_eq!(session.respawn_point(), None);
        assert!(sound.0.is_empty());
    }
}
