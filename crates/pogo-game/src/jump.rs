//! Charged jump policy

use pogo_core::remap_clamped;
use pogo_physics::ForceMode;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::collaborators::{SoundRequest, SoundSink};
use crate::config::PogoConfig;
use crate::controller::{JumpLaunch, PogoController, TickContext};
use crate::input::JumpEvent;

/// Jump strength for a charge held `duration` seconds.
///
/// The duration is clamped to `[0, max_hold_time]` before it is mapped linearly
/// onto `[min_jump_force, max_jump_force]`.
pub fn jump_force(config: &PogoConfig, duration: f64) -> f32 {
    remap_clamped(
        duration as f32,
        0.0,
        config.max_hold_time,
        config.min_jump_force,
        config.max_jump_force,
    )
}

impl PogoController {
    pub(crate) fn handle_jump(
        &mut self,
        event: JumpEvent,
        ctx: &mut TickContext<'_>,
    ) -> Option<JumpLaunch> {
        if !ctx.input.input_allowed() {
            if event.canceled && self.state.charging {
                self.state.charging = false;
                self.sync_posture(&mut *ctx.body);
                debug!("Jump released without input, charge discarded");
            }
            return None;
        }

        if !event.canceled {
            self.state.charging = true;
            self.sync_posture(&mut *ctx.body);
            ctx.animation.play_spring(false);
            return None;
        }

        self.state.charging = false;
        self.sync_posture(&mut *ctx.body);
        ctx.animation.play_spring(true);

        if !self.state.grounded {
            debug!(duration = event.duration, "Jump released in the air, charge discarded");
            return None;
        }

        let force = jump_force(&self.config, event.duration);
        let impulse = ctx.body.up() * (force * ctx.dt);
        ctx.body.apply_force(impulse, ForceMode::Impulse);
        let sound = self.play_launch_sound(&mut *ctx.sound);
        debug!(force, duration = event.duration, "Jumped");

        Some(JumpLaunch {
            force,
            impulse,
            sound,
        })
    }

    fn play_launch_sound(&mut self, sink: &mut dyn SoundSink) -> Option<String> {
        let name = self.config.launch_sounds.choose(&mut self.rng)?.clone();
        sink.play(SoundRequest::new(name.clone()).with_pitch(self.config.launch_pitch));
        Some(name)
    }
}
