//! Player input plumbing.
//!
//! Lean is sampled by the controller each tick. Jump presses and releases are
//! discrete and may arrive between ticks, so they travel over a channel and are
//! drained at the start of the next fixed update.

use crossbeam_channel::{unbounded, Receiver, Sender};
use glam::Vec2;
use tracing::debug;

use crate::collaborators::InputSource;

/// A jump button transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpEvent {
    /// `false` for a press, `true` for a release
    pub canceled: bool,
    /// Seconds the button was held; meaningful only on release
    pub duration: f64,
}

impl JumpEvent {
    pub fn press() -> Self {
        Self {
            canceled: false,
            duration: 0.0,
        }
    }

    pub fn release(duration: f64) -> Self {
        Self {
            canceled: true,
            duration: duration.max(0.0),
        }
    }
}

/// Sending half of the jump channel
#[derive(Debug, Clone)]
pub struct JumpSender(Sender<JumpEvent>);

impl JumpSender {
    /// Queue an event; returns `false` once the controller has been dropped
    pub fn send(&self, event: JumpEvent) -> bool {
        match self.0.send(event) {
            Ok(()) => true,
            Err(_) => {
                debug!("Jump event dropped, no receiver");
                false
            }
        }
    }
}

/// Receiving half of the jump channel, owned by the controller
#[derive(Debug)]
pub struct JumpReceiver(Receiver<JumpEvent>);

impl JumpReceiver {
    /// Next queued event, if any
    pub fn try_next(&self) -> Option<JumpEvent> {
        self.0.try_recv().ok()
    }
}

pub fn jump_channel() -> (JumpSender, JumpReceiver) {
    let (tx, rx) = unbounded();
    (JumpSender(tx), JumpReceiver(rx))
}

/// Collects raw device state into lean samples and jump events
#[derive(Debug)]
pub struct InputManager {
    lean: Vec2,
    allow_input: bool,
    jump: JumpSender,
    held_since: Option<f64>,
}

impl InputManager {
    pub fn new(jump: JumpSender) -> Self {
        Self {
            lean: Vec2::ZERO,
            allow_input: true,
            jump,
            held_since: None,
        }
    }

    /// Update the lean stick, clamped to the unit square
    pub fn set_lean(&mut self, lean: Vec2) {
        self.lean = lean.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// Grant or revoke player control.
    ///
    /// Revoking while the jump button is held ends the hold immediately, the same
    /// as releasing it.
    pub fn toggle_input(&mut self, allow: bool, now: f64) {
        if !allow {
            self.release_jump(now);
        }
        self.allow_input = allow;
        debug!(allow, "Player input toggled");
    }

    pub fn press_jump(&mut self, now: f64) {
        if !self.allow_input || self.held_since.is_some() {
            return;
        }
        self.held_since = Some(now);
        self.jump.send(JumpEvent::press());
    }

    /// Ignored unless a press is outstanding
    pub fn release_jump(&mut self, now: f64) {
        if let Some(start) = self.held_since.take() {
            self.jump.send(JumpEvent::release(now - start));
        }
    }

    pub fn is_jump_held(&self) -> bool {
        self.held_since.is_some()
    }
}

impl InputSource for InputManager {
    fn lean(&self) -> Vec2 {
        self.lean
    }

    fn input_allowed(&self) -> bool {
        self.allow_input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> (InputManager, JumpReceiver) {
        let (tx, rx) = jump_channel();
        (InputManager::new(tx), rx)
    }

    fn queued(rx: &JumpReceiver) -> Vec<JumpEvent> {
        std::iter::from_fn(|| rx.try_next()).collect()
    }

    #[test]
    fn test_press_and_release_report_hold_duration() {
        let (mut input, rx) = manager();
        input.press_jump(1.0);
        input.release_jump(1.5);

        let events = queued(&rx);
        assert_eq!(events, vec![JumpEvent::press(), JumpEvent::release(0.5)]);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let (mut input, rx) = manager();
        input.release_jump(3.0);
        assert_eq!(queued(&rx).len(), 0);
    }

    #[test]
    fn test_repeated_press_is_a_single_hold() {
        let (mut input, rx) = manager();
        input.press_jump(0.0);
        input.press_jump(0.2);
        input.release_jump(1.0);

        let events = queued(&rx);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].duration, 1.0);
    }

    #[test]
    fn test_revoking_input_ends_the_hold() {
        let (mut input, rx) = manager();
        input.press_jump(0.0);
        input.toggle_input(false, 0.25);
        assert!(!input.input_allowed());
        assert!(!input.is_jump_held());

        input.press_jump(0.5);
        let events = queued(&rx);
        assert_eq!(events, vec![JumpEvent::press(), JumpEvent::release(0.25)]);
    }

    #[test]
    fn test_lean_is_clamped() {
        let (mut input, _rx) = manager();
        input.set_lean(Vec2::new(3.0, -0.5));
        assert_eq!(input.lean(), Vec2::new(1.0, -0.5));
    }

    #[test]
    fn test_send_after_receiver_dropped_reports_failure() {
        let (tx, rx) = jump_channel();
        drop(rx);
        assert!(!tx.send(JumpEvent::press()));
    }
}
