//! Contact and trigger events reported for tracked bodies.
//!
//! Rapier exposes the current contact graph; these types turn consecutive snapshots
//! of it into enter/stay/exit callbacks.

use std::collections::{BTreeMap, BTreeSet};

use glam::Vec3;
use pogo_core::{ColliderId, SurfaceId, SurfaceTag};

/// Lifecycle phase of a solid contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Enter,
    Stay,
    Exit,
}

/// A solid contact between one of a tracked body's colliders and another collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub phase: ContactPhase,
    /// The tracked body's own collider involved in the contact
    pub this_collider: ColliderId,
    /// The collider that was touched
    pub other_collider: ColliderId,
    /// Classification of the touched collider
    pub other_tag: SurfaceTag,
    /// Contact normal pointing from the other collider towards the tracked body
    pub normal: Vec3,
}

/// Lifecycle phase of a trigger overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPhase {
    Enter,
    Exit,
}

/// A tracked body entering or leaving a sensor volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerEvent {
    pub phase: TriggerPhase,
    pub sensor: ColliderId,
    pub tag: SurfaceTag,
    /// The body the sensor is attached to, if any
    pub surface: Option<SurfaceId>,
}

/// One contact observed during the latest snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSample {
    pub this_collider: ColliderId,
    pub other_collider: ColliderId,
    pub other_tag: SurfaceTag,
    pub normal: Vec3,
}

/// One sensor overlap observed during the latest snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerSample {
    pub sensor: ColliderId,
    pub tag: SurfaceTag,
    pub surface: Option<SurfaceId>,
}

/// Diffs contact/overlap snapshots into events for a single body
#[derive(Debug, Default)]
pub struct ContactTracker {
    contacts: BTreeMap<(ColliderId, ColliderId), ContactSample>,
    triggers: BTreeMap<ColliderId, TriggerSample>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contacts active in the last snapshot
    pub fn active_contacts(&self) -> usize {
        self.contacts.len()
    }

    /// Replace the contact snapshot and emit the resulting events.
    ///
    /// Exits are emitted first so a controller sees a clean span boundary before any
    /// new contact begins. Exit events carry the last sample seen for the pair.
    pub fn update_contacts(&mut self, samples: &[ContactSample], out: &mut Vec<ContactEvent>) {
        let current: BTreeMap<(ColliderId, ColliderId), ContactSample> = samples
            .iter()
            .map(|s| ((s.this_collider, s.other_collider), *s))
            .collect();

        for (key, previous) in &self.contacts {
            if !current.contains_key(key) {
                out.push(Self::event(ContactPhase::Exit, previous));
            }
        }

        for (key, sample) in &current {
            let phase = if self.contacts.contains_key(key) {
                ContactPhase::Stay
            } else {
                ContactPhase::Enter
            };
            out.push(Self::event(phase, sample));
        }

        self.contacts = current;
    }

    /// Replace the overlap snapshot and emit enter/exit events
    pub fn update_triggers(&mut self, samples: &[TriggerSample], out: &mut Vec<TriggerEvent>) {
        let current: BTreeMap<ColliderId, TriggerSample> =
            samples.iter().map(|s| (s.sensor, *s)).collect();

        let previous: BTreeSet<ColliderId> = self.triggers.keys().copied().collect();

        for (sensor, sample) in &self.triggers {
            if !current.contains_key(sensor) {
                out.push(TriggerEvent {
                    phase: TriggerPhase::Exit,
                    sensor: *sensor,
                    tag: sample.tag,
                    surface: sample.surface,
                });
            }
        }

        for (sensor, sample) in &current {
            if !previous.contains(sensor) {
                out.push(TriggerEvent {
                    phase: TriggerPhase::Enter,
                    sensor: *sensor,
                    tag: sample.tag,
                    surface: sample.surface,
                });
            }
        }

        self.triggers = current;
    }

    fn event(phase: ContactPhase, sample: &ContactSample) -> ContactEvent {
        ContactEvent {
            phase,
            this_collider: sample.this_collider,
            other_collider: sample.other_collider,
            other_tag: sample.other_tag,
            normal: sample.normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground_sample(this: u64, other: u64) -> ContactSample {
        ContactSample {
            this_collider: ColliderId(this),
            other_collider: ColliderId(other),
            other_tag: SurfaceTag::Ground,
            normal: Vec3::Y,
        }
    }

    #[test]
    fn test_enter_stay_exit_sequence() {
        let mut tracker = ContactTracker::new();
        let mut events = Vec::new();

        tracker.update_contacts(&[ground_sample(1, 10)], &mut events);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, ContactPhase::Enter);

        events.clear();
        tracker.update_contacts(&[ground_sample(1, 10)], &mut events);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, ContactPhase::Stay);

        events.clear();
        tracker.update_contacts(&[], &mut events);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, ContactPhase::Exit);
        assert_eq!(events[0].other_tag, SurfaceTag::Ground);
        assert_eq!(tracker.active_contacts(), 0);
    }

    #[test]
    fn test_exits_precede_enters() {
        let mut tracker = ContactTracker::new();
        let mut events = Vec::new();
        tracker.update_contacts(&[ground_sample(1, 10)], &mut events);

        events.clear();
        tracker.update_contacts(&[ground_sample(1, 11)], &mut events);
        let phases: Vec<_> = events.iter().map(|e| e.phase).collect();
        assert_eq!(phases, vec![ContactPhase::Exit, ContactPhase::Enter]);
    }

    #[test]
    fn test_triggers_only_report_edges() {
        let mut tracker = ContactTracker::new();
        let mut events = Vec::new();
        let water = TriggerSample {
            sensor: ColliderId(5),
            tag: SurfaceTag::Water,
            surface: None,
        };

        tracker.update_triggers(&[water], &mut events);
        tracker.update_triggers(&[water], &mut events);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].phase, TriggerPhase::Enter);

        tracker.update_triggers(&[], &mut events);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].phase, TriggerPhase::Exit);
        assert_eq!(events[1].tag, SurfaceTag::Water);
    }
}
