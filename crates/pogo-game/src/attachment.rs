//! Surface attachment, hazard respawn and external reset

use glam::Vec3;
use pogo_core::{SurfaceId, SurfaceTag};
use pogo_physics::{RigidBodyControl, TriggerEvent, TriggerPhase};
use tracing::{debug, info, warn};

use crate::collaborators::RespawnSource;
use crate::controller::PogoController;

impl PogoController {
    /// Feed one trigger event from the latest physics step
    pub fn handle_trigger(
        &mut self,
        event: &TriggerEvent,
        body: &mut dyn RigidBodyControl,
        respawn: &dyn RespawnSource,
    ) {
        match (event.tag, event.phase) {
            (SurfaceTag::MovableSurface, TriggerPhase::Enter) => match event.surface {
                Some(surface) => self.attach(surface, body),
                None => warn!(sensor = event.sensor.0, "Movable surface trigger has no body"),
            },
            (SurfaceTag::MovableSurface, TriggerPhase::Exit) => {
                if event.surface.is_some() && self.state.parent_surface == event.surface {
                    self.detach(body);
                }
            }
            (tag, TriggerPhase::Enter) if tag.is_hazard() => self.respawn(body, respawn),
            _ => {}
        }
    }

    fn attach(&mut self, surface: SurfaceId, body: &mut dyn RigidBodyControl) {
        if self.state.parent_surface == Some(surface) {
            return;
        }
        self.state.parent_surface = Some(surface);
        body.set_parent(Some(surface));
        debug!(surface = surface.0, "Attached to surface");
    }

    fn detach(&mut self, body: &mut dyn RigidBodyControl) {
        if let Some(surface) = self.state.parent_surface.take() {
            body.set_parent(None);
            debug!(surface = surface.0, "Detached from surface");
        }
    }

    /// Teleport to the respawn point, keeping orientation and stopping all motion
    pub fn respawn(&mut self, body: &mut dyn RigidBodyControl, respawn: &dyn RespawnSource) {
        let Some(point) = respawn.respawn_point() else {
            warn!("No respawn point set, hazard ignored");
            return;
        };
        let rotation = body.rotation();
        body.teleport(point, rotation);
        body.set_linear_velocity(Vec3::ZERO);
        info!(x = point.x, y = point.y, z = point.z, "Respawned");
    }

    /// Lift the body clear of whatever it is stuck in
    pub fn reset(&mut self, body: &mut dyn RigidBodyControl) {
        let position = body.position() + Vec3::Y * self.config.reset_height;
        let rotation = body.rotation();
        body.teleport(position, rotation);
        info!(height = self.config.reset_height, "Reset position");
    }
}

#[cfg(test)]
mod tests {
    use glam::Quat;
    use pogo_core::ColliderId;

    use super::*;
    use crate::config::PogoConfig;
    use crate::controller::tests::Harness;
    use crate::testing::FixedRespawn;

    const BRIDGE: SurfaceId = SurfaceId(42);

    fn trigger(tag: SurfaceTag, phase: TriggerPhase, surface: Option<SurfaceId>) -> TriggerEvent {
        TriggerEvent {
            phase,
            sensor: ColliderId(9),
            tag,
            surface,
        }
    }

    #[test]
    fn test_hazard_teleports_to_respawn_point_and_stops() {
        let mut harness = Harness::new(PogoConfig::default());
        let rotation = Quat::from_rotation_z(0.4);
        harness.body.position = Vec3::new(3.0, -2.0, 8.0);
        harness.body.rotation = rotation;
        harness.body.linear_velocity = Vec3::new(40.0, -90.0, 12.0);

        let respawn = FixedRespawn(Some(Vec3::new(0.0, 2.0, -1.0)));
        let event = trigger(SurfaceTag::Water, TriggerPhase::Enter, None);
        harness
            .controller
            .handle_trigger(&event, &mut harness.body, &respawn);

        assert_eq!(harness.body.position, Vec3::new(0.0, 2.0, -1.0));
        assert_eq!(harness.body.rotation, rotation);
        assert_eq!(harness.body.linear_velocity, Vec3::ZERO);
        assert_eq!(harness.body.teleports.len(), 1);
    }

    #[test]
    fn test_hazard_without_respawn_point_is_absorbed() {
        let mut harness = Harness::new(PogoConfig::default());
        harness.body.linear_velocity = Vec3::X;
        let event = trigger(SurfaceTag::Water, TriggerPhase::Enter, None);
        harness
            .controller
            .handle_trigger(&event, &mut harness.body, &FixedRespawn(None));

        assert!(harness.body.teleports.is_empty());
        assert_eq!(harness.body.linear_velocity, Vec3::X);
    }

    #[test]
    fn test_leaving_water_does_nothing() {
        let mut harness = Harness::new(PogoConfig::default());
        let event = trigger(SurfaceTag::Water, TriggerPhase::Exit, None);
        harness
            .controller
            .handle_trigger(&event, &mut harness.body, &FixedRespawn(Some(Vec3::ONE)));
        assert!(harness.body.teleports.is_empty());
    }

    #[test]
    fn test_movable_surface_attaches_and_detaches_without_moving() {
        let mut harness = Harness::new(PogoConfig::default());
        harness.body.position = Vec3::new(1.0, 2.0, 3.0);
        let respawn = FixedRespawn(None);

        let enter = trigger(SurfaceTag::MovableSurface, TriggerPhase::Enter, Some(BRIDGE));
        harness
            .controller
            .handle_trigger(&enter, &mut harness.body, &respawn);
        assert_eq!(harness.controller.state().parent_surface(), Some(BRIDGE));

        let exit = trigger(SurfaceTag::MovableSurface, TriggerPhase::Exit, Some(BRIDGE));
        harness
            .controller
            .handle_trigger(&exit, &mut harness.body, &respawn);

        assert_eq!(harness.controller.state().parent_surface(), None);
        assert_eq!(harness.body.parent_calls, vec![Some(BRIDGE), None]);
        assert!(harness.body.teleports.is_empty());
        assert_eq!(harness.body.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_exiting_another_surface_keeps_current_parent() {
        let mut harness = Harness::new(PogoConfig::default());
        let respawn = FixedRespawn(None);
        let enter = trigger(SurfaceTag::MovableSurface, TriggerPhase::Enter, Some(BRIDGE));
        harness
            .controller
            .handle_trigger(&enter, &mut harness.body, &respawn);

        let other = trigger(
            SurfaceTag::MovableSurface,
            TriggerPhase::Exit,
            Some(SurfaceId(43)),
        );
        harness
            .controller
            .handle_trigger(&other, &mut harness.body, &respawn);

        assert_eq!(harness.controller.state().parent_surface(), Some(BRIDGE));
        assert_eq!(harness.body.parent_calls, vec![Some(BRIDGE)]);
    }

    #[test]
    fn test_reset_lifts_and_keeps_orientation() {
        let mut harness = Harness::new(PogoConfig::default());
        let rotation = Quat::from_rotation_x(1.0);
        harness.body.position = Vec3::new(4.0, 1.0, 0.0);
        harness.body.rotation = rotation;

        harness.controller.reset(&mut harness.body);

        assert_eq!(
            harness.body.teleports,
            vec![(Vec3::new(4.0, 6.0, 0.0), rotation)]
        );
    }
}
