//! Headless demo level and scripted run

use anyhow::{Context, Result};
use glam::{Quat, Vec3};
use pogo_core::{GameTime, SurfaceTag, Transform};
use pogo_game::{
    jump_channel, AnimationSink, BouncePads, CameraFrame, GameSession, InputManager,
    InputSource, JumpLaunch, PogoConfig, PogoController, SoundRequest, SoundSink, TickContext,
};
use pogo_physics::convert::collider_id;
use pogo_physics::{
    PhysicsConfig, PhysicsWorld, PogoBodyDesc, PogoHandles, RigidBodyControl, SurfaceHandles,
};
use tracing::{debug, info};

use crate::settings::Settings;

const SPAWN: Vec3 = Vec3::new(0.0, 1.5, 0.0);

/// Logs sound requests instead of playing them
#[derive(Debug, Default)]
pub struct LogSound {
    pub played: usize,
}

impl SoundSink for LogSound {
    fn play(&mut self, request: SoundRequest) {
        self.played += 1;
        match request.pitch {
            Some(pitch) => info!("Sound {} (pitch {}..{})", request.name, pitch.low, pitch.high),
            None => info!("Sound {}", request.name),
        }
    }
}

#[derive(Debug, Default)]
pub struct LogAnimation;

impl AnimationSink for LogAnimation {
    fn play_spring(&mut self, release: bool) {
        debug!(release, "Spring animation");
    }
}

/// Totals reported at the end of a run
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoSummary {
    pub frames: u64,
    pub fixed_steps: u64,
    pub jumps: u32,
    pub bounces: u32,
    pub sounds: usize,
    pub final_position: Vec3,
}

pub struct Demo {
    settings: Settings,
    world: PhysicsWorld,
    pogo: PogoHandles,
    bridge: SurfaceHandles,
    controller: PogoController,
    input: InputManager,
    session: GameSession,
    pads: BouncePads,
    camera: Transform,
    sound: LogSound,
    animation: LogAnimation,
    summary: DemoSummary,
}

impl Demo {
    pub fn new(settings: Settings) -> Result<Self> {
        let mut world = PhysicsWorld::with_config(PhysicsConfig {
            timestep: settings.time.fixed_timestep,
            ..Default::default()
        });

        world.create_ground(0.0);
        world.create_trigger(
            Vec3::new(2.0, 0.5, 2.0),
            Vec3::new(0.0, 0.5, -14.0),
            SurfaceTag::Water,
        );
        let checkpoint = world.create_trigger(
            Vec3::new(1.5, 1.0, 1.0),
            Vec3::new(0.0, 1.0, -5.0),
            SurfaceTag::Checkpoint,
        );
        let pad = world.create_static_box(
            Vec3::new(1.0, 0.05, 1.0),
            Vec3::new(0.0, 0.05, -9.0),
            SurfaceTag::Bouncer,
        );
        let bridge =
            world.create_kinematic_surface(Vec3::new(2.0, 0.2, 1.5), Vec3::new(0.0, 0.2, -20.0));
        let pogo = world.spawn_pogo(&PogoBodyDesc::default(), SPAWN);

        let mut session = GameSession::with_respawn_point(SPAWN);
        session.register_checkpoint(collider_id(checkpoint), Vec3::new(0.0, 1.5, -5.0));

        let mut pads = BouncePads::new();
        pads.register(collider_id(pad), 6.0);

        let pogo_config = PogoConfig {
            rng_seed: settings.pogo.rng_seed.or(Some(settings.demo.seed)),
            ..settings.pogo.clone()
        };

        let (jump_tx, jump_rx) = jump_channel();
        let controller = PogoController::new(pogo_config, collider_id(pogo.spring_tip), jump_rx)
            .context("Failed to create pogo controller")?;

        let mut input = InputManager::new(jump_tx);
        input.set_lean(settings.demo.lean);

        Ok(Self {
            settings,
            world,
            pogo,
            bridge,
            controller,
            input,
            session,
            pads,
            camera: Transform::from_position_rotation(
                SPAWN + Vec3::new(0.0, 3.0, 6.0),
                Quat::IDENTITY,
            ),
            sound: LogSound::default(),
            animation: LogAnimation,
            summary: DemoSummary::default(),
        })
    }

    /// Run the scripted session to completion
    pub fn run(mut self) -> Result<DemoSummary> {
        let mut time = GameTime::new(self.settings.time.clone());
        let frame_delta = 1.0 / self.settings.demo.frame_rate;
        let mut reset_pending = self.settings.demo.reset_at.is_some();

        info!(
            "Running demo for {:.1}s at {} fps",
            self.settings.demo.duration, self.settings.demo.frame_rate
        );

        while time.total_time < self.settings.demo.duration {
            time.update(frame_delta);
            let now = time.total_time;
            self.drive_input(now);

            if reset_pending && self.settings.demo.reset_at.is_some_and(|at| now >= at) {
                reset_pending = false;
                let mut body = self.world.body(self.pogo.body);
                self.controller.reset(&mut body);
            }

            for _ in 0..time.fixed_steps() {
                self.fixed_tick(now, time.fixed_delta())?;
            }
        }

        self.summary.frames = time.frame_count;
        self.summary.fixed_steps = time.fixed_step_count;
        self.summary.sounds = self.sound.played;
        self.summary.final_position = self.world.body(self.pogo.body).position();
        Ok(self.summary)
    }

    /// Variable-clock input: lean stays fixed, jumps follow the press schedule
    fn drive_input(&mut self, now: f64) {
        let demo = &self.settings.demo;

        let locked = demo
            .input_lock
            .is_some_and(|[start, end]| now >= start && now < end);
        if locked == self.input.input_allowed() {
            self.input.toggle_input(!locked, now);
        }

        let phase = now % demo.jump_interval;
        if phase < demo.hold_time {
            self.input.press_jump(now);
        } else {
            self.input.release_jump(now);
        }
    }

    fn fixed_tick(&mut self, now: f64, dt: f32) -> Result<()> {
        let sway = (now as f32 * 0.8).sin() * 3.0;
        self.world
            .move_surface(self.bridge.body, Vec3::new(sway, 0.2, -20.0))
            .context("Failed to move bridge")?;

        let launch = {
            let mut body = self.world.body(self.pogo.body);
            let mut ctx = TickContext {
                body: &mut body,
                input: &self.input,
                camera: CameraFrame::from_transform(&self.camera),
                sound: &mut self.sound,
                animation: &mut self.animation,
                dt,
            };
            self.controller.fixed_update(&mut ctx)
        };
        if let Some(JumpLaunch { force, .. }) = launch {
            self.summary.jumps += 1;
            info!("Jump {} launched with force {:.1}", self.summary.jumps, force);
        }

        self.world.step();
        self.dispatch_events();
        Ok(())
    }

    fn dispatch_events(&mut self) {
        let events = self.world.drain_events(self.pogo.body);

        for contact in &events.contacts {
            let mut body = self.world.body(self.pogo.body);
            if self.pads.handle_contact(contact, &mut body) {
                self.summary.bounces += 1;
            }
            self.controller.handle_contact(contact, &mut body);
        }

        for trigger in &events.triggers {
            self.session.handle_trigger(trigger, &mut self.sound);
            let mut body = self.world.body(self.pogo.body);
            self.controller
                .handle_trigger(trigger, &mut body, &self.session);
        }
    }
}
