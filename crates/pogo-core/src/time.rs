//! Time system for the pogo platformer
//!
//! Two clocks drive the game: a variable-rate frame clock (input sampling) and a
//! fixed-rate physics clock derived from it through an accumulator.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many in-game seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for physics (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

impl TimeConfig {
    /// Validate the timestep settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_finite("time_scale", self.time_scale)?;
        ConfigError::check_positive("fixed_timestep", self.fixed_timestep)?;
        ConfigError::check_positive("max_delta_time", self.max_delta_time)
    }
}

/// Game time tracking
#[derive(Debug, Clone)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since game start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped)
    pub delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Fixed steps taken since start
    pub fixed_step_count: u64,
    /// Accumulated time for fixed timestep
    fixed_accumulator: f32,
}

impl Default for GameTime {
    fn default() -> Self {
        Self::new(TimeConfig::default())
    }
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            total_time: 0.0,
            delta_time: 0.0,
            frame_count: 0,
            fixed_step_count: 0,
            fixed_accumulator: 0.0,
        }
    }

    /// Length of one physics tick in seconds
    pub fn fixed_delta(&self) -> f32 {
        self.config.fixed_timestep
    }

    /// Update the game time with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        let clamped = raw_delta.clamp(0.0, self.config.max_delta_time);
        self.frame_count += 1;

        self.delta_time = clamped * self.config.time_scale;
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Get the number of fixed timesteps to process this frame
    pub fn fixed_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.fixed_accumulator >= self.config.fixed_timestep {
            self.fixed_accumulator -= self.config.fixed_timestep;
            steps += 1;
        }
        self.fixed_step_count += steps as u64;
        steps
    }
}
