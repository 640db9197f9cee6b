//! Locomotion tuning

use glam::Vec3;
use pogo_core::ConfigError;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Inclusive pitch range a sound is randomized within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchRange {
    pub low: f32,
    pub high: f32,
}

impl PitchRange {
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("pitch.low", self.low)?;
        ConfigError::check_positive("pitch.high", self.high)?;
        if self.high < self.low {
            return Err(ConfigError::InvertedPitchRange {
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}

impl Default for PitchRange {
    fn default() -> Self {
        Self::new(0.9, 1.25)
    }
}

/// Pogo stick controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PogoConfig {
    /// Jump strength for an instant tap
    pub min_jump_force: f32,
    /// Jump strength for a charge held `max_hold_time` or longer
    pub max_jump_force: f32,
    /// Seconds of charge needed to reach `max_jump_force`
    pub max_hold_time: f32,
    /// Lean torque while grounded
    pub torque_force: f32,
    /// Lean torque and drift while airborne
    pub air_torque_force: f32,
    /// Gain of the grounded angular-velocity damping
    pub upright_rotation_speed: f32,
    /// Gain of the camera-independent body-axis lean
    pub secondary_torque_gain: f32,
    /// How far an external reset lifts the stick
    pub reset_height: f32,
    /// Center of mass while airborne and not charging
    pub neutral_center_of_mass: Vec3,
    /// Center of mass after landing
    pub grounded_center_of_mass: Vec3,
    /// Center of mass while a jump is being charged
    pub charging_center_of_mass: Vec3,
    /// Sounds a launch picks from
    pub launch_sounds: Vec<String>,
    pub launch_pitch: PitchRange,
    /// Seed for sound selection; entropy when unset
    pub rng_seed: Option<u64>,
}

impl Default for PogoConfig {
    fn default() -> Self {
        Self {
            min_jump_force: 240.0,
            max_jump_force: 600.0,
            max_hold_time: 1.0,
            torque_force: 0.1,
            air_torque_force: 1.0,
            upright_rotation_speed: 4.0,
            secondary_torque_gain: 0.1,
            reset_height: 5.0,
            neutral_center_of_mass: Vec3::ZERO,
            grounded_center_of_mass: Vec3::new(0.0, -0.07, 0.0),
            charging_center_of_mass: Vec3::new(0.0, -0.02, 0.0),
            launch_sounds: ["pogoBounce1", "pogoBounce2", "pogoBounce3", "pogoBounce4"]
                .into_iter()
                .map(String::from)
                .collect(),
            launch_pitch: PitchRange::default(),
            rng_seed: None,
        }
    }
}

impl PogoConfig {
    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, LoadError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every tuning value before a controller is built with it
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_finite("min_jump_force", self.min_jump_force)?;
        ConfigError::check_finite("max_jump_force", self.max_jump_force)?;
        ConfigError::check_positive("max_hold_time", self.max_hold_time)?;
        if self.max_jump_force < self.min_jump_force {
            return Err(ConfigError::InvertedJumpRange {
                min: self.min_jump_force,
                max: self.max_jump_force,
            });
        }

        ConfigError::check_finite("torque_force", self.torque_force)?;
        ConfigError::check_finite("air_torque_force", self.air_torque_force)?;
        ConfigError::check_finite("upright_rotation_speed", self.upright_rotation_speed)?;
        ConfigError::check_finite("secondary_torque_gain", self.secondary_torque_gain)?;
        ConfigError::check_finite("reset_height", self.reset_height)?;

        if self.launch_sounds.is_empty() {
            return Err(ConfigError::EmptySoundPool);
        }
        self.launch_pitch.validate()
    }
}
