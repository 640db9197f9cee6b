//! Demo settings
//!
//! Loaded from a TOML file with `[pogo]`, `[time]` and `[demo]` tables. Missing
//! tables and keys fall back to defaults.

use std::fs;
use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use pogo_core::TimeConfig;
use pogo_game::PogoConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All settings read by the demo binary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pogo: PogoConfig,
    pub time: TimeConfig,
    pub demo: DemoSettings,
}

impl Settings {
    /// Load settings from `path`, or return defaults if it is missing or unreadable
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Reject values the controller or clocks cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        self.pogo.validate().context("Invalid [pogo] settings")?;
        self.time.validate().context("Invalid [time] settings")?;
        self.demo.validate().context("Invalid [demo] settings")
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize settings")
    }
}

/// Scripted run of the headless demo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Seconds of game time to simulate
    pub duration: f64,
    /// Rate of the variable frame clock
    pub frame_rate: f32,
    /// Seconds between jump presses
    pub jump_interval: f64,
    /// Seconds each jump is charged for
    pub hold_time: f64,
    /// Lean held for the whole run
    pub lean: Vec2,
    /// Window of game time during which player input is revoked
    pub input_lock: Option<[f64; 2]>,
    /// Game time at which an external reset is requested
    pub reset_at: Option<f64>,
    /// Seed for the demo's sound picks
    pub seed: u64,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            duration: 12.0,
            frame_rate: 144.0,
            jump_interval: 1.5,
            hold_time: 0.5,
            lean: Vec2::new(0.0, 0.3),
            input_lock: Some([6.0, 7.5]),
            reset_at: Some(9.0),
            seed: 7,
        }
    }
}

impl DemoSettings {
    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.duration > 0.0, "duration must be positive");
        anyhow::ensure!(self.frame_rate > 0.0, "frame_rate must be positive");
        anyhow::ensure!(
            self.hold_time >= 0.0 && self.hold_time < self.jump_interval,
            "hold_time must be shorter than jump_interval"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/pogo.toml"));
        assert_eq!(settings.demo.frame_rate, 144.0);
    }

    #[test]
    fn test_partial_tables_parse() {
        let settings: Settings = toml::from_str(
            r#"
            [pogo]
            max_hold_time = 2.0

            [demo]
            lean = [0.5, 0.0]
            input_lock = [1.0, 2.0]
            "#,
        )
        .expect("valid settings");
        assert_eq!(settings.pogo.max_hold_time, 2.0);
        assert_eq!(settings.demo.lean, Vec2::new(0.5, 0.0));
        assert_eq!(settings.demo.input_lock, Some([1.0, 2.0]));
        assert_eq!(settings.time.fixed_timestep, 1.0 / 60.0);
    }

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let text = Settings::default().to_toml().expect("serializable");
        let parsed: Settings = toml::from_str(&text).expect("parsable");
        assert_eq!(parsed.demo.seed, 7);
        assert_eq!(parsed.pogo.launch_sounds.len(), 4);
    }

    #[test]
    fn test_hold_longer_than_interval_is_rejected() {
        let settings = Settings {
            demo: DemoSettings {
                hold_time: 2.0,
                jump_interval: 1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
