//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Upper bound for per-frame point buffers (trail, preview)
pub const MAX_POINT_COUNT: usize = 10_000;

#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub screen_width: f32,
    pub screen_height: f32,

    pub planet_radius: f32,
    pub gravity_constant: f32,

    pub target_radius: f32,
    pub target_orbit_radius: f32,
    pub target_angular_speed: f32,

    pub obstacle_radius: f32,
    pub obstacle_max_drift: f32,
    pub wrap_margin: f32,

    pub projectile_radius: f32,
    pub trail_length: usize,
    pub max_drag: f32,
    pub launch_speed_factor: f32,
    pub launch_clearance: f32,

    pub prediction_steps: usize,

    pub win_reset_delay: f64,
    pub crash_reset_delay: f64,
    pub miss_announce_delay: f64,
    pub fact_display_time: f64,

    pub win_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            planet_radius: PLANET_RADIUS,
            gravity_constant: GRAVITY_CONSTANT,
            target_radius: TARGET_RADIUS,
            target_orbit_radius: TARGET_ORBIT_RADIUS,
            target_angular_speed: TARGET_ANGULAR_SPEED,
            obstacle_radius: OBSTACLE_RADIUS,
            obstacle_max_drift: OBSTACLE_MAX_DRIFT,
            wrap_margin: WRAP_MARGIN,
            projectile_radius: PROJECTILE_RADIUS,
            trail_length: TRAIL_LENGTH,
            max_drag: MAX_DRAG,
            launch_speed_factor: LAUNCH_SPEED_FACTOR,
            launch_clearance: LAUNCH_CLEARANCE,
            prediction_steps: PREDICTION_STEPS,
            win_reset_delay: WIN_RESET_DELAY,
            crash_reset_delay: CRASH_RESET_DELAY,
            miss_announce_delay: MISS_ANNOUNCE_DELAY,
            fact_display_time: FACT_DISPLAY_TIME,
            win_score: WIN_SCORE,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be positive and finite",
                })
            }
        }
        fn non_negative(field: &'static str, value: f64) -> Result<(), TuningError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be non-negative and finite",
                })
            }
        }

        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        positive("planet_radius", self.planet_radius)?;
        positive("target_radius", self.target_radius)?;
        positive("target_orbit_radius", self.target_orbit_radius)?;
        positive("obstacle_radius", self.obstacle_radius)?;
        positive("projectile_radius", self.projectile_radius)?;
        positive("max_drag", self.max_drag)?;
        non_negative("gravity_constant", self.gravity_constant as f64)?;
        non_negative("target_angular_speed", self.target_angular_speed.abs() as f64)?;
        non_negative("obstacle_max_drift", self.obstacle_max_drift as f64)?;
        non_negative("wrap_margin", self.wrap_margin as f64)?;
        non_negative("launch_speed_factor", self.launch_speed_factor as f64)?;
        positive("launch_clearance", self.launch_clearance)?;
        non_negative("win_reset_delay", self.win_reset_delay)?;
        non_negative("crash_reset_delay", self.crash_reset_delay)?;
        non_negative("miss_announce_delay", self.miss_announce_delay)?;
        non_negative("fact_display_time", self.fact_display_time)?;

        if self.trail_length == 0 {
            return Err(TuningError::Invalid {
                field: "trail_length",
                reason: "must hold at least one point",
            });
        }
        if self.trail_length > MAX_POINT_COUNT {
            return Err(TuningError::Invalid {
                field: "trail_length",
                reason: "must not exceed 10000 points",
            });
        }
        if self.prediction_steps > MAX_POINT_COUNT {
            return Err(TuningError::Invalid {
                field: "prediction_steps",
                reason: "must not exceed 10000 steps",
            });
        }
        Ok(())
    }

    /// Launch point of a freshly reset rocket: straight above the planet
    pub fn default_launch_offset(&self) -> f32 {
        self.planet_radius + self.launch_clearance
    }
}
