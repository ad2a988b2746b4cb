//! Moon Shot - a gravity slingshot arcade game
//!
//! Core modules:
//! - `sim`: Simulation (gravity, collisions, attempt lifecycle, effects)
//! - `renderer`: Draw-call abstraction and the scene painter
//! - `input`: Pointer/touch accumulation into per-tick input
//! - `hud`: Score/status messages driven by game events
//! - `tuning`: Data-driven game balance
//! - `settings`: Cosmetic upgrades

pub mod hud;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{UnknownName, Upgrade, Upgrades};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Canvas dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Earth (the planet the rocket launches from)
    pub const PLANET_RADIUS: f32 = 40.0;
    /// Gravity constant: acceleration is `GRAVITY_CONSTANT / d²` per tick
    pub const GRAVITY_CONSTANT: f32 = 1500.0;

    /// Moon (the orbiting target)
    pub const TARGET_RADIUS: f32 = 25.0;
    pub const TARGET_ORBIT_RADIUS: f32 = 250.0;
    /// Radians per tick
    pub const TARGET_ANGULAR_SPEED: f32 = 0.005;

    /// Asteroids
    pub const OBSTACLE_RADIUS: f32 = 8.0;
    /// Max drift per axis per tick
    pub const OBSTACLE_MAX_DRIFT: f32 = 1.0;
    /// Asteroids wrap once this far outside the screen
    pub const WRAP_MARGIN: f32 = 50.0;

    /// Rocket
    pub const PROJECTILE_RADIUS: f32 = 8.0;
    pub const TRAIL_LENGTH: usize = 100;
    /// Drag distance beyond which launch speed saturates
    pub const MAX_DRAG: f32 = 100.0;
    /// Launch speed per unit of drag
    pub const LAUNCH_SPEED_FACTOR: f32 = 0.1;
    /// Launch point sits this far above the planet surface
    pub const LAUNCH_CLEARANCE: f32 = 1.0;

    /// Trajectory preview length
    pub const PREDICTION_STEPS: usize = 300;

    /// Deferred transition delays (seconds)
    pub const WIN_RESET_DELAY: f64 = 5.0;
    pub const CRASH_RESET_DELAY: f64 = 2.0;
    pub const MISS_ANNOUNCE_DELAY: f64 = 1.0;
    pub const FACT_DISPLAY_TIME: f64 = 5.0;

    /// Score awarded for hitting the moon
    pub const WIN_SCORE: u64 = 100;
}

/// Convert polar (r, theta) to cartesian (x, y) around `center`
#[inline]
pub fn polar_offset(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}

/// Unit vector from `from` toward `to`, or `fallback` when the points coincide
#[inline]
pub fn direction_or(from: Vec2, to: Vec2, fallback: Vec2) -> Vec2 {
    let delta = to - from;
    let len = delta.length();
    if len > 0.0 { delta / len } else { fallback }
}
