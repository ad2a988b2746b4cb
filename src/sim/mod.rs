//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One integration step per tick
//! - Seeded RNG only
//! - Timers driven by the clock passed in, never read from the host
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod gravity;
pub mod predict;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{Collision, circles_overlap, resolve_collisions};
pub use effects::{Effects, Particle};
pub use gravity::{Step, gravity_acceleration, integrate_step};
pub use predict::{Trajectory, TrajectoryEnd, aim_preview, launch_velocity, predict_trajectory};
pub use state::{
    AttemptPhase, Body, Bounds, Difficulty, GameEvent, Kinematic, Obstacle, Planet, Projectile,
    SPACE_FACTS, Session, Target, Trail, UP, World,
};
pub use tick::{
    TickInput, generate_obstacles, reset, retry, run_timers, set_difficulty, tick, toggle_upgrade,
};
pub use timers::{ScheduledTimer, TimerAction, TimerToken, Timers};
