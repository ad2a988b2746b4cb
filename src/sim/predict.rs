//! Trajectory preview
//!
//! While the player drags, the path the rocket would take is re-simulated
//! from scratch with the same integration step as real flight. The preview
//! only reads the world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::gravity::{Step, integrate_step};
use super::state::{Body, Bounds, Planet, World};

/// Why a preview stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrajectoryEnd {
    /// Would come back down onto the planet
    SurfaceContact,
    /// Would leave the screen
    OutOfBounds,
    /// Ran out of steps while still in flight
    StepLimit,
}

/// A predicted flight path, starting at the launch point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub points: Vec<Vec2>,
    pub end: TrajectoryEnd,
}

/// Launch velocity for a drag from `launch_point` to `pointer`.
///
/// Speed is `min(drag, max_drag) * speed_factor` in the drag direction. A
/// zero-length drag gives a zero velocity.
pub fn launch_velocity(launch_point: Vec2, pointer: Vec2, max_drag: f32, speed_factor: f32) -> Vec2 {
    let delta = pointer - launch_point;
    let drag = delta.length();
    if drag <= 0.0 {
        return Vec2::ZERO;
    }
    delta / drag * (drag.min(max_drag) * speed_factor)
}

/// Simulate up to `max_steps` ticks of flight.
///
/// Stops before recording a point on surface contact, and after recording
/// the first point outside the screen.
pub fn predict_trajectory(
    planet: &Planet,
    bounds: &Bounds,
    start: Vec2,
    velocity: Vec2,
    max_steps: usize,
) -> Trajectory {
    let mut points = Vec::with_capacity(max_steps + 1);
    points.push(start);

    let mut pos = start;
    let mut vel = velocity;
    for _ in 0..max_steps {
        match integrate_step(pos, vel, planet.position(), planet.radius(), planet.gravity()) {
            Step::SurfaceContact => {
                return Trajectory {
                    points,
                    end: TrajectoryEnd::SurfaceContact,
                };
            }
            Step::Moved { pos: p, vel: v } => {
                pos = p;
                vel = v;
                points.push(pos);
                if bounds.is_escaped(pos) {
                    return Trajectory {
                        points,
                        end: TrajectoryEnd::OutOfBounds,
                    };
                }
            }
        }
    }

    Trajectory {
        points,
        end: TrajectoryEnd::StepLimit,
    }
}

/// Preview for the current drag, aimed at `pointer`
pub fn aim_preview(world: &World, pointer: Vec2) -> Trajectory {
    let start = world.projectile.launch_point;
    let velocity = launch_velocity(
        start,
        pointer,
        world.tuning.max_drag,
        world.tuning.launch_speed_factor,
    );
    predict_trajectory(
        &world.planet,
        &world.bounds,
        start,
        velocity,
        world.tuning.prediction_steps,
    )
}
