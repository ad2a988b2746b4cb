//! Inverse-square gravity toward the planet
//!
//! The projectile (and the trajectory preview) are the only things that feel
//! gravity, and only from the planet. Both advance with the same
//! semi-implicit Euler step so the preview matches real flight exactly.

use glam::Vec2;

/// Acceleration of a body at `from` toward `to`: `constant / d²` along the
/// line joining them. Coincident points yield zero rather than NaN.
#[inline]
pub fn gravity_acceleration(from: Vec2, to: Vec2, constant: f32) -> Vec2 {
    let delta = to - from;
    let dist_sq = delta.length_squared();
    if dist_sq <= 0.0 {
        return Vec2::ZERO;
    }
    let dist = dist_sq.sqrt();
    delta / dist * (constant / dist_sq)
}

/// Outcome of a single integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Body moved to the new state
    Moved { pos: Vec2, vel: Vec2 },
    /// Body was at or inside the planet surface; nothing was integrated
    SurfaceContact,
}

/// Advance one tick: velocity picks up gravity first, then position picks up
/// velocity. Surface contact (distance <= radius) short-circuits before any
/// direction is computed.
pub fn integrate_step(
    pos: Vec2,
    vel: Vec2,
    planet_pos: Vec2,
    planet_radius: f32,
    gravity_constant: f32,
) -> Step {
    let distance = pos.distance(planet_pos);
    if distance <= planet_radius {
        return Step::SurfaceContact;
    }
    let vel = vel + gravity_acceleration(pos, planet_pos, gravity_constant);
    Step::Moved {
        pos: pos + vel,
        vel,
    }
}
