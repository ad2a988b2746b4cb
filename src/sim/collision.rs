//! Collision detection
//!
//! Every body is a circle, so a hit is plain distance against summed radii.
//! Planet contact and leaving the screen are detected during integration
//! (see [`Projectile::integrate`]); this module reports them with the same
//! [`Collision`] type so the attempt logic has one vocabulary.

use glam::Vec2;

use super::state::{Body, Obstacle, Projectile, Target};

/// Result of a collision check for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    None,
    /// Rocket touched the moon
    TargetHit,
    /// Rocket touched the asteroid at `index`
    ObstacleHit { index: usize },
    /// Rocket came back down onto the planet
    PlanetHit,
    /// Rocket left through the bottom, left, or right edge
    OutOfBounds,
}

/// Strict overlap of two circles. Coincident centers always overlap, so no
/// direction is ever needed.
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Check the rocket against the moon, then against each asteroid.
///
/// The moon is checked first, so a tick that touches both resolves as a hit.
/// The first overlapping asteroid wins.
pub fn resolve_collisions(
    projectile: &Projectile,
    target: &Target,
    obstacles: &[Obstacle],
) -> Collision {
    if !projectile.launched {
        return Collision::None;
    }

    if projectile.overlaps(target) {
        return Collision::TargetHit;
    }

    obstacles
        .iter()
        .position(|obstacle| projectile.overlaps(obstacle))
        .map_or(Collision::None, |index| Collision::ObstacleHit { index })
}
