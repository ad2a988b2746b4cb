//! Explosion and confetti particles
//!
//! Purely cosmetic. Particles never feed back into the simulation.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const EXPLOSION_PARTICLES: usize = 20;
/// Max initial speed per axis
pub const EXPLOSION_SPEED: f32 = 5.0;
pub const EXPLOSION_DECAY: f32 = 0.02;
pub const EXPLOSION_DAMPING: f32 = 0.98;

pub const CONFETTI_PARTICLES: usize = 100;
pub const CONFETTI_GRAVITY: f32 = 0.1;
pub const CONFETTI_DECAY: f32 = 0.005;
/// Confetti is culled once this far below the bottom edge
pub const CONFETTI_CULL_MARGIN: f32 = 20.0;

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases by `decay` every tick
    pub life: f32,
    pub decay: f32,
    pub size: f32,
    /// Hue in degrees
    pub hue: f32,
    /// Degrees
    pub rotation: f32,
    /// Degrees per tick
    pub spin: f32,
}

impl Particle {
    fn step(&mut self) {
        self.pos += self.vel;
        self.life -= self.decay;
        self.rotation += self.spin;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    pub explosions: Vec<Particle>,
    pub confetti: Vec<Particle>,
}

impl Effects {
    /// Burst of warm fragments at `at`
    pub fn spawn_explosion(&mut self, at: Vec2, rng: &mut impl Rng) {
        self.explosions.extend((0..EXPLOSION_PARTICLES).map(|_| Particle {
            pos: at,
            vel: Vec2::new(
                rng.random_range(-EXPLOSION_SPEED..EXPLOSION_SPEED),
                rng.random_range(-EXPLOSION_SPEED..EXPLOSION_SPEED),
            ),
            life: 1.0,
            decay: EXPLOSION_DECAY,
            size: rng.random_range(4.0..12.0),
            hue: rng.random_range(10.0..70.0),
            rotation: 0.0,
            spin: 0.0,
        }));
    }

    /// Shower of colored squares falling from the top edge
    pub fn spawn_confetti(&mut self, width: f32, rng: &mut impl Rng) {
        self.confetti.extend((0..CONFETTI_PARTICLES).map(|_| Particle {
            pos: Vec2::new(rng.random::<f32>() * width, -10.0),
            vel: Vec2::new(rng.random_range(-4.0..4.0), rng.random_range(2.0..5.0)),
            life: 1.0,
            decay: CONFETTI_DECAY,
            size: rng.random_range(3.0..9.0),
            hue: rng.random_range(0.0..360.0),
            rotation: rng.random_range(0.0..360.0),
            spin: rng.random_range(-5.0..5.0),
        }));
    }

    /// Advance all particles one tick and drop dead ones
    pub fn update(&mut self, screen_height: f32) {
        for p in &mut self.explosions {
            p.step();
            p.vel *= EXPLOSION_DAMPING;
        }
        self.explosions.retain(|p| p.life > 0.0);

        for p in &mut self.confetti {
            p.step();
            p.vel.y += CONFETTI_GRAVITY;
        }
        self.confetti
            .retain(|p| p.life > 0.0 && p.pos.y <= screen_height + CONFETTI_CULL_MARGIN);
    }

    pub fn clear(&mut self) {
        self.explosions.clear();
        self.confetti.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.explosions.is_empty() && self.confetti.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_explosion_burst() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut effects = Effects::default();
        effects.spawn_explosion(Vec2::new(100.0, 100.0), &mut rng);

        assert_eq!(effects.explosions.len(), EXPLOSION_PARTICLES);
        for p in &effects.explosions {
            assert!(p.vel.x.abs() <= EXPLOSION_SPEED && p.vel.y.abs() <= EXPLOSION_SPEED);
            assert!((10.0..70.0).contains(&p.hue));
            assert_eq!(p.decay, EXPLOSION_DECAY);
        }
    }

    #[test]
    fn test_explosion_fades_out() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut effects = Effects::default();
        effects.spawn_explosion(Vec2::new(100.0, 100.0), &mut rng);

        // 1.0 / 0.02 = 50 ticks, plus slack for float error
        for _ in 0..49 {
            effects.update(600.0);
        }
        assert_eq!(effects.explosions.len(), EXPLOSION_PARTICLES);
        for _ in 0..3 {
            effects.update(600.0);
        }
        assert!(effects.explosions.is_empty());
    }

    #[test]
    fn test_confetti_falls_and_is_culled() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut effects = Effects::default();
        effects.spawn_confetti(800.0, &mut rng);
        assert_eq!(effects.confetti.len(), CONFETTI_PARTICLES);

        let before: Vec<f32> = effects.confetti.iter().map(|p| p.vel.y).collect();
        effects.update(600.0);
        for (p, vy) in effects.confetti.iter().zip(before) {
            assert!((p.vel.y - (vy + CONFETTI_GRAVITY)).abs() < 1e-5);
        }

        // Falling at >= 2 units/tick with gravity, everything is below the
        // screen well before life runs out (200 ticks)
        for _ in 0..120 {
            effects.update(600.0);
        }
        assert!(effects.confetti.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut effects = Effects::default();
        effects.spawn_explosion(Vec2::ZERO, &mut rng);
        effects.spawn_confetti(800.0, &mut rng);
        assert_eq!(effects.explosions.len(), EXPLOSION_PARTICLES);
        assert_eq!(effects.confetti.len(), CONFETTI_PARTICLES);
        effects.clear();
        assert!(effects.is_empty());
    }
}
