//! Game state and core simulation types
//!
//! Everything the frame loop touches is owned by a single [`World`].

use std::collections::VecDeque;
use std::str::FromStr;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Collision, circles_overlap};
use super::effects::Effects;
use super::gravity::{Step, integrate_step};
use super::predict::Trajectory;
use super::timers::Timers;
use crate::settings::{UnknownName, Upgrades};
use crate::tuning::Tuning;
use crate::{direction_or, polar_offset, wrap_angle};

/// Screen-space "up" (canvas y grows downward)
pub const UP: Vec2 = Vec2::new(0.0, -1.0);

/// Facts shown after a successful shot
pub const SPACE_FACTS: [&str; 10] = [
    "🧠 Did you know the moon's gravity is only 1/6th of Earth's?",
    "🌟 The moon is 238,855 miles away from Earth!",
    "🚀 Projectile motion follows parabolic trajectories!",
    "🌍 The moon orbits Earth at 2,288 mph!",
    "💫 Isaac Newton discovered the laws of motion!",
    "🌙 The moon has no atmosphere - perfect for physics!",
    "⚡ Gravity affects all objects equally (Galileo's discovery)!",
    "🔭 The moon's surface is covered in craters!",
    "🌌 Orbital mechanics are used for space travel!",
    "🛸 Escape velocity from Earth is 25,020 mph!",
];

/// Anything with a circular footprint
pub trait Body {
    fn position(&self) -> Vec2;
    fn radius(&self) -> f32;

    /// Strict circle overlap: distance < sum of radii
    fn overlaps(&self, other: &dyn Body) -> bool {
        circles_overlap(self.position(), self.radius(), other.position(), other.radius())
    }
}

/// Bodies that move on their own every tick
pub trait Kinematic {
    fn advance(&mut self, bounds: &Bounds);
}

/// The visible play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    /// Distance outside the screen at which drifting bodies wrap
    pub wrap_margin: f32,
}

impl Bounds {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            width: tuning.screen_width,
            height: tuning.screen_height,
            wrap_margin: tuning.wrap_margin,
        }
    }

    /// Past the bottom, left, or right edge. The top is open sky.
    #[inline]
    pub fn is_escaped(&self, pos: Vec2) -> bool {
        pos.y > self.height || pos.x < 0.0 || pos.x > self.width
    }

    /// Toroidal wrap with a margin around the screen
    pub fn wrap(&self, mut pos: Vec2) -> Vec2 {
        let m = self.wrap_margin;
        if pos.x < -m {
            pos.x = self.width + m;
        } else if pos.x > self.width + m {
            pos.x = -m;
        }
        if pos.y < -m {
            pos.y = self.height + m;
        } else if pos.y > self.height + m {
            pos.y = -m;
        }
        pos
    }
}

/// The planet the rocket launches from. Fixed for the lifetime of a world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pos: Vec2,
    radius: f32,
    gravity: f32,
}

impl Planet {
    pub fn new(pos: Vec2, radius: f32, gravity: f32) -> Self {
        Self {
            pos,
            radius,
            gravity,
        }
    }

    /// Gravity constant (`k` in `k / d²`)
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Strictly inside the disc (used for picking a launch point)
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.pos) < self.radius
    }

    /// Point `altitude` above the surface in the direction of `toward`
    pub fn surface_point(&self, toward: Vec2, altitude: f32) -> Vec2 {
        self.pos + direction_or(self.pos, toward, UP) * (self.radius + altitude)
    }
}

impl Body for Planet {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// The moon: circles the planet at a fixed speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub center: Vec2,
    pub orbit_radius: f32,
    /// Radians per tick
    pub angular_speed: f32,
    /// Orbit phase in [0, 2π)
    pub angle: f32,
    pub radius: f32,
    pub pos: Vec2,
}

impl Target {
    pub fn new(center: Vec2, orbit_radius: f32, angular_speed: f32, radius: f32) -> Self {
        let mut target = Self {
            center,
            orbit_radius,
            angular_speed,
            angle: 0.0,
            radius,
            pos: center,
        };
        target.set_phase(0.0);
        target
    }

    /// Jump to an orbit phase
    pub fn set_phase(&mut self, angle: f32) {
        self.angle = wrap_angle(angle);
        self.pos = polar_offset(self.center, self.orbit_radius, self.angle);
    }
}

impl Kinematic for Target {
    fn advance(&mut self, _bounds: &Bounds) {
        self.set_phase(self.angle + self.angular_speed);
    }
}

impl Body for Target {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// An asteroid drifting at constant velocity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Obstacle {
    /// Random position on screen, random drift in ±`max_drift` per axis
    pub fn random(rng: &mut impl Rng, bounds: &Bounds, radius: f32, max_drift: f32) -> Self {
        let pos = Vec2::new(
            rng.random::<f32>() * bounds.width,
            rng.random::<f32>() * bounds.height,
        );
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0 * max_drift,
            (rng.random::<f32>() - 0.5) * 2.0 * max_drift,
        );
        Self { pos, vel, radius }
    }
}

impl Kinematic for Obstacle {
    fn advance(&mut self, bounds: &Bounds) {
        self.pos = bounds.wrap(self.pos + self.vel);
    }
}

impl Body for Obstacle {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Bounded position history, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a point, evicting the oldest once over capacity
    pub fn push(&mut self, point: Vec2) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn oldest(&self) -> Option<Vec2> {
        self.points.front().copied()
    }

    pub fn newest(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Vec2> {
        self.points.iter()
    }
}

/// The rocket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub launched: bool,
    /// Where the next launch starts from
    pub launch_point: Vec2,
    pub trail: Trail,
}

impl Projectile {
    pub fn new(launch_point: Vec2, radius: f32, trail_capacity: usize) -> Self {
        Self {
            pos: launch_point,
            vel: Vec2::ZERO,
            radius,
            launched: false,
            launch_point,
            trail: Trail::new(trail_capacity),
        }
    }

    /// Park on the pad: no velocity, no trail
    pub fn reset_to(&mut self, launch_point: Vec2) {
        self.pos = launch_point;
        self.launch_point = launch_point;
        self.vel = Vec2::ZERO;
        self.launched = false;
        self.trail.clear();
    }

    /// One tick of flight under the planet's gravity.
    ///
    /// Returns `PlanetHit` when the rocket starts the tick on or inside the
    /// surface (it is clamped to the surface and stopped, and no trail point
    /// is recorded), `OutOfBounds` when the new position has left the screen,
    /// and `None` otherwise.
    pub fn integrate(&mut self, planet: &Planet, bounds: &Bounds) -> Collision {
        match integrate_step(
            self.pos,
            self.vel,
            planet.position(),
            planet.radius(),
            planet.gravity(),
        ) {
            Step::SurfaceContact => {
                self.pos = planet.surface_point(self.pos, 0.0);
                self.vel = Vec2::ZERO;
                self.launched = false;
                Collision::PlanetHit
            }
            Step::Moved { pos, vel } => {
                self.pos = pos;
                self.vel = vel;
                self.trail.push(pos);
                if bounds.is_escaped(pos) {
                    Collision::OutOfBounds
                } else {
                    Collision::None
                }
            }
        }
    }
}

impl Body for Projectile {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Asteroid density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn obstacle_count(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 5,
            Difficulty::Hard => 15,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownName {
                kind: "difficulty",
                name: s.to_string(),
            }),
        }
    }
}

/// Where the current attempt is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptPhase {
    /// On the pad, waiting for a drag-and-release
    Aiming,
    /// In flight
    Launched,
    /// Hit the moon
    Won,
    /// Fell back onto the planet
    CrashedPlanet,
    /// Hit an asteroid
    CrashedObstacle,
    /// Left the screen
    Missed,
}

impl AttemptPhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AttemptPhase::Aiming | AttemptPhase::Launched)
    }
}

/// Discrete notifications for the page (HUD, logging)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Launched { velocity: Vec2 },
    Won { score: u64, fact: &'static str },
    CrashedPlanet { at: Vec2 },
    CrashedObstacle { at: Vec2 },
    Missed { at: Vec2 },
    /// The miss message is due; the page should offer a retry
    MissAnnounced,
    FactExpired,
    Reset,
    DifficultyChanged(Difficulty),
    UpgradeToggled { upgrade: crate::Upgrade, active: bool },
}

/// Score, counters, and player-facing flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Never decreases
    pub score: u64,
    /// Launches so far
    pub attempts: u32,
    pub difficulty: Difficulty,
    /// A launch point is selected and the pointer is held
    pub dragging: bool,
    pub won: bool,
    pub upgrades: Upgrades,
}

/// The complete simulation aggregate
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub bounds: Bounds,
    pub planet: Planet,
    pub target: Target,
    pub obstacles: Vec<Obstacle>,
    pub projectile: Projectile,
    pub session: Session,
    pub phase: AttemptPhase,
    pub effects: Effects,
    /// Aim preview while dragging (recomputed every tick)
    pub preview: Option<Trajectory>,
    /// Fact on display after a win
    pub fact: Option<&'static str>,
    /// Latest pointer position seen by `tick`
    pub pointer: Vec2,
    /// Deferred transitions
    pub timers: Timers,
    /// Bumped on every reset; timers from older generations are stale
    pub generation: u64,
    /// Host clock in seconds, as last passed to `run_timers`
    pub now: f64,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl World {
    /// Create a world centered on the screen, with a random moon phase and
    /// no asteroids (easy)
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let bounds = Bounds::from_tuning(&tuning);
        let center = Vec2::new(bounds.width / 2.0, bounds.height / 2.0);
        let planet = Planet::new(center, tuning.planet_radius, tuning.gravity_constant);
        let target = Target::new(
            center,
            tuning.target_orbit_radius,
            tuning.target_angular_speed,
            tuning.target_radius,
        );
        let launch_point = center + UP * tuning.default_launch_offset();
        let projectile = Projectile::new(launch_point, tuning.projectile_radius, tuning.trail_length);

        let mut world = Self {
            tuning,
            bounds,
            planet,
            target,
            obstacles: Vec::new(),
            projectile,
            session: Session::default(),
            phase: AttemptPhase::Aiming,
            effects: Effects::default(),
            preview: None,
            fact: None,
            pointer: Vec2::ZERO,
            timers: Timers::default(),
            generation: 0,
            now: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        world.randomize_target();
        world
    }

    /// Pad position used after every reset
    pub fn default_launch_point(&self) -> Vec2 {
        self.planet.surface_point(self.planet.position() + UP, self.tuning.launch_clearance)
    }

    /// New random orbit phase for the moon
    pub fn randomize_target(&mut self) {
        let phase = self.rng.random::<f32>() * std::f32::consts::TAU;
        self.target.set_phase(phase);
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
