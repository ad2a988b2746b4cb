//! Per-frame simulation tick and attempt lifecycle
//!
//! One call to [`tick`] per rendered frame. Deferred transitions live in
//! [`World::timers`] and are fired by [`run_timers`] between frames.

use glam::Vec2;
use rand::Rng;

use super::collision::{Collision, resolve_collisions};
use super::predict::{aim_preview, launch_velocity};
use super::state::{AttemptPhase, Body, Difficulty, GameEvent, Kinematic, Obstacle, SPACE_FACTS, World};
use super::timers::TimerAction;
use crate::settings::Upgrade;

/// Pointer state for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Latest pointer position (canvas coordinates)
    pub pointer: Vec2,
    /// Pointer (mouse button or touch) is held
    pub is_down: bool,
    /// A press happened since the last tick, at this position
    pub pressed_at: Option<Vec2>,
    /// A release happened since the last tick
    pub released: bool,
}

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &TickInput) {
    world.pointer = input.pointer;
    handle_pointer(world, input);

    // Moon
    let bounds = world.bounds;
    world.target.advance(&bounds);

    // Asteroids
    for obstacle in &mut world.obstacles {
        obstacle.advance(&bounds);
    }

    // Rocket
    if world.projectile.launched {
        match world.projectile.integrate(&world.planet, &bounds) {
            Collision::PlanetHit => crash_into_planet(world),
            Collision::OutOfBounds if !world.session.won => miss(world),
            _ => {}
        }
    }

    // Effects
    world.effects.update(bounds.height);

    // Collisions (no-op unless still in flight)
    match resolve_collisions(&world.projectile, &world.target, &world.obstacles) {
        Collision::TargetHit => win(world),
        Collision::ObstacleHit { index } => crash_into_obstacle(world, index),
        _ => {}
    }

    world.preview = if world.phase == AttemptPhase::Aiming && world.session.dragging {
        Some(aim_preview(world, world.pointer))
    } else {
        None
    };
}

/// Press on the planet picks a launch point; release launches
fn handle_pointer(world: &mut World, input: &TickInput) {
    if let Some(pressed) = input.pressed_at
        && world.phase == AttemptPhase::Aiming
        && !world.projectile.launched
        && world.planet.contains(pressed)
    {
        let launch_point = world
            .planet
            .surface_point(pressed, world.tuning.launch_clearance);
        world.projectile.launch_point = launch_point;
        world.projectile.pos = launch_point;
        world.session.dragging = true;
        log::debug!("Launch point selected at ({:.1}, {:.1})", launch_point.x, launch_point.y);
    }

    if input.released {
        if world.session.dragging
            && world.phase == AttemptPhase::Aiming
            && !world.projectile.launched
        {
            launch(world, input.pointer);
        }
        world.session.dragging = false;
    }
}

/// Aiming -> Launched
fn launch(world: &mut World, pointer: Vec2) {
    let velocity = launch_velocity(
        world.projectile.launch_point,
        pointer,
        world.tuning.max_drag,
        world.tuning.launch_speed_factor,
    );
    world.projectile.vel = velocity;
    world.projectile.launched = true;
    world.phase = AttemptPhase::Launched;
    world.session.attempts += 1;

    log::info!(
        "Attempt {} launched at speed {:.2}",
        world.session.attempts,
        velocity.length()
    );
    world.events.push(GameEvent::Launched { velocity });
}

/// Launched -> Won
fn win(world: &mut World) {
    world.phase = AttemptPhase::Won;
    world.session.won = true;
    world.session.score += world.tuning.win_score;
    world.projectile.launched = false;

    let width = world.bounds.width;
    world.effects.spawn_confetti(width, &mut world.rng);

    let fact = SPACE_FACTS[world.rng.random_range(0..SPACE_FACTS.len())];
    world.fact = Some(fact);

    // Fact first so it hides before the reset when both delays match
    let (fact_delay, reset_delay) = (world.tuning.fact_display_time, world.tuning.win_reset_delay);
    schedule(world, fact_delay, TimerAction::HideFact);
    schedule(world, reset_delay, TimerAction::Reset);

    log::info!("Moon hit! Score {}", world.session.score);
    world.events.push(GameEvent::Won {
        score: world.session.score,
        fact,
    });
}

/// Launched -> CrashedObstacle
fn crash_into_obstacle(world: &mut World, index: usize) {
    world.phase = AttemptPhase::CrashedObstacle;
    world.projectile.launched = false;
    let at = world.projectile.position();
    world.effects.spawn_explosion(at, &mut world.rng);
    let delay = world.tuning.crash_reset_delay;
    schedule(world, delay, TimerAction::Reset);

    log::info!("Asteroid {} hit at ({:.1}, {:.1})", index, at.x, at.y);
    world.events.push(GameEvent::CrashedObstacle { at });
}

/// Launched -> CrashedPlanet (the rocket is already clamped and stopped)
fn crash_into_planet(world: &mut World) {
    world.phase = AttemptPhase::CrashedPlanet;
    let at = world.projectile.position();
    let delay = world.tuning.crash_reset_delay;
    schedule(world, delay, TimerAction::Reset);

    log::info!("Crashed into the planet at ({:.1}, {:.1})", at.x, at.y);
    world.events.push(GameEvent::CrashedPlanet { at });
}

/// Launched -> Missed. No reset is scheduled: the page offers a retry once
/// the miss is announced.
fn miss(world: &mut World) {
    world.phase = AttemptPhase::Missed;
    world.projectile.launched = false;
    let at = world.projectile.position();
    let delay = world.tuning.miss_announce_delay;
    schedule(world, delay, TimerAction::AnnounceMiss);

    log::info!("Missed: left the screen at ({:.1}, {:.1})", at.x, at.y);
    world.events.push(GameEvent::Missed { at });
}

fn schedule(world: &mut World, delay: f64, action: TimerAction) {
    let token = world
        .timers
        .schedule(world.now, delay, action, world.generation);
    log::debug!("Scheduled {:?} in {:.1}s ({:?})", action, delay, token);
}

/// Back to aiming: rocket parked on the pad, moon re-phased, effects cleared.
///
/// Starts a new attempt generation and cancels timers from older ones.
pub fn reset(world: &mut World) {
    world.generation += 1;
    let cancelled = world.timers.cancel_older_than(world.generation);
    if cancelled > 0 {
        log::debug!("Reset cancelled {} pending timer(s)", cancelled);
    }

    let pad = world.default_launch_point();
    world.projectile.reset_to(pad);
    world.session.dragging = false;
    world.session.won = false;
    world.randomize_target();
    world.effects.clear();
    world.preview = None;
    world.phase = AttemptPhase::Aiming;

    if world.fact.take().is_some() {
        world.events.push(GameEvent::FactExpired);
    }
    world.events.push(GameEvent::Reset);
}

/// Manual retry (the button shown after a miss)
pub fn retry(world: &mut World) {
    log::info!("Retry requested in {:?}", world.phase);
    reset(world);
}

/// Fire every timer due at `now` (seconds on the host clock). Timers from a
/// superseded attempt are ignored.
pub fn run_timers(world: &mut World, now: f64) {
    world.now = world.now.max(now);
    for timer in world.timers.take_due(world.now) {
        if timer.token.generation != world.generation {
            log::debug!(
                "Ignoring stale {:?} from generation {} (current {})",
                timer.action,
                timer.token.generation,
                world.generation
            );
            continue;
        }
        match timer.action {
            TimerAction::Reset => reset(world),
            TimerAction::AnnounceMiss => world.events.push(GameEvent::MissAnnounced),
            TimerAction::HideFact => {
                if world.fact.take().is_some() {
                    world.events.push(GameEvent::FactExpired);
                }
            }
        }
    }
}

/// Rebuild the asteroid field for the current difficulty
pub fn generate_obstacles(world: &mut World) {
    let count = world.session.difficulty.obstacle_count();
    let bounds = world.bounds;
    let radius = world.tuning.obstacle_radius;
    let drift = world.tuning.obstacle_max_drift;
    world.obstacles = (0..count)
        .map(|_| Obstacle::random(&mut world.rng, &bounds, radius, drift))
        .collect();
}

/// Change difficulty: new asteroid field and a forced reset
pub fn set_difficulty(world: &mut World, difficulty: Difficulty) {
    world.session.difficulty = difficulty;
    generate_obstacles(world);
    log::info!(
        "Difficulty set to {} ({} asteroids)",
        difficulty.as_str(),
        world.obstacles.len()
    );
    world.events.push(GameEvent::DifficultyChanged(difficulty));
    reset(world);
}

/// Flip a cosmetic upgrade, returning its new state
pub fn toggle_upgrade(world: &mut World, upgrade: Upgrade) -> bool {
    let active = world.session.upgrades.toggle(upgrade);
    log::info!("Upgrade {} {}", upgrade.as_str(), if active { "on" } else { "off" });
    world.events.push(GameEvent::UpgradeToggled { upgrade, active });
    active
}
