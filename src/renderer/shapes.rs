//! Scene painting
//!
//! Turns a [`World`] snapshot into draw calls. Back to front: stars, planet,
//! asteroids, moon, rocket and trail, particles, landed rocket, aim preview.

use glam::Vec2;

use super::{Color, RenderSink, Stroke};
use crate::settings::Upgrades;
use crate::sim::state::{Body, Obstacle, Planet, Projectile, Target};
use crate::sim::{AttemptPhase, Effects, Trajectory, World};

const STAR_COUNT: usize = 50;
const STAR_COLOR: Color = Color::rgba(255, 255, 255, 0.8);

const GLOW_MARGIN: f32 = 15.0;
const PLANET_GLOW: Color = Color::rgba(0, 150, 255, 0.8);
const PLANET_COLOR: Color = Color::rgb(0, 102, 204);
const CONTINENT_COLOR: Color = Color::rgb(0, 170, 68);

const MOON_GLOW: Color = Color::rgba(255, 255, 255, 0.6);
const MOON_COLOR: Color = Color::rgb(240, 240, 240);
const CRATER_COLOR: Color = Color::rgb(208, 208, 208);

const ASTEROID_COLOR: Color = Color::rgb(139, 69, 19);
const ASTEROID_DETAIL: Color = Color::rgb(101, 67, 33);

const ROCKET_BODY: Color = Color::rgb(255, 68, 68);
const ROCKET_TIP: Color = Color::rgb(255, 102, 102);
const LANDING_GEAR: Color = Color::rgb(136, 136, 136);
const TRAIL_WIDTH: f32 = 3.0;

const PREVIEW_COLOR: Color = Color::rgba(255, 255, 255, 0.6);
const PREVIEW_DASH: [f32; 2] = [5.0, 5.0];

/// Per-frame values shared by every painter
#[derive(Debug, Clone, Copy)]
pub struct DrawContext {
    /// Host clock in milliseconds
    pub time_ms: f64,
    pub upgrades: Upgrades,
}

impl DrawContext {
    fn exhaust(&self) -> Color {
        self.upgrades.exhaust_rgb().into()
    }
}

/// Anything that can paint itself
pub trait Renderable {
    fn draw(&self, sink: &mut dyn RenderSink, ctx: &DrawContext);
}

impl Renderable for Planet {
    fn draw(&self, sink: &mut dyn RenderSink, _ctx: &DrawContext) {
        let c = self.position();
        let r = self.radius();
        sink.radial_glow(c, r + GLOW_MARGIN, PLANET_GLOW, PLANET_GLOW.with_alpha(0.0));
        sink.fill_circle(c, r, PLANET_COLOR);
        sink.fill_circle(c + Vec2::new(-10.0, -5.0), 8.0, CONTINENT_COLOR);
        sink.fill_circle(c + Vec2::new(8.0, 3.0), 6.0, CONTINENT_COLOR);
        sink.stroke_circle(c, r, &Stroke::solid(Color::rgb(255, 255, 255), 2.0));
    }
}

impl Renderable for Target {
    fn draw(&self, sink: &mut dyn RenderSink, _ctx: &DrawContext) {
        let c = self.pos;
        sink.radial_glow(c, self.radius + GLOW_MARGIN, MOON_GLOW, MOON_GLOW.with_alpha(0.0));
        sink.fill_circle(c, self.radius, MOON_COLOR);
        for (offset, r) in [
            (Vec2::new(-8.0, -8.0), 3.0),
            (Vec2::new(10.0, 5.0), 2.0),
            (Vec2::new(-5.0, 12.0), 2.5),
        ] {
            sink.fill_circle(c + offset, r, CRATER_COLOR);
        }
    }
}

impl Renderable for Obstacle {
    fn draw(&self, sink: &mut dyn RenderSink, _ctx: &DrawContext) {
        sink.fill_circle(self.pos, self.radius, ASTEROID_COLOR);
        sink.fill_circle(self.pos + Vec2::new(-2.0, -2.0), 2.0, ASTEROID_DETAIL);
        sink.fill_circle(self.pos + Vec2::new(3.0, 1.0), 1.5, ASTEROID_DETAIL);
    }
}

impl Renderable for Projectile {
    fn draw(&self, sink: &mut dyn RenderSink, ctx: &DrawContext) {
        // Trail: one segment per pair, fading toward the oldest point
        let exhaust = ctx.exhaust();
        let len = self.trail.len();
        let points: Vec<Vec2> = self.trail.iter().copied().collect();
        for (i, pair) in points.windows(2).enumerate() {
            let alpha = (i + 1) as f32 / len as f32;
            sink.stroke_path(pair, &Stroke::solid(exhaust.with_alpha(alpha), TRAIL_WIDTH));
        }

        let heading = self.vel.y.atan2(self.vel.x);
        sink.push_transform(self.pos, heading, 1.0);
        rocket_hull(sink, self.radius);
        if self.launched {
            let s = self.radius;
            sink.fill_polygon(
                &[
                    Vec2::new(-s, 0.0),
                    Vec2::new(-s - 12.0, -6.0),
                    Vec2::new(-s - 8.0, 0.0),
                    Vec2::new(-s - 12.0, 6.0),
                ],
                exhaust,
            );
        }
        sink.pop_transform();
    }
}

/// Body and nose cone in rocket-local space (nose along +x)
fn rocket_hull(sink: &mut dyn RenderSink, size: f32) {
    sink.fill_rect(Vec2::splat(-size), Vec2::splat(size * 2.0), ROCKET_BODY);
    sink.fill_polygon(
        &[
            Vec2::new(size, 0.0),
            Vec2::new(size + 8.0, -4.0),
            Vec2::new(size + 8.0, 4.0),
        ],
        ROCKET_TIP,
    );
}

/// Rocket parked on the moon's lower edge, legs out
fn draw_landed_rocket(sink: &mut dyn RenderSink, target: &Target, size: f32) {
    sink.push_transform(target.pos + Vec2::new(0.0, target.radius - 5.0), 0.0, 1.0);
    rocket_hull(sink, size);
    let gear = Stroke::solid(LANDING_GEAR, 2.0);
    sink.stroke_path(
        &[Vec2::new(-size - 5.0, size), Vec2::new(-size - 10.0, size + 8.0)],
        &gear,
    );
    sink.stroke_path(
        &[Vec2::new(size + 5.0, size), Vec2::new(size + 10.0, size + 8.0)],
        &gear,
    );
    sink.pop_transform();
}

/// Fixed star positions with a slow size twinkle
fn draw_stars(sink: &mut dyn RenderSink, width: f32, height: f32, time_ms: f64) {
    for i in 0..STAR_COUNT {
        let x = (i as f32 * 37.0) % width;
        let y = (i as f32 * 73.0) % height;
        let size = ((time_ms * 0.001 + i as f64).sin() * 0.5 + 1.0) as f32;
        sink.fill_circle(Vec2::new(x, y), size, STAR_COLOR);
    }
}

fn draw_effects(sink: &mut dyn RenderSink, effects: &Effects) {
    for p in &effects.explosions {
        sink.push_transform(p.pos, 0.0, p.life.max(0.0));
        sink.fill_circle(Vec2::ZERO, p.size, Color::hue(p.hue));
        sink.pop_transform();
    }
    for p in &effects.confetti {
        sink.push_transform(p.pos, p.rotation.to_radians(), p.life.max(0.0));
        sink.fill_rect(
            Vec2::splat(-p.size / 2.0),
            Vec2::splat(p.size),
            Color::Hsla(p.hue, 70.0, 60.0, 1.0),
        );
        sink.pop_transform();
    }
}

fn draw_preview(sink: &mut dyn RenderSink, preview: &Trajectory) {
    if preview.points.len() < 2 {
        return;
    }
    sink.stroke_path(
        &preview.points,
        &Stroke::dashed(PREVIEW_COLOR, 2.0, &PREVIEW_DASH),
    );
}

/// Paint one frame
pub fn draw_world(world: &World, time_ms: f64, sink: &mut dyn RenderSink) {
    let ctx = DrawContext {
        time_ms,
        upgrades: world.session.upgrades,
    };
    let bounds = world.bounds;

    sink.clear(bounds.width, bounds.height);
    draw_stars(sink, bounds.width, bounds.height, ctx.time_ms);
    world.planet.draw(sink, &ctx);
    for obstacle in &world.obstacles {
        obstacle.draw(sink, &ctx);
    }
    world.target.draw(sink, &ctx);

    let landed = world.phase == AttemptPhase::Won;
    if !landed {
        world.projectile.draw(sink, &ctx);
    }

    draw_effects(sink, &world.effects);

    if landed {
        draw_landed_rocket(sink, &world.target, world.projectile.radius);
    }

    if let Some(preview) = &world.preview {
        draw_preview(sink, preview);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSink};
    use crate::settings::Upgrade;
    use crate::sim::{TickInput, aim_preview, tick, toggle_upgrade};
    use crate::tuning::Tuning;

    fn render(world: &World) -> RecordingSink {
        let mut sink = RecordingSink::new();
        draw_world(world, 1234.0, &mut sink);
        sink
    }

    fn in_flight(seed: u64) -> World {
        let mut world = World::new(Tuning::default(), seed);
        let pad = world.projectile.launch_point;
        tick(
            &mut world,
            &TickInput {
                pointer: Vec2::new(400.0, 290.0),
                is_down: true,
                pressed_at: Some(Vec2::new(400.0, 290.0)),
                released: false,
            },
        );
        tick(
            &mut world,
            &TickInput {
                pointer: pad + Vec2::new(60.0, -80.0),
                released: true,
                ..Default::default()
            },
        );
        for _ in 0..10 {
            tick(&mut world, &TickInput::default());
        }
        world
    }

    #[test]
    fn test_frame_starts_with_clear_and_balances_transforms() {
        let sink = render(&World::new(Tuning::default(), 1));
        assert_eq!(
            sink.commands[0],
            DrawCommand::Clear {
                width: 800.0,
                height: 600.0
            }
        );
        assert_eq!(sink.depth(), 0);
        let pushes = sink.count(|c| matches!(c, DrawCommand::PushTransform { .. }));
        let pops = sink.count(|c| matches!(c, DrawCommand::PopTransform));
        assert_eq!(pushes, pops);
    }

    #[test]
    fn test_stars_are_deterministic() {
        let world = World::new(Tuning::default(), 1);
        let mut a = RecordingSink::new();
        let mut b = RecordingSink::new();
        draw_world(&world, 500.0, &mut a);
        draw_world(&world, 500.0, &mut b);
        assert_eq!(a.commands, b.commands);
        // First star sits at the origin
        assert!(matches!(
            a.commands[1],
            DrawCommand::FillCircle { center, .. } if center == Vec2::ZERO
        ));
    }

    #[test]
    fn test_no_preview_or_flame_while_idle() {
        let sink = render(&World::new(Tuning::default(), 1));
        assert!(sink.paths().all(|(_, stroke)| stroke.dash.is_empty()));
        // Only the nose cone; no flame on the pad
        assert_eq!(
            sink.count(|c| matches!(c, DrawCommand::FillPolygon { .. })),
            1
        );
    }

    #[test]
    fn test_preview_is_dashed() {
        let mut world = World::new(Tuning::default(), 1);
        let pointer = world.projectile.launch_point + Vec2::new(50.0, -50.0);
        world.preview = Some(aim_preview(&world, pointer));
        let sink = render(&world);

        let dashed: Vec<_> = sink.paths().filter(|(_, s)| !s.dash.is_empty()).collect();
        assert_eq!(dashed.len(), 1);
        let (points, stroke) = dashed[0];
        assert_eq!(stroke.dash, vec![5.0, 5.0]);
        assert_eq!(points[0], world.projectile.launch_point);
    }

    #[test]
    fn test_trail_fades_in_exhaust_color() {
        let world = in_flight(4);
        assert_eq!(world.phase, AttemptPhase::Launched);
        let sink = render(&world);

        let trail: Vec<_> = sink
            .paths()
            .filter(|(p, s)| p.len() == 2 && s.width == TRAIL_WIDTH)
            .collect();
        assert_eq!(trail.len(), world.projectile.trail.len() - 1);
        let first = trail[0].1.color;
        let last = trail[trail.len() - 1].1.color;
        assert!(first.alpha() < last.alpha());
        assert!(matches!(first, Color::Rgba(255, 165, 0, _)));
        // Flame is drawn while launched
        assert_eq!(
            sink.count(|c| matches!(c, DrawCommand::FillPolygon { .. })),
            2
        );
    }

    #[test]
    fn test_ion_engine_turns_trail_cyan() {
        let mut world = in_flight(4);
        toggle_upgrade(&mut world, Upgrade::IonEngine);
        let sink = render(&world);
        assert!(
            sink.paths()
                .filter(|(p, s)| p.len() == 2 && s.width == TRAIL_WIDTH)
                .all(|(_, s)| matches!(s.color, Color::Rgba(0, 255, 255, _)))
        );
    }

    #[test]
    fn test_landed_rocket_drawn_on_moon_after_win() {
        let mut world = World::new(Tuning::default(), 1);
        world.phase = AttemptPhase::Won;
        let sink = render(&world);

        let expected = world.target.pos + Vec2::new(0.0, world.target.radius - 5.0);
        let anchors: Vec<Vec2> = sink
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::PushTransform { translate, .. } => Some(*translate),
                _ => None,
            })
            .collect();
        assert_eq!(anchors, vec![expected]);
        // Two landing legs
        assert_eq!(
            sink.count(|c| matches!(c, DrawCommand::StrokePath { points, .. } if points.len() == 2)),
            2
        );
    }

    #[test]
    fn test_particles_use_life_as_alpha() {
        let mut world = World::new(Tuning::default(), 1);
        world
            .effects
            .spawn_explosion(Vec2::new(100.0, 100.0), &mut world.rng);
        world.effects.explosions[0].life = 0.25;
        let sink = render(&world);
        assert!(sink.commands.iter().any(|c| matches!(
            c,
            DrawCommand::PushTransform { alpha, .. } if *alpha == 0.25
        )));
    }
}
