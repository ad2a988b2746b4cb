//! Draw-call recorder
//!
//! Captures every call made through [`RenderSink`] so the scene painter can be
//! checked without a browser.

use glam::Vec2;

use super::{Color, RenderSink, Stroke};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    FillCircle { center: Vec2, radius: f32, color: Color },
    StrokeCircle { center: Vec2, radius: f32, stroke: Stroke },
    RadialGlow { center: Vec2, radius: f32, inner: Color, outer: Color },
    FillRect { origin: Vec2, size: Vec2, color: Color },
    FillPolygon { points: Vec<Vec2>, color: Color },
    StrokePath { points: Vec<Vec2>, stroke: Stroke },
    PushTransform { translate: Vec2, rotation: f32, alpha: f32 },
    PopTransform,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub commands: Vec<DrawCommand>,
    depth: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open transforms not yet popped
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(*c)).count()
    }

    pub fn paths(&self) -> impl Iterator<Item = (&[Vec2], &Stroke)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokePath { points, stroke } => Some((points.as_slice(), stroke)),
            _ => None,
        })
    }
}

impl RenderSink for RecordingSink {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke: stroke.clone(),
        });
    }

    fn radial_glow(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color) {
        self.commands.push(DrawCommand::RadialGlow {
            center,
            radius,
            inner,
            outer,
        });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_path(&mut self, points: &[Vec2], stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokePath {
            points: points.to_vec(),
            stroke: stroke.clone(),
        });
    }

    fn push_transform(&mut self, translate: Vec2, rotation: f32, alpha: f32) {
        self.depth += 1;
        self.commands.push(DrawCommand::PushTransform {
            translate,
            rotation,
            alpha,
        });
    }

    fn pop_transform(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::PopTransform);
    }
}
