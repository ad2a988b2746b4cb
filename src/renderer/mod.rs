//! Rendering module
//!
//! The scene is painted through a small immediate-mode [`RenderSink`] trait
//! (circles, rects, polygons, paths, radial glows, transforms). The browser
//! implements it over a Canvas 2D context; tests record the calls.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSink;
pub use recording::{DrawCommand, RecordingSink};
pub use shapes::{DrawContext, Renderable, draw_world};

use glam::Vec2;

/// A CSS-expressible color
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// 0-255 channels, alpha 0-1
    Rgba(u8, u8, u8, f32),
    /// Hue in degrees, saturation/lightness in percent, alpha 0-1
    Hsla(f32, f32, f32, f32),
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgba(r, g, b, 1.0)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Color::Rgba(r, g, b, a)
    }

    /// Fully saturated, mid-lightness hue
    pub const fn hue(degrees: f32) -> Self {
        Color::Hsla(degrees, 100.0, 50.0, 1.0)
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        match self {
            Color::Rgba(r, g, b, _) => Color::Rgba(r, g, b, alpha),
            Color::Hsla(h, s, l, _) => Color::Hsla(h, s, l, alpha),
        }
    }

    pub fn alpha(&self) -> f32 {
        match self {
            Color::Rgba(.., a) | Color::Hsla(.., a) => *a,
        }
    }

    pub fn to_css(&self) -> String {
        match self {
            Color::Rgba(r, g, b, a) => format!("rgba({}, {}, {}, {})", r, g, b, a),
            Color::Hsla(h, s, l, a) => format!("hsla({}, {}%, {}%, {})", h, s, l, a),
        }
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::rgb(r, g, b)
    }
}

/// Line style for stroked shapes
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    /// Alternating dash/gap lengths; empty for a solid line
    pub dash: Vec<f32>,
}

impl Stroke {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
        }
    }

    pub fn dashed(color: Color, width: f32, dash: &[f32]) -> Self {
        Self {
            color,
            width,
            dash: dash.to_vec(),
        }
    }
}

/// Immediate-mode drawing surface, in canvas coordinates
pub trait RenderSink {
    /// Wipe the whole surface
    fn clear(&mut self, width: f32, height: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke);
    /// Disc filled with a radial gradient from `inner` at the center to
    /// `outer` at `radius`
    fn radial_glow(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color);
    /// Axis-aligned in the current transform
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    /// Open polyline
    fn stroke_path(&mut self, points: &[Vec2], stroke: &Stroke);
    /// Translate, then rotate (radians), then multiply global alpha. Nested
    /// until the matching [`RenderSink::pop_transform`].
    fn push_transform(&mut self, translate: Vec2, rotation: f32, alpha: f32);
    fn pop_transform(&mut self);
}
