//! Canvas 2D backend

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::{Color, RenderSink, Stroke};

/// [`RenderSink`] over a browser 2D context
pub struct CanvasSink {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSink {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        ctx.set_line_cap("round");
        Self { ctx }
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        log_err(self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            TAU,
        ));
    }

    fn poly_path(&self, points: &[Vec2]) {
        self.ctx.begin_path();
        if let Some((first, rest)) = points.split_first() {
            self.ctx.move_to(first.x as f64, first.y as f64);
            for p in rest {
                self.ctx.line_to(p.x as f64, p.y as f64);
            }
        }
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color.to_css());
        self.ctx.set_line_width(stroke.width as f64);
        let dash = js_sys::Array::new();
        for d in &stroke.dash {
            dash.push(&JsValue::from_f64(*d as f64));
        }
        log_err(self.ctx.set_line_dash(&dash));
    }
}

fn log_err(result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("Canvas call failed: {:?}", e);
    }
}

impl RenderSink for CanvasSink {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        self.apply_stroke(stroke);
        self.circle_path(center, radius);
        self.ctx.stroke();
    }

    fn radial_glow(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color) {
        let (x, y) = (center.x as f64, center.y as f64);
        let gradient = match self.ctx.create_radial_gradient(x, y, 0.0, x, y, radius as f64) {
            Ok(g) => g,
            Err(e) => {
                log::warn!("Gradient creation failed: {:?}", e);
                return;
            }
        };
        log_err(gradient.add_color_stop(0.0, &inner.to_css()));
        log_err(gradient.add_color_stop(1.0, &outer.to_css()));
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            origin.x as f64,
            origin.y as f64,
            size.x as f64,
            size.y as f64,
        );
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.poly_path(points);
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn stroke_path(&mut self, points: &[Vec2], stroke: &Stroke) {
        if points.len() < 2 {
            return;
        }
        self.apply_stroke(stroke);
        self.poly_path(points);
        self.ctx.stroke();
        if !stroke.dash.is_empty() {
            log_err(self.ctx.set_line_dash(&js_sys::Array::new()));
        }
    }

    fn push_transform(&mut self, translate: Vec2, rotation: f32, alpha: f32) {
        self.ctx.save();
        log_err(self.ctx.translate(translate.x as f64, translate.y as f64));
        if rotation != 0.0 {
            log_err(self.ctx.rotate(rotation as f64));
        }
        self.ctx
            .set_global_alpha(self.ctx.global_alpha() * alpha as f64);
    }

    fn pop_transform(&mut self) {
        self.ctx.restore();
    }
}
