//! [`Surface`] implementation on top of a ratatui canvas.
//!
//! Surface units are braille dots with y pointing down. Paths are flattened
//! into polylines as they are built; fills are scanline-filled one dot row at
//! a time and gradients are sampled per dot. Terminal cells are opaque, so
//! every colour is blended against a fixed backdrop before it is drawn.

use std::f64::consts::TAU;

use ratatui::style::Color;
use ratatui::widgets::canvas::{Context, Line as CanvasLine, Points};
use synapse_core::{Paint, Point, Rgb, Surface};

use super::Transform;
use crate::color::blend;

/// Length of each piece a gradient stroke is split into, in dots.
const GRADIENT_STEP: f64 = 3.0;

const MIN_ARC_SEGMENTS: usize = 8;
const MAX_ARC_SEGMENTS: usize = 64;

#[derive(Debug, Clone, Default)]
struct Subpath {
    points: Vec<Point>,
    closed: bool,
}

/// Draws onto a ratatui canvas [`Context`].
///
/// The canvas must be configured with `x_bounds([0, width])` and
/// `y_bounds([0, height])` in dots; `height` is passed here to flip the y axis.
pub struct CanvasSurface<'a, 'b> {
    ctx: &'a mut Context<'b>,
    height: f64,
    backdrop: Rgb,
    transform: Transform,
    line_width: f64,
    stack: Vec<(Transform, f64)>,
    subpaths: Vec<Subpath>,
}

impl<'a, 'b> CanvasSurface<'a, 'b> {
    pub fn new(ctx: &'a mut Context<'b>, height: f64, backdrop: Rgb) -> Self {
        Self {
            ctx,
            height,
            backdrop,
            transform: Transform::IDENTITY,
            line_width: 1.0,
            stack: Vec::new(),
            subpaths: Vec::new(),
        }
    }

    /// Current line width. Braille strokes are always one dot wide.
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    fn to_canvas(&self, p: Point) -> (f64, f64) {
        (p.x, self.height - p.y)
    }

    /// Terminal colour of `paint` at a point in device space.
    fn color_at(&self, paint: &Paint, device: Point) -> Option<Color> {
        let color = match paint {
            Paint::Solid(color) => *color,
            gradient => {
                let user = self.transform.invert()?.apply(device);
                gradient.color_at(user)?
            }
        };
        blend(color, self.backdrop)
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        let (x1, y1) = self.to_canvas(from);
        let (x2, y2) = self.to_canvas(to);
        self.ctx.draw(&CanvasLine {
            x1,
            y1,
            x2,
            y2,
            color,
        });
    }

    fn push_point(&mut self, p: Point) {
        match self.subpaths.last_mut() {
            Some(subpath) if !subpath.closed => subpath.points.push(p),
            _ => self.subpaths.push(Subpath {
                points: vec![p],
                closed: false,
            }),
        }
    }

    fn stroke_segment(&mut self, from: Point, to: Point, paint: &Paint) {
        if let Paint::Solid(_) = paint {
            if let Some(color) = self.color_at(paint, from) {
                self.draw_line(from, to, color);
            }
            return;
        }

        let pieces = (from.distance(to) / GRADIENT_STEP).ceil().max(1.0) as usize;
        for k in 0..pieces {
            let t0 = k as f64 / pieces as f64;
            let t1 = (k + 1) as f64 / pieces as f64;
            let p0 = lerp(from, to, t0);
            let p1 = lerp(from, to, t1);
            if let Some(color) = self.color_at(paint, lerp(p0, p1, 0.5)) {
                self.draw_line(p0, p1, color);
            }
        }
    }

    /// Even-odd scanline fill of the given device-space polygons.
    fn fill_polygons(&mut self, polygons: &[Subpath], paint: &Paint) {
        let ys = polygons.iter().flat_map(|p| p.points.iter().map(|pt| pt.y));
        let (min_y, max_y) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
        if !min_y.is_finite() || !max_y.is_finite() {
            return;
        }

        let mut batches: Vec<(Color, Vec<(f64, f64)>)> = Vec::new();
        let mut crossings = Vec::new();
        let mut y = min_y.floor() + 0.5;
        while y <= max_y {
            crossings.clear();
            for polygon in polygons {
                let points = &polygon.points;
                if points.len() < 3 {
                    continue;
                }
                for (i, &p) in points.iter().enumerate() {
                    let q = points[(i + 1) % points.len()];
                    if (p.y <= y) != (q.y <= y) {
                        crossings.push(p.x + (y - p.y) * (q.x - p.x) / (q.y - p.y));
                    }
                }
            }
            crossings.sort_by(f64::total_cmp);

            for span in crossings.chunks_exact(2) {
                let (x0, x1) = (span[0], span[1]);
                if let Paint::Solid(_) = paint {
                    if let Some(color) = self.color_at(paint, Point::new(x0, y)) {
                        self.draw_line(Point::new(x0, y), Point::new(x1, y), color);
                    }
                    continue;
                }
                let mut x = x0.floor() + 0.5;
                if x > x1 {
                    x = (x0 + x1) / 2.0;
                }
                while x <= x1 {
                    if let Some(color) = self.color_at(paint, Point::new(x, y)) {
                        let dot = self.to_canvas(Point::new(x, y));
                        match batches.iter_mut().find(|(c, _)| *c == color) {
                            Some((_, dots)) => dots.push(dot),
                            None => batches.push((color, vec![dot])),
                        }
                    }
                    x += 1.0;
                }
            }
            y += 1.0;
        }

        for (color, coords) in &batches {
            self.ctx.draw(&Points {
                coords,
                color: *color,
            });
        }
    }
}

impl Surface for CanvasSurface<'_, '_> {
    /// The canvas widget repaints its background every frame, so there is
    /// nothing to clear.
    fn clear(&mut self) {}

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint) {
        let corners = [
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ];
        let rect = Subpath {
            points: corners.iter().map(|&p| self.transform.apply(p)).collect(),
            closed: true,
        };
        self.fill_polygons(&[rect], paint);
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let p = self.transform.apply(Point::new(x, y));
        self.subpaths.push(Subpath {
            points: vec![p],
            closed: false,
        });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let p = self.transform.apply(Point::new(x, y));
        self.push_point(p);
    }

    fn close_path(&mut self) {
        if let Some(subpath) = self.subpaths.last_mut() {
            subpath.closed = true;
        }
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        let sweep = (end - start).clamp(-TAU, TAU);
        let length = radius.abs() * self.transform.scale_factor() * sweep.abs();
        let segments = (length.ceil() as usize).clamp(MIN_ARC_SEGMENTS, MAX_ARC_SEGMENTS);
        for k in 0..=segments {
            let angle = start + sweep * k as f64 / segments as f64;
            let local = Point::new(x + radius * angle.cos(), y + radius * angle.sin());
            let p = self.transform.apply(local);
            self.push_point(p);
        }
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn fill(&mut self, paint: &Paint) {
        let subpaths = std::mem::take(&mut self.subpaths);
        self.fill_polygons(&subpaths, paint);
        self.subpaths = subpaths;
    }

    fn stroke(&mut self, paint: &Paint) {
        let subpaths = std::mem::take(&mut self.subpaths);
        for subpath in &subpaths {
            let points = &subpath.points;
            for pair in points.windows(2) {
                self.stroke_segment(pair[0], pair[1], paint);
            }
            if subpath.closed && points.len() > 2 {
                self.stroke_segment(points[points.len() - 1], points[0], paint);
            }
        }
        self.subpaths = subpaths;
    }

    fn save(&mut self) {
        self.stack.push((self.transform, self.line_width));
    }

    fn restore(&mut self) {
        if let Some((transform, line_width)) = self.stack.pop() {
            self.transform = transform;
            self.line_width = line_width;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform.translate(dx, dy);
    }

    fn rotate(&mut self, angle: f64) {
        self.transform.rotate(angle);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform.scale(sx, sy);
    }
}

fn lerp(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}
