//! The drawing-surface contract animators render through.

use crate::{Paint, Point};

/// A 2D drawing surface with canvas-style path and transform semantics.
///
/// Coordinates are in surface units with the origin at the top-left and y
/// pointing down. Path coordinates are transformed by the current transform
/// when they are added; paints are evaluated in the user space current when
/// [`fill`](Surface::fill) or [`stroke`](Surface::stroke) is called.
pub trait Surface {
    /// Clear the whole surface.
    fn clear(&mut self);

    /// Fill an axis-aligned rectangle in user space.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint);

    /// Discard the current path and start a new one.
    fn begin_path(&mut self);

    /// Start a new subpath at the given point.
    fn move_to(&mut self, x: f64, y: f64);

    /// Add a straight segment from the current point.
    fn line_to(&mut self, x: f64, y: f64);

    /// Close the current subpath back to its first point.
    fn close_path(&mut self);

    /// Add a circular arc from `start` to `end` radians, clockwise.
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);

    fn set_line_width(&mut self, width: f64);

    /// Fill the current path.
    fn fill(&mut self, paint: &Paint);

    /// Stroke the current path.
    fn stroke(&mut self, paint: &Paint);

    /// Push the current transform and line width.
    fn save(&mut self);

    /// Pop the state pushed by the matching [`save`](Surface::save).
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);

    fn rotate(&mut self, angle: f64);

    fn scale(&mut self, sx: f64, sy: f64);

    /// Stroke a single straight line as its own path.
    fn stroke_line(&mut self, from: Point, to: Point, paint: &Paint) {
        self.begin_path();
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        self.stroke(paint);
    }

    /// Fill a full circle as its own path.
    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU);
        self.fill(paint);
    }
}
