//! Fill and stroke sources: solid colours and gradients.

use crate::{Point, Rgba};

/// A colour stop at `offset` (0.0..=1.0) along a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Paint used by [`Surface::fill`](crate::Surface::fill) and
/// [`Surface::stroke`](crate::Surface::stroke).
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Paint {
    /// Colour of this paint at a point in the user space the paint is used in.
    ///
    /// Returns `None` where a gradient is degenerate or has no stops, in which
    /// case nothing should be painted.
    pub fn color_at(&self, point: Point) -> Option<Rgba> {
        match self {
            Paint::Solid(color) => Some(*color),
            Paint::Linear(gradient) => gradient.color_at(point),
            Paint::Radial(gradient) => gradient.color_at(point),
        }
    }
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Paint::Solid(color)
    }
}

/// Gradient along the line from `start` to `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            stops: Vec::new(),
        }
    }

    /// Add a colour stop, keeping stops ordered by offset.
    pub fn with_stop(mut self, offset: f64, color: Rgba) -> Self {
        insert_stop(&mut self.stops, offset, color);
        self
    }

    pub fn color_at(&self, point: Point) -> Option<Rgba> {
        let axis = self.end - self.start;
        let len_sq = axis.dot(axis);
        if len_sq == 0.0 {
            return None;
        }
        let t = (point - self.start).dot(axis) / len_sq;
        sample_stops(&self.stops, t)
    }
}

/// Gradient between two circles.
///
/// Concentric circles are evaluated exactly. When the centres differ the
/// offset is measured from the end centre, which is close enough for the
/// small shapes drawn here.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub start_center: Point,
    pub start_radius: f64,
    pub end_center: Point,
    pub end_radius: f64,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(start_center: Point, start_radius: f64, end_center: Point, end_radius: f64) -> Self {
        Self {
            start_center,
            start_radius,
            end_center,
            end_radius,
            stops: Vec::new(),
        }
    }

    /// Add a colour stop, keeping stops ordered by offset.
    pub fn with_stop(mut self, offset: f64, color: Rgba) -> Self {
        insert_stop(&mut self.stops, offset, color);
        self
    }

    pub fn color_at(&self, point: Point) -> Option<Rgba> {
        let span = self.end_radius - self.start_radius;
        if span == 0.0 {
            return None;
        }
        let t = (point.distance(self.end_center) - self.start_radius) / span;
        sample_stops(&self.stops, t)
    }
}

fn insert_stop(stops: &mut Vec<ColorStop>, offset: f64, color: Rgba) {
    let offset = offset.clamp(0.0, 1.0);
    // Equal offsets keep insertion order, giving a hard edge.
    let idx = stops.partition_point(|stop| stop.offset <= offset);
    stops.insert(idx, ColorStop { offset, color });
}

fn sample_stops(stops: &[ColorStop], t: f64) -> Option<Rgba> {
    let first = stops.first()?;
    let last = stops.last()?;
    if t <= first.offset {
        return Some(first.color);
    }
    if t >= last.offset {
        return Some(last.color);
    }
    let upper = stops.partition_point(|stop| stop.offset <= t);
    let (lo, hi) = (stops[upper - 1], stops[upper]);
    let span = hi.offset - lo.offset;
    if span <= 0.0 {
        return Some(hi.color);
    }
    Some(lo.color.lerp(hi.color, (t - lo.offset) / span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgb;

    fn red(alpha: f64) -> Rgba {
        Rgb::new(255, 0, 0).with_alpha(alpha)
    }

    fn blue(alpha: f64) -> Rgba {
        Rgb::new(0, 0, 255).with_alpha(alpha)
    }

    #[test]
    fn test_linear_gradient_clamps_outside_axis() {
        let gradient = LinearGradient::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0))
            .with_stop(0.0, red(1.0))
            .with_stop(1.0, blue(1.0));

        assert_eq!(gradient.color_at(Point::new(-5.0, 3.0)), Some(red(1.0)));
        assert_eq!(gradient.color_at(Point::new(15.0, -3.0)), Some(blue(1.0)));

        let mid = gradient.color_at(Point::new(5.0, 7.0)).unwrap();
        assert_eq!(mid.rgb(), Rgb::new(128, 0, 128));
    }

    #[test]
    fn test_degenerate_linear_gradient_paints_nothing() {
        let p = Point::new(4.0, 4.0);
        let gradient = LinearGradient::new(p, p).with_stop(0.0, red(1.0));
        assert_eq!(gradient.color_at(p), None);
    }

    #[test]
    fn test_gradient_without_stops_paints_nothing() {
        let gradient = LinearGradient::new(Point::ORIGIN, Point::new(1.0, 0.0));
        assert_eq!(Paint::Linear(gradient).color_at(Point::ORIGIN), None);
    }

    #[test]
    fn test_radial_gradient_fades_with_radius() {
        let gradient = RadialGradient::new(Point::ORIGIN, 0.0, Point::ORIGIN, 20.0)
            .with_stop(0.0, red(0.2))
            .with_stop(1.0, red(0.1));

        let center = gradient.color_at(Point::ORIGIN).unwrap();
        assert!((center.a - 0.2).abs() < 1e-12);

        let half = gradient.color_at(Point::new(0.0, 10.0)).unwrap();
        assert!((half.a - 0.15).abs() < 1e-12);

        let outside = gradient.color_at(Point::new(30.0, 0.0)).unwrap();
        assert!((outside.a - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_stops_are_kept_sorted() {
        let gradient = LinearGradient::new(Point::ORIGIN, Point::new(1.0, 0.0))
            .with_stop(1.0, blue(1.0))
            .with_stop(0.0, red(1.0));
        assert_eq!(gradient.stops[0].offset, 0.0);
        assert_eq!(gradient.stops[1].offset, 1.0);
    }
}
