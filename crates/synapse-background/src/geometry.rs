//! Regular polygon outlines.

use std::f64::consts::{FRAC_PI_2, TAU};

use synapse_core::Point;

/// Vertices of a regular polygon centred on the origin.
///
/// The first vertex sits at the top and the rest follow clockwise (y points
/// down), `2π / side_count` apart.
pub fn generate_polygon(side_count: usize, radius: f64) -> Vec<Point> {
    (0..side_count)
        .map(|i| {
            let angle = i as f64 * TAU / side_count as f64 - FRAC_PI_2;
            Point::new(angle.cos() * radius, angle.sin() * radius)
        })
        .collect()
}

/// Largest absolute coordinate over all points, on either axis.
pub fn extent(points: &[Point]) -> f64 {
    points
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(0.0, f64::max)
}
