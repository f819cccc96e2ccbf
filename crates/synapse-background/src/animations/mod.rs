//! Background animators.
//!
//! Each animator exposes `create`, `advance` and `render` entry points that
//! the host calls once per frame in that order (after the first `create`).

pub mod floating;
pub mod layered;
pub mod shapes;

use rand::Rng;
use synapse_core::Point;

/// Proximity falloff `1 - d / threshold` for two points closer than
/// `threshold`, or `None` when they are too far apart to be linked.
pub fn proximity(a: Point, b: Point, threshold: f64) -> Option<f64> {
    let distance = a.distance(b);
    (distance < threshold).then(|| 1.0 - distance / threshold)
}

/// Wrap a phase into `[0, cycle)`.
fn wrap_phase(phase: f64, cycle: f64) -> f64 {
    let wrapped = phase.rem_euclid(cycle);
    // rem_euclid can round up to `cycle` itself for tiny negative inputs.
    if wrapped >= cycle { 0.0 } else { wrapped }
}

/// Uniform sample in `[0, 1)`.
fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1.0)
}
