//! Floating neural network animation.
//!
//! Neurons are scattered at random and linked on the fly to every neighbour
//! within reach. Link brightness follows the average pulse of its endpoints.

use std::f64::consts::TAU;

use rand::Rng;
use synapse_core::{FloatingConfig, Paint, Point, Surface};

use super::{proximity, unit, wrap_phase};

const LINK_ALPHA: f64 = 0.5;
const MIN_NEURON_ALPHA: f64 = 0.3;

/// A free-floating neuron.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingNeuron {
    pub position: Point,
    /// Pulse phase as a fraction of a cycle, in `[0, 1)`.
    pub phase: f64,
    /// Drawn radius.
    pub size: f64,
}

impl FloatingNeuron {
    pub fn intensity(&self) -> f64 {
        pulse_intensity(self.phase)
    }
}

/// Map a phase (fraction of a cycle) to a brightness in `[0, 1]`.
pub fn pulse_intensity(phase: f64) -> f64 {
    ((phase * TAU).sin() + 1.0) / 2.0
}

/// Scatter `count` neurons over the surface.
pub fn create<R: Rng + ?Sized>(
    width: f64,
    height: f64,
    count: usize,
    rng: &mut R,
) -> Vec<FloatingNeuron> {
    (0..count)
        .map(|_| FloatingNeuron {
            position: Point::new(unit(rng) * width, unit(rng) * height),
            phase: unit(rng),
            size: 2.0 + unit(rng) * 2.0,
        })
        .collect()
}

/// Advance every phase by `config.pulse_speed`. With the default speed of
/// zero the neurons keep their initial phase.
pub fn advance(neurons: &mut [FloatingNeuron], config: &FloatingConfig) {
    if config.pulse_speed == 0.0 {
        return;
    }
    for neuron in neurons {
        neuron.phase = wrap_phase(neuron.phase + config.pulse_speed, 1.0);
    }
}

/// Opacity of the link between two neurons, or `None` if they are too far apart.
pub fn link_opacity(a: &FloatingNeuron, b: &FloatingNeuron, config: &FloatingConfig) -> Option<f64> {
    let falloff = proximity(a.position, b.position, config.connection_distance)?;
    let average = (a.phase + b.phase) / 2.0;
    Some(falloff * LINK_ALPHA * pulse_intensity(average))
}

/// Draw links between every pair of neurons within reach.
pub fn render_connections<S: Surface + ?Sized>(
    surface: &mut S,
    neurons: &[FloatingNeuron],
    config: &FloatingConfig,
) {
    surface.set_line_width(config.line_width.unwrap_or(1.0));
    for (i, a) in neurons.iter().enumerate() {
        for b in &neurons[i + 1..] {
            if let Some(alpha) = link_opacity(a, b, config) {
                let paint = Paint::Solid(config.base_color.with_alpha(alpha));
                surface.stroke_line(a.position, b.position, &paint);
            }
        }
    }
}

/// Draw every neuron as a filled circle.
pub fn render_neurons<S: Surface + ?Sized>(
    surface: &mut S,
    neurons: &[FloatingNeuron],
    config: &FloatingConfig,
) {
    for neuron in neurons {
        let alpha = MIN_NEURON_ALPHA + (1.0 - MIN_NEURON_ALPHA) * neuron.intensity();
        let paint = Paint::Solid(config.base_color.with_alpha(alpha));
        surface.fill_circle(neuron.position, neuron.size, &paint);
    }
}

/// Draw links, then neurons.
pub fn render<S: Surface + ?Sized>(surface: &mut S, neurons: &[FloatingNeuron], config: &FloatingConfig) {
    render_connections(surface, neurons, config);
    render_neurons(surface, neurons, config);
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn neuron(x: f64, y: f64, phase: f64) -> FloatingNeuron {
        FloatingNeuron {
            position: Point::new(x, y),
            phase,
            size: 3.0,
        }
    }

    #[test]
    fn test_create_ranges() {
        let mut rng = SmallRng::seed_from_u64(8);
        let neurons = create(640.0, 480.0, 100, &mut rng);
        assert_eq!(neurons.len(), 100);
        for n in &neurons {
            assert!((0.0..640.0).contains(&n.position.x));
            assert!((0.0..480.0).contains(&n.position.y));
            assert!((0.0..1.0).contains(&n.phase));
            assert!((2.0..=4.0).contains(&n.size));
        }
        assert!(create(640.0, 480.0, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_default_advance_keeps_phase() {
        let mut rng = SmallRng::seed_from_u64(8);
        let mut neurons = create(100.0, 100.0, 20, &mut rng);
        let before = neurons.clone();
        advance(&mut neurons, &FloatingConfig::default());
        assert_eq!(neurons, before);
    }

    #[test]
    fn test_advance_wraps_at_one_cycle() {
        let config = FloatingConfig {
            pulse_speed: 0.25,
            ..FloatingConfig::default()
        };
        let mut neurons = vec![neuron(0.0, 0.0, 0.5)];
        advance(&mut neurons, &config);
        assert_eq!(neurons[0].phase, 0.75);
        advance(&mut neurons, &config);
        assert_eq!(neurons[0].phase, 0.0);
    }

    #[test]
    fn test_link_opacity_symmetric_and_pulse_weighted() {
        let config = FloatingConfig {
            connection_distance: 100.0,
            ..FloatingConfig::default()
        };
        let a = neuron(0.0, 0.0, 0.1);
        let b = neuron(30.0, 40.0, 0.4);

        let ab = link_opacity(&a, &b, &config);
        assert_eq!(ab, link_opacity(&b, &a, &config));

        // Average phase 0.25 is the pulse peak.
        let expected = (1.0 - 50.0 / 100.0) * 0.5 * 1.0;
        assert!((ab.unwrap() - expected).abs() < 1e-12);

        let far = neuron(200.0, 0.0, 0.25);
        assert_eq!(link_opacity(&a, &far, &config), None);
    }

    #[test]
    fn test_neuron_alpha_tracks_intensity() {
        let config = FloatingConfig::default();
        let neurons = [neuron(10.0, 10.0, 0.25), neuron(500.0, 500.0, 0.75)];
        let mut surface = RecordingSurface::new();
        render_neurons(&mut surface, &neurons, &config);

        let alphas: Vec<f64> = surface
            .fills()
            .map(|paint| match paint {
                Paint::Solid(color) => color.a,
                other => panic!("unexpected paint {other:?}"),
            })
            .collect();
        assert_eq!(alphas.len(), 2);
        assert!((alphas[0] - 1.0).abs() < 1e-12);
        assert!((alphas[1] - 0.3).abs() < 1e-12);

        let radii: Vec<f64> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![3.0, 3.0]);
    }

    #[test]
    fn test_render_links_only_close_pairs() {
        let config = FloatingConfig {
            connection_distance: 50.0,
            line_width: Some(2.0),
            ..FloatingConfig::default()
        };
        let neurons = [
            neuron(0.0, 0.0, 0.25),
            neuron(10.0, 0.0, 0.25),
            neuron(20.0, 0.0, 0.25),
            neuron(300.0, 300.0, 0.25),
        ];
        let mut surface = RecordingSurface::new();
        render(&mut surface, &neurons, &config);

        assert_eq!(surface.strokes().count(), 3);
        assert_eq!(surface.fills().count(), 4);
        assert_eq!(surface.commands()[0], DrawCommand::SetLineWidth(2.0));
    }
}
