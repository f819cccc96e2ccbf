//! Layered neural network animation (stateful).
//!
//! Neurons sit in evenly spaced columns, every neuron is wired to each neuron
//! of the next column, and each one pulses in size on its own phase.

use std::f64::consts::TAU;

use rand::Rng;
use slotmap::{SlotMap, new_key_type};
use synapse_core::{LayeredConfig, Paint, Point, Surface};

use super::{unit, wrap_phase};

new_key_type! {
    /// Stable handle for a neuron within its [`LayeredNetwork`].
    pub struct NeuronKey;
}

const CONNECTION_ALPHA: f64 = 0.2;
const NEURON_ALPHA: f64 = 0.8;
const BASE_RADIUS: f64 = 3.0;
const PULSE_RADIUS: f64 = 2.0;

/// A neuron in a fixed layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredNeuron {
    pub position: Point,
    pub layer: usize,
    /// Targets in the following layer.
    pub connections: Vec<NeuronKey>,
    /// Pulse phase in radians, kept in `[0, 2π)`.
    pub phase: f64,
}

impl LayeredNeuron {
    /// Pulse strength in `[0, 1]`.
    pub fn pulse(&self) -> f64 {
        (self.phase.sin() + 1.0) / 2.0
    }

    /// Current drawn radius.
    pub fn radius(&self) -> f64 {
        BASE_RADIUS + self.pulse() * PULSE_RADIUS
    }
}

/// A network of neurons arranged in layers.
#[derive(Debug, Clone, Default)]
pub struct LayeredNetwork {
    neurons: SlotMap<NeuronKey, LayeredNeuron>,
}

impl LayeredNetwork {
    /// Lay out `layer_count` columns of `neurons_per_layer` neurons and wire
    /// each layer fully to the next.
    pub fn create<R: Rng + ?Sized>(
        width: f64,
        height: f64,
        config: &LayeredConfig,
        rng: &mut R,
    ) -> Self {
        let mut neurons = SlotMap::with_key();
        let layer_spacing = width / (config.layer_count + 1) as f64;
        let row_spacing = height / (config.neurons_per_layer + 1) as f64;

        let mut layers: Vec<Vec<NeuronKey>> = Vec::with_capacity(config.layer_count);
        for layer in 0..config.layer_count {
            let x = layer_spacing * (layer + 1) as f64;
            let keys = (0..config.neurons_per_layer)
                .map(|i| {
                    neurons.insert(LayeredNeuron {
                        position: Point::new(x, row_spacing * (i + 1) as f64),
                        layer,
                        connections: Vec::new(),
                        phase: unit(rng) * TAU,
                    })
                })
                .collect();
            layers.push(keys);
        }

        for pair in layers.windows(2) {
            for &key in &pair[0] {
                neurons[key].connections = pair[1].clone();
            }
        }

        Self { neurons }
    }

    /// Advance every neuron's pulse phase, wrapping at a full cycle.
    pub fn advance(&mut self, config: &LayeredConfig) {
        for neuron in self.neurons.values_mut() {
            neuron.phase = wrap_phase(neuron.phase + config.pulse_speed, TAU);
        }
    }

    /// Draw every connection, then every neuron.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, config: &LayeredConfig) {
        let line = Paint::Solid(config.color.with_alpha(CONNECTION_ALPHA));
        surface.set_line_width(1.0);
        for (from, to) in self.connections() {
            surface.stroke_line(from.position, to.position, &line);
        }

        let fill = Paint::Solid(config.color.with_alpha(NEURON_ALPHA));
        for neuron in self.neurons.values() {
            surface.fill_circle(neuron.position, neuron.radius(), &fill);
        }
    }

    pub fn get(&self, key: NeuronKey) -> Option<&LayeredNeuron> {
        self.neurons.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NeuronKey, &LayeredNeuron)> {
        self.neurons.iter()
    }

    /// Every stored connection, resolved to its endpoints.
    pub fn connections(&self) -> impl Iterator<Item = (&LayeredNeuron, &LayeredNeuron)> {
        self.neurons.values().flat_map(move |from| {
            from.connections
                .iter()
                .filter_map(move |&key| self.neurons.get(key).map(|to| (from, to)))
        })
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn network(layers: usize, per_layer: usize) -> LayeredNetwork {
        let config = LayeredConfig {
            layer_count: layers,
            neurons_per_layer: per_layer,
            ..LayeredConfig::default()
        };
        LayeredNetwork::create(800.0, 500.0, &config, &mut SmallRng::seed_from_u64(11))
    }

    #[test]
    fn test_adjacent_layer_connectivity() {
        let net = network(3, 4);
        assert_eq!(net.len(), 12);

        for (_, neuron) in net.iter() {
            let expected = if neuron.layer == 2 { 0 } else { 4 };
            assert_eq!(neuron.connections.len(), expected, "layer {}", neuron.layer);
            for &target in &neuron.connections {
                let target = net.get(target).unwrap();
                assert_eq!(target.layer, neuron.layer + 1);
            }
        }
        assert_eq!(net.connections().count(), 2 * 4 * 4);
    }

    #[test]
    fn test_layout_spacing() {
        let net = network(3, 4);
        for (_, neuron) in net.iter() {
            assert_eq!(neuron.position.x, 200.0 * (neuron.layer + 1) as f64);
            let row = neuron.position.y / 100.0;
            assert!((1.0..=4.0).contains(&row));
            assert_eq!(row.fract(), 0.0);
        }
    }

    #[test]
    fn test_initial_phase_in_range() {
        let net = network(5, 10);
        assert!(net.iter().all(|(_, n)| (0.0..TAU).contains(&n.phase)));
    }

    #[test]
    fn test_degenerate_networks() {
        assert!(network(0, 4).is_empty());
        assert!(network(3, 0).is_empty());
        let single = network(1, 3);
        assert_eq!(single.len(), 3);
        assert_eq!(single.connections().count(), 0);
    }

    #[test]
    fn test_pulse_wraps_without_drift() {
        let steps = 64;
        let config = LayeredConfig {
            layer_count: 2,
            neurons_per_layer: 3,
            pulse_speed: TAU / steps as f64,
            ..LayeredConfig::default()
        };
        let mut net = LayeredNetwork::create(100.0, 100.0, &config, &mut SmallRng::seed_from_u64(2));
        let start: Vec<f64> = net.iter().map(|(_, n)| n.phase).collect();

        for _ in 0..steps {
            net.advance(&config);
            assert!(net.iter().all(|(_, n)| (0.0..TAU).contains(&n.phase)));
        }

        for ((_, neuron), initial) in net.iter().zip(start) {
            let diff = (neuron.phase - initial).abs();
            let diff = diff.min(TAU - diff);
            assert!(diff < 1e-9, "{} vs {}", neuron.phase, initial);
        }
    }

    #[test]
    fn test_large_and_negative_pulse_speed_stay_in_range() {
        let mut net = network(2, 2);
        for speed in [1.0, 100.0, -0.3] {
            let config = LayeredConfig {
                pulse_speed: speed,
                ..LayeredConfig::default()
            };
            for _ in 0..50 {
                net.advance(&config);
            }
            assert!(net.iter().all(|(_, n)| (0.0..TAU).contains(&n.phase)));
        }
    }

    #[test]
    fn test_radius_follows_pulse() {
        let mut neuron = LayeredNeuron {
            position: Point::ORIGIN,
            layer: 0,
            connections: Vec::new(),
            phase: std::f64::consts::FRAC_PI_2,
        };
        assert!((neuron.radius() - 5.0).abs() < 1e-12);
        neuron.phase = 3.0 * std::f64::consts::FRAC_PI_2;
        assert!((neuron.radius() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_render_draws_connections_then_neurons() {
        let config = LayeredConfig {
            layer_count: 2,
            neurons_per_layer: 2,
            ..LayeredConfig::default()
        };
        let net = LayeredNetwork::create(300.0, 300.0, &config, &mut SmallRng::seed_from_u64(4));
        let mut surface = RecordingSurface::new();
        net.render(&mut surface, &config);

        let strokes: Vec<&Paint> = surface.strokes().collect();
        assert_eq!(strokes.len(), 4);
        assert!(
            strokes
                .iter()
                .all(|p| **p == Paint::Solid(config.color.with_alpha(0.2)))
        );
        assert_eq!(surface.fills().count(), 4);

        let first_fill = surface
            .commands()
            .iter()
            .position(|c| matches!(c, DrawCommand::Fill(_)))
            .unwrap();
        let last_stroke = surface
            .commands()
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Stroke(_)))
            .unwrap();
        assert!(last_stroke < first_fill);
    }
}
