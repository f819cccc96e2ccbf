//! Per-animator configuration.
//!
//! Lengths and speeds are in surface units (braille dots on the terminal)
//! per frame.

use serde::{Deserialize, Serialize};

use crate::Rgb;

/// Settings for the rotating shape field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeFieldConfig {
    /// Number of shapes.
    pub shape_count: usize,
    /// Maximum centre distance at which two shapes are linked.
    pub connection_distance: f64,
    /// Velocity components are drawn from `[-move_speed/2, move_speed/2]`.
    pub move_speed: f64,
    /// Angular velocity is drawn from `[-rotation_speed/2, rotation_speed/2]`.
    pub rotation_speed: f64,
    /// Colour for triangles and hexagons, and the start of link gradients.
    pub primary_color: Rgb,
    /// Colour for squares and pentagons, and the end of link gradients.
    pub secondary_color: Rgb,
}

impl Default for ShapeFieldConfig {
    fn default() -> Self {
        Self {
            shape_count: 30,
            connection_distance: 150.0,
            move_speed: 0.5,
            rotation_speed: 0.02,
            primary_color: Rgb::new(59, 130, 246),
            secondary_color: Rgb::new(139, 92, 246),
        }
    }
}

/// Settings for the layered neural network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayeredConfig {
    pub layer_count: usize,
    pub neurons_per_layer: usize,
    /// Phase advance per frame, in radians.
    pub pulse_speed: f64,
    pub color: Rgb,
}

impl Default for LayeredConfig {
    fn default() -> Self {
        Self {
            layer_count: 4,
            neurons_per_layer: 6,
            pulse_speed: 0.05,
            color: Rgb::new(59, 130, 246),
        }
    }
}

/// Settings for the free-floating neural network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatingConfig {
    pub neuron_count: usize,
    /// Maximum distance at which two neurons are linked.
    pub connection_distance: f64,
    pub base_color: Rgb,
    /// Link width; 1.0 when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    /// Phase advance per frame, as a fraction of a cycle. Zero keeps every
    /// neuron at its initial phase.
    pub pulse_speed: f64,
}

impl Default for FloatingConfig {
    fn default() -> Self {
        Self {
            neuron_count: 50,
            connection_distance: 200.0,
            base_color: Rgb::new(99, 102, 241),
            line_width: None,
            pulse_speed: 0.0,
        }
    }
}
