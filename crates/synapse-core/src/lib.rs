//! Core types shared by the synapse crates.
//!
//! This crate holds the drawing-surface contract the animators render
//! through, colour and paint types, and the per-animator configuration.

mod color;
mod config;
mod paint;
mod point;
mod style;
mod surface;

pub use color::{ColorParseError, Rgb, Rgba};
pub use config::{FloatingConfig, LayeredConfig, ShapeFieldConfig};
pub use paint::{ColorStop, LinearGradient, Paint, RadialGradient};
pub use point::Point;
pub use style::AnimationStyle;
pub use surface::Surface;
