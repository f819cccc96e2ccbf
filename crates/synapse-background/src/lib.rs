//! Background animations for synapse.
//!
//! This crate provides the shape field and the two neural-network
//! animations. Animators draw through the [`synapse_core::Surface`] trait;
//! [`surface::CanvasSurface`] puts that on a ratatui braille canvas and
//! [`surface::RecordingSurface`] captures the calls for inspection.

pub mod animations;
mod color;
pub mod geometry;
mod state;
pub mod surface;

pub use color::{MIN_VISIBLE_ALPHA, blend, to_terminal};
pub use state::{BackgroundState, Settings};
