//! Color utility functions for terminal rendering.

use ratatui::style::Color;
use synapse_core::{Rgb, Rgba};

/// Colours fainter than this are not drawn at all. A braille cell has a single
/// foreground colour, so a nearly invisible dot would still recolour its
/// neighbours.
pub const MIN_VISIBLE_ALPHA: f64 = 0.01;

/// Convert an opaque colour to a terminal colour.
pub fn to_terminal(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Flatten a translucent colour onto the backdrop, or `None` if it is too
/// faint to be worth drawing.
pub fn blend(color: Rgba, backdrop: Rgb) -> Option<Color> {
    if color.a < MIN_VISIBLE_ALPHA {
        return None;
    }
    Some(to_terminal(color.over(backdrop)))
}
