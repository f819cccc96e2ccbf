//! Animation style selection.

use serde::{Deserialize, Serialize};

/// Which background animation is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationStyle {
    /// Rotating polygons linked by gradient lines.
    #[default]
    ShapeField,
    /// Neurons in fixed layers, fully connected to the next layer.
    LayeredNetwork,
    /// Randomly placed neurons linked by proximity.
    FloatingNetwork,
}

impl AnimationStyle {
    pub const ALL: [AnimationStyle; 3] = [
        AnimationStyle::ShapeField,
        AnimationStyle::LayeredNetwork,
        AnimationStyle::FloatingNetwork,
    ];

    /// Cycle to the next animation style.
    pub fn next(self) -> Self {
        match self {
            AnimationStyle::ShapeField => AnimationStyle::LayeredNetwork,
            AnimationStyle::LayeredNetwork => AnimationStyle::FloatingNetwork,
            AnimationStyle::FloatingNetwork => AnimationStyle::ShapeField,
        }
    }

    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            AnimationStyle::ShapeField => "shape field",
            AnimationStyle::LayeredNetwork => "layered network",
            AnimationStyle::FloatingNetwork => "floating network",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_through_all_styles() {
        let mut style = AnimationStyle::default();
        for expected in AnimationStyle::ALL {
            assert_eq!(style, expected);
            style = style.next();
        }
        assert_eq!(style, AnimationStyle::default());
    }
}
