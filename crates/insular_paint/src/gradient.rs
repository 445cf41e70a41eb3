//! Gradient helpers

pub use insular_core::{Gradient, GradientStop};

use insular_core::{Color, Point};

/// Create a simple radial gradient between two colors
pub fn radial_simple(center: Point, radius: f32, from: Color, to: Color) -> Gradient {
    Gradient::radial(center, radius, from, to)
}

/// Radial glow: `color` at `alpha` in the centre fading to fully transparent
/// at `radius`
pub fn radial_glow(center: Point, radius: f32, color: Color, alpha: f32) -> Gradient {
    radial_simple(
        center,
        radius,
        color.with_alpha(alpha),
        color.with_alpha(0.0),
    )
}
