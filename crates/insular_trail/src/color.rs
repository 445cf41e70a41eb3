//! Palette cycling

use insular_core::Color;
use insular_theme::BrandPalette;

/// Base cycle rate, palette entries per second
pub const CYCLE_RATE: f32 = 0.35;

/// Extra cycle per px of movement per second
pub const MOVE_CYCLE_RATE: f32 = 0.012;

/// Phase offset of the secondary colour
pub const SECONDARY_OFFSET: f32 = 0.5;

/// Mix two colours and round to 8-bit channels, as the canvas does when it
/// parses an `rgba()` string
pub fn mix(a: Color, b: Color, t: f32) -> Color {
    let [ar, ag, ab] = a.to_rgb8();
    let [br, bg, bb] = b.to_rgb8();
    let channel = |from: u8, to: u8| {
        let value = from as f32 + (to as f32 - from as f32) * t;
        value.round().clamp(0.0, 255.0) as u8
    };
    Color::from_rgb8(channel(ar, br), channel(ag, bg), channel(ab, bb))
}

/// Colour at `phase` along the palette loop
pub fn palette_at(palette: &BrandPalette, phase: f32) -> Color {
    let colors = palette.colors();
    let n = colors.len();
    let whole = phase.floor();
    let idx = (whole as usize) % n;
    mix(colors[idx], colors[(idx + 1) % n], phase - whole)
}

/// Advance the cycle by one frame
pub fn advance_phase(phase: f32, dt_s: f32, speed: f32) -> f32 {
    phase + dt_s * CYCLE_RATE + speed * MOVE_CYCLE_RATE * dt_s
}

/// The brush pair at `phase`: primary and the offset secondary
pub fn brush_colors(palette: &BrandPalette, phase: f32) -> (Color, Color) {
    (
        palette_at(palette, phase),
        palette_at(palette, phase + SECONDARY_OFFSET),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_rounds() {
        let a = Color::from_rgb8(66, 43, 226);
        let b = Color::from_rgb8(249, 50, 67);
        assert_eq!(mix(a, b, 0.5).to_rgb8(), [158, 47, 147]);
        assert_eq!(mix(a, b, 0.0).to_rgb8(), [66, 43, 226]);
    }

    #[test]
    fn test_cycle_wraps() {
        let palette = BrandPalette::default();
        let [purple, red, mint] = *palette.colors();
        assert_eq!(palette_at(&palette, 0.0).to_rgb8(), purple.to_rgb8());
        assert_eq!(palette_at(&palette, 1.0).to_rgb8(), red.to_rgb8());
        assert_eq!(palette_at(&palette, 2.0).to_rgb8(), mint.to_rgb8());
        assert_eq!(palette_at(&palette, 3.0).to_rgb8(), purple.to_rgb8());

        let (c1, c2) = brush_colors(&palette, 2.0);
        assert_eq!(c1.to_rgb8(), mint.to_rgb8());
        assert_eq!(c2.to_rgb8(), mix(mint, purple, 0.5).to_rgb8());
    }

    #[test]
    fn test_phase_speeds_up_with_motion() {
        let still = advance_phase(0.0, 1.0, 0.0);
        let moving = advance_phase(0.0, 1.0, 50.0);
        assert!((still - 0.35).abs() < 1e-6);
        assert!((moving - 0.95).abs() < 1e-5);
    }
}
