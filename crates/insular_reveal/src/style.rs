//! Presentational style of a document element
//!
//! Only the properties the reveal effects write are modelled. Everything in
//! [`MotionStyle`] is tweenable; the rest of [`Style`] is owned by individual
//! effects.

use insular_animation::Interpolate;
use insular_core::Color;

/// Tweenable visual state: opacity, transform, blur and clip
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionStyle {
    pub opacity: f32,
    /// px
    pub translate_x: f32,
    /// px
    pub translate_y: f32,
    pub scale: f32,
    /// degrees
    pub skew_x: f32,
    /// degrees
    pub skew_y: f32,
    /// degrees
    pub rotate: f32,
    /// degrees, around the horizontal axis
    pub rotate_x: f32,
    /// px, `None` for a flat transform
    pub perspective: Option<f32>,
    /// px
    pub blur: f32,
    /// percent of the element height clipped from the top
    pub clip_inset_top: f32,
}

impl MotionStyle {
    /// Natural resting state: fully visible, untransformed
    pub const REST: MotionStyle = MotionStyle {
        opacity: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
        skew_x: 0.0,
        skew_y: 0.0,
        rotate: 0.0,
        rotate_x: 0.0,
        perspective: None,
        blur: 0.0,
        clip_inset_top: 0.0,
    };

    pub fn is_at_rest(&self) -> bool {
        self.approx_eq(&MotionStyle::REST, 1e-4)
    }
}

impl Default for MotionStyle {
    fn default() -> Self {
        Self::REST
    }
}

impl Interpolate for MotionStyle {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        let f = |a: f32, b: f32| a + (b - a) * t;
        MotionStyle {
            opacity: f(self.opacity, other.opacity),
            translate_x: f(self.translate_x, other.translate_x),
            translate_y: f(self.translate_y, other.translate_y),
            scale: f(self.scale, other.scale),
            skew_x: f(self.skew_x, other.skew_x),
            skew_y: f(self.skew_y, other.skew_y),
            rotate: f(self.rotate, other.rotate),
            rotate_x: f(self.rotate_x, other.rotate_x),
            // Held for the whole tween, dropped only on arrival
            perspective: if t < 1.0 {
                self.perspective.or(other.perspective)
            } else {
                other.perspective
            },
            blur: f(self.blur, other.blur),
            clip_inset_top: f(self.clip_inset_top, other.clip_inset_top),
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        let close = |a: f32, b: f32| (a - b).abs() < epsilon;
        close(self.opacity, other.opacity)
            && close(self.translate_x, other.translate_x)
            && close(self.translate_y, other.translate_y)
            && close(self.scale, other.scale)
            && close(self.skew_x, other.skew_x)
            && close(self.skew_y, other.skew_y)
            && close(self.rotate, other.rotate)
            && close(self.rotate_x, other.rotate_x)
            && self.perspective == other.perspective
            && close(self.blur, other.blur)
            && close(self.clip_inset_top, other.clip_inset_top)
    }
}

/// Transform origin in percent of the element box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformOrigin {
    pub x: f32,
    pub y: f32,
}

impl TransformOrigin {
    pub const CENTER: TransformOrigin = TransformOrigin { x: 50.0, y: 50.0 };
    pub const BOTTOM_CENTER: TransformOrigin = TransformOrigin { x: 50.0, y: 100.0 };
}

impl Default for TransformOrigin {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Everything the reveal crate may write on an element
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    pub motion: MotionStyle,
    pub transform_origin: TransformOrigin,
    /// Inline background colour
    pub background: Option<Color>,
    /// Word reveal: number of leading words drawn at full strength
    pub lit_words: Option<usize>,
}
