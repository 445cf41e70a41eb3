//! Declarative animation hints
//!
//! Elements opt in with `data-animate="<kind>"` and tune the entrance with
//! `data-delay`, `data-duration`, `data-ease`, `data-distance`, `data-skew`
//! and `data-rotate`. Numeric hints are read the way `parseFloat` reads
//! them; anything unparseable counts as absent.

use std::fmt;
use std::str::FromStr;

use insular_animation::{EaseDirection, Easing};
use insular_core::parse_float_prefix;

use crate::config::RevealConfig;
use crate::dom::{Document, ElementId};
use crate::style::{MotionStyle, TransformOrigin};

pub const ATTR_ANIMATE: &str = "data-animate";
pub const ATTR_DELAY: &str = "data-delay";
pub const ATTR_DURATION: &str = "data-duration";
pub const ATTR_EASE: &str = "data-ease";
pub const ATTR_DISTANCE: &str = "data-distance";
pub const ATTR_SKEW: &str = "data-skew";
pub const ATTR_ROTATE: &str = "data-rotate";

/// Offset of the short-travel kinds (`blur-up`, `tilt`, `reveal-up`), px
const SHORT_TRAVEL: f32 = 24.0;

/// Entrance animation kind, the value of `data-animate`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Fade,
    FadeUp,
    FadeDown,
    FadeLeft,
    FadeRight,
    Scale,
    BlurUp,
    Tilt,
    RevealUp,
}

/// Error returned for an unknown `data-animate` value
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown animation kind `{0}`")]
pub struct UnknownKind(pub String);

impl FromStr for AnimationKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "fade" => AnimationKind::Fade,
            "fade-up" => AnimationKind::FadeUp,
            "fade-down" => AnimationKind::FadeDown,
            "fade-left" => AnimationKind::FadeLeft,
            "fade-right" => AnimationKind::FadeRight,
            "scale" => AnimationKind::Scale,
            "blur-up" => AnimationKind::BlurUp,
            "tilt" => AnimationKind::Tilt,
            "reveal-up" => AnimationKind::RevealUp,
            other => return Err(UnknownKind(other.to_string())),
        })
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnimationKind::Fade => "fade",
            AnimationKind::FadeUp => "fade-up",
            AnimationKind::FadeDown => "fade-down",
            AnimationKind::FadeLeft => "fade-left",
            AnimationKind::FadeRight => "fade-right",
            AnimationKind::Scale => "scale",
            AnimationKind::BlurUp => "blur-up",
            AnimationKind::Tilt => "tilt",
            AnimationKind::RevealUp => "reveal-up",
        })
    }
}

impl AnimationKind {
    /// State the entrance starts from, with the default travel distance for
    /// the directional kinds
    pub fn offset(&self, distance: f32) -> MotionStyle {
        let hidden = MotionStyle {
            opacity: 0.0,
            ..MotionStyle::REST
        };
        match self {
            AnimationKind::Fade => hidden,
            AnimationKind::FadeUp => MotionStyle {
                translate_y: distance,
                ..hidden
            },
            AnimationKind::FadeDown => MotionStyle {
                translate_y: -distance,
                ..hidden
            },
            AnimationKind::FadeLeft => MotionStyle {
                translate_x: distance,
                ..hidden
            },
            AnimationKind::FadeRight => MotionStyle {
                translate_x: -distance,
                ..hidden
            },
            AnimationKind::Scale => MotionStyle {
                scale: 0.9,
                ..hidden
            },
            AnimationKind::BlurUp => MotionStyle {
                translate_y: SHORT_TRAVEL,
                blur: 12.0,
                ..hidden
            },
            AnimationKind::Tilt => MotionStyle {
                translate_y: SHORT_TRAVEL,
                rotate_x: -8.0,
                perspective: Some(800.0),
                ..hidden
            },
            AnimationKind::RevealUp => MotionStyle {
                translate_y: SHORT_TRAVEL,
                clip_inset_top: 15.0,
                ..hidden
            },
        }
    }

    /// Curve this kind uses unless the element overrides it
    pub fn default_ease(&self) -> Option<Easing> {
        match self {
            AnimationKind::Tilt | AnimationKind::RevealUp => {
                Some(Easing::Power(3, EaseDirection::Out))
            }
            _ => None,
        }
    }

    pub fn transform_origin(&self) -> TransformOrigin {
        match self {
            AnimationKind::Tilt => TransformOrigin::BOTTOM_CENTER,
            _ => TransformOrigin::CENTER,
        }
    }
}

/// Read a numeric hint, `None` when absent, empty or not a finite number
pub fn read_number(doc: &Document, id: ElementId, name: &str) -> Option<f32> {
    let raw = doc.attribute(id, name)?;
    let (value, _) = parse_float_prefix(raw)?;
    let value = value as f32;
    value.is_finite().then_some(value)
}

/// Per-element overrides, each `None` when the hint is absent or invalid
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RevealOverrides {
    pub delay: Option<f32>,
    pub duration: Option<f32>,
    pub ease: Option<Easing>,
    pub distance: Option<f32>,
    pub skew: Option<f32>,
    pub rotate: Option<f32>,
}

impl RevealOverrides {
    pub fn read(doc: &Document, id: ElementId) -> Self {
        let ease = doc.attribute(id, ATTR_EASE).and_then(|name| {
            let parsed = Easing::from_name(name);
            if parsed.is_none() {
                tracing::trace!("ignoring unknown ease `{}`", name);
            }
            parsed
        });
        Self {
            delay: read_number(doc, id, ATTR_DELAY),
            duration: read_number(doc, id, ATTR_DURATION).map(|d| d.max(0.0)),
            ease,
            distance: read_number(doc, id, ATTR_DISTANCE),
            skew: read_number(doc, id, ATTR_SKEW),
            rotate: read_number(doc, id, ATTR_ROTATE),
        }
    }
}

/// Fully resolved entrance for one element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntrancePlan {
    pub kind: AnimationKind,
    pub from: MotionStyle,
    pub origin: TransformOrigin,
    /// seconds
    pub delay: f32,
    /// seconds
    pub duration: f32,
    pub easing: Easing,
}

impl EntrancePlan {
    /// Combine kind defaults, config defaults and element overrides
    pub fn resolve(kind: AnimationKind, overrides: &RevealOverrides, config: &RevealConfig) -> Self {
        let mut from = kind.offset(config.distance);

        // Distance keeps the sign and axis of the kind's travel
        let vertical = from.translate_y != 0.0;
        let horizontal = !vertical && from.translate_x != 0.0;
        if let Some(distance) = overrides.distance {
            if vertical {
                from.translate_y = from.translate_y.signum() * distance;
            } else if horizontal {
                from.translate_x = from.translate_x.signum() * distance;
            }
        }

        if let Some(skew) = overrides.skew {
            if vertical {
                from.skew_y = skew;
            } else if horizontal {
                from.skew_x = skew;
            }
        }

        if let Some(rotate) = overrides.rotate {
            from.rotate = rotate;
        }

        Self {
            kind,
            from,
            origin: kind.transform_origin(),
            delay: overrides.delay.unwrap_or(0.0).max(0.0),
            duration: overrides.duration.unwrap_or(config.duration),
            easing: overrides
                .ease
                .or(kind.default_ease())
                .unwrap_or(config.ease),
        }
    }

    /// Read the hints of `id` and resolve them, `None` when the element has
    /// no recognised `data-animate` kind
    pub fn for_element(doc: &Document, id: ElementId, config: &RevealConfig) -> Option<Self> {
        let kind: AnimationKind = doc.attribute(id, ATTR_ANIMATE)?.parse().ok()?;
        Some(Self::resolve(kind, &RevealOverrides::read(doc, id), config))
    }
}
