//! Easing functions
//!
//! Curves are addressed by the names used in markup hints:
//! `<family>.<direction>` where family is one of `power0`..`power4`
//! (aliases `quad`, `cubic`, `quart`, `quint`), `sine`, `expo`, `circ` or
//! `back`, and direction is `in`, `out` or `inOut`. A bare family name means
//! `.out`; `none` and `linear` are the identity curve.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Overshoot used by the `back` family
const BACK_OVERSHOOT: f32 = 1.70158;

/// Which end of the curve is eased
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EaseDirection {
    In,
    Out,
    InOut,
}

/// Easing curve
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Easing {
    Linear,
    /// Polynomial of degree `power + 1` (`power1` is quadratic)
    Power(u8, EaseDirection),
    Sine(EaseDirection),
    Expo(EaseDirection),
    Circ(EaseDirection),
    Back(EaseDirection),
}

impl Default for Easing {
    fn default() -> Self {
        Easing::Power(1, EaseDirection::Out)
    }
}

impl Easing {
    /// Look up a curve by name, `None` when the name is not recognised
    pub fn from_name(name: &str) -> Option<Easing> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let (family, direction) = match name.split_once('.') {
            Some((family, dir)) => {
                let direction = match dir {
                    "in" => EaseDirection::In,
                    "out" => EaseDirection::Out,
                    "inOut" | "inout" => EaseDirection::InOut,
                    _ => return None,
                };
                (family, direction)
            }
            None => (name, EaseDirection::Out),
        };

        let easing = match family {
            "none" | "linear" | "power0" => Easing::Linear,
            "power1" | "quad" => Easing::Power(1, direction),
            "power2" | "cubic" => Easing::Power(2, direction),
            "power3" | "quart" => Easing::Power(3, direction),
            "power4" | "quint" | "strong" => Easing::Power(4, direction),
            "sine" => Easing::Sine(direction),
            "expo" => Easing::Expo(direction),
            "circ" => Easing::Circ(direction),
            "back" => Easing::Back(direction),
            _ => return None,
        };
        Some(easing)
    }

    /// Apply the curve to linear progress `t` (clamped to `0.0..=1.0`)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::Power(power, dir) => {
                let exp = power as i32 + 1;
                directed(dir, t, |t| t.powi(exp))
            }
            Easing::Sine(dir) => directed(dir, t, |t| 1.0 - (t * PI / 2.0).cos()),
            Easing::Expo(dir) => directed(dir, t, |t| {
                if t == 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * (t - 1.0))
                }
            }),
            Easing::Circ(dir) => directed(dir, t, |t| 1.0 - (1.0 - t * t).max(0.0).sqrt()),
            Easing::Back(dir) => directed(dir, t, |t| {
                t * t * ((BACK_OVERSHOOT + 1.0) * t - BACK_OVERSHOOT)
            }),
        }
    }
}

/// Derive out/inOut variants from an ease-in curve
fn directed(dir: EaseDirection, t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    let v = match dir {
        EaseDirection::In => ease_in(t),
        EaseDirection::Out => 1.0 - ease_in(1.0 - t),
        EaseDirection::InOut => {
            if t < 0.5 {
                ease_in(t * 2.0) / 2.0
            } else {
                1.0 - ease_in((1.0 - t) * 2.0) / 2.0
            }
        }
    };
    // Pin the endpoints so a finished tween lands exactly on its target
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        v
    }
}

/// Error returned when parsing an unknown easing name
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown easing `{0}`")]
pub struct UnknownEasing(pub String);

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::from_name(s).ok_or_else(|| UnknownEasing(s.to_string()))
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = |d: EaseDirection| match d {
            EaseDirection::In => "in",
            EaseDirection::Out => "out",
            EaseDirection::InOut => "inOut",
        };
        match *self {
            Easing::Linear => write!(f, "none"),
            Easing::Power(p, d) => write!(f, "power{}.{}", p, dir(d)),
            Easing::Sine(d) => write!(f, "sine.{}", dir(d)),
            Easing::Expo(d) => write!(f, "expo.{}", dir(d)),
            Easing::Circ(d) => write!(f, "circ.{}", dir(d)),
            Easing::Back(d) => write!(f, "back.{}", dir(d)),
        }
    }
}
