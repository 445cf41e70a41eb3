//! Reveal configuration
//!
//! Loaded from the `[reveal]` table of `insular.toml`. Every field has a
//! default so a partial table (or none at all) works.

use insular_animation::Easing;
use serde::{Deserialize, Deserializer};

/// Defaults applied when an element carries no override
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Entrance duration in seconds
    pub duration: f32,
    /// Entrance curve for kinds without their own default
    #[serde(deserialize_with = "easing_by_name")]
    pub ease: Easing,
    /// Default travel distance of the directional kinds, px
    pub distance: f32,
    /// Viewport fraction the element top must cross to fire a trigger
    pub trigger_start: f32,
    /// Counter duration in seconds
    pub counter_duration: f32,
    #[serde(deserialize_with = "easing_by_name")]
    pub counter_ease: Easing,
    /// Peak scale of the CTA pulse
    pub pulse_scale: f32,
    /// Half period of the CTA pulse in seconds
    pub pulse_duration: f32,
    /// Viewport fraction the CTA top must cross to start pulsing
    pub pulse_start: f32,
    /// Body background transition in seconds
    pub backdrop_duration: f32,
    /// One marquee loop in seconds
    pub marquee_duration: f32,
    /// Parallax speed when `data-parallax-speed` is absent
    pub parallax_speed: f32,
    /// Delay between a view mount and the scan, ms
    pub init_delay_ms: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            duration: 0.9,
            ease: Easing::Power(2, insular_animation::EaseDirection::Out),
            distance: 40.0,
            trigger_start: 0.8,
            counter_duration: 2.0,
            counter_ease: Easing::Power(1, insular_animation::EaseDirection::InOut),
            pulse_scale: 1.045,
            pulse_duration: 1.2,
            pulse_start: 0.85,
            backdrop_duration: 0.6,
            marquee_duration: 20.0,
            parallax_speed: 0.5,
            init_delay_ms: 80.0,
        }
    }
}

fn easing_by_name<'de, D>(deserializer: D) -> Result<Easing, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insular_animation::EaseDirection;

    #[test]
    fn test_partial_table() {
        let config: RevealConfig = toml::from_str(
            r#"
            duration = 1.2
            ease = "expo.out"
            "#,
        )
        .unwrap();
        assert_eq!(config.duration, 1.2);
        assert_eq!(config.ease, Easing::Expo(EaseDirection::Out));
        assert_eq!(config.trigger_start, 0.8);
        assert_eq!(config.init_delay_ms, 80.0);
    }

    #[test]
    fn test_unknown_ease_is_rejected() {
        let parsed: Result<RevealConfig, _> = toml::from_str(r#"ease = "wobble""#);
        assert!(parsed.is_err());
    }
}
