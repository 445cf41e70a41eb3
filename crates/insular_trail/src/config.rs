//! Trail configuration
//!
//! Loaded from the `[trail]` table of `insular.toml`; every field has a
//! default.

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Fraction of the remaining distance the brush covers per frame
    pub smoothing: f32,
    /// Pointer silence before the brush starts drifting, ms
    pub idle_threshold_ms: f64,
    /// Drift radius as a fraction of the canvas width
    pub drift_x: f32,
    /// Drift radius as a fraction of the canvas height
    pub drift_y: f32,
    /// Alpha of the base-colour wash painted every frame
    pub fade_alpha: f32,
    /// Wash alpha while the page scrolls
    pub scroll_fade_alpha: f32,
    /// Trail samples kept
    pub trail_capacity: usize,
    /// Trail samples kept while the page scrolls
    pub scroll_trail_capacity: usize,
    /// Time without scroll events before scrolling is considered over, ms
    pub scroll_quiet_ms: f64,
    /// Cap on the device pixel ratio used for the backing store
    pub max_pixel_ratio: f32,
    /// Stamp the trail of recent samples
    pub trail: bool,
    /// Offset glow trailing behind the brush
    pub secondary_glow: bool,
    /// Paint particles shed by the brush
    pub particles: bool,
    /// Fixed seed for the particle field, random when unset
    pub particle_seed: Option<u64>,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.06,
            idle_threshold_ms: 1200.0,
            drift_x: 0.18,
            drift_y: 0.14,
            fade_alpha: 0.012,
            scroll_fade_alpha: 0.25,
            trail_capacity: 24,
            scroll_trail_capacity: 6,
            scroll_quiet_ms: 150.0,
            max_pixel_ratio: 2.0,
            trail: true,
            secondary_glow: false,
            particles: false,
            particle_seed: None,
        }
    }
}

impl TrailConfig {
    pub fn fade_alpha(&self, scrolling: bool) -> f32 {
        if scrolling {
            self.scroll_fade_alpha
        } else {
            self.fade_alpha
        }
    }

    pub fn trail_capacity(&self, scrolling: bool) -> usize {
        if scrolling {
            self.scroll_trail_capacity
        } else {
            self.trail_capacity
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_table() {
        let config: TrailConfig = toml::from_str(
            r#"
            particles = true
            particle_seed = 7
            trail_capacity = 12
            "#,
        )
        .unwrap();
        assert!(config.particles);
        assert_eq!(config.particle_seed, Some(7));
        assert_eq!(config.trail_capacity(false), 12);
        assert_eq!(config.trail_capacity(true), 6);
        assert_eq!(config.smoothing, 0.06);
    }

    #[test]
    fn test_scroll_switches() {
        let config = TrailConfig::default();
        assert_eq!(config.fade_alpha(false), 0.012);
        assert_eq!(config.fade_alpha(true), 0.25);
    }
}
