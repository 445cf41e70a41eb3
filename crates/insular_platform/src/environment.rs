//! Host environment snapshot

use insular_core::Size;

use crate::error::{PlatformError, Result};

/// Read-only signals the host exposes to the motion crates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Environment {
    /// Physical pixels per CSS pixel
    pub device_pixel_ratio: f32,
    /// Viewport size in CSS pixels
    pub viewport: Size,
    /// User asked the system for reduced motion
    pub reduced_motion: bool,
    /// Current vertical document scroll offset
    pub scroll_y: f32,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            device_pixel_ratio: 1.0,
            viewport: Size::new(1280.0, 800.0),
            reduced_motion: false,
            scroll_y: 0.0,
        }
    }
}

impl Environment {
    /// Check the values a host hands us before anything reads them
    pub fn validate(&self) -> Result<()> {
        if !self.device_pixel_ratio.is_finite() || self.device_pixel_ratio <= 0.0 {
            return Err(PlatformError::InvalidEnvironment(format!(
                "device pixel ratio must be positive, got {}",
                self.device_pixel_ratio
            )));
        }
        if self.viewport.width < 0.0 || self.viewport.height < 0.0 {
            return Err(PlatformError::InvalidEnvironment(format!(
                "negative viewport {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        Ok(())
    }

    /// Pixel ratio capped at `max`
    pub fn capped_pixel_ratio(&self, max: f32) -> f32 {
        self.device_pixel_ratio.min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Environment::default().validate().is_ok());
        let bad = Environment {
            device_pixel_ratio: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(PlatformError::InvalidEnvironment(_))
        ));
    }

    #[test]
    fn test_capped_ratio() {
        let env = Environment {
            device_pixel_ratio: 3.0,
            ..Default::default()
        };
        assert_eq!(env.capped_pixel_ratio(2.0), 2.0);
    }
}
