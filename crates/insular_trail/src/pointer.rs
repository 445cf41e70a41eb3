//! Pointer tracking and idle drift

use insular_core::{Point, Size, Vec2};

/// Below this many px per frame the brush keeps its previous heading
const MIN_HEADING_SPEED: f32 = 0.1;

/// Drift clock scale, radians per ms
const DRIFT_RATE: f64 = 0.00025;

/// Where the brush is and where it is heading, in canvas-local CSS pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub target: Point,
    pub current: Point,
    pub previous: Point,
    /// Host time of the last pointer move, ms
    pub last_move_ms: f64,
    /// Heading in radians
    pub last_angle: f32,
    /// Position in the palette cycle, in palette entries
    pub color_phase: f32,
}

/// Per-frame motion of the brush
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub position: Point,
    pub velocity: Vec2,
    /// Distance covered this frame, px
    pub speed: f32,
    pub angle: f32,
}

impl Motion {
    /// Speed mapped to 0..1, saturating at 60 px per frame
    pub fn speed_norm(&self) -> f32 {
        (self.speed / 60.0).min(1.0)
    }
}

impl PointerState {
    /// Brush at rest at the priming point of a canvas of `size`
    pub fn primed(size: Size, now_ms: f64) -> Self {
        let start = prime_point(size);
        Self {
            target: start,
            current: start,
            previous: start,
            last_move_ms: now_ms,
            last_angle: 0.0,
            color_phase: 0.0,
        }
    }

    /// New pointer position, which also resets the idle timer
    pub fn set_target(&mut self, target: Point, now_ms: f64) {
        self.target = target;
        self.last_move_ms = now_ms;
    }

    pub fn idle_for(&self, now_ms: f64) -> f64 {
        now_ms - self.last_move_ms
    }

    /// Ease `current` towards the target
    pub fn smooth(&mut self, factor: f32) {
        self.current = self.current.lerp(self.target, factor);
    }

    /// Measure the step since the previous frame and remember where we are
    pub fn advance(&mut self) -> Motion {
        let velocity = self.current.delta_from(self.previous);
        let speed = velocity.length();
        self.previous = self.current;
        if speed > MIN_HEADING_SPEED {
            self.last_angle = velocity.angle();
        }
        Motion {
            position: self.current,
            velocity,
            speed,
            angle: self.last_angle,
        }
    }
}

/// Where the brush starts on a canvas: centred, a third of the way down
pub fn prime_point(size: Size) -> Point {
    Point::new(size.width / 2.0, size.height / 3.0)
}

/// Autonomous target used while the pointer is idle
///
/// A slow Lissajous path around (50%, 45%) of the canvas.
pub fn drift_target(size: Size, now_ms: f64, radius_x: f32, radius_y: f32) -> Point {
    let t = now_ms * DRIFT_RATE;
    Point::new(
        size.width * (0.5 + t.cos() as f32 * radius_x),
        size.height * (0.45 + (t * 1.3).sin() as f32 * radius_y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothing_step() {
        let mut state = PointerState::primed(Size::new(300.0, 150.0), 0.0);
        assert_eq!(state.current, Point::new(150.0, 50.0));

        state.set_target(Point::new(150.0, 75.0), 10.0);
        state.smooth(0.06);
        assert!((state.current.y - 51.5).abs() < 1e-4);

        let motion = state.advance();
        assert!((motion.speed - 1.5).abs() < 1e-4);
        assert!((motion.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        assert_eq!(state.previous, state.current);
    }

    #[test]
    fn test_heading_kept_when_slow() {
        let mut state = PointerState::primed(Size::new(300.0, 150.0), 0.0);
        state.last_angle = 1.0;
        state.current.x += 0.05;
        let motion = state.advance();
        assert_eq!(motion.angle, 1.0);
        assert!(motion.speed_norm() < 0.01);
    }

    #[test]
    fn test_drift_stays_in_band() {
        let size = Size::new(800.0, 400.0);
        for step in 0..200 {
            let p = drift_target(size, step as f64 * 997.0, 0.18, 0.14);
            assert!(p.x >= 800.0 * 0.32 - 1e-3 && p.x <= 800.0 * 0.68 + 1e-3);
            assert!(p.y >= 400.0 * 0.31 - 1e-3 && p.y <= 400.0 * 0.59 + 1e-3);
        }
    }
}
