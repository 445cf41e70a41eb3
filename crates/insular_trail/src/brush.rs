//! Brush stamps
//!
//! Every stamp is a circle in its own frame, rotated onto the heading and
//! stretched along it, so fast strokes read as streaks.

use insular_core::{Color, Point};
use insular_paint::gradient::radial_glow;
use insular_paint::PaintContext;

use crate::buffer::TrailBuffer;
use crate::pointer::Motion;

/// Brush stretch `(along, across)` for a normalised speed
pub fn stretch(speed_norm: f32) -> (f32, f32) {
    (1.0 + speed_norm * 0.9, 1.0 - speed_norm * 0.85)
}

/// Bloom radius of the brush on a canvas whose longer side is `extent`
pub fn bloom_radius(extent: f32, speed_norm: f32) -> f32 {
    extent * 0.14 * (1.0 - speed_norm * 0.45)
}

/// Dim core tint plus the radial bloom around it
pub fn draw_brush(ctx: &mut PaintContext, motion: &Motion, color: Color, extent: f32) {
    let sn = motion.speed_norm();
    let (sx, sy) = stretch(sn);
    let r1 = bloom_radius(extent, sn);

    let core_alpha = 0.05 + 0.18 * sn;
    ctx.fill_oriented_circle(
        motion.position,
        motion.angle,
        sx,
        sy,
        r1 * 0.18,
        color.with_alpha(core_alpha),
    );

    let bloom_alpha = 0.08 + 0.14 * sn;
    ctx.fill_oriented_circle(
        motion.position,
        motion.angle,
        sx,
        sy,
        r1 * 1.1,
        radial_glow(Point::ZERO, r1, color, bloom_alpha),
    );
}

/// Radius, peak alpha and stretch of a trail stamp of `age` (1 = oldest)
pub fn trail_stamp(extent: f32, age: f32, speed_norm: f32) -> (f32, f32, f32, f32) {
    let freshness = 1.0 - age;
    let radius = extent * 0.11 * (0.3 + age * 0.8);
    let alpha = 0.16 * freshness.powf(1.4);
    let sx = 1.0 + speed_norm * 0.7 * (0.25 + age);
    let sy = 1.0 - speed_norm * 0.75 * (0.25 + age);
    (radius, alpha, sx, sy)
}

/// Stamp every trail sample, oldest first
pub fn draw_trail(ctx: &mut PaintContext, trail: &TrailBuffer, extent: f32) {
    for (age, node) in trail.aged() {
        let (radius, alpha, sx, sy) = trail_stamp(extent, age, node.speed_norm);
        ctx.fill_oriented_circle(
            node.position,
            node.angle,
            sx,
            sy,
            radius,
            radial_glow(Point::ZERO, radius, node.color, alpha * 0.5),
        );
    }
}

/// Centre of the secondary glow, trailing the brush against its heading
pub fn secondary_glow_center(motion: &Motion) -> Point {
    let offset = 18.0 + motion.speed_norm() * 30.0;
    Point::new(
        motion.position.x - motion.angle.cos() * offset + 8.0,
        motion.position.y - motion.angle.sin() * offset - 8.0,
    )
}

pub fn draw_secondary_glow(ctx: &mut PaintContext, motion: &Motion, color: Color, extent: f32) {
    let sn = motion.speed_norm();
    let r2 = extent * 0.1;
    ctx.fill_oriented_circle(
        secondary_glow_center(motion),
        motion.angle,
        1.0 + sn * 0.3,
        1.0 - sn * 0.4,
        r2 * 1.1,
        radial_glow(Point::ZERO, r2, color, 0.22),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use insular_core::Vec2;
    use insular_paint::flatten;

    fn still_at(x: f32, y: f32) -> Motion {
        Motion {
            position: Point::new(x, y),
            velocity: Vec2::ZERO,
            speed: 0.0,
            angle: 0.0,
        }
    }

    #[test]
    fn test_brush_at_rest() {
        let mut ctx = PaintContext::new(300.0, 150.0);
        draw_brush(&mut ctx, &still_at(150.0, 50.0), Color::WHITE, 300.0);

        let fills = flatten(ctx.commands());
        assert_eq!(fills.len(), 2);
        assert!((fills[0].max_alpha() - 0.05).abs() < 1e-6);
        assert!((fills[1].max_alpha() - 0.08).abs() < 1e-6);
        for fill in &fills {
            assert_eq!(fill.world_center(), Point::new(150.0, 50.0));
        }
    }

    #[test]
    fn test_fast_stroke_shrinks_and_stretches() {
        assert_eq!(stretch(0.0), (1.0, 1.0));
        let (sx, sy) = stretch(1.0);
        assert!((sx - 1.9).abs() < 1e-6);
        assert!((sy - 0.15).abs() < 1e-6);
        assert!((bloom_radius(1000.0, 1.0) - 77.0).abs() < 1e-3);
    }

    #[test]
    fn test_trail_stamp_by_age() {
        let (newest_r, newest_a, _, _) = trail_stamp(100.0, 0.0, 0.0);
        let (oldest_r, oldest_a, _, _) = trail_stamp(100.0, 1.0, 0.0);
        assert!((newest_r - 3.3).abs() < 1e-4);
        assert!((oldest_r - 12.1).abs() < 1e-4);
        assert!((newest_a - 0.16).abs() < 1e-6);
        assert_eq!(oldest_a, 0.0);
    }

    #[test]
    fn test_glow_trails_heading() {
        let mut motion = still_at(100.0, 100.0);
        motion.angle = 0.0;
        let center = secondary_glow_center(&motion);
        assert!((center.x - 90.0).abs() < 1e-4);
        assert!((center.y - 92.0).abs() < 1e-4);
    }
}
