//! Frame inspection
//!
//! Replays a recorded command list and resolves each fill to world space,
//! so callers can ask where something was drawn without re-implementing the
//! transform stack.

use insular_core::{BlendMode, Brush, DrawCommand, Point, Rect, Transform};

/// Shape of a resolved fill, in its local frame
#[derive(Clone, Debug, PartialEq)]
pub enum FillShape {
    Rect(Rect),
    Circle { center: Point, radius: f32 },
}

/// A fill with the state that was current when it was recorded
#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
    pub shape: FillShape,
    pub brush: Brush,
    pub transform: Transform,
    pub blend_mode: BlendMode,
    pub opacity: f32,
}

impl Fill {
    /// Centre of the shape after the transform stack is applied
    pub fn world_center(&self) -> Point {
        let local = match &self.shape {
            FillShape::Rect(rect) => rect.center(),
            FillShape::Circle { center, .. } => *center,
        };
        self.transform.apply(local)
    }

    /// Peak alpha the fill can contribute
    pub fn max_alpha(&self) -> f32 {
        self.brush.max_alpha() * self.opacity
    }

    pub fn is_circle(&self) -> bool {
        matches!(self.shape, FillShape::Circle { .. })
    }
}

/// Resolve every fill in `commands`
pub fn flatten(commands: &[DrawCommand]) -> Vec<Fill> {
    let mut transforms = vec![Transform::identity()];
    let mut opacities = vec![1.0f32];
    let mut blends = vec![BlendMode::Normal];
    let mut fills = Vec::new();

    for command in commands {
        match command {
            DrawCommand::PushTransform(t) => {
                let top = transforms.last().copied().unwrap_or_default();
                transforms.push(top.then(t));
            }
            DrawCommand::PopTransform => {
                if transforms.len() > 1 {
                    transforms.pop();
                }
            }
            DrawCommand::PushOpacity(o) => {
                let top = opacities.last().copied().unwrap_or(1.0);
                opacities.push(top * o);
            }
            DrawCommand::PopOpacity => {
                if opacities.len() > 1 {
                    opacities.pop();
                }
            }
            DrawCommand::PushBlendMode(mode) => blends.push(*mode),
            DrawCommand::PopBlendMode => {
                if blends.len() > 1 {
                    blends.pop();
                }
            }
            DrawCommand::FillRect { rect, brush } => fills.push(Fill {
                shape: FillShape::Rect(*rect),
                brush: brush.clone(),
                transform: transforms.last().copied().unwrap_or_default(),
                blend_mode: blends.last().copied().unwrap_or_default(),
                opacity: opacities.last().copied().unwrap_or(1.0),
            }),
            DrawCommand::FillCircle {
                center,
                radius,
                brush,
            } => fills.push(Fill {
                shape: FillShape::Circle {
                    center: *center,
                    radius: *radius,
                },
                brush: brush.clone(),
                transform: transforms.last().copied().unwrap_or_default(),
                blend_mode: blends.last().copied().unwrap_or_default(),
                opacity: opacities.last().copied().unwrap_or(1.0),
            }),
        }
    }

    fills
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PaintContext;
    use insular_core::{Color, DrawContext};

    #[test]
    fn test_flatten_resolves_transforms_and_blend() {
        let mut ctx = PaintContext::new(300.0, 150.0);
        ctx.scale(2.0, 2.0);
        ctx.fill_rect_xywh(0.0, 0.0, 300.0, 150.0, Color::BLACK.with_alpha(0.012));
        ctx.push_blend_mode(BlendMode::Plus);
        ctx.fill_oriented_circle(Point::new(150.0, 50.0), 0.0, 1.0, 1.0, 4.0, Color::WHITE);
        ctx.pop_blend_mode();
        ctx.pop_transform();

        let fills = flatten(ctx.commands());
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].blend_mode, BlendMode::Normal);
        assert_eq!(fills[0].world_center(), Point::new(300.0, 150.0));

        let blob = &fills[1];
        assert!(blob.is_circle());
        assert_eq!(blob.blend_mode, BlendMode::Plus);
        assert_eq!(blob.world_center(), Point::new(300.0, 100.0));
        assert_eq!(blob.max_alpha(), 1.0);
    }
}
