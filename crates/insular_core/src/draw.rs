//! Draw context
//!
//! A canvas-shaped drawing API. Renderers talk to [`DrawContext`]; the
//! [`RecordingContext`] captures every call as a [`DrawCommand`] so a backend
//! can replay the frame later (or a test can inspect it).

use smallvec::{smallvec, SmallVec};

use crate::geometry::{Affine2D, Color, Point, Rect, Size};

// ─────────────────────────────────────────────────────────────────────────────
// Transforms
// ─────────────────────────────────────────────────────────────────────────────

/// A 2D transform pushed onto the draw context's transform stack
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform(pub Affine2D);

impl Transform {
    pub fn identity() -> Self {
        Transform(Affine2D::IDENTITY)
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Transform(Affine2D::translation(x, y))
    }

    /// Scale around the origin (0, 0)
    pub fn scale(sx: f32, sy: f32) -> Self {
        Transform(Affine2D::scale(sx, sy))
    }

    /// Rotate around the origin (0, 0), angle in radians
    pub fn rotate(angle: f32) -> Self {
        Transform(Affine2D::rotation(angle))
    }

    /// `translate(origin) * rotate(angle) * scale(sx, sy)`, the usual
    /// "stamp an oriented blob here" transform
    pub fn oriented(origin: Point, angle: f32, sx: f32, sy: f32) -> Self {
        Transform(
            Affine2D::translation(origin.x, origin.y)
                .then(&Affine2D::rotation(angle))
                .then(&Affine2D::scale(sx, sy)),
        )
    }

    /// Combine: the result applies `other` first, then `self`
    pub fn then(&self, other: &Transform) -> Transform {
        Transform(self.0.then(&other.0))
    }

    pub fn apply(&self, point: Point) -> Point {
        self.0.transform_point(point)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Brushes
// ─────────────────────────────────────────────────────────────────────────────

/// Gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient (0.0 to 1.0)
    pub offset: f32,
    /// Color at this stop
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

/// Gradient fill
#[derive(Clone, Debug, PartialEq)]
pub enum Gradient {
    Radial {
        center: Point,
        radius: f32,
        stops: SmallVec<[GradientStop; 2]>,
    },
}

impl Gradient {
    pub fn radial(center: Point, radius: f32, from: Color, to: Color) -> Self {
        Gradient::Radial {
            center,
            radius,
            stops: smallvec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
        }
    }

    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Gradient::Radial { stops, .. } => stops,
        }
    }
}

/// Brush for filling shapes
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    Solid(Color),
    Gradient(Gradient),
}

impl Brush {
    /// Highest alpha reached anywhere in the brush
    pub fn max_alpha(&self) -> f32 {
        match self {
            Brush::Solid(c) => c.a,
            Brush::Gradient(g) => g.stops().iter().fold(0.0f32, |a, s| a.max(s.color.a)),
        }
    }
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

impl From<Gradient> for Brush {
    fn from(gradient: Gradient) -> Self {
        Brush::Gradient(gradient)
    }
}

/// Composition mode for subsequent draws
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Source-over
    #[default]
    Normal,
    /// Additive ("lighter")
    Plus,
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// Canvas-shaped drawing interface
pub trait DrawContext {
    /// Push a transform onto the stack (combined with the current one)
    fn push_transform(&mut self, transform: Transform);

    /// Pop the top transform from the stack
    fn pop_transform(&mut self);

    /// Get the current combined transform
    fn current_transform(&self) -> Transform;

    /// Push an opacity value (multiplied with parent)
    fn push_opacity(&mut self, opacity: f32);

    fn pop_opacity(&mut self);

    /// Push a blend mode
    fn push_blend_mode(&mut self, mode: BlendMode);

    fn pop_blend_mode(&mut self);

    fn fill_rect(&mut self, rect: Rect, brush: Brush);

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush);

    fn viewport_size(&self) -> Size;

    fn current_opacity(&self) -> f32;

    fn current_blend_mode(&self) -> BlendMode;
}

/// Ergonomic generic helpers on top of [`DrawContext`]
pub trait DrawContextExt: DrawContext {
    /// Run `f` with `transform` pushed, popping it afterwards
    fn with_transform<R>(&mut self, transform: Transform, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push_transform(transform);
        let out = f(self);
        self.pop_transform();
        out
    }

    /// Run `f` with `mode` pushed, popping it afterwards
    fn with_blend_mode<R>(&mut self, mode: BlendMode, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push_blend_mode(mode);
        let out = f(self);
        self.pop_blend_mode();
        out
    }
}

impl<T: DrawContext + ?Sized> DrawContextExt for T {}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    PushTransform(Transform),
    PopTransform,
    PushOpacity(f32),
    PopOpacity,
    PushBlendMode(BlendMode),
    PopBlendMode,
    FillRect {
        rect: Rect,
        brush: Brush,
    },
    FillCircle {
        center: Point,
        radius: f32,
        brush: Brush,
    },
}

/// A [`DrawContext`] that records commands
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    transform_stack: Vec<Transform>,
    opacity_stack: Vec<f32>,
    blend_mode_stack: Vec<BlendMode>,
    viewport: Size,
}

impl RecordingContext {
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            transform_stack: vec![Transform::identity()],
            opacity_stack: vec![1.0],
            blend_mode_stack: vec![BlendMode::Normal],
            viewport,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Clear all recorded commands and reset the state stacks
    pub fn clear(&mut self) {
        self.commands.clear();
        self.transform_stack = vec![Transform::identity()];
        self.opacity_stack = vec![1.0];
        self.blend_mode_stack = vec![BlendMode::Normal];
    }
}

impl DrawContext for RecordingContext {
    fn push_transform(&mut self, transform: Transform) {
        self.commands.push(DrawCommand::PushTransform(transform));
        let combined = self.current_transform().then(&transform);
        self.transform_stack.push(combined);
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
        }
    }

    fn current_transform(&self) -> Transform {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.commands.push(DrawCommand::PushOpacity(opacity));
        let current = self.current_opacity();
        self.opacity_stack.push(current * opacity);
    }

    fn pop_opacity(&mut self) {
        self.commands.push(DrawCommand::PopOpacity);
        if self.opacity_stack.len() > 1 {
            self.opacity_stack.pop();
        }
    }

    fn push_blend_mode(&mut self, mode: BlendMode) {
        self.commands.push(DrawCommand::PushBlendMode(mode));
        self.blend_mode_stack.push(mode);
    }

    fn pop_blend_mode(&mut self) {
        self.commands.push(DrawCommand::PopBlendMode);
        if self.blend_mode_stack.len() > 1 {
            self.blend_mode_stack.pop();
        }
    }

    fn fill_rect(&mut self, rect: Rect, brush: Brush) {
        self.commands.push(DrawCommand::FillRect { rect, brush });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            brush,
        });
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn current_opacity(&self) -> f32 {
        self.opacity_stack.last().copied().unwrap_or(1.0)
    }

    fn current_blend_mode(&self) -> BlendMode {
        self.blend_mode_stack.last().copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_stack_combines() {
        let mut ctx = RecordingContext::new(Size::new(100.0, 100.0));
        ctx.push_transform(Transform::translate(10.0, 10.0));
        ctx.push_transform(Transform::scale(2.0, 2.0));
        let p = ctx.current_transform().apply(Point::new(1.0, 1.0));
        assert_eq!(p, Point::new(12.0, 12.0));
        ctx.pop_transform();
        ctx.pop_transform();
        assert_eq!(ctx.current_transform(), Transform::identity());
    }

    #[test]
    fn test_with_transform_restores_stack() {
        let mut ctx = RecordingContext::new(Size::new(100.0, 100.0));
        let inside = ctx.with_transform(Transform::scale(2.0, 2.0), |ctx| {
            ctx.current_transform().apply(Point::new(3.0, 4.0))
        });
        assert_eq!(inside, Point::new(6.0, 8.0));
        assert_eq!(ctx.current_transform(), Transform::identity());
    }

    #[test]
    fn test_blend_mode_stack_never_underflows() {
        let mut ctx = RecordingContext::new(Size::ZERO);
        ctx.pop_blend_mode();
        assert_eq!(ctx.current_blend_mode(), BlendMode::Normal);
        ctx.with_blend_mode(BlendMode::Plus, |ctx| {
            assert_eq!(ctx.current_blend_mode(), BlendMode::Plus);
        });
        assert_eq!(ctx.current_blend_mode(), BlendMode::Normal);
    }

    #[test]
    fn test_brush_max_alpha() {
        let g = Gradient::radial(
            Point::ZERO,
            10.0,
            Color::WHITE.with_alpha(0.2),
            Color::WHITE.with_alpha(0.0),
        );
        assert!((Brush::from(g).max_alpha() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_oriented_transform() {
        let t = Transform::oriented(Point::new(50.0, 50.0), 0.0, 2.0, 0.5);
        assert_eq!(t.apply(Point::new(10.0, 10.0)), Point::new(70.0, 55.0));
    }
}
