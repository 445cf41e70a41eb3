//! Paint context - Canvas-like drawing API implementing DrawContext
//!
//! PaintContext provides a 2D-focused drawing API similar to HTML Canvas,
//! while implementing the DrawContext trait so generic renderers can use it.

use insular_core::{
    BlendMode, Brush, DrawCommand, DrawContext, Point, Rect, RecordingContext, Size, Transform,
};

/// The paint context used for custom 2D drawing
///
/// PaintContext wraps a RecordingContext to record draw commands,
/// while providing a Canvas-like API for convenience.
pub struct PaintContext {
    recording: RecordingContext,
}

impl PaintContext {
    /// Create a new paint context with the given viewport size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            recording: RecordingContext::new(Size::new(width, height)),
        }
    }

    /// Create from a Size
    pub fn from_size(size: Size) -> Self {
        Self {
            recording: RecordingContext::new(size),
        }
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        self.recording.commands()
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        self.recording.take_commands()
    }

    /// Drop pending commands and reset transform, opacity and blend state
    pub fn reset(&mut self) {
        self.recording.clear();
    }

    pub fn set_viewport(&mut self, size: Size) {
        self.recording.set_viewport(size);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Canvas-like convenience API
    // ═══════════════════════════════════════════════════════════════════════════

    /// Fill a rectangle at (x, y) with width/height and a brush
    pub fn fill_rect_xywh(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        brush: impl Into<Brush>,
    ) {
        self.fill_rect(Rect::new(x, y, width, height), brush.into());
    }

    /// Fill a circle at (cx, cy) with radius
    pub fn fill_circle_xyr(&mut self, cx: f32, cy: f32, radius: f32, brush: impl Into<Brush>) {
        self.fill_circle(Point::new(cx, cy), radius, brush.into());
    }

    /// Fill a circle of `radius` stamped at `center`, rotated by `angle` and
    /// squashed by `(sx, sy)` in its own frame
    ///
    /// Brushes are expressed in the blob's local frame, so a radial gradient
    /// should be centred on the origin.
    pub fn fill_oriented_circle(
        &mut self,
        center: Point,
        angle: f32,
        sx: f32,
        sy: f32,
        radius: f32,
        brush: impl Into<Brush>,
    ) {
        self.push_transform(Transform::oriented(center, angle, sx, sy));
        self.fill_circle(Point::ZERO, radius, brush.into());
        self.pop_transform();
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Transform convenience methods
    // ═══════════════════════════════════════════════════════════════════════════

    /// Push a translation transform
    pub fn translate(&mut self, x: f32, y: f32) {
        self.push_transform(Transform::translate(x, y));
    }

    /// Push a scale transform
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.push_transform(Transform::scale(sx, sy));
    }

    /// Push a rotation transform (angle in radians)
    pub fn rotate(&mut self, angle: f32) {
        self.push_transform(Transform::rotate(angle));
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DrawContext Implementation - delegates to RecordingContext
// ═══════════════════════════════════════════════════════════════════════════════

impl DrawContext for PaintContext {
    fn push_transform(&mut self, transform: Transform) {
        self.recording.push_transform(transform);
    }

    fn pop_transform(&mut self) {
        self.recording.pop_transform();
    }

    fn current_transform(&self) -> Transform {
        self.recording.current_transform()
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.recording.push_opacity(opacity);
    }

    fn pop_opacity(&mut self) {
        self.recording.pop_opacity();
    }

    fn push_blend_mode(&mut self, mode: BlendMode) {
        self.recording.push_blend_mode(mode);
    }

    fn pop_blend_mode(&mut self) {
        self.recording.pop_blend_mode();
    }

    fn fill_rect(&mut self, rect: Rect, brush: Brush) {
        self.recording.fill_rect(rect, brush);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush) {
        self.recording.fill_circle(center, radius, brush);
    }

    fn viewport_size(&self) -> Size {
        self.recording.viewport_size()
    }

    fn current_opacity(&self) -> f32 {
        self.recording.current_opacity()
    }

    fn current_blend_mode(&self) -> BlendMode {
        self.recording.current_blend_mode()
    }
}
