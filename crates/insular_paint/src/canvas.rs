//! Drawing surfaces

use std::rc::Weak;

use insular_core::{DrawCommand, Rect, Size};
use tracing::trace;

use crate::context::PaintContext;

/// Whatever currently draws to a [`Canvas`]
pub trait SurfaceOwner {
    /// Stop drawing to the surface. Returns `true` if the owner was live.
    fn release(&self) -> bool;
}

/// A drawing surface owned by one renderer
///
/// Mirrors an HTML canvas element: it has a layout box in viewport
/// coordinates, a backing store measured in device pixels, and a 2D context
/// that may be missing when the environment cannot draw.
pub trait Canvas {
    /// Layout box in viewport (client) coordinates, CSS pixels
    fn client_rect(&self) -> Rect;

    /// Resize the backing store (device pixels)
    fn set_backing_size(&mut self, width: u32, height: u32);

    fn backing_size(&self) -> (u32, u32);

    /// The 2D context, `None` when the surface cannot be drawn to
    fn context(&mut self) -> Option<&mut PaintContext>;

    /// Hand the commands recorded since the last present to the compositor
    fn present(&mut self);

    /// Record `owner` as the renderer drawing here, returning the previous one
    fn claim(&mut self, owner: Weak<dyn SurfaceOwner>) -> Option<Weak<dyn SurfaceOwner>>;
}

/// In-memory canvas that keeps the last presented frame
pub struct RecordingCanvas {
    rect: Rect,
    backing: (u32, u32),
    context: Option<PaintContext>,
    last_frame: Vec<DrawCommand>,
    frames_presented: u64,
    owner: Option<Weak<dyn SurfaceOwner>>,
}

impl RecordingCanvas {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            backing: (rect.width().max(0.0) as u32, rect.height().max(0.0) as u32),
            context: Some(PaintContext::from_size(rect.size)),
            last_frame: Vec::new(),
            frames_presented: 0,
            owner: None,
        }
    }

    /// A canvas whose environment provides no 2D context
    pub fn unsupported(rect: Rect) -> Self {
        Self {
            context: None,
            ..Self::new(rect)
        }
    }

    /// Move or resize the layout box (the backing store is left alone until
    /// the owner resizes it)
    pub fn set_client_rect(&mut self, rect: Rect) {
        self.rect = rect;
        if let Some(ctx) = self.context.as_mut() {
            ctx.set_viewport(rect.size);
        }
    }

    /// Commands of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn css_size(&self) -> Size {
        self.rect.size
    }
}

impl Canvas for RecordingCanvas {
    fn client_rect(&self) -> Rect {
        self.rect
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn context(&mut self) -> Option<&mut PaintContext> {
        self.context.as_mut()
    }

    fn present(&mut self) {
        let Some(ctx) = self.context.as_mut() else {
            return;
        };
        self.last_frame = ctx.take_commands();
        ctx.reset();
        self.frames_presented += 1;
        trace!(
            "RecordingCanvas: presented frame {} ({} commands)",
            self.frames_presented,
            self.last_frame.len()
        );
    }

    fn claim(&mut self, owner: Weak<dyn SurfaceOwner>) -> Option<Weak<dyn SurfaceOwner>> {
        self.owner.replace(owner)
    }
}
