//! Insular Paint/Canvas API
//!
//! A 2D drawing API shaped like the HTML canvas, recording into
//! [`insular_core::DrawCommand`]s.
//!
//! - [`PaintContext`]: canvas-style helpers (`translate`, `rotate`,
//!   `fill_rect_xywh`, oriented blobs) on top of the [`DrawContext`] trait
//! - [`Canvas`]: a drawing surface with a client rect, a backing store and an
//!   optional 2D context
//! - [`RecordingCanvas`]: an in-memory surface that keeps the last presented
//!   frame for inspection
//! - [`inspect`]: flattens recorded frames into world-space fills
//!
//! # Example
//!
//! ```rust
//! use insular_paint::{Canvas, Color, RecordingCanvas, Rect};
//!
//! let mut canvas = RecordingCanvas::new(Rect::new(0.0, 0.0, 300.0, 150.0));
//! if let Some(ctx) = canvas.context() {
//!     ctx.fill_rect_xywh(0.0, 0.0, 300.0, 150.0, Color::from_rgb8(16, 16, 33));
//! }
//! canvas.present();
//! assert_eq!(canvas.last_frame().len(), 1);
//! ```

pub mod canvas;
pub mod context;
pub mod gradient;
pub mod inspect;

// ─────────────────────────────────────────────────────────────────────────────
// Core type re-exports from insular_core
// ─────────────────────────────────────────────────────────────────────────────

pub use insular_core::{
    // Composition
    BlendMode,
    // Brushes and fills
    Brush,
    // Colors
    Color,
    // Draw context trait
    DrawCommand,
    DrawContext,
    DrawContextExt,
    // Gradients
    Gradient,
    GradientStop,
    // Geometry
    Point,
    Rect,
    Size,
    // Transforms
    Transform,
};

pub use canvas::{Canvas, RecordingCanvas, SurfaceOwner};
pub use context::PaintContext;
pub use inspect::{flatten, Fill, FillShape};
