//! Insular Core
//!
//! Foundational types shared by the motion crates:
//!
//! - **Geometry**: points, sizes, rects and 2D affine transforms
//! - **Colour**: RGBA colours with interpolation and CSS colour parsing
//! - **Draw Context**: a canvas-shaped drawing trait plus a recording
//!   implementation that captures commands for a backend (or a test) to replay
//!
//! # Example
//!
//! ```rust
//! use insular_core::{BlendMode, Brush, Color, DrawContext, Point, RecordingContext, Size};
//!
//! let mut ctx = RecordingContext::new(Size::new(300.0, 150.0));
//! ctx.push_blend_mode(BlendMode::Plus);
//! ctx.fill_circle(Point::new(150.0, 75.0), 20.0, Brush::Solid(Color::from_hex(0x422BE2)));
//! ctx.pop_blend_mode();
//! assert_eq!(ctx.commands().len(), 3);
//! ```

pub mod css;
pub mod draw;
pub mod geometry;

pub use css::{parse_color, parse_float_prefix};
pub use draw::{
    BlendMode, Brush, DrawCommand, DrawContext, DrawContextExt, Gradient, GradientStop,
    RecordingContext, Transform,
};
pub use geometry::{Affine2D, Color, Point, Rect, Size, Vec2};
