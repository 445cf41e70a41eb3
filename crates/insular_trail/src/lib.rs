//! Insular Trail
//!
//! A pointer-following fluid brush painted on a canvas every frame. The
//! brush eases towards the pointer, cycles through the brand palette faster
//! the quicker it moves, stretches along its heading and leaves a fading
//! trail. When the pointer rests it drifts on its own; while the page
//! scrolls it fades faster and keeps a shorter trail.
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use insular_paint::{RecordingCanvas, Rect};
//! use insular_platform::{Event, HeadlessHost};
//! use insular_trail::{FluidTrail, TrailConfig};
//!
//! let host = Rc::new(HeadlessHost::new());
//! let canvas = Rc::new(RefCell::new(RecordingCanvas::new(Rect::new(0.0, 0.0, 300.0, 150.0))));
//! let trail = FluidTrail::mount(host.clone(), canvas, None, TrailConfig::default());
//!
//! host.dispatch(Event::pointer_moved(150.0, 75.0));
//! host.run_frame();
//! assert!((trail.snapshot().pointer.current.y - 51.5).abs() < 1e-3);
//!
//! trail.unmount();
//! assert_eq!(host.pending_frames(), 0);
//! ```

pub mod brush;
pub mod buffer;
pub mod color;
pub mod config;
pub mod particles;
pub mod pointer;
pub mod renderer;

pub use buffer::{TrailBuffer, TrailNode};
pub use config::TrailConfig;
pub use particles::{Particle, ParticleField};
pub use pointer::{Motion, PointerState};
pub use renderer::{FluidTrail, TrailSnapshot};
