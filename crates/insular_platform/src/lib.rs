//! Insular Platform Abstraction Layer
//!
//! The motion crates never talk to a browser or window system directly.
//! They see the host through [`FrameHost`]:
//!
//! - per-frame callbacks (`request_frame` / `cancel_frame`)
//! - one-shot timers (`set_timeout` / `clear_timeout`)
//! - event listeners for pointer, scroll and resize input
//! - a read-only [`Environment`] (pixel ratio, viewport, reduced motion)
//!
//! [`HeadlessHost`] implements all of it in-process with a manual clock, which
//! is what the CLI and the test suites drive.
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use insular_platform::{FrameHost, HeadlessHost};
//!
//! let host = HeadlessHost::new();
//! let ran = Rc::new(Cell::new(false));
//! let flag = ran.clone();
//! host.request_frame(Box::new(move |_now: f64| flag.set(true)));
//! host.run_frame();
//! assert!(ran.get());
//! ```

mod environment;
mod error;
mod event;
mod headless;
mod host;

pub use environment::Environment;
pub use error::{PlatformError, Result};
pub use event::{Event, EventKind, InputEvent, PointerEvent, WindowEvent};
pub use headless::{HeadlessHost, FRAME_INTERVAL_MS};
pub use host::{FrameCallback, FrameHost, FrameId, Listener, ListenerId, TimerCallback, TimerId};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::environment::Environment;
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{Event, EventKind, InputEvent, PointerEvent, WindowEvent};
    pub use crate::headless::HeadlessHost;
    pub use crate::host::{FrameHost, FrameId, ListenerId, TimerId};
}
