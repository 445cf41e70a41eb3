//! Frame host abstraction

use std::rc::Rc;

use slotmap::new_key_type;

use crate::environment::Environment;
use crate::event::{Event, EventKind};

new_key_type! {
    /// Handle to a scheduled frame callback
    pub struct FrameId;
    /// Handle to a pending timer
    pub struct TimerId;
    /// Handle to an attached event listener
    pub struct ListenerId;
}

/// Per-frame callback, receives the host clock in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// One-shot timer callback
pub type TimerCallback = Box<dyn FnOnce()>;

/// Event listener, shared so the host can call it without holding its own
/// borrow
pub type Listener = Rc<dyn Fn(&Event)>;

/// Single-threaded host services
///
/// All methods take `&self`: callbacks run re-entrantly (a frame callback
/// schedules the next frame, a listener arms a timer), so implementations
/// keep their queues behind interior mutability and never hold a borrow
/// while invoking a callback.
///
/// Cancelling or removing an unknown or already-consumed id is a no-op.
pub trait FrameHost {
    /// Host clock in milliseconds
    fn now_ms(&self) -> f64;

    /// Schedule `callback` to run on the next frame
    fn request_frame(&self, callback: FrameCallback) -> FrameId;

    fn cancel_frame(&self, id: FrameId);

    /// Run `callback` once after `delay_ms`
    fn set_timeout(&self, delay_ms: f64, callback: TimerCallback) -> TimerId;

    fn clear_timeout(&self, id: TimerId);

    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId;

    fn remove_listener(&self, id: ListenerId);

    fn environment(&self) -> Environment;
}
