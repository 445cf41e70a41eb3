//! In-process host with a manual clock
//!
//! Nothing happens until the owner drives it: [`HeadlessHost::run_frame`]
//! advances the clock by one frame interval, fires due timers and then runs
//! the frame callbacks that were queued before the frame started.

use std::cell::{Cell, RefCell};

use slotmap::SlotMap;
use tracing::trace;

use crate::environment::Environment;
use crate::event::{Event, EventKind, WindowEvent};
use crate::host::{
    FrameCallback, FrameHost, FrameId, Listener, ListenerId, TimerCallback, TimerId,
};

/// Nominal 60Hz frame interval
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

struct Timer {
    due_ms: f64,
    callback: TimerCallback,
}

struct Registered {
    kind: EventKind,
    listener: Listener,
}

/// Headless [`FrameHost`]
pub struct HeadlessHost {
    now_ms: Cell<f64>,
    frame_interval_ms: Cell<f64>,
    frames: RefCell<SlotMap<FrameId, FrameCallback>>,
    timers: RefCell<SlotMap<TimerId, Timer>>,
    listeners: RefCell<SlotMap<ListenerId, Registered>>,
    environment: Cell<Environment>,
    frames_run: Cell<u64>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::with_environment(Environment::default())
    }

    pub fn with_environment(environment: Environment) -> Self {
        Self {
            now_ms: Cell::new(0.0),
            frame_interval_ms: Cell::new(FRAME_INTERVAL_MS),
            frames: RefCell::new(SlotMap::with_key()),
            timers: RefCell::new(SlotMap::with_key()),
            listeners: RefCell::new(SlotMap::with_key()),
            environment: Cell::new(environment),
            frames_run: Cell::new(0),
        }
    }

    pub fn set_frame_interval(&self, interval_ms: f64) {
        self.frame_interval_ms.set(interval_ms.max(0.0));
    }

    pub fn set_environment(&self, environment: Environment) {
        self.environment.set(environment);
    }

    pub fn set_reduced_motion(&self, reduced: bool) {
        let mut env = self.environment.get();
        env.reduced_motion = reduced;
        self.environment.set(env);
    }

    /// Advance the clock by one frame and run it
    ///
    /// Returns the number of frame callbacks invoked.
    pub fn run_frame(&self) -> usize {
        self.advance(self.frame_interval_ms.get());
        self.frames_run.set(self.frames_run.get() + 1);

        // Callbacks queued while this frame runs belong to the next one
        let queued: Vec<FrameCallback> = {
            let mut frames = self.frames.borrow_mut();
            let ids: Vec<FrameId> = frames.keys().collect();
            ids.into_iter().filter_map(|id| frames.remove(id)).collect()
        };
        let count = queued.len();
        let now = self.now_ms.get();
        for callback in queued {
            callback(now);
        }
        trace!("HeadlessHost: frame at {:.1}ms ran {} callbacks", now, count);
        count
    }

    /// Run `n` frames back to back
    pub fn run_frames(&self, n: usize) {
        for _ in 0..n {
            self.run_frame();
        }
    }

    /// Move the clock forward without running frames, firing due timers
    pub fn advance(&self, ms: f64) {
        let target = self.now_ms.get() + ms.max(0.0);
        loop {
            let next = {
                let timers = self.timers.borrow();
                timers
                    .iter()
                    .filter(|(_, t)| t.due_ms <= target)
                    .min_by(|a, b| a.1.due_ms.total_cmp(&b.1.due_ms))
                    .map(|(id, _)| id)
            };
            let Some(id) = next else { break };
            let Some(timer) = self.timers.borrow_mut().remove(id) else {
                break;
            };
            if timer.due_ms > self.now_ms.get() {
                self.now_ms.set(timer.due_ms);
            }
            (timer.callback)();
        }
        self.now_ms.set(target);
    }

    /// Deliver an event to every listener of its kind
    ///
    /// Scroll and resize events also update the environment snapshot first,
    /// the way a browser updates `scrollY` before firing `scroll`.
    pub fn dispatch(&self, event: Event) {
        match &event {
            Event::Window(WindowEvent::Scrolled { scroll_y }) => {
                let mut env = self.environment.get();
                env.scroll_y = *scroll_y;
                self.environment.set(env);
            }
            Event::Window(WindowEvent::Resized(size)) => {
                let mut env = self.environment.get();
                env.viewport = *size;
                self.environment.set(env);
            }
            Event::Input(_) => {}
        }

        let kind = event.kind();
        let targets: Vec<Listener> = self
            .listeners
            .borrow()
            .values()
            .filter(|r| r.kind == kind)
            .map(|r| r.listener.clone())
            .collect();
        for listener in targets {
            listener(&event);
        }
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn timer_count(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn listener_count_for(&self, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .values()
            .filter(|r| r.kind == kind)
            .count()
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run.get()
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameHost for HeadlessHost {
    fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }

    fn request_frame(&self, callback: FrameCallback) -> FrameId {
        self.frames.borrow_mut().insert(callback)
    }

    fn cancel_frame(&self, id: FrameId) {
        self.frames.borrow_mut().remove(id);
    }

    fn set_timeout(&self, delay_ms: f64, callback: TimerCallback) -> TimerId {
        let due_ms = self.now_ms.get() + delay_ms.max(0.0);
        self.timers.borrow_mut().insert(Timer { due_ms, callback })
    }

    fn clear_timeout(&self, id: TimerId) {
        self.timers.borrow_mut().remove(id);
    }

    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId {
        self.listeners
            .borrow_mut()
            .insert(Registered { kind, listener })
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(id);
    }

    fn environment(&self) -> Environment {
        self.environment.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_frames_run_once() {
        let host = HeadlessHost::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        host.request_frame(Box::new(move |_: f64| h.set(h.get() + 1)));
        assert_eq!(host.run_frame(), 1);
        assert_eq!(host.run_frame(), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_cancel_frame() {
        let host = HeadlessHost::new();
        let id = host.request_frame(Box::new(|_: f64| panic!("cancelled frame ran")));
        host.cancel_frame(id);
        host.cancel_frame(id);
        assert_eq!(host.run_frame(), 0);
    }

    #[test]
    fn test_self_rescheduling_frame_runs_next_frame() {
        let host = Rc::new(HeadlessHost::new());
        let count = Rc::new(Cell::new(0));

        fn schedule(host: &Rc<HeadlessHost>, count: &Rc<Cell<u32>>) {
            let weak = Rc::downgrade(host);
            let count = count.clone();
            host.request_frame(Box::new(move |_: f64| {
                count.set(count.get() + 1);
                if let Some(host) = weak.upgrade() {
                    schedule(&host, &count);
                }
            }));
        }

        schedule(&host, &count);
        host.run_frames(3);
        assert_eq!(count.get(), 3);
        assert_eq!(host.pending_frames(), 1);
    }

    #[test]
    fn test_timers_fire_in_order() {
        let host = HeadlessHost::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = log.clone();
        let b = log.clone();
        host.set_timeout(150.0, Box::new(move || a.borrow_mut().push("late")));
        host.set_timeout(50.0, Box::new(move || b.borrow_mut().push("early")));
        host.advance(100.0);
        assert_eq!(*log.borrow(), vec!["early"]);
        host.advance(100.0);
        assert_eq!(*log.borrow(), vec!["early", "late"]);
        assert_eq!(host.timer_count(), 0);
    }

    #[test]
    fn test_dispatch_by_kind() {
        let host = HeadlessHost::new();
        let seen = Rc::new(Cell::new(0));
        let s = seen.clone();
        let id = host.add_listener(EventKind::Scroll, Rc::new(move |_: &Event| s.set(s.get() + 1)));

        host.dispatch(Event::pointer_moved(1.0, 1.0));
        host.dispatch(Event::scrolled(120.0));
        assert_eq!(seen.get(), 1);
        assert_eq!(host.environment().scroll_y, 120.0);

        host.remove_listener(id);
        host.dispatch(Event::scrolled(0.0));
        assert_eq!(seen.get(), 1);
        assert_eq!(host.listener_count(), 0);
    }
}
