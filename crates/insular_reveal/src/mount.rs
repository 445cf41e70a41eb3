//! Binding a dispatcher to a frame host
//!
//! [`RevealMount`] is the per-view lifecycle: it tears down whatever the
//! previous view left, schedules the scan shortly after mount so layout has
//! settled, forwards scroll, resize and pointer events, and ticks the
//! dispatcher every frame. Dropping or detaching it cancels all of that.
//!
//! A dispatcher is driven by one mount at a time: attaching it again
//! detaches the mount that was driving it.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use insular_platform::{
    Event, EventKind, FrameHost, FrameId, InputEvent, ListenerId, PointerEvent, TimerId,
    WindowEvent,
};
use tracing::{debug, trace};

use crate::dispatcher::RevealDispatcher;
use crate::dom::{Document, ElementId};

pub(crate) struct MountState {
    host: Rc<dyn FrameHost>,
    doc: Rc<RefCell<Document>>,
    dispatcher: Rc<RefCell<RevealDispatcher>>,
    alive: Cell<bool>,
    init_timer: Cell<Option<TimerId>>,
    frame: Cell<Option<FrameId>>,
    last_frame_ms: Cell<Option<f64>>,
    listeners: RefCell<Vec<ListenerId>>,
}

impl MountState {
    /// Run `f` with both the document and the dispatcher borrowed
    fn with_parts<R>(&self, f: impl FnOnce(&mut Document, &mut RevealDispatcher) -> R) -> Option<R> {
        let (Ok(mut doc), Ok(mut dispatcher)) =
            (self.doc.try_borrow_mut(), self.dispatcher.try_borrow_mut())
        else {
            trace!("RevealMount: document or dispatcher busy, skipping");
            return None;
        };
        Some(f(&mut doc, &mut dispatcher))
    }

    fn sync_environment(&self) {
        let env = self.host.environment();
        self.with_parts(|doc, dispatcher| {
            doc.set_viewport(env.viewport);
            doc.set_scroll_y(env.scroll_y);
            dispatcher.set_reduced_motion(env.reduced_motion);
        });
    }
}

/// A dispatcher attached to a host for the lifetime of one view
pub struct RevealMount {
    shared: Rc<MountState>,
}

impl RevealMount {
    /// Tear down the previous view and schedule the scan of `root`
    pub fn attach(
        host: Rc<dyn FrameHost>,
        doc: Rc<RefCell<Document>>,
        dispatcher: Rc<RefCell<RevealDispatcher>>,
        root: ElementId,
    ) -> Self {
        let shared = Rc::new(MountState {
            host,
            doc,
            dispatcher,
            alive: Cell::new(true),
            init_timer: Cell::new(None),
            frame: Cell::new(None),
            last_frame_ms: Cell::new(None),
            listeners: RefCell::new(Vec::new()),
        });

        let previous = shared
            .dispatcher
            .borrow_mut()
            .replace_mount(Rc::downgrade(&shared));
        if previous
            .and_then(|previous| previous.upgrade())
            .is_some_and(|previous| release(&previous))
        {
            debug!("RevealMount: detached the previous mount of this dispatcher");
        }

        shared.with_parts(|doc, dispatcher| dispatcher.cleanup(doc));
        schedule_init(&shared, root);
        add_listeners(&shared);
        request_tick(&shared);
        debug!("RevealMount: attached");
        Self { shared }
    }

    /// Switch to another view: clean up and schedule a fresh scan
    pub fn navigate(&self, root: ElementId) {
        if !self.shared.alive.get() {
            return;
        }
        if let Some(timer) = self.shared.init_timer.take() {
            self.shared.host.clear_timeout(timer);
        }
        self.shared
            .with_parts(|doc, dispatcher| dispatcher.cleanup(doc));
        schedule_init(&self.shared, root);
    }

    pub fn is_attached(&self) -> bool {
        self.shared.alive.get()
    }

    pub fn document(&self) -> Rc<RefCell<Document>> {
        self.shared.doc.clone()
    }

    pub fn dispatcher(&self) -> Rc<RefCell<RevealDispatcher>> {
        self.shared.dispatcher.clone()
    }

    /// Cancel the pending scan, the frame loop and every listener, then
    /// clean up. Idempotent.
    pub fn detach(&self) {
        if release(&self.shared) {
            debug!("RevealMount: detached");
        }
    }
}

impl Drop for RevealMount {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Cancel everything `shared` scheduled on the host and clean up. Returns
/// `false` if it was already released.
fn release(shared: &MountState) -> bool {
    if !shared.alive.replace(false) {
        return false;
    }
    if let Some(timer) = shared.init_timer.take() {
        shared.host.clear_timeout(timer);
    }
    if let Some(frame) = shared.frame.take() {
        shared.host.cancel_frame(frame);
    }
    for id in shared.listeners.borrow_mut().drain(..) {
        shared.host.remove_listener(id);
    }
    shared.with_parts(|doc, dispatcher| dispatcher.cleanup(doc));
    true
}

fn schedule_init(shared: &Rc<MountState>, root: ElementId) {
    let weak = Rc::downgrade(shared);
    let delay = shared.dispatcher.borrow().config().init_delay_ms;
    let timer = shared.host.set_timeout(
        delay,
        Box::new(move || {
            let Some(shared) = weak.upgrade() else { return };
            shared.init_timer.set(None);
            if !shared.alive.get() {
                return;
            }
            shared.sync_environment();
            shared.with_parts(|doc, dispatcher| dispatcher.init(doc, root));
        }),
    );
    shared.init_timer.set(Some(timer));
}

fn request_tick(shared: &Rc<MountState>) {
    let weak: Weak<MountState> = Rc::downgrade(shared);
    let frame = shared.host.request_frame(Box::new(move |now_ms: f64| {
        let Some(shared) = weak.upgrade() else { return };
        if !shared.alive.get() {
            return;
        }
        let dt = shared
            .last_frame_ms
            .replace(Some(now_ms))
            .map_or(0.0, |last| (now_ms - last).max(0.0));
        shared.with_parts(|doc, dispatcher| dispatcher.tick(doc, dt as f32));
        request_tick(&shared);
    }));
    shared.frame.set(Some(frame));
}

fn add_listeners(shared: &Rc<MountState>) {
    let kinds = [
        EventKind::Scroll,
        EventKind::Resize,
        EventKind::PointerMove,
        EventKind::PointerLeave,
    ];
    let mut ids = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let weak = Rc::downgrade(shared);
        let id = shared.host.add_listener(
            kind,
            Rc::new(move |event: &Event| {
                let Some(shared) = weak.upgrade() else { return };
                if shared.alive.get() {
                    handle_event(&shared, event);
                }
            }),
        );
        ids.push(id);
    }
    shared.listeners.borrow_mut().extend(ids);
}

fn handle_event(shared: &MountState, event: &Event) {
    shared.with_parts(|doc, dispatcher| match event {
        Event::Window(WindowEvent::Scrolled { scroll_y }) => {
            doc.set_scroll_y(*scroll_y);
            dispatcher.on_scroll(doc);
        }
        Event::Window(WindowEvent::Resized(size)) => {
            doc.set_viewport(*size);
            dispatcher.on_scroll(doc);
        }
        Event::Input(InputEvent::Pointer(PointerEvent::Moved { position })) => {
            dispatcher.on_pointer_move(doc, *position);
        }
        Event::Input(InputEvent::Pointer(PointerEvent::Left)) => {
            dispatcher.on_pointer_leave();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use insular_core::{Rect, Size};
    use insular_platform::HeadlessHost;

    #[test]
    fn test_init_waits_for_delay() {
        let host = Rc::new(HeadlessHost::new());
        let doc = Rc::new(RefCell::new(Document::new(Size::new(1280.0, 800.0))));
        let root = doc.borrow().root();
        let hero = doc
            .borrow_mut()
            .create_element(root, "h1", Rect::new(0.0, 100.0, 400.0, 60.0));
        doc.borrow_mut().set_attribute(hero, "data-animate", "fade");
        let dispatcher = Rc::new(RefCell::new(RevealDispatcher::default()));

        let mount = RevealMount::attach(host.clone(), doc.clone(), dispatcher.clone(), root);
        host.advance(79.0);
        assert!(!dispatcher.borrow().is_initialized());
        host.advance(1.0);
        assert!(dispatcher.borrow().is_initialized());
        assert_eq!(doc.borrow().style(hero).unwrap().motion.opacity, 0.0);

        host.run_frames(70);
        assert!(doc.borrow().style(hero).unwrap().motion.is_at_rest());

        mount.detach();
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.pending_frames(), 0);
        assert_eq!(host.timer_count(), 0);
    }

    fn fade_page() -> (Rc<RefCell<Document>>, ElementId, ElementId) {
        let doc = Rc::new(RefCell::new(Document::new(Size::new(1280.0, 800.0))));
        let root = doc.borrow().root();
        let hero = doc
            .borrow_mut()
            .create_element(root, "h1", Rect::new(0.0, 100.0, 400.0, 60.0));
        doc.borrow_mut().set_attribute(hero, "data-animate", "fade");
        (doc, root, hero)
    }

    fn opacity_after(frames: usize, attaches: usize) -> f32 {
        let host = Rc::new(HeadlessHost::new());
        let (doc, root, hero) = fade_page();
        let dispatcher = Rc::new(RefCell::new(RevealDispatcher::default()));
        let mounts: Vec<_> = (0..attaches)
            .map(|_| RevealMount::attach(host.clone(), doc.clone(), dispatcher.clone(), root))
            .collect();
        host.advance(80.0);
        host.run_frames(frames);
        let opacity = doc.borrow().style(hero).unwrap().motion.opacity;
        drop(mounts);
        opacity
    }

    #[test]
    fn test_second_attach_detaches_first() {
        let host = Rc::new(HeadlessHost::new());
        let (doc, root, _hero) = fade_page();
        let dispatcher = Rc::new(RefCell::new(RevealDispatcher::default()));

        let first = RevealMount::attach(host.clone(), doc.clone(), dispatcher.clone(), root);
        let second = RevealMount::attach(host.clone(), doc.clone(), dispatcher.clone(), root);
        assert!(!first.is_attached());
        assert!(second.is_attached());
        assert_eq!(host.pending_frames(), 1);
        assert_eq!(host.listener_count(), 4);
        assert_eq!(host.timer_count(), 1);

        // the stale handle leaves the live mount alone
        drop(first);
        assert!(second.is_attached());
        host.advance(80.0);
        assert!(dispatcher.borrow().is_initialized());
        assert_eq!(host.pending_frames(), 1);
    }

    #[test]
    fn test_second_attach_keeps_tween_speed() {
        let single = opacity_after(27, 1);
        assert!(single > 0.0 && single < 1.0);
        assert_eq!(opacity_after(27, 2), single);
    }

    #[test]
    fn test_drop_before_init_cancels_scan() {
        let host = Rc::new(HeadlessHost::new());
        let doc = Rc::new(RefCell::new(Document::new(Size::new(1280.0, 800.0))));
        let root = doc.borrow().root();
        let dispatcher = Rc::new(RefCell::new(RevealDispatcher::default()));

        drop(RevealMount::attach(host.clone(), doc, dispatcher.clone(), root));
        host.advance(200.0);
        assert!(!dispatcher.borrow().is_initialized());
        assert_eq!(host.timer_count(), 0);
    }
}
