//! The fluid trail renderer
//!
//! [`FluidTrail`] owns one canvas for the lifetime of a mount. It schedules
//! itself on the host every frame, listens for pointer, resize and scroll
//! events, and paints:
//!
//! 1. a translucent wash of the base colour (the trail fade)
//! 2. the brush core and bloom, additively
//! 3. the stamped trail of recent samples
//! 4. the optional secondary glow and particle field
//!
//! Unmounting (or dropping) cancels the frame, the scroll timer and every
//! listener. A canvas without a 2D context makes the whole instance inert.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use insular_core::{BlendMode, Color, DrawContextExt, Point, Size, Transform};
use insular_paint::{Canvas, SurfaceOwner};
use insular_platform::{
    Event, EventKind, FrameHost, FrameId, InputEvent, ListenerId, PointerEvent, TimerId,
    WindowEvent,
};
use insular_theme::{BrandPalette, SharedTheme};
use tracing::{debug, trace, warn};

use crate::brush::{draw_brush, draw_secondary_glow, draw_trail};
use crate::buffer::{TrailBuffer, TrailNode};
use crate::color::{advance_phase, brush_colors, mix};
use crate::config::TrailConfig;
use crate::particles::ParticleField;
use crate::pointer::{drift_target, prime_point, PointerState};

/// What a mounted trail currently looks like, for inspection
#[derive(Clone, Debug, PartialEq)]
pub struct TrailSnapshot {
    pub pointer: PointerState,
    pub trail: Vec<TrailNode>,
    pub particles: usize,
    pub scrolling: bool,
    pub pixel_ratio: f32,
    pub base_color: Color,
    pub palette: BrandPalette,
}

struct TrailState<C: Canvas> {
    host: Rc<dyn FrameHost>,
    canvas: Rc<RefCell<C>>,
    theme: Option<SharedTheme>,
    config: TrailConfig,

    alive: bool,
    frame: Option<FrameId>,
    scroll_timer: Option<TimerId>,
    listeners: Vec<ListenerId>,
    last_frame_ms: Option<f64>,
    owner: Option<Rc<dyn SurfaceOwner>>,

    pixel_ratio: f32,
    css_size: Size,
    base_color: Color,
    palette: BrandPalette,
    pointer: PointerState,
    scrolling: bool,
    trail: TrailBuffer,
    particles: ParticleField,
}

impl<C: Canvas> TrailState<C> {
    /// Size the backing store, resolve colours and paint the base
    ///
    /// Returns `false` when the canvas has no context.
    fn resize(&mut self) -> bool {
        let env = self.host.environment();
        self.pixel_ratio = match env.validate() {
            Ok(()) => env.capped_pixel_ratio(self.config.max_pixel_ratio),
            Err(err) => {
                warn!("FluidTrail: {err}, drawing at 1x");
                1.0
            }
        };

        let mut canvas = self.canvas.borrow_mut();
        let rect = canvas.client_rect();
        self.css_size = rect.size;
        canvas.set_backing_size(
            (rect.width() * self.pixel_ratio).floor().max(0.0) as u32,
            (rect.height() * self.pixel_ratio).floor().max(0.0) as u32,
        );

        if let Some(theme) = &self.theme {
            let theme = theme.borrow();
            self.base_color = theme.base_color();
            self.palette = theme.palette();
        }

        let Some(ctx) = canvas.context() else {
            return false;
        };
        let base = self.base_color;
        ctx.with_transform(Transform::scale(self.pixel_ratio, self.pixel_ratio), |ctx| {
            ctx.fill_rect_xywh(0.0, 0.0, rect.width(), rect.height(), base);
        });
        canvas.present();
        true
    }

    /// Point the brush at a client-space position
    fn pointer_moved(&mut self, client: Point, now_ms: f64) {
        let origin = self.canvas.borrow().client_rect().origin;
        self.pointer
            .set_target(Point::new(client.x - origin.x, client.y - origin.y), now_ms);
    }

    fn render(&mut self, now_ms: f64) {
        let dt = self
            .last_frame_ms
            .replace(now_ms)
            .map_or(0.0, |last| ((now_ms - last) / 1000.0).clamp(0.0, 1.0)) as f32;

        self.pointer.smooth(self.config.smoothing);
        let size = self.canvas.borrow().client_rect().size;
        self.css_size = size;
        if self.pointer.idle_for(now_ms) > self.config.idle_threshold_ms {
            self.pointer.target =
                drift_target(size, now_ms, self.config.drift_x, self.config.drift_y);
        }

        let mut canvas = self.canvas.borrow_mut();
        let Some(ctx) = canvas.context() else {
            return;
        };
        let extent = size.max_side();
        let scrolling = self.scrolling;

        let motion = ctx.with_transform(Transform::scale(self.pixel_ratio, self.pixel_ratio), |ctx| {
            ctx.fill_rect_xywh(
                0.0,
                0.0,
                size.width,
                size.height,
                self.base_color.with_alpha(self.config.fade_alpha(scrolling)),
            );

            ctx.with_blend_mode(BlendMode::Plus, |ctx| {
                let motion = self.pointer.advance();
                self.pointer.color_phase =
                    advance_phase(self.pointer.color_phase, dt, motion.speed);
                let (c1, c2) = brush_colors(&self.palette, self.pointer.color_phase);

                draw_brush(ctx, &motion, c1, extent);

                if self.config.trail {
                    self.trail.push(
                        TrailNode {
                            position: motion.position,
                            angle: motion.angle,
                            speed_norm: motion.speed_norm(),
                            color: c1,
                        },
                        self.config.trail_capacity(scrolling),
                    );
                    draw_trail(ctx, &self.trail, extent);
                }

                if self.config.secondary_glow {
                    draw_secondary_glow(ctx, &motion, c2, extent);
                }

                if self.config.particles {
                    self.particles.spawn(&motion, c1, c2, extent);
                    self.particles
                        .step(ctx, now_ms, motion.position, mix(c1, c2, 0.5), size);
                } else if !self.particles.is_empty() {
                    self.particles.clear();
                }
                motion
            })
        });
        canvas.present();
        trace!(
            "FluidTrail: frame at {:.1}ms speed {:.2} trail {}",
            now_ms,
            motion.speed,
            self.trail.len()
        );
    }

    /// Cancel everything scheduled on the host
    fn teardown(&mut self) {
        self.alive = false;
        if let Some(frame) = self.frame.take() {
            self.host.cancel_frame(frame);
        }
        if let Some(timer) = self.scroll_timer.take() {
            self.host.clear_timeout(timer);
        }
        for id in self.listeners.drain(..) {
            self.host.remove_listener(id);
        }
    }
}

/// The claim a mounted trail holds on its canvas
struct TrailOwner<C: Canvas>(Weak<RefCell<TrailState<C>>>);

impl<C: Canvas> SurfaceOwner for TrailOwner<C> {
    fn release(&self) -> bool {
        let Some(cell) = self.0.upgrade() else {
            return false;
        };
        let Ok(mut state) = cell.try_borrow_mut() else {
            return false;
        };
        if !state.alive {
            return false;
        }
        state.teardown();
        true
    }
}

/// A trail renderer mounted on one canvas
///
/// A canvas has at most one live trail. Mounting on a canvas another trail
/// is drawing to tears that trail down first.
pub struct FluidTrail<C: Canvas + 'static> {
    state: Rc<RefCell<TrailState<C>>>,
}

impl<C: Canvas + 'static> FluidTrail<C> {
    /// Size the canvas, paint its base colour and start the frame loop
    ///
    /// Colours come from `theme` when given, else the built-in fallbacks.
    pub fn mount(
        host: Rc<dyn FrameHost>,
        canvas: Rc<RefCell<C>>,
        theme: Option<SharedTheme>,
        config: TrailConfig,
    ) -> Self {
        let now = host.now_ms();
        let particles = ParticleField::new(config.particle_seed);
        let state = Rc::new(RefCell::new(TrailState {
            host,
            canvas,
            theme,
            config,
            alive: false,
            frame: None,
            scroll_timer: None,
            listeners: Vec::new(),
            last_frame_ms: None,
            owner: None,
            pixel_ratio: 1.0,
            css_size: Size::ZERO,
            base_color: insular_theme::DEFAULT_BASE_COLOR,
            palette: BrandPalette::default(),
            pointer: PointerState::primed(Size::ZERO, now),
            scrolling: false,
            trail: TrailBuffer::new(),
            particles,
        }));
        start(&state);
        Self { state }
    }

    /// Tear down the current run and start over on the same canvas
    pub fn remount(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.alive {
                debug!("FluidTrail: remounting over a live instance");
            }
            state.teardown();
            state.trail.clear();
            state.particles.clear();
            state.scrolling = false;
            state.last_frame_ms = None;
        }
        start(&self.state);
    }

    /// Stop drawing and release the host. Idempotent.
    pub fn unmount(&self) {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            return;
        };
        if state.alive {
            state.teardown();
            debug!("FluidTrail: unmounted");
        }
    }

    /// Whether the instance is drawing; `false` after unmount or when the
    /// canvas has no context
    pub fn is_active(&self) -> bool {
        self.state.borrow().alive
    }

    pub fn canvas(&self) -> Rc<RefCell<C>> {
        self.state.borrow().canvas.clone()
    }

    pub fn snapshot(&self) -> TrailSnapshot {
        let state = self.state.borrow();
        TrailSnapshot {
            pointer: state.pointer,
            trail: state.trail.iter().copied().collect(),
            particles: state.particles.len(),
            scrolling: state.scrolling,
            pixel_ratio: state.pixel_ratio,
            base_color: state.base_color,
            palette: state.palette,
        }
    }
}

impl<C: Canvas + 'static> Drop for FluidTrail<C> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn start<C: Canvas + 'static>(state: &Rc<RefCell<TrailState<C>>>) {
    claim_canvas(state);
    let mut s = state.borrow_mut();
    let now = s.host.now_ms();
    if !s.resize() {
        debug!("FluidTrail: canvas has no 2D context, staying idle");
        return;
    }
    s.pointer = PointerState {
        color_phase: s.pointer.color_phase,
        ..PointerState::primed(s.css_size, now)
    };
    s.alive = true;
    s.listeners = add_listeners(state, s.host.as_ref());
    s.frame = Some(request_frame(state, s.host.as_ref()));
    debug!(
        "FluidTrail: mounted on {}x{} at {}x",
        s.css_size.width, s.css_size.height, s.pixel_ratio
    );
}

fn claim_canvas<C: Canvas + 'static>(state: &Rc<RefCell<TrailState<C>>>) {
    let owner: Rc<dyn SurfaceOwner> = Rc::new(TrailOwner(Rc::downgrade(state)));
    let previous = {
        let mut s = state.borrow_mut();
        let previous = s.canvas.borrow_mut().claim(Rc::downgrade(&owner));
        s.owner = Some(owner);
        previous
    };
    if previous
        .and_then(|previous| previous.upgrade())
        .is_some_and(|previous| previous.release())
    {
        debug!("FluidTrail: tore down the previous trail on this canvas");
    }
}

fn request_frame<C: Canvas + 'static>(
    state: &Rc<RefCell<TrailState<C>>>,
    host: &dyn FrameHost,
) -> FrameId {
    let weak = Rc::downgrade(state);
    host.request_frame(Box::new(move |now_ms: f64| {
        let Some(state) = weak.upgrade() else { return };
        let Ok(mut s) = state.try_borrow_mut() else {
            return;
        };
        if !s.alive {
            return;
        }
        s.frame = None;
        s.render(now_ms);
        let next = request_frame(&state, s.host.as_ref());
        s.frame = Some(next);
    }))
}

fn add_listeners<C: Canvas + 'static>(
    state: &Rc<RefCell<TrailState<C>>>,
    host: &dyn FrameHost,
) -> Vec<ListenerId> {
    [EventKind::PointerMove, EventKind::Resize, EventKind::Scroll]
        .into_iter()
        .map(|kind| {
            let weak = Rc::downgrade(state);
            host.add_listener(
                kind,
                Rc::new(move |event: &Event| {
                    if let Some(state) = weak.upgrade() {
                        handle_event(&state, event);
                    }
                }),
            )
        })
        .collect()
}

fn handle_event<C: Canvas + 'static>(state: &Rc<RefCell<TrailState<C>>>, event: &Event) {
    let Ok(mut s) = state.try_borrow_mut() else {
        return;
    };
    if !s.alive {
        return;
    }
    let now = s.host.now_ms();
    match event {
        Event::Input(InputEvent::Pointer(PointerEvent::Moved { position })) => {
            s.pointer_moved(*position, now);
        }
        Event::Window(WindowEvent::Resized(_)) => {
            if s.resize() {
                let prime = prime_point(s.css_size);
                s.pointer.set_target(prime, now);
            }
        }
        Event::Window(WindowEvent::Scrolled { .. }) => {
            s.scrolling = true;
            if let Some(timer) = s.scroll_timer.take() {
                s.host.clear_timeout(timer);
            }
            let weak: Weak<RefCell<TrailState<C>>> = Rc::downgrade(state);
            let timer = s.host.set_timeout(
                s.config.scroll_quiet_ms,
                Box::new(move || {
                    let Some(state) = weak.upgrade() else { return };
                    if let Ok(mut s) = state.try_borrow_mut() {
                        s.scrolling = false;
                        s.scroll_timer = None;
                    };
                }),
            );
            s.scroll_timer = Some(timer);
        }
        Event::Input(InputEvent::Pointer(PointerEvent::Left)) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insular_core::Rect;
    use insular_paint::RecordingCanvas;
    use insular_platform::HeadlessHost;

    fn mount_on(
        host: &Rc<HeadlessHost>,
        rect: Rect,
        config: TrailConfig,
    ) -> FluidTrail<RecordingCanvas> {
        let canvas = Rc::new(RefCell::new(RecordingCanvas::new(rect)));
        FluidTrail::mount(host.clone(), canvas, None, config)
    }

    #[test]
    fn test_mount_paints_base() {
        let host = Rc::new(HeadlessHost::new());
        let trail = mount_on(&host, Rect::new(0.0, 0.0, 300.0, 150.0), TrailConfig::default());
        assert!(trail.is_active());

        let canvas = trail.canvas();
        let canvas = canvas.borrow();
        assert_eq!(canvas.frames_presented(), 1);
        assert_eq!(canvas.last_frame().len(), 3);
        assert_eq!(host.pending_frames(), 1);
        assert_eq!(host.listener_count(), 3);

        let snapshot = trail.snapshot();
        assert_eq!(snapshot.pointer.target, Point::new(150.0, 50.0));
        assert_eq!(snapshot.base_color.to_rgb8(), [16, 16, 33]);
    }

    #[test]
    fn test_pointer_is_canvas_local() {
        let host = Rc::new(HeadlessHost::new());
        let trail = mount_on(
            &host,
            Rect::new(100.0, 200.0, 300.0, 150.0),
            TrailConfig::default(),
        );
        host.dispatch(Event::pointer_moved(250.0, 275.0));
        assert_eq!(trail.snapshot().pointer.target, Point::new(150.0, 75.0));
    }

    #[test]
    fn test_scroll_flag_clears_after_quiet_period() {
        let host = Rc::new(HeadlessHost::new());
        let trail = mount_on(&host, Rect::new(0.0, 0.0, 300.0, 150.0), TrailConfig::default());

        host.dispatch(Event::scrolled(10.0));
        host.advance(100.0);
        host.dispatch(Event::scrolled(20.0));
        assert_eq!(host.timer_count(), 1);
        host.advance(100.0);
        assert!(trail.snapshot().scrolling);
        host.advance(60.0);
        assert!(!trail.snapshot().scrolling);
        assert_eq!(host.timer_count(), 0);
    }

    #[test]
    fn test_scrolling_thins_trail() {
        let host = Rc::new(HeadlessHost::new());
        let trail = mount_on(&host, Rect::new(0.0, 0.0, 300.0, 150.0), TrailConfig::default());
        host.run_frames(30);
        assert_eq!(trail.snapshot().trail.len(), 24);

        host.dispatch(Event::scrolled(5.0));
        host.run_frame();
        assert_eq!(trail.snapshot().trail.len(), 6);
    }
}
